use uuid::Uuid;

use crate::auth::Actor;
use crate::db::businesses as business_db;
use crate::error::{CrmError, CrmResult};
use crate::models::businesses::{self, BusinessFilter, BusinessForm};
use crate::models::permissions::{Action, Module};
use crate::models::{Page, clean};
use crate::services::validation;
use crate::state::AppState;

fn validate(form: BusinessForm) -> CrmResult<BusinessForm> {
    Ok(BusinessForm {
        name: validation::required("Business name", &form.name)?,
        registration_number: clean(form.registration_number),
        address: clean(form.address),
        phone: clean(form.phone),
        email: validation::optional_email("Email", form.email)?,
        website: clean(form.website),
        industry: clean(form.industry),
        description: clean(form.description),
    })
}

async fn ensure_name_free(state: &AppState, name: &str, exclude: Option<Uuid>) -> CrmResult<()> {
    if business_db::name_taken(&state.db, name, exclude).await? {
        return Err(CrmError::conflict(format!(
            "A business named \"{name}\" already exists"
        )));
    }
    Ok(())
}

pub async fn create_business(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: BusinessForm,
) -> CrmResult<businesses::Model> {
    state
        .authorize_mutation(actor, Module::Business, Action::Create, csrf_token)
        .await?;
    let form = validate(form)?;
    ensure_name_free(state, &form.name, None).await?;

    let business = business_db::insert_business(&state.db, form, actor.id).await?;
    tracing::info!(business = %business.id, actor = %actor.id, "Created business");
    Ok(business)
}

pub async fn get_business(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> CrmResult<businesses::Model> {
    state.authorize(actor, Module::Business, Action::View).await?;
    business_db::get_business_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Business", id))
}

pub async fn list_businesses(
    state: &AppState,
    actor: &Actor,
    filter: BusinessFilter,
) -> CrmResult<Page<businesses::Model>> {
    state.authorize(actor, Module::Business, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    Ok(business_db::get_businesses_paginated(&state.db, &filter, page, state.config.page_size).await?)
}

pub async fn update_business(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: BusinessForm,
) -> CrmResult<businesses::Model> {
    state
        .authorize_mutation(actor, Module::Business, Action::Edit, csrf_token)
        .await?;
    let form = validate(form)?;
    let business = business_db::get_business_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Business", id))?;
    ensure_name_free(state, &form.name, Some(id)).await?;

    let updated = business_db::update_business(&state.db, business, form).await?;
    tracing::info!(business = %id, actor = %actor.id, "Updated business");
    Ok(updated)
}

/// Deleting is refused while contacts, leads, offers, projects or service agreements
/// still reference the business; dependents are never removed or orphaned.
pub async fn delete_business(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::Business, Action::Delete, csrf_token)
        .await?;
    if !business_db::business_exists(&state.db, id).await? {
        return Err(CrmError::not_found("Business", id));
    }

    let dependents = business_db::count_dependents(&state.db, id).await?;
    if dependents.total() > 0 {
        return Err(CrmError::conflict(format!(
            "Cannot delete business: it still has {} contact(s), {} lead(s), {} offer(s), {} project(s) and {} service agreement(s)",
            dependents.contacts,
            dependents.leads,
            dependents.offers,
            dependents.projects,
            dependents.service_agreements
        )));
    }

    business_db::delete_business(&state.db, id).await?;
    tracing::info!(business = %id, actor = %actor.id, "Deleted business");
    Ok(())
}
