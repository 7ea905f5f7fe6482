use uuid::Uuid;

use crate::auth::Actor;
use crate::db::businesses as business_db;
use crate::db::contacts as contact_db;
use crate::error::{CrmError, CrmResult};
use crate::models::contacts::{self, ContactFilter, ContactForm};
use crate::models::permissions::{Action, Module};
use crate::models::{Page, clean};
use crate::services::validation;
use crate::state::AppState;

async fn validate(state: &AppState, form: ContactForm) -> CrmResult<ContactForm> {
    let form = ContactForm {
        first_name: validation::required("First name", &form.first_name)?,
        last_name: validation::required("Last name", &form.last_name)?,
        position: clean(form.position),
        email: validation::optional_email("Email", form.email)?,
        phone: clean(form.phone),
        business_id: form.business_id,
    };

    if let Some(business_id) = form.business_id {
        if !business_db::business_exists(&state.db, business_id).await? {
            return Err(CrmError::validation("Selected business does not exist"));
        }
    }

    Ok(form)
}

pub async fn create_contact(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: ContactForm,
) -> CrmResult<contacts::Model> {
    state
        .authorize_mutation(actor, Module::Contact, Action::Create, csrf_token)
        .await?;
    let form = validate(state, form).await?;

    let contact = contact_db::insert_contact(&state.db, form, actor.id).await?;
    tracing::info!(contact = %contact.id, actor = %actor.id, "Created contact");
    Ok(contact)
}

pub async fn get_contact(state: &AppState, actor: &Actor, id: Uuid) -> CrmResult<contacts::Model> {
    state.authorize(actor, Module::Contact, Action::View).await?;
    contact_db::get_contact_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Contact", id))
}

pub async fn list_contacts(
    state: &AppState,
    actor: &Actor,
    filter: ContactFilter,
) -> CrmResult<Page<contacts::Model>> {
    state.authorize(actor, Module::Contact, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    Ok(contact_db::get_contacts_paginated(&state.db, &filter, page, state.config.page_size).await?)
}

pub async fn update_contact(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: ContactForm,
) -> CrmResult<contacts::Model> {
    state
        .authorize_mutation(actor, Module::Contact, Action::Edit, csrf_token)
        .await?;
    let form = validate(state, form).await?;
    let contact = contact_db::get_contact_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Contact", id))?;

    let updated = contact_db::update_contact(&state.db, contact, form).await?;
    tracing::info!(contact = %id, actor = %actor.id, "Updated contact");
    Ok(updated)
}

/// Leads that referenced the contact keep existing with `contact_id` cleared.
pub async fn delete_contact(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::Contact, Action::Delete, csrf_token)
        .await?;
    if contact_db::get_contact_by_id(&state.db, id).await?.is_none() {
        return Err(CrmError::not_found("Contact", id));
    }

    let detached = contact_db::delete_contact_detaching_leads(&state.db, id).await?;
    tracing::info!(contact = %id, actor = %actor.id, detached, "Deleted contact");
    Ok(())
}
