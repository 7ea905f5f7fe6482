use uuid::Uuid;

use crate::auth::Actor;
use crate::db::businesses as business_db;
use crate::db::leads as lead_db;
use crate::db::offers as offer_db;
use crate::error::{CrmError, CrmResult};
use crate::models::offers::{self, OfferFilter, OfferForm, OfferStatus};
use crate::models::permissions::{Action, Module};
use crate::models::{Page, clean};
use crate::services::validation;
use crate::state::AppState;

/// A missing business is taken from the selected lead.
async fn validate(state: &AppState, form: OfferForm) -> CrmResult<OfferForm> {
    let mut form = OfferForm {
        title: validation::required("Title", &form.title)?,
        description: clean(form.description),
        amount: validation::non_negative("Amount", form.amount)?,
        ..form
    };

    if let Some(lead_id) = form.lead_id {
        let lead = lead_db::get_lead_by_id(&state.db, lead_id)
            .await?
            .ok_or_else(|| CrmError::validation("Selected lead does not exist"))?;
        form.business_id = form.business_id.or(lead.business_id);
    }
    if let Some(business_id) = form.business_id {
        if !business_db::business_exists(&state.db, business_id).await? {
            return Err(CrmError::validation("Selected business does not exist"));
        }
    }

    Ok(form)
}

pub async fn create_offer(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: OfferForm,
) -> CrmResult<offers::Model> {
    state
        .authorize_mutation(actor, Module::Offer, Action::Create, csrf_token)
        .await?;
    let form = validate(state, form).await?;

    let offer = offer_db::insert_offer(&state.db, form, actor.id).await?;
    tracing::info!(offer = %offer.id, actor = %actor.id, "Created offer");
    Ok(offer)
}

pub async fn get_offer(state: &AppState, actor: &Actor, id: Uuid) -> CrmResult<offers::Model> {
    state.authorize(actor, Module::Offer, Action::View).await?;
    offer_db::get_offer_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Offer", id))
}

pub async fn list_offers(
    state: &AppState,
    actor: &Actor,
    filter: OfferFilter,
) -> CrmResult<Page<offers::Model>> {
    state.authorize(actor, Module::Offer, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    Ok(offer_db::get_offers_paginated(&state.db, &filter, page, state.config.page_size).await?)
}

pub async fn list_offers_for_lead(
    state: &AppState,
    actor: &Actor,
    lead_id: Uuid,
) -> CrmResult<Vec<offers::Model>> {
    state.authorize(actor, Module::Offer, Action::View).await?;
    Ok(offer_db::get_offers_by_lead_id(&state.db, lead_id).await?)
}

/// An offer that projects were created from stays accepted.
pub async fn update_offer(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: OfferForm,
) -> CrmResult<offers::Model> {
    state
        .authorize_mutation(actor, Module::Offer, Action::Edit, csrf_token)
        .await?;
    let form = validate(state, form).await?;
    let offer = offer_db::get_offer_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Offer", id))?;

    if form.status != OfferStatus::Accepted {
        let projects = offer_db::count_projects(&state.db, id).await?;
        if projects > 0 {
            return Err(CrmError::conflict(format!(
                "Cannot change offer status: {projects} project(s) were created from it"
            )));
        }
    }

    let updated = offer_db::update_offer(&state.db, offer, form).await?;
    tracing::info!(offer = %id, actor = %actor.id, status = ?updated.status, "Updated offer");
    Ok(updated)
}

/// Refused while a project was created from the offer.
pub async fn delete_offer(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::Offer, Action::Delete, csrf_token)
        .await?;
    if offer_db::get_offer_by_id(&state.db, id).await?.is_none() {
        return Err(CrmError::not_found("Offer", id));
    }

    let projects = offer_db::count_projects(&state.db, id).await?;
    if projects > 0 {
        return Err(CrmError::conflict(format!(
            "Cannot delete offer: {projects} project(s) were created from it"
        )));
    }

    offer_db::delete_offer(&state.db, id).await?;
    tracing::info!(offer = %id, actor = %actor.id, "Deleted offer");
    Ok(())
}
