use uuid::Uuid;

use crate::auth::Actor;
use crate::db::agreement_types as agreement_type_db;
use crate::db::businesses as business_db;
use crate::db::service_agreements as agreement_db;
use crate::error::{CrmError, CrmResult};
use crate::models::Page;
use crate::models::permissions::{Action, Module};
use crate::models::service_agreements::{self, ServiceAgreementFilter, ServiceAgreementForm};
use crate::services::validation;
use crate::state::AppState;

/// The type must exist and be active, unless the agreement already had that type.
async fn validate(
    state: &AppState,
    form: ServiceAgreementForm,
    current_type: Option<&str>,
) -> CrmResult<ServiceAgreementForm> {
    let form = ServiceAgreementForm {
        title: validation::required("Title", &form.title)?,
        agreement_type: validation::required("Agreement type", &form.agreement_type)?,
        price: validation::optional_non_negative("Price", form.price)?,
        ..form
    };
    validation::date_range(Some(form.start_date), form.end_date)?;

    let agreement_type =
        agreement_type_db::get_agreement_type_by_name(&state.db, &form.agreement_type).await?;
    match agreement_type {
        Some(t) if t.is_active || current_type == Some(t.name.as_str()) => {}
        Some(_) => return Err(CrmError::validation("Selected agreement type is not active")),
        None => return Err(CrmError::validation("Selected agreement type does not exist")),
    }

    if !business_db::business_exists(&state.db, form.business_id).await? {
        return Err(CrmError::validation("Selected business does not exist"));
    }

    Ok(form)
}

pub async fn create_service_agreement(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: ServiceAgreementForm,
) -> CrmResult<service_agreements::Model> {
    state
        .authorize_mutation(actor, Module::ServiceAgreement, Action::Create, csrf_token)
        .await?;
    let form = validate(state, form, None).await?;

    let agreement = agreement_db::insert_service_agreement(&state.db, form, actor.id).await?;
    tracing::info!(service_agreement = %agreement.id, actor = %actor.id, "Created service agreement");
    Ok(agreement)
}

pub async fn get_service_agreement(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> CrmResult<service_agreements::Model> {
    state.authorize(actor, Module::ServiceAgreement, Action::View).await?;
    agreement_db::get_service_agreement_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Service agreement", id))
}

pub async fn list_service_agreements(
    state: &AppState,
    actor: &Actor,
    filter: ServiceAgreementFilter,
) -> CrmResult<Page<service_agreements::Model>> {
    state.authorize(actor, Module::ServiceAgreement, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    Ok(agreement_db::get_service_agreements_paginated(
        &state.db,
        &filter,
        page,
        state.config.page_size,
    )
    .await?)
}

pub async fn update_service_agreement(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: ServiceAgreementForm,
) -> CrmResult<service_agreements::Model> {
    state
        .authorize_mutation(actor, Module::ServiceAgreement, Action::Edit, csrf_token)
        .await?;
    let agreement = agreement_db::get_service_agreement_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Service agreement", id))?;
    let form = validate(state, form, Some(&agreement.agreement_type)).await?;

    let updated = agreement_db::update_service_agreement(&state.db, agreement, form).await?;
    tracing::info!(service_agreement = %id, actor = %actor.id, "Updated service agreement");
    Ok(updated)
}

pub async fn delete_service_agreement(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::ServiceAgreement, Action::Delete, csrf_token)
        .await?;
    let result = agreement_db::delete_service_agreement(&state.db, id).await?;
    if result.rows_affected == 0 {
        return Err(CrmError::not_found("Service agreement", id));
    }

    tracing::info!(service_agreement = %id, actor = %actor.id, "Deleted service agreement");
    Ok(())
}
