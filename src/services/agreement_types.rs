use uuid::Uuid;

use crate::auth::Actor;
use crate::db::agreement_types as agreement_type_db;
use crate::error::{CrmError, CrmResult};
use crate::models::agreement_types::{self, AgreementTypeForm, AgreementTypeSummary};
use crate::models::clean;
use crate::models::permissions::{Action, Module};
use crate::services::validation;
use crate::state::AppState;

pub async fn create_agreement_type(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: AgreementTypeForm,
) -> CrmResult<agreement_types::Model> {
    state
        .authorize_mutation(actor, Module::AgreementType, Action::Create, csrf_token)
        .await?;
    let form = AgreementTypeForm {
        name: validation::machine_name("Name", &form.name)?,
        label: validation::required("Label", &form.label)?,
        description: clean(form.description),
        is_active: form.is_active,
    };
    if agreement_type_db::name_taken(&state.db, &form.name, None).await? {
        return Err(CrmError::conflict(format!(
            "An agreement type named \"{}\" already exists",
            form.name
        )));
    }

    let created = agreement_type_db::insert_agreement_type(&state.db, form).await?;
    tracing::info!(agreement_type = %created.name, actor = %actor.id, "Created agreement type");
    Ok(created)
}

pub async fn get_agreement_type(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> CrmResult<AgreementTypeSummary> {
    state.authorize(actor, Module::AgreementType, Action::View).await?;
    let agreement_type = agreement_type_db::get_agreement_type_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Agreement type", id))?;
    let usage_count = agreement_type_db::count_usage(&state.db, &agreement_type.name).await?;

    Ok(AgreementTypeSummary {
        agreement_type,
        usage_count,
    })
}

pub async fn list_agreement_types(
    state: &AppState,
    actor: &Actor,
) -> CrmResult<Vec<AgreementTypeSummary>> {
    state.authorize(actor, Module::AgreementType, Action::View).await?;
    Ok(agreement_type_db::get_agreement_types_with_usage(&state.db).await?)
}

/// While any service agreement uses the type, its `name` is frozen: a submitted
/// name is ignored and only label, description and the active flag change. An
/// unused type may be renamed; the rename and the rewrite of referencing rows
/// commit together.
pub async fn update_agreement_type(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: AgreementTypeForm,
) -> CrmResult<agreement_types::Model> {
    state
        .authorize_mutation(actor, Module::AgreementType, Action::Edit, csrf_token)
        .await?;
    let existing = agreement_type_db::get_agreement_type_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Agreement type", id))?;

    let in_use = agreement_type_db::count_usage(&state.db, &existing.name).await? > 0;
    let name = if in_use {
        existing.name.clone()
    } else {
        let name = validation::machine_name("Name", &form.name)?;
        if name != existing.name && agreement_type_db::name_taken(&state.db, &name, Some(id)).await? {
            return Err(CrmError::conflict(format!(
                "An agreement type named \"{name}\" already exists"
            )));
        }
        name
    };

    let form = AgreementTypeForm {
        name,
        label: validation::required("Label", &form.label)?,
        description: clean(form.description),
        is_active: form.is_active,
    };

    let (updated, rewritten) =
        agreement_type_db::update_agreement_type(&state.db, existing, form).await?;
    tracing::info!(
        agreement_type = %updated.name,
        actor = %actor.id,
        rewritten,
        "Updated agreement type"
    );
    Ok(updated)
}

pub async fn delete_agreement_type(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::AgreementType, Action::Delete, csrf_token)
        .await?;
    let existing = agreement_type_db::get_agreement_type_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Agreement type", id))?;

    let usage = agreement_type_db::count_usage(&state.db, &existing.name).await?;
    if usage > 0 {
        return Err(CrmError::conflict(format!(
            "Cannot delete agreement type \"{}\": it is used by {usage} service agreement(s)",
            existing.label
        )));
    }

    agreement_type_db::delete_agreement_type(&state.db, id).await?;
    tracing::info!(agreement_type = %existing.name, actor = %actor.id, "Deleted agreement type");
    Ok(())
}
