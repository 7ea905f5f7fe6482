use uuid::Uuid;

use crate::auth::Actor;
use crate::db::businesses as business_db;
use crate::db::offers as offer_db;
use crate::db::projects::{self as project_db, ProjectRecord};
use crate::error::{CrmError, CrmResult};
use crate::models::offers::OfferStatus;
use crate::models::permissions::{Action, Module};
use crate::models::projects::{self, ProjectFilter, ProjectForm};
use crate::models::{Page, clean};
use crate::services::validation;
use crate::state::AppState;

/// Turns a submitted form into a storable record. A source offer must be
/// accepted; it fills in `business_id` and `budget` only where the form left
/// them empty.
async fn prepare(state: &AppState, form: ProjectForm) -> CrmResult<ProjectRecord> {
    let name = validation::required("Project name", &form.name)?;
    validation::date_range(form.start_date, form.end_date)?;
    let mut budget = validation::optional_non_negative("Budget", form.budget)?;
    let mut business_id = form.business_id;

    if let Some(offer_id) = form.offer_id {
        let offer = offer_db::get_offer_by_id(&state.db, offer_id)
            .await?
            .ok_or_else(|| CrmError::validation("Selected offer does not exist"))?;
        if offer.status != OfferStatus::Accepted {
            return Err(CrmError::validation(
                "Only accepted offers can be linked to a project",
            ));
        }
        business_id = business_id.or(offer.business_id);
        budget = budget.or(Some(offer.amount));
    }

    let business_id = business_id.ok_or_else(|| CrmError::validation("Business is required"))?;
    if !business_db::business_exists(&state.db, business_id).await? {
        return Err(CrmError::validation("Selected business does not exist"));
    }

    Ok(ProjectRecord {
        name,
        description: clean(form.description),
        status: form.status,
        start_date: form.start_date,
        end_date: form.end_date,
        budget,
        business_id,
        offer_id: form.offer_id,
    })
}

pub async fn create_project(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: ProjectForm,
) -> CrmResult<projects::Model> {
    state
        .authorize_mutation(actor, Module::Project, Action::Create, csrf_token)
        .await?;
    let record = prepare(state, form).await?;

    let project = project_db::insert_project(&state.db, record, actor.id).await?;
    tracing::info!(project = %project.id, actor = %actor.id, "Created project");
    Ok(project)
}

pub async fn get_project(state: &AppState, actor: &Actor, id: Uuid) -> CrmResult<projects::Model> {
    state.authorize(actor, Module::Project, Action::View).await?;
    project_db::get_project_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Project", id))
}

pub async fn list_projects(
    state: &AppState,
    actor: &Actor,
    filter: ProjectFilter,
) -> CrmResult<Page<projects::Model>> {
    state.authorize(actor, Module::Project, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    Ok(project_db::get_projects_paginated(&state.db, &filter, page, state.config.page_size).await?)
}

pub async fn update_project(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: ProjectForm,
) -> CrmResult<projects::Model> {
    state
        .authorize_mutation(actor, Module::Project, Action::Edit, csrf_token)
        .await?;
    let project = project_db::get_project_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Project", id))?;
    let record = prepare(state, form).await?;

    let updated = project_db::update_project(&state.db, project, record).await?;
    tracing::info!(project = %id, actor = %actor.id, "Updated project");
    Ok(updated)
}

pub async fn delete_project(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::Project, Action::Delete, csrf_token)
        .await?;
    let result = project_db::delete_project(&state.db, id).await?;
    if result.rows_affected == 0 {
        return Err(CrmError::not_found("Project", id));
    }

    tracing::info!(project = %id, actor = %actor.id, "Deleted project");
    Ok(())
}
