use uuid::Uuid;

use crate::auth::Actor;
use crate::db::businesses as business_db;
use crate::db::contacts as contact_db;
use crate::db::leads as lead_db;
use crate::db::users as user_db;
use crate::error::{CrmError, CrmResult};
use crate::models::leads::{self, LeadFilter, LeadForm};
use crate::models::notifications::{NewNotification, NotificationKind};
use crate::models::permissions::{Action, Module};
use crate::models::{Page, clean};
use crate::services::{notifications, validation};
use crate::state::AppState;

async fn validate(state: &AppState, form: LeadForm) -> CrmResult<LeadForm> {
    let form = LeadForm {
        title: validation::required("Title", &form.title)?,
        description: clean(form.description),
        value: validation::optional_non_negative("Value", form.value)?,
        ..form
    };

    if let Some(business_id) = form.business_id {
        if !business_db::business_exists(&state.db, business_id).await? {
            return Err(CrmError::validation("Selected business does not exist"));
        }
    }
    if let Some(contact_id) = form.contact_id {
        if contact_db::get_contact_by_id(&state.db, contact_id).await?.is_none() {
            return Err(CrmError::validation("Selected contact does not exist"));
        }
    }
    if let Some(user_id) = form.assigned_to {
        if user_db::get_user_by_id(&state.db, user_id).await?.is_none() {
            return Err(CrmError::validation("Selected assignee does not exist"));
        }
    }

    Ok(form)
}

/// Tell a newly assigned user about the lead, unless they assigned it to themselves.
/// The lead is already saved, so a failed notice is logged and not returned.
async fn notify_assignee(state: &AppState, actor: &Actor, lead: &leads::Model) {
    let Some(assignee) = lead.assigned_to.filter(|id| *id != actor.id) else {
        return;
    };

    let sent = notifications::append(
        state,
        NewNotification {
            user_id: assignee,
            kind: NotificationKind::LeadAssigned,
            title: "New lead assigned".to_string(),
            message: format!("{} assigned you the lead \"{}\"", actor.name, lead.title),
            link: Some(format!("/leads/{}", lead.id)),
        },
    )
    .await;
    if let Err(e) = sent {
        tracing::warn!(lead = %lead.id, assignee = %assignee, "Could not notify assignee: {e:?}");
    }
}

pub async fn create_lead(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: LeadForm,
) -> CrmResult<leads::Model> {
    state
        .authorize_mutation(actor, Module::Lead, Action::Create, csrf_token)
        .await?;
    let form = validate(state, form).await?;

    let lead = lead_db::insert_lead(&state.db, form, actor.id).await?;
    tracing::info!(lead = %lead.id, actor = %actor.id, "Created lead");
    notify_assignee(state, actor, &lead).await;
    Ok(lead)
}

pub async fn get_lead(state: &AppState, actor: &Actor, id: Uuid) -> CrmResult<leads::Model> {
    state.authorize(actor, Module::Lead, Action::View).await?;
    lead_db::get_lead_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Lead", id))
}

pub async fn list_leads(
    state: &AppState,
    actor: &Actor,
    filter: LeadFilter,
) -> CrmResult<Page<leads::Model>> {
    state.authorize(actor, Module::Lead, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    Ok(lead_db::get_leads_paginated(&state.db, &filter, page, state.config.page_size).await?)
}

pub async fn update_lead(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: LeadForm,
) -> CrmResult<leads::Model> {
    state
        .authorize_mutation(actor, Module::Lead, Action::Edit, csrf_token)
        .await?;
    let form = validate(state, form).await?;
    let lead = lead_db::get_lead_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Lead", id))?;
    let previous_assignee = lead.assigned_to;

    let updated = lead_db::update_lead(&state.db, lead, form).await?;
    tracing::info!(lead = %id, actor = %actor.id, "Updated lead");
    if updated.assigned_to != previous_assignee {
        notify_assignee(state, actor, &updated).await;
    }
    Ok(updated)
}

/// Offers of the lead survive with `lead_id` cleared. The detach and the delete
/// commit together; a store failure rolls both back.
pub async fn delete_lead(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::Lead, Action::Delete, csrf_token)
        .await?;
    if lead_db::get_lead_by_id(&state.db, id).await?.is_none() {
        return Err(CrmError::not_found("Lead", id));
    }

    let detached = lead_db::delete_lead_detaching_offers(&state.db, id).await?;
    tracing::info!(lead = %id, actor = %actor.id, detached, "Deleted lead");
    Ok(())
}
