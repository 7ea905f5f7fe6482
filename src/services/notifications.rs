//! Per-user notification feed. Every read and write is scoped to the actor, so no
//! permission key is involved.

use crate::auth::Actor;
use crate::db::notifications as notification_db;
use crate::error::CrmResult;
use crate::models::Page;
use crate::models::notifications::{self, NewNotification};
use crate::state::AppState;

/// Internal: workflows call this to notify a user. Not exposed over HTTP.
pub async fn append(state: &AppState, input: NewNotification) -> CrmResult<notifications::Model> {
    let notification = notification_db::insert_notification(&state.db, input).await?;
    tracing::debug!(user = %notification.user_id, kind = ?notification.kind, "Appended notification");
    Ok(notification)
}

pub async fn list_recent(
    state: &AppState,
    actor: &Actor,
    limit: u64,
) -> CrmResult<Vec<notifications::Model>> {
    Ok(notification_db::get_recent(&state.db, actor.id, limit).await?)
}

pub async fn list_page(
    state: &AppState,
    actor: &Actor,
    page: u64,
) -> CrmResult<Page<notifications::Model>> {
    Ok(notification_db::get_paginated(&state.db, actor.id, page.max(1), state.config.page_size).await?)
}

pub async fn unread_count(state: &AppState, actor: &Actor) -> CrmResult<u64> {
    Ok(notification_db::count_unread(&state.db, actor.id).await?)
}

pub async fn mark_all_read(state: &AppState, actor: &Actor) -> CrmResult<u64> {
    let marked = notification_db::mark_all_read(&state.db, actor.id).await?;
    if marked > 0 {
        tracing::debug!(user = %actor.id, marked, "Marked notifications read");
    }
    Ok(marked)
}

/// The full notification list as the user sees it. Loads the page first, then
/// marks everything read, so the returned rows still show what was unread.
/// A notification appended between the two calls is marked read without having
/// been listed.
pub async fn view_all(
    state: &AppState,
    actor: &Actor,
    page: u64,
) -> CrmResult<Page<notifications::Model>> {
    let listed = list_page(state, actor, page).await?;
    mark_all_read(state, actor).await?;
    Ok(listed)
}
