use uuid::Uuid;

use crate::auth::Actor;
use crate::db::roles as role_db;
use crate::db::users::{self as user_db, UserChanges};
use crate::error::{CrmError, CrmResult};
use crate::models::Page;
use crate::models::permissions::{Action, Module};
use crate::models::users::{self, CreateUser, UpdateUser, UserFilter, UserResponse};
use crate::services::auth::hash_password;
use crate::services::validation;
use crate::state::AppState;

fn is_master_admin(state: &AppState, user: &users::Model) -> bool {
    user.email.eq_ignore_ascii_case(&state.config.master_admin_email)
}

async fn ensure_role_exists(state: &AppState, role_id: Uuid) -> CrmResult<()> {
    if role_db::get_role_by_id(&state.db, role_id).await?.is_none() {
        return Err(CrmError::validation("Selected role does not exist"));
    }
    Ok(())
}

async fn ensure_email_free(state: &AppState, email: &str, exclude: Option<Uuid>) -> CrmResult<()> {
    if user_db::email_taken(&state.db, email, exclude).await? {
        return Err(CrmError::conflict(format!(
            "A user with email \"{email}\" already exists"
        )));
    }
    Ok(())
}

pub async fn create_user(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: CreateUser,
) -> CrmResult<UserResponse> {
    state
        .authorize_mutation(actor, Module::User, Action::Create, csrf_token)
        .await?;
    let name = validation::required("Name", &form.name)?;
    let email = validation::email("Email", &form.email)?;
    validation::new_password(&form.password, &form.password_confirm)?;
    ensure_role_exists(state, form.role_id).await?;
    ensure_email_free(state, &email, None).await?;

    let hash = hash_password(&form.password, state.config.bcrypt_cost).await?;
    let user = user_db::insert_user(&state.db, name, email, form.role_id, hash).await?;
    tracing::info!(user = %user.id, actor = %actor.id, "Created user");
    Ok(user.into())
}

pub async fn get_user(state: &AppState, actor: &Actor, id: Uuid) -> CrmResult<UserResponse> {
    state.authorize(actor, Module::User, Action::View).await?;
    user_db::get_user_by_id(&state.db, id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| CrmError::not_found("User", id))
}

pub async fn list_users(
    state: &AppState,
    actor: &Actor,
    filter: UserFilter,
) -> CrmResult<Page<UserResponse>> {
    state.authorize(actor, Module::User, Action::View).await?;
    let page = filter.page.unwrap_or(1).max(1);
    let users = user_db::get_users_paginated(&state.db, &filter, page, state.config.page_size).await?;
    Ok(users.map(UserResponse::from))
}

/// The master admin keeps its stored email and role whatever is submitted.
/// The password only changes when a new one is supplied.
pub async fn update_user(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: UpdateUser,
) -> CrmResult<UserResponse> {
    state
        .authorize_mutation(actor, Module::User, Action::Edit, csrf_token)
        .await?;
    let user = user_db::get_user_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("User", id))?;

    let name = validation::required("Name", &form.name)?;
    let (email, role_id) = if is_master_admin(state, &user) {
        (user.email.clone(), user.role_id)
    } else {
        let email = validation::email("Email", &form.email)?;
        ensure_role_exists(state, form.role_id).await?;
        ensure_email_free(state, &email, Some(id)).await?;
        (email, form.role_id)
    };

    let password_hash = match form.new_password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => {
            validation::new_password(password, form.new_password_confirm.as_deref().unwrap_or_default())?;
            Some(hash_password(password, state.config.bcrypt_cost).await?)
        }
        None => None,
    };
    let password_changed = password_hash.is_some();

    let updated = user_db::update_user(
        &state.db,
        user,
        UserChanges {
            name,
            email,
            role_id,
            password_hash,
        },
    )
    .await?;
    tracing::info!(user = %id, actor = %actor.id, password_changed, "Updated user");
    Ok(updated.into())
}

pub async fn delete_user(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::User, Action::Delete, csrf_token)
        .await?;
    let user = user_db::get_user_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("User", id))?;

    if is_master_admin(state, &user) {
        return Err(CrmError::conflict("The master admin account cannot be deleted"));
    }
    if user.id == actor.id {
        return Err(CrmError::conflict("You cannot delete your own account"));
    }

    user_db::delete_user(&state.db, id).await?;
    tracing::info!(user = %id, actor = %actor.id, "Deleted user");
    Ok(())
}

/// Create the master admin with the `admin` role if no account holds its email yet.
/// Returns whether an account was created.
pub async fn bootstrap_master_admin(state: &AppState, password: &str) -> CrmResult<bool> {
    let email = state.config.master_admin_email.clone();
    if user_db::get_user_by_email(&state.db, &email).await?.is_some() {
        return Ok(false);
    }

    let admin = role_db::ensure_admin_role(&state.db).await?;
    let hash = hash_password(password, state.config.bcrypt_cost).await?;
    let user = user_db::insert_user(&state.db, "Administrator".to_string(), email, admin.id, hash).await?;
    tracing::info!(user = %user.id, "Created master admin account");
    Ok(true)
}
