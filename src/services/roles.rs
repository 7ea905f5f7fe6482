use std::collections::HashSet;
use uuid::Uuid;

use sea_orm::Iterable;

use crate::auth::Actor;
use crate::db::permissions as permission_db;
use crate::db::roles as role_db;
use crate::error::{CrmError, CrmResult};
use crate::models::clean;
use crate::models::permissions::{Action, Module, PermissionGroup};
use crate::models::roles::{self, ADMIN_ROLE, RoleDetail, RoleForm, RoleSummary};
use crate::services::validation;
use crate::state::AppState;

/// Drops duplicates while keeping submission order, then checks every id exists.
async fn checked_permission_ids(state: &AppState, submitted: &[Uuid]) -> CrmResult<Vec<Uuid>> {
    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = submitted
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    if permission_db::count_existing(&state.db, &ids).await? != ids.len() as u64 {
        return Err(CrmError::validation("One or more selected permissions do not exist"));
    }
    Ok(ids)
}

async fn checked_name(state: &AppState, name: &str, exclude: Option<Uuid>) -> CrmResult<String> {
    let name = validation::required("Role name", name)?;
    if name.eq_ignore_ascii_case(ADMIN_ROLE) {
        return Err(CrmError::conflict(format!("The role name \"{ADMIN_ROLE}\" is reserved")));
    }
    if role_db::name_taken(&state.db, &name, exclude).await? {
        return Err(CrmError::conflict(format!("A role named \"{name}\" already exists")));
    }
    Ok(name)
}

pub async fn create_role(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    form: RoleForm,
) -> CrmResult<roles::Model> {
    state
        .authorize_mutation(actor, Module::Role, Action::Create, csrf_token)
        .await?;
    let name = checked_name(state, &form.name, None).await?;
    let ids = checked_permission_ids(state, &form.permission_ids).await?;

    let role = role_db::insert_role(&state.db, name, clean(form.description), &ids).await?;
    state.permissions.invalidate(&role.name).await;
    tracing::info!(role = %role.name, actor = %actor.id, permissions = ids.len(), "Created role");
    Ok(role)
}

pub async fn get_role(state: &AppState, actor: &Actor, id: Uuid) -> CrmResult<RoleDetail> {
    state.authorize(actor, Module::Role, Action::View).await?;
    let role = role_db::get_role_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Role", id))?;

    let permissions = if role.is_admin() {
        permission_db::get_all_permissions(&state.db).await?
    } else {
        permission_db::get_permissions_for_role_id(&state.db, role.id).await?
    };
    let user_count = role_db::count_users_with_role(&state.db, role.id).await?;

    Ok(RoleDetail {
        role,
        permissions,
        user_count,
    })
}

pub async fn list_roles(state: &AppState, actor: &Actor) -> CrmResult<Vec<RoleSummary>> {
    state.authorize(actor, Module::Role, Action::View).await?;
    Ok(role_db::get_roles_with_user_counts(&state.db).await?)
}

/// The permission catalog grouped by module, in module order.
pub async fn list_permissions(state: &AppState, actor: &Actor) -> CrmResult<Vec<PermissionGroup>> {
    state.authorize(actor, Module::Role, Action::View).await?;
    let all = permission_db::get_all_permissions(&state.db).await?;

    Ok(Module::iter()
        .map(|module| PermissionGroup {
            module,
            permissions: all.iter().filter(|p| p.module == module).cloned().collect(),
        })
        .filter(|group| !group.permissions.is_empty())
        .collect())
}

/// Replaces name, description and the full permission set. The `admin` role keeps
/// its name and always ends up holding every permission, whatever was submitted.
///
/// Two concurrent edits of the same role are not detected: the later commit wins.
pub async fn update_role(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
    form: RoleForm,
) -> CrmResult<roles::Model> {
    state
        .authorize_mutation(actor, Module::Role, Action::Edit, csrf_token)
        .await?;
    let role = role_db::get_role_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Role", id))?;
    let old_name = role.name.clone();

    let (name, ids) = if role.is_admin() {
        (role.name.clone(), permission_db::get_all_permission_ids(&state.db).await?)
    } else {
        (
            checked_name(state, &form.name, Some(id)).await?,
            checked_permission_ids(state, &form.permission_ids).await?,
        )
    };

    let updated = role_db::update_role(&state.db, role, name, clean(form.description), &ids).await?;
    state.permissions.invalidate(&old_name).await;
    state.permissions.invalidate(&updated.name).await;
    tracing::info!(role = %updated.name, actor = %actor.id, permissions = ids.len(), "Updated role");
    Ok(updated)
}

pub async fn delete_role(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    id: Uuid,
) -> CrmResult<()> {
    state
        .authorize_mutation(actor, Module::Role, Action::Delete, csrf_token)
        .await?;
    let role = role_db::get_role_by_id(&state.db, id)
        .await?
        .ok_or_else(|| CrmError::not_found("Role", id))?;

    if role.is_admin() {
        return Err(CrmError::conflict("The admin role cannot be deleted"));
    }
    let user_count = role_db::count_users_with_role(&state.db, id).await?;
    if user_count > 0 {
        return Err(CrmError::conflict(format!(
            "Cannot delete role \"{}\": it is assigned to {user_count} user(s)",
            role.name
        )));
    }

    role_db::delete_role(&state.db, id).await?;
    state.permissions.invalidate(&role.name).await;
    tracing::info!(role = %role.name, actor = %actor.id, "Deleted role");
    Ok(())
}
