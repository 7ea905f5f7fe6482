use sea_orm::*;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::permissions::{self, PermissionKey};
use crate::models::{role_permissions, roles};

/// Insert any catalog permission missing from the `permissions` table.
/// Returns how many rows were added.
pub async fn sync_catalog(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let existing: HashSet<String> = permissions::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();

    let mut added = 0;
    for key in PermissionKey::catalog() {
        let name = key.to_string();
        if existing.contains(&name) {
            continue;
        }

        permissions::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            module: Set(key.module),
            action: Set(key.action),
            description: Set(Some(key.description())),
        }
        .insert(db)
        .await?;
        added += 1;
    }

    Ok(added)
}

/// Fetch every permission, grouped-friendly order (module, then action).
pub async fn get_all_permissions(
    db: &DatabaseConnection,
) -> Result<Vec<permissions::Model>, DbErr> {
    permissions::Entity::find()
        .order_by_asc(permissions::Column::Module)
        .order_by_asc(permissions::Column::Action)
        .all(db)
        .await
}

/// Fetch the permissions explicitly assigned to a role.
pub async fn get_permissions_for_role_id<C: ConnectionTrait>(
    db: &C,
    role_id: Uuid,
) -> Result<Vec<permissions::Model>, DbErr> {
    let ids: Vec<Uuid> = role_permissions::Entity::find()
        .filter(role_permissions::Column::RoleId.eq(role_id))
        .all(db)
        .await?
        .into_iter()
        .map(|rp| rp.permission_id)
        .collect();

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    permissions::Entity::find()
        .filter(permissions::Column::Id.is_in(ids))
        .order_by_asc(permissions::Column::Module)
        .order_by_asc(permissions::Column::Action)
        .all(db)
        .await
}

/// Permission keys granted to the role with this name. Unknown roles grant nothing.
pub async fn get_permission_names_for_role(
    db: &DatabaseConnection,
    role_name: &str,
) -> Result<Vec<String>, DbErr> {
    let Some(role) = roles::Entity::find()
        .filter(roles::Column::Name.eq(role_name))
        .one(db)
        .await?
    else {
        return Ok(Vec::new());
    };

    Ok(get_permissions_for_role_id(db, role.id)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect())
}

/// How many of `ids` exist. Used to reject forged permission ids on role forms.
pub async fn count_existing(db: &DatabaseConnection, ids: &[Uuid]) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }

    permissions::Entity::find()
        .filter(permissions::Column::Id.is_in(ids.to_vec()))
        .count(db)
        .await
}

/// Every permission id; the `admin` role is always stored with this full set.
pub async fn get_all_permission_ids<C: ConnectionTrait>(db: &C) -> Result<Vec<Uuid>, DbErr> {
    Ok(permissions::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect())
}
