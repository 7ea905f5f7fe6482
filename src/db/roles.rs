use sea_orm::*;
use uuid::Uuid;

use crate::db::permissions as permission_db;
use crate::db::value_taken;
use crate::models::roles::{self, ADMIN_ROLE, RoleSummary};
use crate::models::{role_permissions, users};

/// Fetch a single role by ID.
pub async fn get_role_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<roles::Model>, DbErr> {
    roles::Entity::find_by_id(id).one(db).await
}

pub async fn get_role_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<roles::Model>, DbErr> {
    roles::Entity::find()
        .filter(roles::Column::Name.eq(name))
        .one(db)
        .await
}

pub async fn name_taken(
    db: &DatabaseConnection,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    value_taken::<roles::Entity>(db, roles::Column::Name, name, roles::Column::Id, exclude_id).await
}

/// Fetch all roles ordered by name, each with its user count.
pub async fn get_roles_with_user_counts(
    db: &DatabaseConnection,
) -> Result<Vec<RoleSummary>, DbErr> {
    let all = roles::Entity::find()
        .order_by_asc(roles::Column::Name)
        .all(db)
        .await?;

    let mut summaries = Vec::with_capacity(all.len());
    for role in all {
        let user_count = count_users_with_role(db, role.id).await?;
        summaries.push(RoleSummary { role, user_count });
    }

    Ok(summaries)
}

pub async fn count_users_with_role(db: &DatabaseConnection, role_id: Uuid) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::RoleId.eq(role_id))
        .count(db)
        .await
}

/// Make sure the `admin` role exists and holds every permission in the catalog.
pub async fn ensure_admin_role(db: &DatabaseConnection) -> Result<roles::Model, DbErr> {
    let admin = match get_role_by_name(db, ADMIN_ROLE).await? {
        Some(role) => role,
        None => {
            roles::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(ADMIN_ROLE.to_string()),
                description: Set(Some("Full access to every module".to_string())),
                created_at: Set(chrono::Utc::now()),
            }
            .insert(db)
            .await?
        }
    };

    let txn = db.begin().await?;
    let all = permission_db::get_all_permission_ids(&txn).await?;
    match replace_permissions(&txn, admin.id, &all).await {
        Ok(()) => txn.commit().await?,
        Err(e) => {
            txn.rollback().await?;
            return Err(e);
        }
    }

    Ok(admin)
}

/// Insert a role and its permission set in one transaction.
pub async fn insert_role(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    permission_ids: &[Uuid],
) -> Result<roles::Model, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        let role = roles::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&txn)
        .await?;
        replace_permissions(&txn, role.id, permission_ids).await?;
        Ok::<_, DbErr>(role)
    }
    .await;

    match result {
        Ok(role) => {
            txn.commit().await?;
            Ok(role)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Update a role's name/description and replace its permission set atomically.
pub async fn update_role(
    db: &DatabaseConnection,
    role: roles::Model,
    name: String,
    description: Option<String>,
    permission_ids: &[Uuid],
) -> Result<roles::Model, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        let role_id = role.id;
        let mut active: roles::ActiveModel = role.into();
        active.name = Set(name);
        active.description = Set(description);
        let updated = active.update(&txn).await?;
        replace_permissions(&txn, role_id, permission_ids).await?;
        Ok::<_, DbErr>(updated)
    }
    .await;

    match result {
        Ok(role) => {
            txn.commit().await?;
            Ok(role)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Delete a role together with its permission assignments.
pub async fn delete_role(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        role_permissions::Entity::delete_many()
            .filter(role_permissions::Column::RoleId.eq(id))
            .exec(&txn)
            .await?;
        roles::Entity::delete_by_id(id).exec(&txn).await
    }
    .await;

    match result {
        Ok(deleted) => {
            txn.commit().await?;
            Ok(deleted)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

async fn replace_permissions(
    txn: &DatabaseTransaction,
    role_id: Uuid,
    permission_ids: &[Uuid],
) -> Result<(), DbErr> {
    role_permissions::Entity::delete_many()
        .filter(role_permissions::Column::RoleId.eq(role_id))
        .exec(txn)
        .await?;

    for permission_id in permission_ids {
        role_permissions::ActiveModel {
            role_id: Set(role_id),
            permission_id: Set(*permission_id),
        }
        .insert(txn)
        .await?;
    }

    Ok(())
}
