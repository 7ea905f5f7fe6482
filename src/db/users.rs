use sea_orm::*;
use uuid::Uuid;

use crate::db::{fetch_page, search_condition, value_taken};
use crate::models::users::{self, UserFilter};
use crate::models::{Page, roles};

/// Fields written by user create/update after validation. `password_hash` is `None`
/// when the stored hash should be kept.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub role_id: Uuid,
    pub password_hash: Option<String>,
}

/// Insert a new user. The caller supplies an already hashed password.
pub async fn insert_user(
    db: &DatabaseConnection,
    name: String,
    email: String,
    role_id: Uuid,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password: Set(password_hash),
        role_id: Set(role_id),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a user and their role in one call (used by the auth extractor).
pub async fn get_user_with_role(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<(users::Model, roles::Model)>, DbErr> {
    let found = users::Entity::find_by_id(id)
        .find_also_related(roles::Entity)
        .one(db)
        .await?;

    Ok(match found {
        Some((user, Some(role))) => Some((user, role)),
        _ => None,
    })
}

pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(crate::db::equals_ignore_case(users::Column::Email, email))
        .one(db)
        .await
}

pub async fn email_taken(
    db: &DatabaseConnection,
    email: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    value_taken::<users::Entity>(db, users::Column::Email, email, users::Column::Id, exclude_id)
        .await
}

/// Fetch one page of users ordered by name.
pub async fn get_users_paginated(
    db: &DatabaseConnection,
    filter: &UserFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<users::Model>, DbErr> {
    let mut query = users::Entity::find();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(search_condition(
            &[users::Column::Name, users::Column::Email],
            term,
        ));
    }
    if let Some(role_id) = filter.role_id {
        query = query.filter(users::Column::RoleId.eq(role_id));
    }

    let query = query
        .order_by_asc(users::Column::Name)
        .order_by_asc(users::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing user.
pub async fn update_user(
    db: &DatabaseConnection,
    user: users::Model,
    changes: UserChanges,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.name = Set(changes.name);
    active.email = Set(changes.email);
    active.role_id = Set(changes.role_id);
    if let Some(hash) = changes.password_hash {
        active.password = Set(hash);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a user by ID.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}
