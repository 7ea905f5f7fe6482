use sea_orm::*;
use uuid::Uuid;

use crate::db::fetch_page;
use crate::models::Page;
use crate::models::notifications::{self, NewNotification};

/// Append a notification for a user.
pub async fn insert_notification(
    db: &DatabaseConnection,
    input: NewNotification,
) -> Result<notifications::Model, DbErr> {
    notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        kind: Set(input.kind),
        title: Set(input.title),
        message: Set(input.message),
        link: Set(input.link),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

/// Fetch a user's newest notifications.
pub async fn get_recent(
    db: &DatabaseConnection,
    user_id: Uuid,
    limit: u64,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}

/// Fetch one page of a user's notifications, newest first.
pub async fn get_paginated(
    db: &DatabaseConnection,
    user_id: Uuid,
    page: u64,
    page_size: u64,
) -> Result<Page<notifications::Model>, DbErr> {
    let query = notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .order_by_asc(notifications::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Count a user's unread notifications.
pub async fn count_unread(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .count(db)
        .await
}

/// Mark all of a user's unread notifications as read. Returns how many changed.
pub async fn mark_all_read(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    let result = notifications::Entity::update_many()
        .set(notifications::ActiveModel {
            is_read: Set(true),
            ..Default::default()
        })
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
