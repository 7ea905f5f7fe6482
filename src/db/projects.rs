use sea_orm::*;
use uuid::Uuid;

use crate::db::{fetch_page, search_condition};
use crate::models::Page;
use crate::models::projects::{self, ProjectFilter, ProjectStatus};

/// A project form after offer pre-fill and validation.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub budget: Option<f64>,
    pub business_id: Uuid,
    pub offer_id: Option<Uuid>,
}

/// Insert a new project.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: ProjectRecord,
    created_by: Uuid,
) -> Result<projects::Model, DbErr> {
    projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        status: Set(input.status),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        budget: Set(input.budget),
        business_id: Set(input.business_id),
        offer_id: Set(input.offer_id),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Fetch one page of projects, newest first.
pub async fn get_projects_paginated(
    db: &DatabaseConnection,
    filter: &ProjectFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<projects::Model>, DbErr> {
    let mut query = projects::Entity::find();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(search_condition(
            &[projects::Column::Name, projects::Column::Description],
            term,
        ));
    }
    if let Some(status) = filter.status {
        query = query.filter(projects::Column::Status.eq(status));
    }
    if let Some(business_id) = filter.business_id {
        query = query.filter(projects::Column::BusinessId.eq(business_id));
    }

    let query = query
        .order_by_desc(projects::Column::CreatedAt)
        .order_by_asc(projects::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing project.
pub async fn update_project(
    db: &DatabaseConnection,
    project: projects::Model,
    input: ProjectRecord,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();
    active.name = Set(input.name);
    active.description = Set(input.description);
    active.status = Set(input.status);
    active.start_date = Set(input.start_date);
    active.end_date = Set(input.end_date);
    active.budget = Set(input.budget);
    active.business_id = Set(input.business_id);
    active.offer_id = Set(input.offer_id);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
