use sea_orm::*;
use uuid::Uuid;

use crate::db::{fetch_page, search_condition, value_taken};
use crate::models::businesses::{self, BusinessDependents, BusinessFilter, BusinessForm};
use crate::models::{Page, contacts, leads, offers, projects, service_agreements};

/// Insert a new business owned by `created_by` for audit purposes.
pub async fn insert_business(
    db: &DatabaseConnection,
    input: BusinessForm,
    created_by: Uuid,
) -> Result<businesses::Model, DbErr> {
    businesses::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        registration_number: Set(input.registration_number),
        address: Set(input.address),
        phone: Set(input.phone),
        email: Set(input.email),
        website: Set(input.website),
        industry: Set(input.industry),
        description: Set(input.description),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single business by ID.
pub async fn get_business_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<businesses::Model>, DbErr> {
    businesses::Entity::find_by_id(id).one(db).await
}

pub async fn business_exists(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
    Ok(businesses::Entity::find_by_id(id).count(db).await? > 0)
}

pub async fn name_taken(
    db: &DatabaseConnection,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    value_taken::<businesses::Entity>(
        db,
        businesses::Column::Name,
        name,
        businesses::Column::Id,
        exclude_id,
    )
    .await
}

/// Fetch one page of businesses ordered by name.
pub async fn get_businesses_paginated(
    db: &DatabaseConnection,
    filter: &BusinessFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<businesses::Model>, DbErr> {
    let mut query = businesses::Entity::find();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(search_condition(
            &[
                businesses::Column::Name,
                businesses::Column::RegistrationNumber,
                businesses::Column::Email,
                businesses::Column::Industry,
            ],
            term,
        ));
    }
    if let Some(industry) = filter.industry.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(businesses::Column::Industry.eq(industry.trim()));
    }

    let query = query
        .order_by_asc(businesses::Column::Name)
        .order_by_asc(businesses::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing business with a full form.
pub async fn update_business(
    db: &DatabaseConnection,
    business: businesses::Model,
    input: BusinessForm,
) -> Result<businesses::Model, DbErr> {
    let mut active: businesses::ActiveModel = business.into();
    active.name = Set(input.name);
    active.registration_number = Set(input.registration_number);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.email = Set(input.email);
    active.website = Set(input.website);
    active.industry = Set(input.industry);
    active.description = Set(input.description);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Count the records that still reference a business.
pub async fn count_dependents(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<BusinessDependents, DbErr> {
    Ok(BusinessDependents {
        contacts: contacts::Entity::find()
            .filter(contacts::Column::BusinessId.eq(id))
            .count(db)
            .await?,
        leads: leads::Entity::find()
            .filter(leads::Column::BusinessId.eq(id))
            .count(db)
            .await?,
        offers: offers::Entity::find()
            .filter(offers::Column::BusinessId.eq(id))
            .count(db)
            .await?,
        projects: projects::Entity::find()
            .filter(projects::Column::BusinessId.eq(id))
            .count(db)
            .await?,
        service_agreements: service_agreements::Entity::find()
            .filter(service_agreements::Column::BusinessId.eq(id))
            .count(db)
            .await?,
    })
}

/// Delete a business by ID.
pub async fn delete_business(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    businesses::Entity::delete_by_id(id).exec(db).await
}
