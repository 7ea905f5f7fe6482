use sea_orm::*;
use uuid::Uuid;

use crate::db::{fetch_page, search_condition};
use crate::models::offers::{self, OfferFilter, OfferForm};
use crate::models::{Page, projects};

/// Insert a new offer.
pub async fn insert_offer(
    db: &DatabaseConnection,
    input: OfferForm,
    created_by: Uuid,
) -> Result<offers::Model, DbErr> {
    offers::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        amount: Set(input.amount),
        status: Set(input.status),
        valid_until: Set(input.valid_until),
        lead_id: Set(input.lead_id),
        business_id: Set(input.business_id),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single offer by ID.
pub async fn get_offer_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<offers::Model>, DbErr> {
    offers::Entity::find_by_id(id).one(db).await
}

/// Fetch all offers attached to a lead.
pub async fn get_offers_by_lead_id(
    db: &DatabaseConnection,
    lead_id: Uuid,
) -> Result<Vec<offers::Model>, DbErr> {
    offers::Entity::find()
        .filter(offers::Column::LeadId.eq(lead_id))
        .order_by_desc(offers::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch one page of offers, newest first.
pub async fn get_offers_paginated(
    db: &DatabaseConnection,
    filter: &OfferFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<offers::Model>, DbErr> {
    let mut query = offers::Entity::find();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(search_condition(
            &[offers::Column::Title, offers::Column::Description],
            term,
        ));
    }
    if let Some(status) = filter.status {
        query = query.filter(offers::Column::Status.eq(status));
    }
    if let Some(lead_id) = filter.lead_id {
        query = query.filter(offers::Column::LeadId.eq(lead_id));
    }

    let query = query
        .order_by_desc(offers::Column::CreatedAt)
        .order_by_asc(offers::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing offer with a full form.
pub async fn update_offer(
    db: &DatabaseConnection,
    offer: offers::Model,
    input: OfferForm,
) -> Result<offers::Model, DbErr> {
    let mut active: offers::ActiveModel = offer.into();
    active.title = Set(input.title);
    active.description = Set(input.description);
    active.amount = Set(input.amount);
    active.status = Set(input.status);
    active.valid_until = Set(input.valid_until);
    active.lead_id = Set(input.lead_id);
    active.business_id = Set(input.business_id);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Count the projects created from an offer.
pub async fn count_projects(db: &DatabaseConnection, id: Uuid) -> Result<u64, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::OfferId.eq(id))
        .count(db)
        .await
}

/// Delete an offer by ID.
pub async fn delete_offer(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    offers::Entity::delete_by_id(id).exec(db).await
}
