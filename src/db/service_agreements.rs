use sea_orm::*;
use uuid::Uuid;

use crate::db::fetch_page;
use crate::models::Page;
use crate::models::service_agreements::{self, ServiceAgreementFilter, ServiceAgreementForm};

/// Insert a new service agreement.
pub async fn insert_service_agreement(
    db: &DatabaseConnection,
    input: ServiceAgreementForm,
    created_by: Uuid,
) -> Result<service_agreements::Model, DbErr> {
    service_agreements::ActiveModel {
        id: Set(Uuid::new_v4()),
        business_id: Set(input.business_id),
        agreement_type: Set(input.agreement_type),
        title: Set(input.title),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        price: Set(input.price),
        status: Set(input.status),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single service agreement by ID.
pub async fn get_service_agreement_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<service_agreements::Model>, DbErr> {
    service_agreements::Entity::find_by_id(id).one(db).await
}

/// Fetch all service agreements of a given type name.
pub async fn get_by_agreement_type(
    db: &DatabaseConnection,
    agreement_type: &str,
) -> Result<Vec<service_agreements::Model>, DbErr> {
    service_agreements::Entity::find()
        .filter(service_agreements::Column::AgreementType.eq(agreement_type))
        .all(db)
        .await
}

/// Fetch one page of service agreements, newest start date first.
pub async fn get_service_agreements_paginated(
    db: &DatabaseConnection,
    filter: &ServiceAgreementFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<service_agreements::Model>, DbErr> {
    let mut query = service_agreements::Entity::find();

    if let Some(business_id) = filter.business_id {
        query = query.filter(service_agreements::Column::BusinessId.eq(business_id));
    }
    if let Some(agreement_type) = filter.agreement_type.as_deref() {
        query = query.filter(service_agreements::Column::AgreementType.eq(agreement_type));
    }
    if let Some(status) = filter.status {
        query = query.filter(service_agreements::Column::Status.eq(status));
    }

    let query = query
        .order_by_desc(service_agreements::Column::StartDate)
        .order_by_asc(service_agreements::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing service agreement with a full form.
pub async fn update_service_agreement(
    db: &DatabaseConnection,
    agreement: service_agreements::Model,
    input: ServiceAgreementForm,
) -> Result<service_agreements::Model, DbErr> {
    let mut active: service_agreements::ActiveModel = agreement.into();
    active.business_id = Set(input.business_id);
    active.agreement_type = Set(input.agreement_type);
    active.title = Set(input.title);
    active.start_date = Set(input.start_date);
    active.end_date = Set(input.end_date);
    active.price = Set(input.price);
    active.status = Set(input.status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a service agreement by ID.
pub async fn delete_service_agreement(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    service_agreements::Entity::delete_by_id(id).exec(db).await
}
