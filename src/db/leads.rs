use sea_orm::*;
use uuid::Uuid;

use crate::db::{fetch_page, search_condition};
use crate::models::leads::{self, LeadFilter, LeadForm};
use crate::models::{Page, offers};

/// Insert a new lead.
pub async fn insert_lead(
    db: &DatabaseConnection,
    input: LeadForm,
    created_by: Uuid,
) -> Result<leads::Model, DbErr> {
    leads::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        source: Set(input.source),
        status: Set(input.status),
        value: Set(input.value),
        business_id: Set(input.business_id),
        contact_id: Set(input.contact_id),
        assigned_to: Set(input.assigned_to),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single lead by ID.
pub async fn get_lead_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<leads::Model>, DbErr> {
    leads::Entity::find_by_id(id).one(db).await
}

/// Fetch one page of leads, newest first. All filters combine with AND.
pub async fn get_leads_paginated(
    db: &DatabaseConnection,
    filter: &LeadFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<leads::Model>, DbErr> {
    let mut query = leads::Entity::find();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(search_condition(
            &[
                leads::Column::Title,
                leads::Column::Description,
            ],
            term,
        ));
    }
    if let Some(status) = filter.status {
        query = query.filter(leads::Column::Status.eq(status));
    }
    if let Some(business_id) = filter.business_id {
        query = query.filter(leads::Column::BusinessId.eq(business_id));
    }
    if let Some(assigned_to) = filter.assigned_to {
        query = query.filter(leads::Column::AssignedTo.eq(assigned_to));
    }
    if let Some(statuses) = filter.tab.statuses() {
        query = query.filter(leads::Column::Status.is_in(statuses));
    }

    let query = query
        .order_by_desc(leads::Column::CreatedAt)
        .order_by_asc(leads::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing lead with a full form.
pub async fn update_lead(
    db: &DatabaseConnection,
    lead: leads::Model,
    input: LeadForm,
) -> Result<leads::Model, DbErr> {
    let mut active: leads::ActiveModel = lead.into();
    active.title = Set(input.title);
    active.description = Set(input.description);
    active.source = Set(input.source);
    active.status = Set(input.status);
    active.value = Set(input.value);
    active.business_id = Set(input.business_id);
    active.contact_id = Set(input.contact_id);
    active.assigned_to = Set(input.assigned_to);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a lead inside one transaction: detach its offers (`lead_id = NULL`),
/// then remove the lead row. Either both steps commit or neither does.
///
/// Returns the number of offers detached.
pub async fn delete_lead_detaching_offers(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<u64, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        let detached = offers::Entity::update_many()
            .set(offers::ActiveModel {
                lead_id: Set(None),
                ..Default::default()
            })
            .filter(offers::Column::LeadId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let deleted = leads::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("Lead {id} not found")));
        }
        Ok(detached)
    }
    .await;

    match result {
        Ok(detached) => {
            txn.commit().await?;
            Ok(detached)
        }
        Err(e) => {
            tracing::error!("Rolling back delete of lead {id}: {e}");
            txn.rollback().await?;
            Err(e)
        }
    }
}
