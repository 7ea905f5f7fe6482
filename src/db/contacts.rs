use sea_orm::*;
use uuid::Uuid;

use crate::db::{fetch_page, search_condition};
use crate::models::contacts::{self, ContactFilter, ContactForm};
use crate::models::{Page, leads};

/// Insert a new contact.
pub async fn insert_contact(
    db: &DatabaseConnection,
    input: ContactForm,
    created_by: Uuid,
) -> Result<contacts::Model, DbErr> {
    contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        position: Set(input.position),
        email: Set(input.email),
        phone: Set(input.phone),
        business_id: Set(input.business_id),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single contact by ID.
pub async fn get_contact_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contacts::Model>, DbErr> {
    contacts::Entity::find_by_id(id).one(db).await
}

/// Fetch one page of contacts ordered by last name, then first name.
pub async fn get_contacts_paginated(
    db: &DatabaseConnection,
    filter: &ContactFilter,
    page: u64,
    page_size: u64,
) -> Result<Page<contacts::Model>, DbErr> {
    let mut query = contacts::Entity::find();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(search_condition(
            &[
                contacts::Column::FirstName,
                contacts::Column::LastName,
                contacts::Column::Email,
                contacts::Column::Position,
            ],
            term,
        ));
    }
    if let Some(business_id) = filter.business_id {
        query = query.filter(contacts::Column::BusinessId.eq(business_id));
    }

    let query = query
        .order_by_asc(contacts::Column::LastName)
        .order_by_asc(contacts::Column::FirstName)
        .order_by_asc(contacts::Column::Id);
    fetch_page(db, query, page, page_size).await
}

/// Update an existing contact with a full form.
pub async fn update_contact(
    db: &DatabaseConnection,
    contact: contacts::Model,
    input: ContactForm,
) -> Result<contacts::Model, DbErr> {
    let mut active: contacts::ActiveModel = contact.into();
    active.first_name = Set(input.first_name);
    active.last_name = Set(input.last_name);
    active.position = Set(input.position);
    active.email = Set(input.email);
    active.phone = Set(input.phone);
    active.business_id = Set(input.business_id);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a contact, detaching any leads that pointed at it, in one transaction.
/// Returns the number of leads detached.
pub async fn delete_contact_detaching_leads(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<u64, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        let detached = leads::Entity::update_many()
            .set(leads::ActiveModel {
                contact_id: Set(None),
                ..Default::default()
            })
            .filter(leads::Column::ContactId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let deleted = contacts::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("Contact {id} not found")));
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
            txn.rollback().await?;
            Err(e)
        }
    }
}
