use sea_orm::*;
use uuid::Uuid;

use crate::db::value_taken;
use crate::models::agreement_types::{self, AgreementTypeForm, AgreementTypeSummary};
use crate::models::service_agreements;

/// Insert a new agreement type.
pub async fn insert_agreement_type(
    db: &DatabaseConnection,
    input: AgreementTypeForm,
) -> Result<agreement_types::Model, DbErr> {
    agreement_types::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        label: Set(input.label),
        description: Set(input.description),
        is_active: Set(input.is_active),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

/// Fetch a single agreement type by ID.
pub async fn get_agreement_type_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<agreement_types::Model>, DbErr> {
    agreement_types::Entity::find_by_id(id).one(db).await
}

pub async fn get_agreement_type_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<agreement_types::Model>, DbErr> {
    agreement_types::Entity::find()
        .filter(agreement_types::Column::Name.eq(name))
        .one(db)
        .await
}

pub async fn name_taken(
    db: &DatabaseConnection,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    value_taken::<agreement_types::Entity>(
        db,
        agreement_types::Column::Name,
        name,
        agreement_types::Column::Id,
        exclude_id,
    )
    .await
}

/// How many service agreements store `name` as their type.
pub async fn count_usage(db: &DatabaseConnection, name: &str) -> Result<u64, DbErr> {
    service_agreements::Entity::find()
        .filter(service_agreements::Column::AgreementType.eq(name))
        .count(db)
        .await
}

/// Fetch all agreement types ordered by label, each with its usage count.
pub async fn get_agreement_types_with_usage(
    db: &DatabaseConnection,
) -> Result<Vec<AgreementTypeSummary>, DbErr> {
    let all = agreement_types::Entity::find()
        .order_by_asc(agreement_types::Column::Label)
        .order_by_asc(agreement_types::Column::Name)
        .all(db)
        .await?;

    let mut summaries = Vec::with_capacity(all.len());
    for agreement_type in all {
        let usage_count = count_usage(db, &agreement_type.name).await?;
        summaries.push(AgreementTypeSummary {
            agreement_type,
            usage_count,
        });
    }

    Ok(summaries)
}

/// Update an agreement type. When `input.name` differs from the stored name, every
/// service agreement holding the old name is rewritten in the same transaction.
///
/// Returns the updated row and the number of service agreements rewritten.
pub async fn update_agreement_type(
    db: &DatabaseConnection,
    agreement_type: agreement_types::Model,
    input: AgreementTypeForm,
) -> Result<(agreement_types::Model, u64), DbErr> {
    let old_name = agreement_type.name.clone();
    let renamed = old_name != input.name;

    let txn = db.begin().await?;

    let result = async {
        let mut active: agreement_types::ActiveModel = agreement_type.into();
        active.name = Set(input.name.clone());
        active.label = Set(input.label);
        active.description = Set(input.description);
        active.is_active = Set(input.is_active);
        active.updated_at = Set(Some(chrono::Utc::now()));
        let updated = active.update(&txn).await?;

        let rewritten = if renamed {
            service_agreements::Entity::update_many()
                .set(service_agreements::ActiveModel {
                    agreement_type: Set(input.name),
                    ..Default::default()
                })
                .filter(service_agreements::Column::AgreementType.eq(old_name.as_str()))
                .exec(&txn)
                .await?
                .rows_affected
        } else {
            0
        };

        Ok::<_, DbErr>((updated, rewritten))
    }
    .await;

    match result {
        Ok(outcome) => {
            txn.commit().await?;
            Ok(outcome)
        }
        Err(e) => {
            tracing::error!("Rolling back agreement type update of {old_name}: {e}");
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Delete an agreement type by ID.
pub async fn delete_agreement_type(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    agreement_types::Entity::delete_by_id(id).exec(db).await
}
