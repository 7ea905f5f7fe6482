use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "expired")]
    Expired,
}

/// SeaORM entity for the `offers` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub status: OfferStatus,
    pub valid_until: Option<Date>,
    pub lead_id: Option<Uuid>,
    pub business_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leads::Entity",
        from = "Column::LeadId",
        to = "super::leads::Column::Id"
    )]
    Lead,
}

impl Related<super::leads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lead.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Create/edit form for an offer. A missing `business_id` defaults to the lead's business.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferForm {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub status: OfferStatus,
    pub valid_until: Option<Date>,
    pub lead_id: Option<Uuid>,
    pub business_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferFilter {
    pub search: Option<String>,
    pub status: Option<OfferStatus>,
    pub lead_id: Option<Uuid>,
    pub page: Option<u64>,
}
