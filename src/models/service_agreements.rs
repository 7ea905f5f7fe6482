use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `service_agreements` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_agreements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    /// Holds `agreement_types.name`.
    pub agreement_type: String,
    pub title: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub price: Option<f64>,
    pub status: AgreementStatus,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::businesses::Entity",
        from = "Column::BusinessId",
        to = "super::businesses::Column::Id"
    )]
    Business,
}

impl Related<super::businesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAgreementForm {
    pub business_id: Uuid,
    pub agreement_type: String,
    pub title: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub price: Option<f64>,
    pub status: AgreementStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAgreementFilter {
    pub business_id: Option<Uuid>,
    pub agreement_type: Option<String>,
    pub status: Option<AgreementStatus>,
    pub page: Option<u64>,
}
