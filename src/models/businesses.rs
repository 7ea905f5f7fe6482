use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `businesses` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Create/edit form for a business.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessForm {
    pub name: String,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

/// Listing filter for `GET /api/businesses`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessFilter {
    pub search: Option<String>,
    pub industry: Option<String>,
    pub page: Option<u64>,
}

/// How many records still point at a business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BusinessDependents {
    pub contacts: u64,
    pub leads: u64,
    pub offers: u64,
    pub projects: u64,
    pub service_agreements: u64,
}

impl BusinessDependents {
    pub fn total(&self) -> u64 {
        self.contacts + self.leads + self.offers + self.projects + self.service_agreements
    }
}
