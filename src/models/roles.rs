use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the protected role that always holds every permission.
pub const ADMIN_ROLE: &str = "admin";

/// SeaORM entity for the `roles` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.name == ADMIN_ROLE
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Create/edit form for a role. `permission_ids` replaces the role's full set.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleForm {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<Uuid>,
}

/// A role together with its granted permission keys.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDetail {
    #[serde(flatten)]
    pub role: Model,
    pub permissions: Vec<super::permissions::Model>,
    pub user_count: u64,
}

/// Listing row: a role and how many users hold it.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    #[serde(flatten)]
    pub role: Model,
    pub user_count: u64,
}
