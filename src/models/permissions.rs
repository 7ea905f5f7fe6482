use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application area a permission applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Module {
    #[sea_orm(string_value = "business")]
    Business,
    #[sea_orm(string_value = "contact")]
    Contact,
    #[sea_orm(string_value = "lead")]
    Lead,
    #[sea_orm(string_value = "offer")]
    Offer,
    #[sea_orm(string_value = "project")]
    Project,
    #[sea_orm(string_value = "agreement_type")]
    AgreementType,
    #[sea_orm(string_value = "service_agreement")]
    ServiceAgreement,
    #[sea_orm(string_value = "role")]
    Role,
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "setting")]
    Setting,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Business => "business",
            Module::Contact => "contact",
            Module::Lead => "lead",
            Module::Offer => "offer",
            Module::Project => "project",
            Module::AgreementType => "agreement_type",
            Module::ServiceAgreement => "service_agreement",
            Module::Role => "role",
            Module::User => "user",
            Module::Setting => "setting",
        }
    }

    /// Actions that exist for this module. Settings cannot be created or deleted.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Module::Setting => &[Action::View, Action::Edit],
            _ => &[Action::View, Action::Create, Action::Edit, Action::Delete],
        }
    }
}

/// Operation a permission grants within its module.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[sea_orm(string_value = "view")]
    View,
    #[sea_orm(string_value = "create")]
    Create,
    #[sea_orm(string_value = "edit")]
    Edit,
    #[sea_orm(string_value = "delete")]
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

/// A permission key such as `edit_business`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionKey {
    pub module: Module,
    pub action: Action,
}

impl PermissionKey {
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }

    /// Every key the application knows about, in catalog order.
    pub fn catalog() -> Vec<PermissionKey> {
        Module::iter()
            .flat_map(|module| {
                module
                    .actions()
                    .iter()
                    .map(move |action| PermissionKey::new(module, *action))
            })
            .collect()
    }

    pub fn description(&self) -> String {
        let module = self.module.as_str().replace('_', " ");
        match self.action {
            Action::View => format!("View {module} records"),
            Action::Create => format!("Create {module} records"),
            Action::Edit => format!("Edit {module} records"),
            Action::Delete => format!("Delete {module} records"),
        }
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.action.as_str(), self.module.as_str())
    }
}

/// SeaORM entity for the `permissions` table. Rows are reference data synced from
/// [`PermissionKey::catalog`] at startup.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub module: Module,
    pub action: Action,
    pub description: Option<String>,
}

impl Model {
    pub fn key(&self) -> PermissionKey {
        PermissionKey::new(self.module, self.action)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Permissions of one module, for rendering a role's permission matrix.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionGroup {
    pub module: Module,
    pub permissions: Vec<Model>,
}
