pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_roles_table;
mod m20260105_000002_create_permissions_tables;
mod m20260105_000003_create_users_table;
mod m20260105_000004_create_businesses_table;
mod m20260105_000005_create_contacts_table;
mod m20260105_000006_create_agreement_tables;
mod m20260105_000007_create_leads_table;
mod m20260105_000008_create_offers_table;
mod m20260105_000009_create_projects_table;
mod m20260105_000010_create_settings_table;
mod m20260105_000011_create_notifications_table;
mod m20260112_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_roles_table::Migration),
            Box::new(m20260105_000002_create_permissions_tables::Migration),
            Box::new(m20260105_000003_create_users_table::Migration),
            Box::new(m20260105_000004_create_businesses_table::Migration),
            Box::new(m20260105_000005_create_contacts_table::Migration),
            Box::new(m20260105_000006_create_agreement_tables::Migration),
            Box::new(m20260105_000007_create_leads_table::Migration),
            Box::new(m20260105_000008_create_offers_table::Migration),
            Box::new(m20260105_000009_create_projects_table::Migration),
            Box::new(m20260105_000010_create_settings_table::Migration),
            Box::new(m20260105_000011_create_notifications_table::Migration),
            Box::new(m20260112_000001_add_indexes::Migration),
        ]
    }
}
