use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Offers {
    Table,
    Id,
    Title,
    Description,
    Amount,
    Status,
    ValidUntil,
    LeadId,
    BusinessId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Businesses {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Offers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Offers::Title).string().not_null())
                    .col(ColumnDef::new(Offers::Description).text())
                    .col(ColumnDef::new(Offers::Amount).double().not_null())
                    .col(ColumnDef::new(Offers::Status).string().not_null())
                    .col(ColumnDef::new(Offers::ValidUntil).date())
                    .col(ColumnDef::new(Offers::LeadId).uuid())
                    .col(ColumnDef::new(Offers::BusinessId).uuid())
                    .col(ColumnDef::new(Offers::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Offers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Offers::UpdatedAt).timestamp_with_time_zone())
                    // Lead deletion nulls this column explicitly inside its transaction.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offers_lead_id")
                            .from(Offers::Table, Offers::LeadId)
                            .to(Leads::Table, Leads::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offers_business_id")
                            .from(Offers::Table, Offers::BusinessId)
                            .to(Businesses::Table, Businesses::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}
