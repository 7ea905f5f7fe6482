use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum AgreementTypes {
    Table,
    Id,
    Name,
    Label,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Service agreements reference their type by `agreement_types.name`, not by id.
#[derive(DeriveIden)]
enum ServiceAgreements {
    Table,
    Id,
    BusinessId,
    AgreementType,
    Title,
    StartDate,
    EndDate,
    Price,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
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
                    .table(AgreementTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AgreementTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AgreementTypes::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AgreementTypes::Label).string().not_null())
                    .col(ColumnDef::new(AgreementTypes::Description).text())
                    .col(
                        ColumnDef::new(AgreementTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AgreementTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AgreementTypes::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceAgreements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceAgreements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceAgreements::BusinessId).uuid().not_null())
                    .col(
                        ColumnDef::new(ServiceAgreements::AgreementType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceAgreements::Title).string().not_null())
                    .col(ColumnDef::new(ServiceAgreements::StartDate).date().not_null())
                    .col(ColumnDef::new(ServiceAgreements::EndDate).date())
                    .col(ColumnDef::new(ServiceAgreements::Price).double())
                    .col(ColumnDef::new(ServiceAgreements::Status).string().not_null())
                    .col(ColumnDef::new(ServiceAgreements::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(ServiceAgreements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceAgreements::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_agreements_business_id")
                            .from(ServiceAgreements::Table, ServiceAgreements::BusinessId)
                            .to(Businesses::Table, Businesses::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceAgreements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AgreementTypes::Table).to_owned())
            .await
    }
}
