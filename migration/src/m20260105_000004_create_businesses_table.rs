use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Businesses {
    Table,
    Id,
    Name,
    RegistrationNumber,
    Address,
    Phone,
    Email,
    Website,
    Industry,
    Description,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Businesses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Businesses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Businesses::RegistrationNumber).string_len(50))
                    .col(ColumnDef::new(Businesses::Address).text())
                    .col(ColumnDef::new(Businesses::Phone).string_len(50))
                    .col(ColumnDef::new(Businesses::Email).string())
                    .col(ColumnDef::new(Businesses::Website).string())
                    .col(ColumnDef::new(Businesses::Industry).string_len(100))
                    .col(ColumnDef::new(Businesses::Description).text())
                    .col(ColumnDef::new(Businesses::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Businesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Businesses::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}
