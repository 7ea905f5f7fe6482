use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contacts {
    Table,
    BusinessId,
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    BusinessId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Offers {
    Table,
    LeadId,
}

#[derive(DeriveIden)]
enum ServiceAgreements {
    Table,
    AgreementType,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
    IsRead,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_business_id")
                    .table(Contacts::Table)
                    .col(Contacts::BusinessId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_business_id")
                    .table(Leads::Table)
                    .col(Leads::BusinessId)
                    .to_owned(),
            )
            .await?;

        // Lead listing filters on status and sorts newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_leads_status_created_at")
                    .table(Leads::Table)
                    .col(Leads::Status)
                    .col(Leads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Lead deletion nulls offers by lead_id.
        manager
            .create_index(
                Index::create()
                    .name("idx_offers_lead_id")
                    .table(Offers::Table)
                    .col(Offers::LeadId)
                    .to_owned(),
            )
            .await?;

        // Usage counts and renames of agreement types scan by type name.
        manager
            .create_index(
                Index::create()
                    .name("idx_service_agreements_agreement_type")
                    .table(ServiceAgreements::Table)
                    .col(ServiceAgreements::AgreementType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id_is_read")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_contacts_business_id",
            "idx_leads_business_id",
            "idx_leads_status_created_at",
            "idx_offers_lead_id",
            "idx_service_agreements_agreement_type",
            "idx_notifications_user_id_is_read",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
