use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Name).string_len(120))
                    .col(
                        ColumnDef::new(Accounts::EnableScans)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Accounts::InternetNlApiUsername).string_len(255))
                    .col(ColumnDef::new(Accounts::InternetNlApiPassword).text())
                    .col(
                        ColumnDef::new(Accounts::CanConnectToInternetNlApi)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create url_lists table
        manager
            .create_table(
                Table::create()
                    .table(UrlLists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UrlLists::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UrlLists::AccountId).uuid().not_null())
                    .col(ColumnDef::new(UrlLists::Name).string_len(120).not_null())
                    .col(
                        ColumnDef::new(UrlLists::ScanType)
                            .string_len(4)
                            .not_null()
                            .default("web"),
                    )
                    .col(
                        ColumnDef::new(UrlLists::EnableScans)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UrlLists::AutomatedScanFrequency)
                            .string_len(30)
                            .not_null()
                            .default("disabled"),
                    )
                    .col(
                        ColumnDef::new(UrlLists::ScheduledNextScan)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UrlLists::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(UrlLists::DeletedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(UrlLists::LastManualScan).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(UrlLists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_lists_account")
                            .from(UrlLists::Table, UrlLists::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UrlLists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Accounts {
    Table,
    Id,
    Name,
    EnableScans,
    InternetNlApiUsername,
    InternetNlApiPassword,
    CanConnectToInternetNlApi,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum UrlLists {
    Table,
    Id,
    AccountId,
    Name,
    ScanType,
    EnableScans,
    AutomatedScanFrequency,
    ScheduledNextScan,
    IsDeleted,
    DeletedOn,
    LastManualScan,
    CreatedAt,
}
