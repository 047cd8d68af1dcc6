use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_accounts_and_lists::UrlLists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Remote scan handles, written by the internet.nl polling collaborator
        manager
            .create_table(
                Table::create()
                    .table(InternetNlScans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InternetNlScans::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InternetNlScans::ScanId).string_len(255))
                    .col(
                        ColumnDef::new(InternetNlScans::Type)
                            .string_len(30)
                            .not_null()
                            .default("web"),
                    )
                    .col(ColumnDef::new(InternetNlScans::LastStateCheck).timestamp_with_time_zone())
                    .col(ColumnDef::new(InternetNlScans::StartedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(InternetNlScans::FinishedOn).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UrlListReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlListReports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlListReports::UrlListId).uuid().not_null())
                    .col(
                        ColumnDef::new(UrlListReports::AtWhen)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UrlListReports::AverageInternetNlScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(UrlListReports::Calculation).json().not_null())
                    .col(
                        ColumnDef::new(UrlListReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_list_reports_url_list")
                            .from(UrlListReports::Table, UrlListReports::UrlListId)
                            .to(UrlLists::Table, UrlLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UrlListReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InternetNlScans::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InternetNlScans {
    Table,
    Id,
    ScanId,
    Type,
    LastStateCheck,
    StartedOn,
    FinishedOn,
}

#[derive(DeriveIden)]
pub enum UrlListReports {
    Table,
    Id,
    UrlListId,
    AtWhen,
    AverageInternetNlScore,
    Calculation,
    CreatedAt,
}
