use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_accounts_and_lists::{Accounts, UrlLists};
use super::m20250301_000002_create_scan_handles_and_reports::{InternetNlScans, UrlListReports};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountScans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AccountScans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AccountScans::AccountId).uuid().not_null())
                    .col(ColumnDef::new(AccountScans::UrlListId).uuid().not_null())
                    // Creation order assigned by the store, independent of caller clocks
                    .col(
                        ColumnDef::new(AccountScans::Seq)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    // Null until internet.nl acknowledged the request
                    .col(ColumnDef::new(AccountScans::ScanHandleId).uuid())
                    .col(
                        ColumnDef::new(AccountScans::State)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(AccountScans::StartedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(AccountScans::FinishedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(AccountScans::StateChangedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(AccountScans::ReportId).uuid())
                    .col(
                        ColumnDef::new(AccountScans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_scans_account")
                            .from(AccountScans::Table, AccountScans::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_scans_url_list")
                            .from(AccountScans::Table, AccountScans::UrlListId)
                            .to(UrlLists::Table, UrlLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_scans_scan_handle")
                            .from(AccountScans::Table, AccountScans::ScanHandleId)
                            .to(InternetNlScans::Table, InternetNlScans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_scans_report")
                            .from(AccountScans::Table, AccountScans::ReportId)
                            .to(UrlListReports::Table, UrlListReports::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Append-only state history
        manager
            .create_table(
                Table::create()
                    .table(AccountScanLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountScanLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccountScanLogs::ScanId).uuid().not_null())
                    .col(
                        ColumnDef::new(AccountScanLogs::State)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AccountScanLogs::AtWhen)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_scan_logs_scan")
                            .from(AccountScanLogs::Table, AccountScanLogs::ScanId)
                            .to(AccountScans::Table, AccountScans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountScanLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountScans::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccountScans {
    Table,
    Id,
    AccountId,
    UrlListId,
    Seq,
    ScanHandleId,
    State,
    StartedOn,
    FinishedOn,
    StateChangedOn,
    ReportId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum AccountScanLogs {
    Table,
    Id,
    ScanId,
    State,
    AtWhen,
}
