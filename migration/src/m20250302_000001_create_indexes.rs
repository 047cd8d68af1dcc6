use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_accounts_and_lists::UrlLists;
use super::m20250301_000002_create_scan_handles_and_reports::UrlListReports;
use super::m20250301_000003_create_account_scans::{AccountScanLogs, AccountScans};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Scan monitor: newest scans per account
        manager
            .create_index(
                Index::create()
                    .name("idx_account_scans_account_seq")
                    .table(AccountScans::Table)
                    .col(AccountScans::AccountId)
                    .col(AccountScans::Seq)
                    .to_owned(),
            )
            .await?;

        // Eligibility: latest scan per list
        manager
            .create_index(
                Index::create()
                    .name("idx_account_scans_url_list_seq")
                    .table(AccountScans::Table)
                    .col(AccountScans::UrlListId)
                    .col(AccountScans::Seq)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_scan_logs_scan_at_when")
                    .table(AccountScanLogs::Table)
                    .col(AccountScanLogs::ScanId)
                    .col(AccountScanLogs::AtWhen)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_url_list_reports_url_list_at_when")
                    .table(UrlListReports::Table)
                    .col(UrlListReports::UrlListId)
                    .col(UrlListReports::AtWhen)
                    .to_owned(),
            )
            .await?;

        // Scheduler: due lists
        manager
            .create_index(
                Index::create()
                    .name("idx_url_lists_due")
                    .table(UrlLists::Table)
                    .col(UrlLists::IsDeleted)
                    .col(UrlLists::ScheduledNextScan)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_url_lists_due",
            "idx_url_list_reports_url_list_at_when",
            "idx_account_scan_logs_scan_at_when",
            "idx_account_scans_url_list_seq",
            "idx_account_scans_account_seq",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
