// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use chrono::{DateTime, FixedOffset, Utc};
use migration::{Migrator, MigratorTrait};
use scanmon::domain::models::account::Account;
use scanmon::domain::models::scan::Scan;
use scanmon::domain::models::url_list::{RecurrencePolicy, ScanType, UrlList};
use scanmon::domain::repositories::account_repository::AccountRepository;
use scanmon::domain::repositories::scan_repository::ScanRepository;
use scanmon::domain::repositories::url_list_repository::UrlListRepository;
use scanmon::domain::services::scan_monitor_service::ScanMonitorConfig;
use scanmon::infrastructure::database::entities::{scan_handle, url_list};
use scanmon::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use scanmon::infrastructure::repositories::report_repo_impl::ReportRepositoryImpl;
use scanmon::infrastructure::repositories::scan_repo_impl::ScanRepositoryImpl;
use scanmon::infrastructure::repositories::url_list_repo_impl::UrlListRepositoryImpl;
use scanmon::presentation::routes;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

pub const API_URL: &str = "https://batch.internet.nl/api/batch/v2/";

#[allow(dead_code)]
pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub accounts: Arc<AccountRepositoryImpl>,
    pub lists: Arc<UrlListRepositoryImpl>,
    pub scans: Arc<ScanRepositoryImpl>,
    pub reports: Arc<ReportRepositoryImpl>,
}

pub async fn setup() -> TestContext {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let db = Arc::new(db);

    TestContext {
        accounts: Arc::new(AccountRepositoryImpl::new(db.clone())),
        lists: Arc::new(UrlListRepositoryImpl::new(db.clone())),
        scans: Arc::new(ScanRepositoryImpl::new(db.clone())),
        reports: Arc::new(ReportRepositoryImpl::new(db.clone())),
        db,
    }
}

pub fn test_server(ctx: &TestContext) -> TestServer {
    let app = routes::app(ctx.db.clone(), ScanMonitorConfig::new(API_URL, 30));
    TestServer::new(app).unwrap()
}

impl TestContext {
    pub async fn account(&self) -> Account {
        self.accounts
            .create(&Account::new("Internet Cleanup Foundation"))
            .await
            .unwrap()
    }

    pub async fn list(&self, account: &Account, name: &str, scan_type: ScanType) -> UrlList {
        self.list_with_policy(account, name, scan_type, RecurrencePolicy::Disabled)
            .await
    }

    pub async fn list_with_policy(
        &self,
        account: &Account,
        name: &str,
        scan_type: ScanType,
        policy: RecurrencePolicy,
    ) -> UrlList {
        let mut list = UrlList::new(account.id, name, scan_type);
        list.automated_scan_frequency = policy;
        self.lists.create(&list).await.unwrap()
    }

    /// 直接写入一条扫描，便于构造任意时间点
    pub async fn scan(&self, list: &UrlList, started_on: DateTime<Utc>) -> Scan {
        let scan = Scan::requested(list.account_id, list.id, started_on);
        self.scans.create(&scan).await.unwrap()
    }

    pub async fn finish(&self, scan: &Scan, at: DateTime<Utc>) -> Scan {
        self.scans
            .record_state(scan.id, "finished", at)
            .await
            .unwrap()
    }

    pub async fn handle(
        &self,
        scan: &Scan,
        remote_id: &str,
        remote_type: &str,
        last_check: Option<DateTime<Utc>>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        scan_handle::ActiveModel {
            id: Set(id),
            scan_id: Set(Some(remote_id.to_string())),
            scan_type: Set(remote_type.to_string()),
            last_state_check: Set(last_check.map(Into::into)),
            started_on: Set(scan.started_on.map(Into::into)),
            finished_on: Set(None),
        }
        .insert(self.db.as_ref())
        .await
        .unwrap();

        self.scans.attach_handle(scan.id, id).await.unwrap();
        id
    }

    pub async fn set_next_scan(&self, list_id: Uuid, at: DateTime<Utc>) {
        let at: DateTime<FixedOffset> = at.into();
        url_list::Entity::update_many()
            .col_expr(url_list::Column::ScheduledNextScan, Expr::value(at))
            .filter(url_list::Column::Id.eq(list_id))
            .exec(self.db.as_ref())
            .await
            .unwrap();
    }
}
