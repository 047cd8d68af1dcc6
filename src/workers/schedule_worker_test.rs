#[cfg(test)]
mod tests {
    use crate::domain::models::account::Account;
    use crate::domain::models::scan::STATE_FINISHED;
    use crate::domain::models::url_list::{RecurrencePolicy, ScanType, UrlList};
    use crate::domain::repositories::account_repository::AccountRepository;
    use crate::domain::repositories::scan_repository::ScanRepository;
    use crate::domain::repositories::url_list_repository::{ScanTrigger, UrlListRepository};
    use crate::infrastructure::database::entities::{account_scan, url_list};
    use crate::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
    use crate::infrastructure::repositories::scan_repo_impl::ScanRepositoryImpl;
    use crate::infrastructure::repositories::url_list_repo_impl::UrlListRepositoryImpl;
    use crate::workers::schedule_worker::{watch_exit, ScanScheduleWorker, TickSummary};
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::sea_query::Expr;
    use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter};
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    async fn setup_db() -> Arc<DatabaseConnection> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let db = Arc::new(db);
        Migrator::up(db.as_ref(), None).await.unwrap();
        db
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    async fn create_due_list(
        db: &Arc<DatabaseConnection>,
        policy: RecurrencePolicy,
        name: &str,
    ) -> UrlList {
        let account = AccountRepositoryImpl::new(db.clone())
            .create(&Account::new("scheduler"))
            .await
            .unwrap();

        let mut list = UrlList::new(account.id, name, ScanType::Web);
        list.automated_scan_frequency = policy;
        list.created_at = at(1, 0);
        let list = UrlListRepositoryImpl::new(db.clone())
            .create(&list)
            .await
            .unwrap();

        let past: DateTime<FixedOffset> = at(1, 12).into();
        url_list::Entity::update_many()
            .col_expr(url_list::Column::ScheduledNextScan, Expr::value(past))
            .filter(url_list::Column::Id.eq(list.id))
            .exec(db.as_ref())
            .await
            .unwrap();

        list
    }

    async fn scans_for(db: &DatabaseConnection, list_id: Uuid) -> usize {
        account_scan::Entity::find()
            .filter(account_scan::Column::UrlListId.eq(list_id))
            .all(db)
            .await
            .unwrap()
            .len()
    }

    fn worker(db: &Arc<DatabaseConnection>) -> ScanScheduleWorker<UrlListRepositoryImpl> {
        ScanScheduleWorker::new(
            Arc::new(UrlListRepositoryImpl::new(db.clone())),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_tick_starts_due_lists_and_renews_busy_ones() {
        let db = setup_db().await;
        let lists = UrlListRepositoryImpl::new(db.clone());

        let idle = create_due_list(&db, RecurrencePolicy::Monthly, "idle").await;
        let busy = create_due_list(&db, RecurrencePolicy::Quarterly, "busy").await;
        let disabled = create_due_list(&db, RecurrencePolicy::Disabled, "disabled").await;

        lists
            .claim_scan_slot(busy.id, at(1, 6), ScanTrigger::Manual)
            .await
            .unwrap();

        let summary = worker(&db).tick(at(2, 9)).await.unwrap();
        assert_eq!(
            summary,
            TickSummary {
                started: 1,
                unavailable: 1,
                ..Default::default()
            }
        );

        assert_eq!(scans_for(&db, idle.id).await, 1);
        assert_eq!(scans_for(&db, busy.id).await, 1);
        assert_eq!(scans_for(&db, disabled.id).await, 0);

        let busy = lists.find_by_id(busy.id).await.unwrap().unwrap();
        assert!(busy.scheduled_next_scan > at(2, 9));

        // Everything was renewed, so the next tick finds nothing to do.
        let second = worker(&db).tick(at(2, 10)).await.unwrap();
        assert_eq!(second, TickSummary::default());
    }

    #[tokio::test]
    async fn test_concurrent_ticks_start_one_scan_per_list() {
        let db = setup_db().await;
        let list = create_due_list(&db, RecurrencePolicy::TwiceMonthly, "shared").await;

        let first = worker(&db);
        let second = worker(&db);
        let (a, b) = tokio::join!(first.tick(at(3, 9)), second.tick(at(3, 9)));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.started + b.started, 1);
        assert_eq!(scans_for(&db, list.id).await, 1);
    }

    #[tokio::test]
    async fn test_invalid_policy_does_not_abort_tick() {
        let db = setup_db().await;
        let broken = create_due_list(&db, RecurrencePolicy::Monthly, "broken").await;
        let healthy = create_due_list(&db, RecurrencePolicy::Monthly, "healthy").await;

        url_list::Entity::update_many()
            .col_expr(url_list::Column::AutomatedScanFrequency, Expr::value("weekly"))
            .filter(url_list::Column::Id.eq(broken.id))
            .exec(db.as_ref())
            .await
            .unwrap();

        let summary = worker(&db).tick(at(4, 9)).await.unwrap();

        assert_eq!(summary.started, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(scans_for(&db, healthy.id).await, 1);
        assert_eq!(scans_for(&db, broken.id).await, 0);
    }

    #[tokio::test]
    async fn test_finished_scan_frees_the_slot_for_the_next_window() {
        let db = setup_db().await;
        let list = create_due_list(&db, RecurrencePolicy::Monthly, "monthly").await;
        let scans = ScanRepositoryImpl::new(db.clone());

        worker(&db).tick(at(5, 9)).await.unwrap();
        let scan = scans.latest_for_list(list.id).await.unwrap().unwrap();
        scans
            .record_state(scan.id, STATE_FINISHED, at(5, 11))
            .await
            .unwrap();

        // July 1st is the renewed moment for a monthly list.
        let summary = worker(&db)
            .tick(Utc.with_ymd_and_hms(2025, 7, 1, 0, 30, 0).unwrap())
            .await
            .unwrap();
        assert_eq!(summary.started, 1);
        assert_eq!(scans_for(&db, list.id).await, 2);
    }

    #[tokio::test]
    async fn test_watch_exit_reports_panicked_scheduler() {
        let panicked = tokio::spawn(async {
            panic!("scheduler blew up");
        });
        assert!(watch_exit(panicked).await);

        let finished = tokio::spawn(async {});
        assert!(!watch_exit(finished).await);

        let cancelled = tokio::spawn(std::future::pending::<()>());
        cancelled.abort();
        assert!(!watch_exit(cancelled).await);
    }
}
