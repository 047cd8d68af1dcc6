// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{setup, test_server, TestContext, API_URL};
use chrono::{DateTime, Duration, TimeZone, Utc};
use scanmon::domain::models::report::Report;
use scanmon::domain::models::url_list::ScanType;
use scanmon::domain::repositories::report_repository::ReportRepository;
use scanmon::domain::repositories::scan_repository::ScanRepository;
use scanmon::domain::repositories::url_list_repository::UrlListRepository;
use scanmon::domain::services::scan_monitor_service::{ScanMonitorConfig, ScanMonitorService};
use serde_json::{json, Value};
use uuid::Uuid;

fn t(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, day, hour, 0, 0).unwrap()
}

fn monitor(ctx: &TestContext) -> ScanMonitorService {
    ScanMonitorService::new(
        ctx.scans.clone(),
        ctx.reports.clone(),
        ScanMonitorConfig::new(API_URL, 30),
    )
}

async fn report_at(ctx: &TestContext, list_id: Uuid, at_when: DateTime<Utc>) -> Report {
    let mut report = Report::new(list_id, at_when, 75.0, json!({"urls": []}));
    report.created_at = at_when;
    ctx.reports.create(&report).await.unwrap();
    report
}

#[tokio::test]
async fn test_account_without_scans_is_empty() {
    let ctx = setup().await;
    let account = ctx.account().await;

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(1, 0))
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_requested_scan_without_handle() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "mail servers", ScanType::Mail).await;
    let scan = ctx.scan(&list, t(1, 8)).await;

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(1, 9))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.id, scan.id);
    assert_eq!(entry.scan_type, ScanType::Mail);
    assert!(entry.started);
    assert!(!entry.finished);
    assert!(!entry.success);
    assert_eq!(entry.state, "requested");
    assert_eq!(entry.message, "requested");
    assert_eq!(entry.status_url, None);
    assert_eq!(entry.last_check, None);
    assert_eq!(entry.last_report_id, None);
    assert_eq!(entry.runtime, Some(60 * 60 * 1000));
    assert_eq!(entry.list, "mail servers");
    assert_eq!(entry.list_id, list.id);
    assert_eq!(entry.log.len(), 1);
}

#[tokio::test]
async fn test_finished_scan_with_handle() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let scan = ctx.scan(&list, t(2, 8)).await;
    ctx.handle(&scan, "f00ba4", "mail_dashboard", Some(t(2, 9)))
        .await;
    ctx.finish(&scan, t(2, 10)).await;

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(20, 0))
        .await
        .unwrap();

    let entry = &entries[0];
    assert!(entry.finished);
    assert!(entry.success);
    assert_eq!(entry.scan_type, ScanType::Mail);
    assert_eq!(
        entry.status_url.as_deref(),
        Some("https://batch.internet.nl/api/batch/v2/requests/f00ba4")
    );
    assert_eq!(entry.last_check, Some(t(2, 9)));
    assert_eq!(entry.finished_on, Some(t(2, 10)));
    assert_eq!(entry.runtime, Some(2 * 60 * 60 * 1000));

    let states: Vec<&str> = entry.log.iter().map(|l| l.state.as_str()).collect();
    assert_eq!(states, vec!["finished", "requested"]);
}

#[tokio::test]
async fn test_direct_report_link_wins_over_window() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let scan = ctx.scan(&list, t(3, 8)).await;
    ctx.finish(&scan, t(3, 10)).await;

    let direct = report_at(&ctx, list.id, t(1, 0)).await;
    report_at(&ctx, list.id, t(3, 12)).await;
    ctx.scans.attach_report(scan.id, direct.id).await.unwrap();

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(4, 0))
        .await
        .unwrap();
    assert_eq!(entries[0].last_report_id, Some(direct.id));
}

#[tokio::test]
async fn test_report_inside_window_is_linked() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let scan = ctx.scan(&list, t(5, 8)).await;
    ctx.finish(&scan, t(5, 10)).await;

    let report = report_at(&ctx, list.id, t(5, 22)).await;

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(6, 0))
        .await
        .unwrap();
    assert_eq!(entries[0].last_report_id, Some(report.id));
}

#[tokio::test]
async fn test_report_outside_window_is_not_linked() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let scan = ctx.scan(&list, t(5, 8)).await;
    ctx.finish(&scan, t(5, 10)).await;

    report_at(&ctx, list.id, t(6, 16)).await;
    report_at(&ctx, list.id, t(5, 9)).await;

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(7, 0))
        .await
        .unwrap();
    assert_eq!(entries[0].last_report_id, None);
}

#[tokio::test]
async fn test_cancelled_scan_is_never_linked() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let scan = ctx.scan(&list, t(8, 8)).await;
    ctx.scans.cancel(scan.id, t(8, 9)).await.unwrap();
    report_at(&ctx, list.id, t(8, 10)).await;

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(9, 0))
        .await
        .unwrap();
    assert_eq!(entries[0].state, "cancelled");
    assert!(!entries[0].finished);
    assert_eq!(entries[0].last_report_id, None);
}

#[tokio::test]
async fn test_deleted_lists_and_other_accounts_are_hidden() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let other_account = ctx.account().await;

    let kept = ctx.list(&account, "kept", ScanType::Web).await;
    let removed = ctx.list(&account, "removed", ScanType::Web).await;
    let foreign = ctx.list(&other_account, "foreign", ScanType::Web).await;

    let visible = ctx.scan(&kept, t(10, 8)).await;
    ctx.scan(&removed, t(10, 9)).await;
    ctx.scan(&foreign, t(10, 10)).await;
    ctx.lists.soft_delete(removed.id, t(10, 11)).await.unwrap();

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(11, 0))
        .await
        .unwrap();
    let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![visible.id]);
}

#[tokio::test]
async fn test_at_most_thirty_newest_entries() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "busy", ScanType::Web).await;

    let start = t(12, 0);
    let mut newest = None;
    for i in 0..35 {
        let scan = ctx.scan(&list, start + Duration::minutes(i)).await;
        ctx.finish(&scan, start + Duration::minutes(i) + Duration::seconds(30))
            .await;
        newest = Some(scan.id);
    }

    let entries = monitor(&ctx)
        .get_scan_monitor_data(account.id, t(13, 0))
        .await
        .unwrap();

    assert_eq!(entries.len(), 30);
    assert_eq!(Some(entries[0].id), newest);
    assert!(entries
        .windows(2)
        .all(|pair| pair[0].started_on >= pair[1].started_on));
}

#[tokio::test]
async fn test_scan_monitor_endpoint_serializes_contract() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    ctx.scan(&list, Utc::now() - Duration::minutes(5)).await;

    let server = test_server(&ctx);
    let response = server
        .get(&format!("/v1/accounts/{}/scan-monitor", account.id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let entry = &body.as_array().unwrap()[0];
    assert_eq!(entry["type"], "web");
    assert_eq!(entry["list"], "websites");
    assert_eq!(entry["status_url"], Value::Null);
    assert_eq!(entry["last_check"], Value::Null);
    assert_eq!(entry["last_report_id"], Value::Null);
    assert_eq!(entry["started"], true);
    assert_eq!(entry["finished"], false);
    assert!(entry["runtime"].as_i64().unwrap() >= 5 * 60 * 1000);
    assert_eq!(entry["log"][0]["state"], "requested");
}

#[tokio::test]
async fn test_deleted_list_scans_survive_in_storage() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "removed", ScanType::Web).await;
    let scan = ctx.scan(&list, t(14, 8)).await;
    ctx.lists.soft_delete(list.id, t(14, 9)).await.unwrap();

    assert!(ctx.scans.find_by_id(scan.id).await.unwrap().is_some());
    let stored = ctx.lists.find_by_id(list.id).await.unwrap().unwrap();
    assert!(stored.is_deleted);
}
