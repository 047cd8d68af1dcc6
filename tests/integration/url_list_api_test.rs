// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{setup, test_server};
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use scanmon::domain::models::url_list::{RecurrencePolicy, ScanType};
use scanmon::domain::repositories::scan_repository::ScanRepository;
use scanmon::domain::repositories::url_list_repository::UrlListRepository;
use scanmon::infrastructure::database::entities::url_list;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_manual_scan_then_conflict_until_finished() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let server = test_server(&ctx);

    let first = server.post(&format!("/v1/lists/{}/scans", list.id)).await;
    first.assert_status(StatusCode::CREATED);
    let scan: Value = first.json();
    assert_eq!(scan["state"], "requested");
    assert_eq!(scan["url_list_id"], list.id.to_string());

    let second = server.post(&format!("/v1/lists/{}/scans", list.id)).await;
    second.assert_status(StatusCode::CONFLICT);

    let scan_id: Uuid = scan["id"].as_str().unwrap().parse().unwrap();
    ctx.scans
        .record_state(scan_id, "finished", Utc::now())
        .await
        .unwrap();

    let third = server.post(&format!("/v1/lists/{}/scans", list.id)).await;
    third.assert_status(StatusCode::CREATED);

    let stored = ctx.lists.find_by_id(list.id).await.unwrap().unwrap();
    assert!(stored.last_manual_scan.is_some());
}

#[tokio::test]
async fn test_manual_scan_on_disabled_list_is_rejected() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "paused", ScanType::Web).await;

    url_list::Entity::update_many()
        .col_expr(url_list::Column::EnableScans, Expr::value(false))
        .filter(url_list::Column::Id.eq(list.id))
        .exec(ctx.db.as_ref())
        .await
        .unwrap();

    let server = test_server(&ctx);
    let response = server.post(&format!("/v1/lists/{}/scans", list.id)).await;
    response.assert_status(StatusCode::CONFLICT);

    let availability = server
        .get(&format!("/v1/lists/{}/scan-availability", list.id))
        .await;
    availability.assert_status_ok();
    assert_eq!(availability.json::<Value>()["available"], false);
}

#[tokio::test]
async fn test_unknown_and_deleted_lists_are_not_found() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "gone", ScanType::Web).await;
    ctx.lists.soft_delete(list.id, Utc::now()).await.unwrap();
    let server = test_server(&ctx);

    for id in [list.id, Uuid::new_v4()] {
        server
            .post(&format!("/v1/lists/{}/scans", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/v1/lists/{}/scan-availability", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .put(&format!("/v1/lists/{}/schedule", id))
            .json(&json!({"automated_scan_frequency": "monthly"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_scan_availability_reports_due_and_available() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx
        .list_with_policy(&account, "due", ScanType::Web, RecurrencePolicy::Monthly)
        .await;
    ctx.set_next_scan(list.id, Utc::now() - Duration::hours(1))
        .await;
    let server = test_server(&ctx);

    let response = server
        .get(&format!("/v1/lists/{}/scan-availability", list.id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["list_id"], list.id.to_string());
    assert_eq!(body["available"], true);
    assert_eq!(body["due"], true);
    assert_eq!(body["automated_scan_frequency"], "every 1st day of the month");
}

#[tokio::test]
async fn test_change_schedule_accepts_names_and_aliases() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let server = test_server(&ctx);

    let response = server
        .put(&format!("/v1/lists/{}/schedule", list.id))
        .json(&json!({"automated_scan_frequency": "twice-monthly"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["automated_scan_frequency"], "twice per month");
    let next: DateTime<Utc> = body["scheduled_next_scan"].as_str().unwrap().parse().unwrap();
    assert!(next > Utc::now());
    assert!(next <= Utc::now() + Duration::days(32));

    let response = server
        .put(&format!("/v1/lists/{}/schedule", list.id))
        .json(&json!({"automated_scan_frequency": "every half year"}))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["automated_scan_frequency"],
        "every half year"
    );
}

#[tokio::test]
async fn test_change_schedule_rejects_unknown_policy() {
    let ctx = setup().await;
    let account = ctx.account().await;
    let list = ctx.list(&account, "websites", ScanType::Web).await;
    let server = test_server(&ctx);

    let response = server
        .put(&format!("/v1/lists/{}/schedule", list.id))
        .json(&json!({"automated_scan_frequency": "weekly"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("weekly"));

    let empty = server
        .put(&format!("/v1/lists/{}/schedule", list.id))
        .json(&json!({"automated_scan_frequency": ""}))
        .await;
    empty.assert_status(StatusCode::BAD_REQUEST);

    let stored = ctx.lists.find_by_id(list.id).await.unwrap().unwrap();
    assert_eq!(stored.automated_scan_frequency, RecurrencePolicy::Disabled);
}
