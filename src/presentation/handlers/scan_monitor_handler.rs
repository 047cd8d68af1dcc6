// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan_status::ScanStatusEntry;
use crate::domain::services::scan_monitor_service::ScanMonitorService;
use crate::presentation::errors::AppError;
use axum::{extract::Path, Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// 账户最近扫描的状态列表，供前端轮询
///
/// # 返回值
///
/// * `Ok(Json<Vec<ScanStatusEntry>>)` - 最新的扫描在前，最多 30 条
/// * `Err(AppError)` - 扫描列表读取失败
pub async fn get_scan_monitor(
    Extension(service): Extension<Arc<ScanMonitorService>>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Vec<ScanStatusEntry>>, AppError> {
    let entries = service.get_scan_monitor_data(account_id, Utc::now()).await?;
    Ok(Json(entries))
}
