// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::url_list::ScanType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 扫描监控条目
///
/// 前端轮询的状态记录，字段名是稳定的对外契约。
/// `message` 与 `state`、`success` 与 `finished` 为兼容旧客户端而重复输出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStatusEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub scan_type: ScanType,
    pub started: bool,
    pub started_on: Option<DateTime<Utc>>,
    pub finished: bool,
    pub finished_on: Option<DateTime<Utc>>,
    pub status_url: Option<String>,
    pub message: String,
    pub success: bool,
    pub list: String,
    pub list_id: Uuid,
    pub last_check: Option<DateTime<Utc>>,
    /// 运行时长（毫秒）
    pub runtime: Option<i64>,
    pub last_report_id: Option<Uuid>,
    pub state: String,
    /// 状态历史，最新的在前
    pub log: Vec<ScanLogMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanLogMessage {
    pub at_when: DateTime<Utc>,
    pub state: String,
}
