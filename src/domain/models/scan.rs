// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::url_list::ScanType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 扫描请求已创建、尚未被 internet.nl 确认
pub const STATE_REQUESTED: &str = "requested";
/// 扫描完成，报告已生成
pub const STATE_FINISHED: &str = "finished";
/// 扫描被中止
pub const STATE_CANCELLED: &str = "cancelled";

/// 判断状态是否为终态（完成或取消）
pub fn is_terminal_state(state: &str) -> bool {
    state == STATE_FINISHED || state == STATE_CANCELLED
}

/// 账户扫描实体
///
/// 账户、URL 列表与 internet.nl 远程扫描句柄之间的关联记录。
/// `state` 是自由字符串，除 `finished` / `cancelled` 外的取值由远程服务决定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    pub id: Uuid,
    pub account_id: Uuid,
    pub url_list_id: Uuid,
    /// 远程扫描句柄，请求尚未被确认时为空
    pub scan_handle_id: Option<Uuid>,
    pub state: String,
    pub started_on: Option<DateTime<Utc>>,
    pub finished_on: Option<DateTime<Utc>>,
    pub state_changed_on: Option<DateTime<Utc>>,
    /// 扫描完成后生成的报告
    pub report_id: Option<Uuid>,
    /// 创建时间，仅用于展示
    pub created_at: DateTime<Utc>,
    /// 存储写入时分配的递增序号，作为“最近一次扫描”的排序依据；写入前为 0
    #[serde(default)]
    pub seq: i64,
}

impl Scan {
    /// 创建一个刚发起的扫描
    pub fn requested(account_id: Uuid, url_list_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            url_list_id,
            scan_handle_id: None,
            state: STATE_REQUESTED.to_string(),
            started_on: Some(now),
            finished_on: None,
            state_changed_on: Some(now),
            report_id: None,
            created_at: now,
            seq: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.state == STATE_FINISHED
    }

    /// 完成或取消之后扫描不再变化
    pub fn is_concluded(&self) -> bool {
        is_terminal_state(&self.state)
    }
}

/// 扫描状态变更日志，只追加不修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanLogEntry {
    pub id: Uuid,
    pub scan_id: Uuid,
    pub state: String,
    pub at_when: DateTime<Utc>,
}

/// internet.nl 一侧的扫描句柄
///
/// 由外部轮询组件写入，本系统只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanHandle {
    pub id: Uuid,
    /// internet.nl 分配的请求标识
    pub scan_id: Option<String>,
    /// 远程类型名称，可能包含 `mail_dashboard` 之类的子类型
    pub scan_type: String,
    pub last_state_check: Option<DateTime<Utc>>,
    pub started_on: Option<DateTime<Utc>>,
    pub finished_on: Option<DateTime<Utc>>,
}

/// 扫描监控所需的一行数据：扫描本身、所属列表的展示字段以及可选的远程句柄
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOverview {
    pub scan: Scan,
    pub list_name: String,
    pub list_scan_type: ScanType,
    pub handle: Option<ScanHandle>,
}

impl ScanOverview {
    /// 扫描类型：有远程句柄时以句柄为准，否则取列表类型
    pub fn scan_type(&self) -> ScanType {
        match &self.handle {
            Some(handle) => ScanType::normalize(&handle.scan_type),
            None => self.list_scan_type,
        }
    }

    /// internet.nl 上的状态页地址，没有句柄或请求标识时为空
    pub fn status_url(&self, api_base_url: &str) -> Option<String> {
        let scan_id = self.handle.as_ref()?.scan_id.as_deref()?;
        Some(format!(
            "{}/requests/{}",
            api_base_url.trim_end_matches('/'),
            scan_id
        ))
    }

    /// 远程服务最近一次轮询的时间
    pub fn last_check(&self) -> Option<DateTime<Utc>> {
        self.handle.as_ref().and_then(|h| h.last_state_check)
    }
}
