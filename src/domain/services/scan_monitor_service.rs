// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan::{Scan, ScanOverview};
use crate::domain::models::scan_status::{ScanLogMessage, ScanStatusEntry};
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::repositories::scan_repository::{RepositoryError, ScanRepository};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// 扫描监控最多返回的条目数
pub const MAX_MONITOR_ENTRIES: u64 = 30;

/// 启发式关联报告时，`finished_on` 之后的查找窗口（小时）
pub const REPORT_LINK_WINDOW_HOURS: i64 = 24;

/// 扫描监控配置
///
/// internet.nl 地址由调用方注入，不从进程环境读取。
#[derive(Debug, Clone)]
pub struct ScanMonitorConfig {
    /// internet.nl batch API 基础地址
    pub internet_nl_api_url: String,
    /// 返回条目上限，超过 [`MAX_MONITOR_ENTRIES`] 时按上限处理
    pub limit: u64,
}

impl ScanMonitorConfig {
    pub fn new(internet_nl_api_url: impl Into<String>, limit: u64) -> Self {
        Self {
            internet_nl_api_url: internet_nl_api_url.into(),
            limit,
        }
    }

    pub fn effective_limit(&self) -> u64 {
        self.limit.min(MAX_MONITOR_ENTRIES)
    }
}

/// 扫描监控服务
///
/// 把扫描的当前状态、状态历史以及（可能缺失的）报告关联合并成前端轮询用的状态列表。
/// 单个扫描的细节解析失败只会降级该条目，不会中断整个账户的响应。
pub struct ScanMonitorService {
    scan_repo: Arc<dyn ScanRepository>,
    report_repo: Arc<dyn ReportRepository>,
    config: ScanMonitorConfig,
}

impl ScanMonitorService {
    pub fn new(
        scan_repo: Arc<dyn ScanRepository>,
        report_repo: Arc<dyn ReportRepository>,
        config: ScanMonitorConfig,
    ) -> Self {
        Self {
            scan_repo,
            report_repo,
            config,
        }
    }

    /// 获取账户的扫描监控数据
    ///
    /// # 参数
    ///
    /// * `account_id` - 账户ID
    /// * `now` - 计算进行中扫描运行时长的参考时间
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<ScanStatusEntry>)` - 最近创建的扫描，最新的在前
    /// * `Err(RepositoryError)` - 扫描列表本身读取失败
    pub async fn get_scan_monitor_data(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScanStatusEntry>, RepositoryError> {
        let rows = self
            .scan_repo
            .recent_for_account(account_id, self.config.effective_limit())
            .await?;

        debug!("Reconciling {} scans for account {}", rows.len(), account_id);

        let mut response = Vec::with_capacity(rows.len());
        for row in rows {
            let last_report_id = self.resolve_last_report_id(&row.scan).await;
            let log = self.load_log(row.scan.id).await;
            response.push(self.build_entry(row, last_report_id, log, now));
        }

        Ok(response)
    }

    /// 解析完成扫描对应的报告
    ///
    /// 直接关联优先；没有直接关联时，取同一列表 `at_when` 位于
    /// `[finished_on, finished_on + 24h]` 内最近创建的报告。
    async fn resolve_last_report_id(&self, scan: &Scan) -> Option<Uuid> {
        if !scan.finished() {
            return None;
        }

        if let Some(report_id) = scan.report_id {
            return Some(report_id);
        }

        let finished_on = scan.finished_on?;
        let until = finished_on.checked_add_signed(Duration::hours(REPORT_LINK_WINDOW_HOURS))?;

        match self
            .report_repo
            .find_linked_report_id(scan.url_list_id, finished_on, until)
            .await
        {
            Ok(report_id) => report_id,
            Err(e) => {
                warn!("Failed to look up report for scan {}: {}", scan.id, e);
                None
            }
        }
    }

    async fn load_log(&self, scan_id: Uuid) -> Vec<ScanLogMessage> {
        match self.scan_repo.logs_for_scan(scan_id).await {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| ScanLogMessage {
                    at_when: entry.at_when,
                    state: entry.state,
                })
                .collect(),
            Err(e) => {
                warn!("Failed to load state log for scan {}: {}", scan_id, e);
                Vec::new()
            }
        }
    }

    fn build_entry(
        &self,
        row: ScanOverview,
        last_report_id: Option<Uuid>,
        log: Vec<ScanLogMessage>,
        now: DateTime<Utc>,
    ) -> ScanStatusEntry {
        let scan_type = row.scan_type();
        let status_url = row.status_url(&self.config.internet_nl_api_url);
        let last_check = row.last_check();
        let runtime = scan_runtime(&row.scan, now);
        let finished = row.scan.finished();
        let scan = row.scan;

        ScanStatusEntry {
            id: scan.id,
            scan_type,
            started: true,
            started_on: scan.started_on,
            finished,
            finished_on: scan.finished_on,
            status_url,
            message: scan.state.clone(),
            success: finished,
            list: row.list_name,
            list_id: scan.url_list_id,
            last_check,
            runtime,
            last_report_id,
            state: scan.state,
            log,
        }
    }
}

/// 扫描运行时长（毫秒）
///
/// 已完成的扫描为 `finished_on - started_on`，其余为 `now - started_on`，每次调用都重新计算。
/// 缺少所需时间戳时返回 `None`。
pub fn scan_runtime(scan: &Scan, now: DateTime<Utc>) -> Option<i64> {
    let started_on = scan.started_on?;
    let end = if scan.finished() {
        scan.finished_on?
    } else {
        now
    };

    Some((end - started_on).num_milliseconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scan(state: &str) -> Scan {
        let started = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut scan = Scan::requested(Uuid::new_v4(), Uuid::new_v4(), started);
        scan.state = state.to_string();
        scan
    }

    #[test]
    fn test_runtime_of_finished_scan_is_fixed() {
        let mut scan = scan("finished");
        scan.finished_on = scan.started_on.map(|s| s + Duration::minutes(90));

        let early = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(scan_runtime(&scan, early), Some(90 * 60 * 1000));
        assert_eq!(scan_runtime(&scan, late), Some(90 * 60 * 1000));
    }

    #[test]
    fn test_runtime_of_running_scan_grows() {
        let scan = scan("running");
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let second = first + Duration::seconds(5);

        let a = scan_runtime(&scan, first).unwrap();
        let b = scan_runtime(&scan, second).unwrap();
        assert_eq!(a, 60 * 60 * 1000);
        assert_eq!(b - a, 5000);
    }

    #[test]
    fn test_runtime_without_timestamps() {
        let mut unstarted = scan("running");
        unstarted.started_on = None;
        assert_eq!(scan_runtime(&unstarted, Utc::now()), None);

        let finished_without_end = scan("finished");
        assert_eq!(scan_runtime(&finished_without_end, Utc::now()), None);
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(ScanMonitorConfig::new("x", 500).effective_limit(), 30);
        assert_eq!(ScanMonitorConfig::new("x", 10).effective_limit(), 10);
    }
}
