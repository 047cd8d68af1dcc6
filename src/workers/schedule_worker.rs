// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::scan_repository::RepositoryError;
use crate::domain::repositories::url_list_repository::{
    ScanClaim, ScanTrigger, UrlListRepository,
};
use crate::infrastructure::metrics::{SCANS_SKIPPED, SCANS_STARTED, SCHEDULE_TICKS};
use crate::utils::errors::WorkerError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 一次调度检查的结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickSummary {
    pub started: usize,
    pub not_due: usize,
    pub unavailable: usize,
    pub contended: usize,
    pub failed: usize,
}

/// 自动复扫调度工作器
///
/// 定期找出调度日历已到期的列表，并逐个通过 `claim_scan_slot` 原子地续订调度时间并发起扫描。
/// 多个实例同时运行时，同一列表在同一窗口内只会被一个实例启动。
pub struct ScanScheduleWorker<R>
where
    R: UrlListRepository + 'static,
{
    repository: Arc<R>,
    interval: Duration,
}

impl<R> ScanScheduleWorker<R>
where
    R: UrlListRepository + 'static,
{
    pub fn new(repository: Arc<R>, interval: Duration) -> Self {
        Self {
            repository,
            interval,
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!(
            "Scan schedule worker started, checking every {:?}",
            self.interval
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.tick(Utc::now()).await {
                Ok(summary) => {
                    if summary.started > 0 || summary.failed > 0 {
                        info!(
                            "Schedule tick started {} scans ({} unavailable, {} contended, {} failed)",
                            summary.started, summary.unavailable, summary.contended, summary.failed
                        );
                    }
                }
                Err(e) => {
                    error!("Failed to run scan schedule tick: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 执行一次调度检查
    ///
    /// 单个列表的失败只记录日志，不中断本轮检查。
    ///
    /// # 返回值
    ///
    /// * `Ok(TickSummary)` - 本轮的结果统计
    /// * `Err(WorkerError)` - 无法读取到期列表
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<TickSummary, WorkerError> {
        metrics::counter!(SCHEDULE_TICKS).increment(1);

        let due = self.repository.find_due(now).await?;
        debug!("{} lists are due for scanning", due.len());

        let mut summary = TickSummary::default();
        for list_id in due {
            match self
                .repository
                .claim_scan_slot(list_id, now, ScanTrigger::Scheduled)
                .await
            {
                Ok(ScanClaim::Started(scan)) => {
                    metrics::counter!(SCANS_STARTED).increment(1);
                    info!("Scheduled scan {} started for list {}", scan.id, list_id);
                    summary.started += 1;
                }
                Ok(ScanClaim::NotDue) => {
                    metrics::counter!(SCANS_SKIPPED, "reason" => "not_due").increment(1);
                    summary.not_due += 1;
                }
                Ok(ScanClaim::Unavailable) => {
                    metrics::counter!(SCANS_SKIPPED, "reason" => "unavailable").increment(1);
                    debug!("List {} still has a running scan, schedule renewed", list_id);
                    summary.unavailable += 1;
                }
                Ok(ScanClaim::Contended) => {
                    metrics::counter!(SCANS_SKIPPED, "reason" => "contended").increment(1);
                    summary.contended += 1;
                }
                Err(RepositoryError::InvalidPolicy(e)) => {
                    metrics::counter!(SCANS_SKIPPED, "reason" => "invalid_policy").increment(1);
                    error!("List {} has an unusable scan schedule: {}", list_id, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    metrics::counter!(SCANS_SKIPPED, "reason" => "error").increment(1);
                    warn!("Failed to schedule scan for list {}: {}", list_id, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}

/// 等待调度任务结束并记录结束原因
///
/// 调度循环本身不会返回，任务结束意味着被取消或发生了 panic。
/// 返回 `true` 表示任务因 panic 结束。
pub async fn watch_exit(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => {
            warn!("Scan scheduler stopped");
            false
        }
        Err(e) if e.is_panic() => {
            error!("Scan scheduler panicked, no more scans will be scheduled: {}", e);
            true
        }
        Err(e) => {
            warn!("Scan scheduler task was cancelled: {}", e);
            false
        }
    }
}

#[cfg(test)]
#[path = "schedule_worker_test.rs"]
mod tests;
