// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan::{Scan, ScanLogEntry, ScanOverview};
use crate::domain::services::scan_schedule::ScheduleError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 存储的复扫策略无法识别
    #[error("Invalid scan schedule: {0}")]
    InvalidPolicy(#[from] ScheduleError),
    /// 与当前记录状态冲突的写入
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// 扫描仓库特质
///
/// 扫描记录只会按远程进度追加状态；进入 `finished` / `cancelled` 后不再变化。
#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// 创建扫描并写入第一条状态日志，返回的扫描带有存储分配的序号
    async fn create(&self, scan: &Scan) -> Result<Scan, RepositoryError>;

    /// 根据ID查找扫描
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Scan>, RepositoryError>;

    /// 列表最近创建的一次扫描（按序号）
    async fn latest_for_list(&self, url_list_id: Uuid) -> Result<Option<Scan>, RepositoryError>;

    /// 关联 internet.nl 确认后的远程句柄
    async fn attach_handle(&self, id: Uuid, scan_handle_id: Uuid) -> Result<(), RepositoryError>;

    /// 记录一次状态变更
    ///
    /// 追加日志并更新 `state` / `state_changed_on`，`finished` 同时写入 `finished_on`。
    ///
    /// # 返回值
    ///
    /// * `Ok(Scan)` - 更新后的扫描
    /// * `Err(RepositoryError::NotFound)` - 扫描不存在
    /// * `Err(RepositoryError::Conflict)` - 扫描已处于终态
    async fn record_state(
        &self,
        id: Uuid,
        state: &str,
        at_when: DateTime<Utc>,
    ) -> Result<Scan, RepositoryError>;

    /// 取消扫描
    async fn cancel(&self, id: Uuid, at_when: DateTime<Utc>) -> Result<Scan, RepositoryError>;

    /// 关联扫描完成后生成的报告
    async fn attach_report(&self, id: Uuid, report_id: Uuid) -> Result<(), RepositoryError>;

    /// 扫描的完整状态历史，最新的在前
    async fn logs_for_scan(&self, scan_id: Uuid) -> Result<Vec<ScanLogEntry>, RepositoryError>;

    /// 账户最近创建的扫描，排除已删除列表，按序号最新的在前
    async fn recent_for_account(
        &self,
        account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ScanOverview>, RepositoryError>;
}
