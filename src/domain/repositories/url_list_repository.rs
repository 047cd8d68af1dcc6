// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::scan_repository::RepositoryError;
use crate::domain::models::scan::Scan;
use crate::domain::models::url_list::{RecurrencePolicy, UrlList};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 发起扫描的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTrigger {
    /// 复扫日历到期
    Scheduled,
    /// 用户手动发起
    Manual,
}

/// 占用扫描位的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScanClaim {
    /// 已创建新的扫描
    Started(Scan),
    /// 调度日历未到期，未做任何写入
    NotDue,
    /// 上一次扫描尚未结束或列表禁止扫描
    Unavailable,
    /// 另一个实例正在处理同一列表
    Contended,
}

/// URL 列表仓库特质
#[async_trait]
pub trait UrlListRepository: Send + Sync {
    /// 创建列表
    async fn create(&self, list: &UrlList) -> Result<UrlList, RepositoryError>;

    /// 根据ID查找列表（包括已删除的列表）
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlList>, RepositoryError>;

    /// 账户下未删除的列表
    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<UrlList>, RepositoryError>;

    /// 修改复扫策略并立即重新计算下一次扫描时间
    async fn update_frequency(
        &self,
        id: Uuid,
        policy: RecurrencePolicy,
        now: DateTime<Utc>,
    ) -> Result<UrlList, RepositoryError>;

    /// 按当前策略重新计算下一次扫描时间
    async fn renew_scan_moment(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<UrlList, RepositoryError>;

    /// 软删除列表
    async fn soft_delete(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), RepositoryError>;

    /// 到期待自动扫描的列表ID，按计划时间升序
    ///
    /// 只返回ID，策略解析在 `claim_scan_slot` 中逐个进行，单个列表的坏数据不影响其他列表。
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, RepositoryError>;

    /// 原子地检查并占用列表的扫描位
    ///
    /// 在同一事务内锁定列表行，判断是否到期（仅 `Scheduled`）、续订调度时间、
    /// 检查上一次扫描是否结束并创建新扫描，保证多个实例不会同时为同一列表发起扫描。
    ///
    /// # 返回值
    ///
    /// * `Ok(ScanClaim)` - 占用结果
    /// * `Err(RepositoryError::NotFound)` - 列表不存在或已删除
    /// * `Err(RepositoryError::InvalidPolicy)` - 列表的策略无法识别
    async fn claim_scan_slot(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        trigger: ScanTrigger,
    ) -> Result<ScanClaim, RepositoryError>;
}
