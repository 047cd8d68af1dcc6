// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::scan_repository::RepositoryError;
use crate::domain::models::report::{Report, ReportSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 报告仓库特质
///
/// 除 `find_calculation` 外的读取都不加载 `calculation` 字段。
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// 写入报告
    async fn create(&self, report: &Report) -> Result<ReportSummary, RepositoryError>;

    /// 根据ID查找报告摘要
    async fn find_summary(&self, id: Uuid) -> Result<Option<ReportSummary>, RepositoryError>;

    /// 列表最新的报告（按 `at_when`）
    async fn latest_for_list(
        &self,
        url_list_id: Uuid,
    ) -> Result<Option<ReportSummary>, RepositoryError>;

    /// 同一列表在该报告之前的最近一份报告，用于对比
    async fn previous_report(
        &self,
        report: &ReportSummary,
    ) -> Result<Option<ReportSummary>, RepositoryError>;

    /// `at_when` 落在 `[from, to]` 内、最近创建的报告ID
    async fn find_linked_report_id(
        &self,
        url_list_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Option<Uuid>, RepositoryError>;

    /// 显式读取报告的 `calculation`
    async fn find_calculation(&self, id: Uuid)
        -> Result<Option<serde_json::Value>, RepositoryError>;
}
