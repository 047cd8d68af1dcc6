// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::report::{Report, ReportSummary};
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::repositories::scan_repository::RepositoryError;
use crate::infrastructure::database::entities::url_list_report::{self as report_entity, SummaryRow};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 报告仓库实现
///
/// 默认查询只选取摘要列，`calculation` 仅在 `find_calculation` 中读取
#[derive(Clone)]
pub struct ReportRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ReportRepositoryImpl {
    /// 创建新的报告仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<SummaryRow> for ReportSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            url_list_id: row.url_list_id,
            at_when: row.at_when.into(),
            average_internet_nl_score: row.average_internet_nl_score,
            created_at: row.created_at.into(),
        }
    }
}

fn select_summary() -> Select<report_entity::Entity> {
    report_entity::Entity::find().select_only().columns([
        report_entity::Column::Id,
        report_entity::Column::UrlListId,
        report_entity::Column::AtWhen,
        report_entity::Column::AverageInternetNlScore,
        report_entity::Column::CreatedAt,
    ])
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn create(&self, report: &Report) -> Result<ReportSummary, RepositoryError> {
        let model = report_entity::ActiveModel {
            id: Set(report.id),
            url_list_id: Set(report.url_list_id),
            at_when: Set(report.at_when.into()),
            average_internet_nl_score: Set(report.average_internet_nl_score),
            calculation: Set(report.calculation.clone()),
            created_at: Set(report.created_at.into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(report.summary())
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<ReportSummary>, RepositoryError> {
        let row = select_summary()
            .filter(report_entity::Column::Id.eq(id))
            .into_model::<SummaryRow>()
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn latest_for_list(
        &self,
        url_list_id: Uuid,
    ) -> Result<Option<ReportSummary>, RepositoryError> {
        let row = select_summary()
            .filter(report_entity::Column::UrlListId.eq(url_list_id))
            .order_by_desc(report_entity::Column::AtWhen)
            .order_by_desc(report_entity::Column::CreatedAt)
            .into_model::<SummaryRow>()
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn previous_report(
        &self,
        report: &ReportSummary,
    ) -> Result<Option<ReportSummary>, RepositoryError> {
        let at_when: DateTime<FixedOffset> = report.at_when.into();
        let row = select_summary()
            .filter(report_entity::Column::UrlListId.eq(report.url_list_id))
            .filter(report_entity::Column::AtWhen.lt(at_when))
            .filter(report_entity::Column::Id.ne(report.id))
            .order_by_desc(report_entity::Column::AtWhen)
            .into_model::<SummaryRow>()
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_linked_report_id(
        &self,
        url_list_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Option<Uuid>, RepositoryError> {
        let from: DateTime<FixedOffset> = from.into();
        let to: DateTime<FixedOffset> = to.into();

        let id = report_entity::Entity::find()
            .select_only()
            .column(report_entity::Column::Id)
            .filter(report_entity::Column::UrlListId.eq(url_list_id))
            .filter(report_entity::Column::AtWhen.gte(from))
            .filter(report_entity::Column::AtWhen.lte(to))
            .order_by_desc(report_entity::Column::CreatedAt)
            .order_by_desc(report_entity::Column::Id)
            .into_tuple::<Uuid>()
            .one(self.db.as_ref())
            .await?;

        Ok(id)
    }

    async fn find_calculation(
        &self,
        id: Uuid,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        let calculation = report_entity::Entity::find()
            .select_only()
            .column(report_entity::Column::Calculation)
            .filter(report_entity::Column::Id.eq(id))
            .into_tuple::<serde_json::Value>()
            .one(self.db.as_ref())
            .await?;

        Ok(calculation)
    }
}
