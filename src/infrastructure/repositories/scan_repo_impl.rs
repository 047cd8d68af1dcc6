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

use crate::domain::models::scan::{
    is_terminal_state, Scan, ScanHandle, ScanLogEntry, ScanOverview, STATE_CANCELLED,
    STATE_FINISHED,
};
use crate::domain::models::url_list::ScanType;
use crate::domain::repositories::scan_repository::{RepositoryError, ScanRepository};
use crate::infrastructure::database::entities::{
    account_scan, account_scan_log, scan_handle, url_list,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, LockType},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// 扫描仓库实现
///
/// 基于SeaORM实现的扫描、状态日志与监控查询
#[derive(Clone)]
pub struct ScanRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScanRepositoryImpl {
    /// 创建新的扫描仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<account_scan::Model> for Scan {
    fn from(model: account_scan::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            url_list_id: model.url_list_id,
            scan_handle_id: model.scan_handle_id,
            state: model.state,
            started_on: model.started_on.map(Into::into),
            finished_on: model.finished_on.map(Into::into),
            state_changed_on: model.state_changed_on.map(Into::into),
            report_id: model.report_id,
            created_at: model.created_at.into(),
            seq: model.seq,
        }
    }
}

impl From<Scan> for account_scan::ActiveModel {
    fn from(scan: Scan) -> Self {
        Self {
            id: Set(scan.id),
            account_id: Set(scan.account_id),
            url_list_id: Set(scan.url_list_id),
            seq: Set(scan.seq),
            scan_handle_id: Set(scan.scan_handle_id),
            state: Set(scan.state),
            started_on: Set(scan.started_on.map(Into::into)),
            finished_on: Set(scan.finished_on.map(Into::into)),
            state_changed_on: Set(scan.state_changed_on.map(Into::into)),
            report_id: Set(scan.report_id),
            created_at: Set(scan.created_at.into()),
        }
    }
}

impl From<scan_handle::Model> for ScanHandle {
    fn from(model: scan_handle::Model) -> Self {
        Self {
            id: model.id,
            scan_id: model.scan_id,
            scan_type: model.scan_type,
            last_state_check: model.last_state_check.map(Into::into),
            started_on: model.started_on.map(Into::into),
            finished_on: model.finished_on.map(Into::into),
        }
    }
}

impl From<account_scan_log::Model> for ScanLogEntry {
    fn from(model: account_scan_log::Model) -> Self {
        Self {
            id: model.id,
            scan_id: model.scan_id,
            state: model.state,
            at_when: model.at_when.into(),
        }
    }
}

/// 下一个扫描序号
///
/// 并发写入拿到相同序号时由唯一约束拒绝其中一个。
async fn next_seq<C: ConnectionTrait>(conn: &C) -> Result<i64, DbErr> {
    let current = account_scan::Entity::find()
        .select_only()
        .column_as(Expr::col(account_scan::Column::Seq).max(), "max_seq")
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?
        .flatten();

    Ok(current.unwrap_or(0) + 1)
}

/// 写入扫描记录及其第一条状态日志，返回带序号的扫描
pub(crate) async fn insert_scan<C: ConnectionTrait>(conn: &C, scan: &Scan) -> Result<Scan, DbErr> {
    let mut stored = scan.clone();
    stored.seq = next_seq(conn).await?;

    let model: account_scan::ActiveModel = stored.clone().into();
    model.insert(conn).await?;

    let at_when = stored.state_changed_on.unwrap_or(stored.created_at);
    append_log(conn, stored.id, &stored.state, at_when).await?;

    Ok(stored)
}

/// 追加一条状态日志
pub(crate) async fn append_log<C: ConnectionTrait>(
    conn: &C,
    scan_id: Uuid,
    state: &str,
    at_when: DateTime<Utc>,
) -> Result<(), DbErr> {
    let log = account_scan_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        scan_id: Set(scan_id),
        state: Set(state.to_string()),
        at_when: Set(at_when.into()),
    };
    log.insert(conn).await?;
    Ok(())
}

/// 列表序号最大的扫描
pub(crate) async fn find_latest_for_list<C: ConnectionTrait>(
    conn: &C,
    url_list_id: Uuid,
) -> Result<Option<account_scan::Model>, DbErr> {
    account_scan::Entity::find()
        .filter(account_scan::Column::UrlListId.eq(url_list_id))
        .order_by_desc(account_scan::Column::Seq)
        .one(conn)
        .await
}

#[async_trait]
impl ScanRepository for ScanRepositoryImpl {
    async fn create(&self, scan: &Scan) -> Result<Scan, RepositoryError> {
        let txn = self.db.begin().await?;
        let stored = insert_scan(&txn, scan).await?;
        txn.commit().await?;

        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Scan>, RepositoryError> {
        let model = account_scan::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn latest_for_list(&self, url_list_id: Uuid) -> Result<Option<Scan>, RepositoryError> {
        let model = find_latest_for_list(self.db.as_ref(), url_list_id).await?;
        Ok(model.map(Into::into))
    }

    async fn attach_handle(&self, id: Uuid, scan_handle_id: Uuid) -> Result<(), RepositoryError> {
        let result = account_scan::Entity::update_many()
            .col_expr(
                account_scan::Column::ScanHandleId,
                Expr::value(scan_handle_id),
            )
            .filter(account_scan::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn record_state(
        &self,
        id: Uuid,
        state: &str,
        at_when: DateTime<Utc>,
    ) -> Result<Scan, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = account_scan::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if is_terminal_state(&model.state) {
            return Err(RepositoryError::Conflict(format!(
                "scan {} is already {}",
                id, model.state
            )));
        }

        if let Some(previous) = model.state_changed_on {
            let previous: DateTime<Utc> = previous.into();
            if at_when < previous {
                return Err(RepositoryError::Conflict(format!(
                    "state change for scan {} at {} predates the last change at {}",
                    id, at_when, previous
                )));
            }
        }

        let mut active: account_scan::ActiveModel = model.into();
        active.state = Set(state.to_string());
        active.state_changed_on = Set(Some(at_when.into()));
        if state == STATE_FINISHED {
            active.finished_on = Set(Some(at_when.into()));
        }

        let updated = active.update(&txn).await?;
        append_log(&txn, id, state, at_when).await?;
        txn.commit().await?;

        debug!("Scan {} moved to state '{}'", id, state);
        Ok(updated.into())
    }

    async fn cancel(&self, id: Uuid, at_when: DateTime<Utc>) -> Result<Scan, RepositoryError> {
        self.record_state(id, STATE_CANCELLED, at_when).await
    }

    async fn attach_report(&self, id: Uuid, report_id: Uuid) -> Result<(), RepositoryError> {
        let result = account_scan::Entity::update_many()
            .col_expr(account_scan::Column::ReportId, Expr::value(report_id))
            .filter(account_scan::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn logs_for_scan(&self, scan_id: Uuid) -> Result<Vec<ScanLogEntry>, RepositoryError> {
        let logs = account_scan_log::Entity::find()
            .filter(account_scan_log::Column::ScanId.eq(scan_id))
            .order_by_desc(account_scan_log::Column::AtWhen)
            .all(self.db.as_ref())
            .await?;

        Ok(logs.into_iter().map(Into::into).collect())
    }

    async fn recent_for_account(
        &self,
        account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ScanOverview>, RepositoryError> {
        let rows = account_scan::Entity::find()
            .find_also_related(url_list::Entity)
            .filter(account_scan::Column::AccountId.eq(account_id))
            .filter(url_list::Column::IsDeleted.eq(false))
            .order_by_desc(account_scan::Column::Seq)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        let handle_ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|(scan, _)| scan.scan_handle_id)
            .collect();

        let mut handles: HashMap<Uuid, ScanHandle> = HashMap::new();
        if !handle_ids.is_empty() {
            for handle in scan_handle::Entity::find()
                .filter(scan_handle::Column::Id.is_in(handle_ids))
                .all(self.db.as_ref())
                .await?
            {
                handles.insert(handle.id, handle.into());
            }
        }

        let mut overviews = Vec::with_capacity(rows.len());
        for (scan, list) in rows {
            let Some(list) = list else {
                warn!("Scan {} references missing url list {}", scan.id, scan.url_list_id);
                continue;
            };

            let handle = scan
                .scan_handle_id
                .and_then(|handle_id| handles.get(&handle_id).cloned());

            overviews.push(ScanOverview {
                scan: scan.into(),
                list_name: list.name,
                list_scan_type: ScanType::normalize(&list.scan_type),
                handle,
            });
        }

        Ok(overviews)
    }
}
