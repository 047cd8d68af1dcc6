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

use super::scan_repo_impl::{find_latest_for_list, insert_scan};
use crate::domain::models::scan::Scan;
use crate::domain::models::url_list::{RecurrencePolicy, ScanType, UrlList};
use crate::domain::repositories::scan_repository::RepositoryError;
use crate::domain::repositories::url_list_repository::{
    ScanClaim, ScanTrigger, UrlListRepository,
};
use crate::domain::services::scan_eligibility::is_scan_now_available;
use crate::domain::services::scan_schedule::determine_next_scan_moment;
use crate::infrastructure::database::entities::url_list as url_list_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::{Expr, LockBehavior, LockType},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// URL 列表仓库实现
///
/// 基于SeaORM实现的列表数据访问层，`claim_scan_slot` 负责跨实例的扫描互斥
#[derive(Clone)]
pub struct UrlListRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl UrlListRepositoryImpl {
    /// 创建新的列表仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的列表仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn require_live(&self, id: Uuid) -> Result<url_list_entity::Model, RepositoryError> {
        match url_list_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
        {
            Some(model) if !model.is_deleted => Ok(model),
            _ => Err(RepositoryError::NotFound),
        }
    }
}

impl TryFrom<url_list_entity::Model> for UrlList {
    type Error = RepositoryError;

    fn try_from(model: url_list_entity::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            account_id: model.account_id,
            name: model.name,
            scan_type: ScanType::normalize(&model.scan_type),
            enable_scans: model.enable_scans,
            automated_scan_frequency: model.automated_scan_frequency.parse()?,
            scheduled_next_scan: model.scheduled_next_scan.into(),
            is_deleted: model.is_deleted,
            deleted_on: model.deleted_on.map(Into::into),
            last_manual_scan: model.last_manual_scan.map(Into::into),
            created_at: model.created_at.into(),
        })
    }
}

impl From<UrlList> for url_list_entity::ActiveModel {
    fn from(list: UrlList) -> Self {
        Self {
            id: Set(list.id),
            account_id: Set(list.account_id),
            name: Set(list.name),
            scan_type: Set(list.scan_type.as_str().to_string()),
            enable_scans: Set(list.enable_scans),
            automated_scan_frequency: Set(list.automated_scan_frequency.as_str().to_string()),
            scheduled_next_scan: Set(list.scheduled_next_scan.into()),
            is_deleted: Set(list.is_deleted),
            deleted_on: Set(list.deleted_on.map(Into::into)),
            last_manual_scan: Set(list.last_manual_scan.map(Into::into)),
            created_at: Set(list.created_at.into()),
        }
    }
}

#[async_trait]
impl UrlListRepository for UrlListRepositoryImpl {
    async fn create(&self, list: &UrlList) -> Result<UrlList, RepositoryError> {
        let mut list = list.clone();
        if list.automated_scan_frequency != RecurrencePolicy::Disabled {
            list.scheduled_next_scan =
                determine_next_scan_moment(list.automated_scan_frequency, list.created_at)?;
        }

        let model: url_list_entity::ActiveModel = list.clone().into();
        model.insert(self.db.as_ref()).await?;
        Ok(list)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlList>, RepositoryError> {
        url_list_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(UrlList::try_from)
            .transpose()
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<UrlList>, RepositoryError> {
        url_list_entity::Entity::find()
            .filter(url_list_entity::Column::AccountId.eq(account_id))
            .filter(url_list_entity::Column::IsDeleted.eq(false))
            .order_by_asc(url_list_entity::Column::Name)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(UrlList::try_from)
            .collect()
    }

    async fn update_frequency(
        &self,
        id: Uuid,
        policy: RecurrencePolicy,
        now: DateTime<Utc>,
    ) -> Result<UrlList, RepositoryError> {
        let model = self.require_live(id).await?;
        let next = determine_next_scan_moment(policy, now)?;

        let mut active: url_list_entity::ActiveModel = model.into();
        active.automated_scan_frequency = Set(policy.as_str().to_string());
        active.scheduled_next_scan = Set(next.into());

        let updated = active.update(self.db.as_ref()).await?;
        info!("List {} now scans '{}', next at {}", id, policy, next);
        UrlList::try_from(updated)
    }

    async fn renew_scan_moment(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<UrlList, RepositoryError> {
        let model = self.require_live(id).await?;
        let policy: RecurrencePolicy = model.automated_scan_frequency.parse()?;
        let next = determine_next_scan_moment(policy, now)?;

        let mut active: url_list_entity::ActiveModel = model.into();
        active.scheduled_next_scan = Set(next.into());

        let updated = active.update(self.db.as_ref()).await?;
        UrlList::try_from(updated)
    }

    async fn soft_delete(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), RepositoryError> {
        let model = self.require_live(id).await?;

        let mut active: url_list_entity::ActiveModel = model.into();
        active.is_deleted = Set(true);
        active.deleted_on = Set(Some(now.into()));
        active.update(self.db.as_ref()).await?;

        Ok(())
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, RepositoryError> {
        let now: DateTime<FixedOffset> = now.into();

        let ids = url_list_entity::Entity::find()
            .select_only()
            .column(url_list_entity::Column::Id)
            .filter(url_list_entity::Column::IsDeleted.eq(false))
            .filter(
                url_list_entity::Column::AutomatedScanFrequency
                    .ne(RecurrencePolicy::Disabled.as_str()),
            )
            .filter(url_list_entity::Column::ScheduledNextScan.lt(now))
            .order_by_asc(url_list_entity::Column::ScheduledNextScan)
            .into_tuple::<Uuid>()
            .all(self.db.as_ref())
            .await?;

        Ok(ids)
    }

    async fn claim_scan_slot(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        trigger: ScanTrigger,
    ) -> Result<ScanClaim, RepositoryError> {
        let txn = self.db.begin().await?;

        // Another instance holding the row lock makes the row invisible here.
        let locked = url_list_entity::Entity::find_by_id(id)
            .lock_with_behavior(LockType::Update, LockBehavior::SkipLocked)
            .one(&txn)
            .await?;

        let model = match locked {
            Some(model) if !model.is_deleted => model,
            Some(_) => {
                txn.rollback().await?;
                return Err(RepositoryError::NotFound);
            }
            None => {
                let exists = url_list_entity::Entity::find_by_id(id).one(&txn).await?;
                txn.rollback().await?;
                return match exists {
                    Some(model) if !model.is_deleted => Ok(ScanClaim::Contended),
                    _ => Err(RepositoryError::NotFound),
                };
            }
        };

        let claim = claim_from_snapshot(&txn, model, now, trigger).await?;
        match &claim {
            ScanClaim::Started(scan) => {
                txn.commit().await?;
                info!("Started scan {} for list {} ({:?})", scan.id, id, trigger);
            }
            // A scheduled renewal still stands even when the previous scan is running.
            ScanClaim::Unavailable => txn.commit().await?,
            ScanClaim::NotDue | ScanClaim::Contended => txn.rollback().await?,
        }

        Ok(claim)
    }
}

/// 基于已读取的列表行决定并执行占用
///
/// `model` 是调用方在同一事务里读到的行；定时触发的续期只在 `scheduled_next_scan`
/// 仍等于读到的值时生效，否则返回 `Contended` 且不写入任何数据。
/// 提交或回滚由调用方负责。
pub(crate) async fn claim_from_snapshot<C: ConnectionTrait>(
    conn: &C,
    model: url_list_entity::Model,
    now: DateTime<Utc>,
    trigger: ScanTrigger,
) -> Result<ScanClaim, RepositoryError> {
    let id = model.id;
    let previous_moment = model.scheduled_next_scan;
    let list = UrlList::try_from(model)?;

    if trigger == ScanTrigger::Scheduled {
        if !list.is_due_for_scanning(now) {
            return Ok(ScanClaim::NotDue);
        }

        let next: DateTime<FixedOffset> =
            determine_next_scan_moment(list.automated_scan_frequency, now)?.into();

        let renewed = url_list_entity::Entity::update_many()
            .col_expr(
                url_list_entity::Column::ScheduledNextScan,
                Expr::value(next),
            )
            .filter(url_list_entity::Column::Id.eq(id))
            .filter(url_list_entity::Column::ScheduledNextScan.eq(previous_moment))
            .exec(conn)
            .await?;

        if renewed.rows_affected == 0 {
            debug!("List {} was renewed by another instance", id);
            return Ok(ScanClaim::Contended);
        }
    }

    let latest = find_latest_for_list(conn, id).await?.map(Scan::from);
    if !is_scan_now_available(&list, latest.as_ref()) {
        return Ok(ScanClaim::Unavailable);
    }

    if trigger == ScanTrigger::Manual {
        let at: DateTime<FixedOffset> = now.into();
        url_list_entity::Entity::update_many()
            .col_expr(url_list_entity::Column::LastManualScan, Expr::value(at))
            .filter(url_list_entity::Column::Id.eq(id))
            .exec(conn)
            .await?;
    }

    let scan = insert_scan(conn, &Scan::requested(list.account_id, list.id, now)).await?;
    Ok(ScanClaim::Started(scan))
}
