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

use crate::{
    application::dto::schedule_request::{ScanAvailabilityDto, ScheduleRequestDto},
    domain::{
        models::{
            scan::Scan,
            url_list::{RecurrencePolicy, UrlList},
        },
        repositories::{
            scan_repository::{RepositoryError, ScanRepository},
            url_list_repository::{ScanClaim, ScanTrigger, UrlListRepository},
        },
        services::{scan_eligibility::ScanEligibilityService, scan_schedule::ScheduleError},
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Error, Debug)]
pub enum ScanUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    InvalidPolicy(#[from] ScheduleError),
    #[error("Url list not found")]
    NotFound,
    #[error("A scan for list {0} is still running or scans are disabled")]
    Unavailable(Uuid),
    #[error("List {0} is being scheduled by another instance, try again")]
    Contended(Uuid),
}

pub struct ScanUseCase<LR> {
    list_repo: Arc<LR>,
    eligibility: ScanEligibilityService,
}

impl<LR> ScanUseCase<LR>
where
    LR: UrlListRepository + 'static,
{
    pub fn new(list_repo: Arc<LR>, scan_repo: Arc<dyn ScanRepository>) -> Self {
        Self {
            list_repo,
            eligibility: ScanEligibilityService::new(scan_repo),
        }
    }

    /// 用户手动发起扫描
    pub async fn request_manual_scan(
        &self,
        list_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Scan, ScanUseCaseError> {
        let claim = self
            .list_repo
            .claim_scan_slot(list_id, now, ScanTrigger::Manual)
            .await
            .map_err(not_found)?;

        match claim {
            ScanClaim::Started(scan) => {
                info!("Manual scan {} requested for list {}", scan.id, list_id);
                Ok(scan)
            }
            ScanClaim::Contended => Err(ScanUseCaseError::Contended(list_id)),
            ScanClaim::Unavailable | ScanClaim::NotDue => {
                Err(ScanUseCaseError::Unavailable(list_id))
            }
        }
    }

    /// 查询列表当前能否扫描以及调度日历是否到期
    pub async fn scan_availability(
        &self,
        list_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ScanAvailabilityDto, ScanUseCaseError> {
        let list = self.live_list(list_id).await?;
        let available = self.eligibility.is_scan_now_available(&list).await?;

        Ok(ScanAvailabilityDto {
            list_id: list.id,
            available,
            due: list.is_due_for_scanning(now),
            automated_scan_frequency: list.automated_scan_frequency,
            scheduled_next_scan: list.scheduled_next_scan,
        })
    }

    /// 修改复扫策略
    pub async fn change_schedule(
        &self,
        list_id: Uuid,
        dto: ScheduleRequestDto,
        now: DateTime<Utc>,
    ) -> Result<UrlList, ScanUseCaseError> {
        dto.validate()
            .map_err(|e| ScanUseCaseError::ValidationError(e.to_string()))?;

        let policy: RecurrencePolicy = dto.automated_scan_frequency.parse()?;
        let list = self
            .list_repo
            .update_frequency(list_id, policy, now)
            .await
            .map_err(not_found)?;

        Ok(list)
    }

    async fn live_list(&self, list_id: Uuid) -> Result<UrlList, ScanUseCaseError> {
        match self.list_repo.find_by_id(list_id).await? {
            Some(list) if !list.is_deleted => Ok(list),
            _ => Err(ScanUseCaseError::NotFound),
        }
    }
}

fn not_found(err: RepositoryError) -> ScanUseCaseError {
    match err {
        RepositoryError::NotFound => ScanUseCaseError::NotFound,
        RepositoryError::InvalidPolicy(e) => ScanUseCaseError::InvalidPolicy(e),
        other => ScanUseCaseError::Repository(other),
    }
}
