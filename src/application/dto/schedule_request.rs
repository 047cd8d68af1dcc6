// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url_list::RecurrencePolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 修改复扫策略的请求体
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ScheduleRequestDto {
    /// 策略名称，如 `"every 1st day of the month"` 或别名 `"monthly"`
    #[validate(length(min = 1, max = 64))]
    pub automated_scan_frequency: String,
}

/// 列表当前的扫描可用性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanAvailabilityDto {
    pub list_id: Uuid,
    /// 上一次扫描已结束，可以发起新扫描
    pub available: bool,
    /// 调度日历已到期
    pub due: bool,
    pub automated_scan_frequency: RecurrencePolicy,
    pub scheduled_next_scan: DateTime<Utc>,
}
