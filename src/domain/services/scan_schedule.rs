// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url_list::RecurrencePolicy;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use thiserror::Error;

/// `disabled` 策略返回的远期时间（约 24 年）
const DISABLED_HORIZON_DAYS: i64 = 9000;

/// 调度策略错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// 无法识别的策略名称
    #[error("String {0} could not be translated to a scan moment")]
    InvalidPolicy(String),
    /// 计算结果超出可表示的时间范围
    #[error("Next scan moment is out of the representable time range")]
    OutOfRange,
}

/// 计算下一次自动扫描的时间点
///
/// 纯函数，所有结果均为 UTC 零点：
///
/// - `disabled`: `now + 9000` 天，仅作为远期占位
/// - `every half year`: 上半年返回当年 7 月 1 日，否则次年 1 月 1 日
/// - `at the start of every quarter`: 下一个季度首日
/// - `every 1st day of the month`: 下月 1 日
/// - `twice per month`: 1 至 14 日返回当月 15 日，否则同 `monthly`
///
/// # 参数
///
/// * `policy` - 复扫策略
/// * `now` - 当前时间
///
/// # 返回值
///
/// * `Ok(DateTime<Utc>)` - 下一次扫描时间
/// * `Err(ScheduleError::OutOfRange)` - 超出 chrono 可表示范围
pub fn determine_next_scan_moment(
    policy: RecurrencePolicy,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    match policy {
        RecurrencePolicy::Disabled => now
            .checked_add_signed(Duration::days(DISABLED_HORIZON_DAYS))
            .ok_or(ScheduleError::OutOfRange),
        RecurrencePolicy::EveryHalfYear => {
            if now.month() <= 6 {
                utc_midnight(now.year(), 7, 1)
            } else {
                utc_midnight(now.year() + 1, 1, 1)
            }
        }
        RecurrencePolicy::Quarterly => match now.month() {
            1..=3 => utc_midnight(now.year(), 4, 1),
            4..=6 => utc_midnight(now.year(), 7, 1),
            7..=9 => utc_midnight(now.year(), 10, 1),
            _ => utc_midnight(now.year() + 1, 1, 1),
        },
        RecurrencePolicy::Monthly => first_of_next_month(now),
        RecurrencePolicy::TwiceMonthly => {
            // the 15th never rolls over into the next month or year
            if now.day() <= 14 {
                utc_midnight(now.year(), now.month(), 15)
            } else {
                first_of_next_month(now)
            }
        }
    }
}

/// 按策略名称计算下一次扫描时间
///
/// 名称无法识别时返回 `ScheduleError::InvalidPolicy`。
pub fn next_scan_moment_for(
    policy_name: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    let policy: RecurrencePolicy = policy_name.parse()?;
    determine_next_scan_moment(policy, now)
}

fn first_of_next_month(now: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
    if now.month() == 12 {
        utc_midnight(now.year() + 1, 1, 1)
    } else {
        utc_midnight(now.year(), now.month() + 1, 1)
    }
}

fn utc_midnight(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, ScheduleError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(ScheduleError::OutOfRange)
}

#[cfg(test)]
#[path = "scan_schedule_test.rs"]
mod tests;
