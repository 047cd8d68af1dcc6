// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::scan_schedule::ScheduleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 新建列表时 `scheduled_next_scan` 的默认值（2030-01-01T01:01:01.601526Z）
///
/// 只是一个远期占位值，策略生效或变更时会被重新计算。
pub fn default_scheduled_next_scan() -> DateTime<Utc> {
    DateTime::from_timestamp_micros(1_893_459_661_601_526).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// URL 列表实体
///
/// 一个账户下的一组待扫描 URL，同时承载自动复扫的调度字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlList {
    /// 列表唯一标识符
    pub id: Uuid,
    /// 所属账户
    pub account_id: Uuid,
    /// 显示名称
    pub name: String,
    /// 扫描类型（web / mail）
    pub scan_type: ScanType,
    /// 是否允许对该列表发起扫描
    pub enable_scans: bool,
    /// 自动复扫策略
    pub automated_scan_frequency: RecurrencePolicy,
    /// 下一次自动扫描的时间点
    pub scheduled_next_scan: DateTime<Utc>,
    /// 软删除标记，已删除的列表不参与任何扫描与监控查询
    pub is_deleted: bool,
    /// 软删除时间
    pub deleted_on: Option<DateTime<Utc>>,
    /// 最近一次手动扫描时间
    pub last_manual_scan: Option<DateTime<Utc>>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl UrlList {
    /// 创建新的列表，默认关闭自动扫描
    pub fn new(account_id: Uuid, name: impl Into<String>, scan_type: ScanType) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            name: name.into(),
            scan_type,
            enable_scans: true,
            automated_scan_frequency: RecurrencePolicy::Disabled,
            scheduled_next_scan: default_scheduled_next_scan(),
            is_deleted: false,
            deleted_on: None,
            last_manual_scan: None,
            created_at: Utc::now(),
        }
    }

    /// 按调度日历判断是否到了自动扫描的时间
    ///
    /// 与“当前是否可以发起扫描”是两个独立的判断，调度器两者都要检查。
    pub fn is_due_for_scanning(&self, now: DateTime<Utc>) -> bool {
        if self.automated_scan_frequency == RecurrencePolicy::Disabled {
            return false;
        }

        now > self.scheduled_next_scan
    }
}

/// 扫描类型
///
/// internet.nl 还存在 `mail_dashboard` 等子类型，对外统一归并为 web / mail。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    #[default]
    Web,
    Mail,
}

impl ScanType {
    /// 将任意来源的类型名称归并为 web / mail
    pub fn normalize(raw: &str) -> Self {
        if raw.trim().to_ascii_lowercase().starts_with("mail") {
            ScanType::Mail
        } else {
            ScanType::Web
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Web => "web",
            ScanType::Mail => "mail",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 自动复扫策略
///
/// 存储与接口中使用的名称沿用仪表盘的原有取值，解析时同时接受简写别名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecurrencePolicy {
    /// 不自动扫描
    #[default]
    #[serde(rename = "disabled")]
    Disabled,
    /// 每年 1 月 1 日与 7 月 1 日
    #[serde(rename = "every half year", alias = "every-half-year")]
    EveryHalfYear,
    /// 每季度首日
    #[serde(rename = "at the start of every quarter", alias = "quarterly")]
    Quarterly,
    /// 每月 1 日
    #[serde(rename = "every 1st day of the month", alias = "monthly")]
    Monthly,
    /// 每月 1 日与 15 日
    #[serde(rename = "twice per month", alias = "twice-monthly")]
    TwiceMonthly,
}

impl RecurrencePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrencePolicy::Disabled => "disabled",
            RecurrencePolicy::EveryHalfYear => "every half year",
            RecurrencePolicy::Quarterly => "at the start of every quarter",
            RecurrencePolicy::Monthly => "every 1st day of the month",
            RecurrencePolicy::TwiceMonthly => "twice per month",
        }
    }
}

impl fmt::Display for RecurrencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 从策略名称解析
///
/// 未知名称属于配置或数据缺陷，返回 `ScheduleError::InvalidPolicy`，不回退到默认值。
impl FromStr for RecurrencePolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(RecurrencePolicy::Disabled),
            "every half year" | "every-half-year" => Ok(RecurrencePolicy::EveryHalfYear),
            "at the start of every quarter" | "quarterly" => Ok(RecurrencePolicy::Quarterly),
            "every 1st day of the month" | "monthly" => Ok(RecurrencePolicy::Monthly),
            "twice per month" | "twice-monthly" => Ok(RecurrencePolicy::TwiceMonthly),
            other => Err(ScheduleError::InvalidPolicy(other.to_string())),
        }
    }
}
