// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 列表报告
///
/// 某一时刻 URL 列表扫描结果的汇总快照，创建后不再修改。
/// `calculation` 体积很大，只有写入和显式读取时才会携带。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub url_list_id: Uuid,
    pub at_when: DateTime<Utc>,
    pub average_internet_nl_score: f64,
    pub calculation: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(
        url_list_id: Uuid,
        at_when: DateTime<Utc>,
        average_internet_nl_score: f64,
        calculation: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            url_list_id,
            at_when,
            average_internet_nl_score,
            calculation,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            id: self.id,
            url_list_id: self.url_list_id,
            at_when: self.at_when,
            average_internet_nl_score: self.average_internet_nl_score,
            created_at: self.created_at,
        }
    }
}

/// 不含 `calculation` 的报告视图，默认读取都返回这个类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: Uuid,
    pub url_list_id: Uuid,
    pub at_when: DateTime<Utc>,
    pub average_internet_nl_score: f64,
    pub created_at: DateTime<Utc>,
}
