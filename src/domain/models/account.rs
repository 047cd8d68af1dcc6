// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 账户实体
///
/// 发起扫描的主体。internet.nl 凭据由外部组件加密存取，这里只透传。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: Option<String>,
    pub enable_scans: bool,
    pub internet_nl_api_username: Option<String>,
    /// 加密后的密码文本
    #[serde(skip_serializing)]
    pub internet_nl_api_password: Option<String>,
    pub can_connect_to_internet_nl_api: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Some(name.into()),
            enable_scans: true,
            internet_nl_api_username: None,
            internet_nl_api_password: None,
            can_connect_to_internet_nl_api: false,
            created_at: Utc::now(),
        }
    }
}
