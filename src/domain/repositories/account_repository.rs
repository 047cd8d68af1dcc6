// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::scan_repository::RepositoryError;
use crate::domain::models::account::Account;
use async_trait::async_trait;
use uuid::Uuid;

/// 账户仓库特质
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 创建账户
    async fn create(&self, account: &Account) -> Result<Account, RepositoryError>;
    /// 根据ID查找账户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepositoryError>;
}
