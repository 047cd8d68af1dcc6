// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::scan_repository::RepositoryError;
use crate::infrastructure::database::entities::account as account_entity;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 账户仓库实现
#[derive(Clone)]
pub struct AccountRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<account_entity::Model> for Account {
    fn from(model: account_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            enable_scans: model.enable_scans,
            internet_nl_api_username: model.internet_nl_api_username,
            internet_nl_api_password: model.internet_nl_api_password,
            can_connect_to_internet_nl_api: model.can_connect_to_internet_nl_api,
            created_at: model.created_at.into(),
        }
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create(&self, account: &Account) -> Result<Account, RepositoryError> {
        let model = account_entity::ActiveModel {
            id: Set(account.id),
            name: Set(account.name.clone()),
            enable_scans: Set(account.enable_scans),
            internet_nl_api_username: Set(account.internet_nl_api_username.clone()),
            internet_nl_api_password: Set(account.internet_nl_api_password.clone()),
            can_connect_to_internet_nl_api: Set(account.can_connect_to_internet_nl_api),
            created_at: Set(account.created_at.into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(account.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepositoryError> {
        let model = account_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
