// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub enable_scans: bool,
    pub internet_nl_api_username: Option<String>,
    pub internet_nl_api_password: Option<String>,
    pub can_connect_to_internet_nl_api: bool,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::url_list::Entity")]
    UrlList,
}

impl Related<super::url_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UrlList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
