// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "url_list_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub url_list_id: Uuid,
    pub at_when: ChronoDateTimeWithTimeZone,
    #[sea_orm(column_type = "Double")]
    pub average_internet_nl_score: f64,
    pub calculation: Json,
    pub created_at: ChronoDateTimeWithTimeZone,
}

/// 不含 `calculation` 的查询结果
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct SummaryRow {
    pub id: Uuid,
    pub url_list_id: Uuid,
    pub at_when: ChronoDateTimeWithTimeZone,
    pub average_internet_nl_score: f64,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::url_list::Entity",
        from = "Column::UrlListId",
        to = "super::url_list::Column::Id"
    )]
    UrlList,
}

impl Related<super::url_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UrlList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
