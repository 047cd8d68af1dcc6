// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "url_lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub scan_type: String,
    pub enable_scans: bool,
    pub automated_scan_frequency: String,
    pub scheduled_next_scan: ChronoDateTimeWithTimeZone,
    pub is_deleted: bool,
    pub deleted_on: Option<ChronoDateTimeWithTimeZone>,
    pub last_manual_scan: Option<ChronoDateTimeWithTimeZone>,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
    #[sea_orm(has_many = "super::account_scan::Entity")]
    AccountScan,
    #[sea_orm(has_many = "super::url_list_report::Entity")]
    UrlListReport,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::account_scan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountScan.def()
    }
}

impl Related<super::url_list_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UrlListReport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
