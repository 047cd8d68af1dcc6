// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_scans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub url_list_id: Uuid,
    pub seq: i64,
    pub scan_handle_id: Option<Uuid>,
    pub state: String,
    pub started_on: Option<ChronoDateTimeWithTimeZone>,
    pub finished_on: Option<ChronoDateTimeWithTimeZone>,
    pub state_changed_on: Option<ChronoDateTimeWithTimeZone>,
    pub report_id: Option<Uuid>,
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
    #[sea_orm(
        belongs_to = "super::scan_handle::Entity",
        from = "Column::ScanHandleId",
        to = "super::scan_handle::Column::Id"
    )]
    ScanHandle,
    #[sea_orm(has_many = "super::account_scan_log::Entity")]
    AccountScanLog,
}

impl Related<super::url_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UrlList.def()
    }
}

impl Related<super::scan_handle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScanHandle.def()
    }
}

impl Related<super::account_scan_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountScanLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
