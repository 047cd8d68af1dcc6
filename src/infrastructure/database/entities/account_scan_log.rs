// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_scan_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub scan_id: Uuid,
    pub state: String,
    pub at_when: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_scan::Entity",
        from = "Column::ScanId",
        to = "super::account_scan::Column::Id"
    )]
    AccountScan,
}

impl Related<super::account_scan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountScan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
