// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

/// internet.nl 远程扫描句柄，由轮询组件维护
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "internet_nl_scans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub scan_id: Option<String>,
    #[sea_orm(column_name = "type")]
    pub scan_type: String,
    pub last_state_check: Option<ChronoDateTimeWithTimeZone>,
    pub started_on: Option<ChronoDateTimeWithTimeZone>,
    pub finished_on: Option<ChronoDateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
