// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 后台定时任务，目前只有自动复扫调度器
pub mod schedule_worker;

pub use schedule_worker::{watch_exit, ScanScheduleWorker};
