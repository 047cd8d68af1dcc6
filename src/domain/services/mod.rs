// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 扫描调度（scan_schedule）：复扫策略到下一次扫描时间的纯函数
/// - 扫描可用性（scan_eligibility）：判断列表能否立即发起扫描
/// - 扫描监控（scan_monitor_service）：合并扫描状态、日志与报告关联
pub mod scan_eligibility;
pub mod scan_monitor_service;
pub mod scan_schedule;
