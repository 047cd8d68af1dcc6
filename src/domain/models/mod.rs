// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 账户（account）：发起扫描的主体
/// - URL 列表（url_list）：扫描目标及其复扫调度字段
/// - 扫描（scan）：一次扫描执行、状态日志与远程句柄
/// - 报告（report）：扫描完成后生成的汇总快照
/// - 扫描监控条目（scan_status）：面向前端轮询的状态记录
pub mod account;
pub mod report;
pub mod scan;
pub mod scan_status;
pub mod url_list;
