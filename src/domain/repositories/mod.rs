// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 账户仓库（account_repository）
/// - 报告仓库（report_repository）：报告时间序列，默认不读取 `calculation`
/// - 扫描仓库（scan_repository）：扫描、状态日志与监控查询
/// - URL 列表仓库（url_list_repository）：列表与复扫调度，包括原子的扫描位占用
pub mod account_repository;
pub mod report_repository;
pub mod scan_repository;
pub mod url_list_repository;
