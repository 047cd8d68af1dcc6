// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 扫描监控、扫描可用性、复扫策略与手动扫描的端点处理逻辑
pub mod scan_monitor_handler;
pub mod url_list_handler;
