// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 手动扫描、可用性查询与复扫策略修改等用例，以及对应的请求/响应结构
pub mod dto;
pub mod use_cases;
