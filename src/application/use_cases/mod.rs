// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 面向 HTTP 层的扫描用例：手动扫描、可用性查询与复扫策略修改
pub mod scan_use_case;
