// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于SeaORM的领域仓库实现，测试与生产共用同一套代码（SQLite / PostgreSQL）
pub mod account_repo_impl;
pub mod report_repo_impl;
pub mod scan_repo_impl;
pub mod url_list_repo_impl;

#[cfg(test)]
#[path = "repositories_test.rs"]
mod tests;
