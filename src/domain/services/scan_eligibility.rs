// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan::Scan;
use crate::domain::models::url_list::UrlList;
use crate::domain::repositories::scan_repository::{RepositoryError, ScanRepository};
use std::sync::Arc;

/// 判断列表当前是否可以发起新的扫描
///
/// 依次检查：
/// 1. 列表禁止扫描时不可用
/// 2. 从未扫描过时可用
/// 3. 最近一次扫描已完成或已取消时可用
/// 4. 其余情况（上一次扫描仍在进行）不可用
///
/// 不再有额外的冷却时间，只要上一次扫描进入终态即可再次扫描。
pub fn is_scan_now_available(list: &UrlList, latest_scan: Option<&Scan>) -> bool {
    if !list.enable_scans {
        return false;
    }

    match latest_scan {
        None => true,
        Some(scan) => scan.is_concluded(),
    }
}

/// 扫描可用性服务
///
/// 从扫描历史中取出最近一次扫描后交给 [`is_scan_now_available`] 判断。
/// 已删除的列表由调用方的查询范围排除。
pub struct ScanEligibilityService {
    scan_repo: Arc<dyn ScanRepository>,
}

impl ScanEligibilityService {
    pub fn new(scan_repo: Arc<dyn ScanRepository>) -> Self {
        Self { scan_repo }
    }

    /// 判断列表当前是否可以发起新的扫描
    pub async fn is_scan_now_available(&self, list: &UrlList) -> Result<bool, RepositoryError> {
        let latest = self.scan_repo.latest_for_list(list.id).await?;
        Ok(is_scan_now_available(list, latest.as_ref()))
    }
}
