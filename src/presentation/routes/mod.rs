// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::scan_monitor_service::{ScanMonitorConfig, ScanMonitorService};
use crate::infrastructure::repositories::report_repo_impl::ReportRepositoryImpl;
use crate::infrastructure::repositories::scan_repo_impl::ScanRepositoryImpl;
use crate::infrastructure::repositories::url_list_repo_impl::UrlListRepositoryImpl;
use crate::presentation::handlers::{scan_monitor_handler, url_list_handler};
use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 创建应用路由
///
/// 仓库与监控服务通过 `Extension` 层注入
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let scan_routes = Router::new()
        .route(
            "/v1/accounts/{account_id}/scan-monitor",
            get(scan_monitor_handler::get_scan_monitor),
        )
        .route(
            "/v1/lists/{list_id}/scan-availability",
            get(url_list_handler::get_scan_availability::<
                UrlListRepositoryImpl,
                ScanRepositoryImpl,
            >),
        )
        .route(
            "/v1/lists/{list_id}/schedule",
            put(url_list_handler::update_schedule::<UrlListRepositoryImpl, ScanRepositoryImpl>),
        )
        .route(
            "/v1/lists/{list_id}/scans",
            post(url_list_handler::request_scan::<UrlListRepositoryImpl, ScanRepositoryImpl>),
        );

    Router::new().merge(public_routes).merge(scan_routes)
}

/// 创建注入了仓库与监控服务的完整路由
///
/// # 参数
///
/// * `db` - 数据库连接
/// * `monitor_config` - 扫描监控配置
pub fn app(db: Arc<DatabaseConnection>, monitor_config: ScanMonitorConfig) -> Router {
    let list_repo = Arc::new(UrlListRepositoryImpl::new(db.clone()));
    let scan_repo = Arc::new(ScanRepositoryImpl::new(db.clone()));
    let report_repo = Arc::new(ReportRepositoryImpl::new(db));
    let monitor = Arc::new(ScanMonitorService::new(
        scan_repo.clone(),
        report_repo,
        monitor_config,
    ));

    routes()
        .layer(Extension(list_repo))
        .layer(Extension(scan_repo))
        .layer(Extension(monitor))
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
