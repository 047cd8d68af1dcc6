// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use scanmon::config::settings::Settings;
use scanmon::infrastructure::database::connection;
use scanmon::infrastructure::metrics::init_metrics;
use scanmon::infrastructure::repositories::url_list_repo_impl::UrlListRepositoryImpl;
use scanmon::presentation::routes;
use scanmon::utils::telemetry;
use scanmon::workers::{watch_exit, ScanScheduleWorker};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting scanmon...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    init_metrics(&settings.metrics);

    // 3. Connect to database and run migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Start the recurring scan scheduler
    if settings.scanning.scheduler_enabled {
        let list_repo = Arc::new(UrlListRepositoryImpl::new(db.clone()));
        let interval = Duration::from_secs(settings.scanning.schedule_interval_secs.max(1));
        let scheduler = ScanScheduleWorker::new(list_repo, interval).start();
        tokio::spawn(watch_exit(scheduler));
    } else {
        info!("Scan scheduler disabled on this instance");
    }

    // 5. Start HTTP server
    let app = routes::app(db, settings.scan_monitor_config()).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
