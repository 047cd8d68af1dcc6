// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

pub const SCANS_STARTED: &str = "scheduled_scans_started_total";
pub const SCANS_SKIPPED: &str = "scheduled_scans_skipped_total";
pub const SCHEDULE_TICKS: &str = "scan_schedule_ticks_total";

pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address '{}': {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(
        SCANS_STARTED,
        Unit::Count,
        "Scans started by the recurring schedule"
    );
    describe_counter!(
        SCANS_SKIPPED,
        Unit::Count,
        "Due lists that did not start a scan, by reason"
    );
    describe_counter!(SCHEDULE_TICKS, Unit::Count, "Scheduler ticks executed");

    info!("Metrics exporter listening on {}", addr);
}
