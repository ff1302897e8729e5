//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_poll_attempts_total` (counter): fetch attempts by poller
//! - `dashboard_poll_failures_total` (counter): failed attempts by poller
//! - `dashboard_probe_reachable` (gauge): 1=reachable, 0=unreachable, by target
//! - `dashboard_search_launch_retries_total` (counter): launch-window retries

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Record the start of a poll attempt.
pub fn record_poll_attempt(poller: &str) {
    counter!("dashboard_poll_attempts_total", "poller" => poller.to_string()).increment(1);
}

/// Record a failed poll attempt.
pub fn record_poll_failure(poller: &str) {
    counter!("dashboard_poll_failures_total", "poller" => poller.to_string()).increment(1);
}

/// Record a probe verdict for a target origin.
pub fn record_probe(target: &str, reachable: bool) {
    gauge!("dashboard_probe_reachable", "target" => target.to_string())
        .set(if reachable { 1.0 } else { 0.0 });
}

/// Record one search launch-window retry.
pub fn record_search_launch_retry() {
    counter!("dashboard_search_launch_retries_total").increment(1);
}
