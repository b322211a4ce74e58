//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resolver_resolutions_total` (counter): resolutions by outcome and input kind
//! - `resolver_resolution_duration_seconds` (histogram): resolution latency
//! - `resolver_config_reloads_total` (counter): reloads by result
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(outcome: &'static str, input_kind: &'static str, start: Instant) {
    metrics::counter!(
        "resolver_resolutions_total",
        "outcome" => outcome,
        "input_kind" => input_kind
    )
    .increment(1);
    metrics::histogram!("resolver_resolution_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_config_reload(result: &'static str) {
    metrics::counter!("resolver_config_reloads_total", "result" => result).increment(1);
}
