//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by pipeline outcome
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_content_api_duration_seconds` (histogram): content API latency, labelled
//!   `variant=default|override`
//! - `gateway_redirects_total` (counter): redirects by status code
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus exporter"),
    }
}

pub fn record_request(outcome: &'static str, start: Instant) {
    counter!("gateway_requests_total", "outcome" => outcome).increment(1);
    histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_content_api_call(variant: &'static str, start: Instant) {
    histogram!("gateway_content_api_duration_seconds", "variant" => variant)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_redirect(status: u16) {
    counter!("gateway_redirects_total", "status" => status.to_string()).increment(1);
}
