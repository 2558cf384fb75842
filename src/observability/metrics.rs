//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_context_requests_total` (counter): requests seen by the
//!   context layer, labelled by `outcome` (attached, absent, malformed)
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is optional and owned by the binary

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::context::layer::Outcome;

pub const REQUESTS_TOTAL: &str = "gateway_context_requests_total";

/// Count one request passing through the context layer.
pub fn record_outcome(outcome: Outcome) {
    ::metrics::counter!(REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}
