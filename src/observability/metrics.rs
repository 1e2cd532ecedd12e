//! Metrics collection and exposition.
//!
//! # Metrics
//! - `publisher_operation_duration_seconds` (histogram): span durations by operation
//! - `publisher_wallet_balance` (gauge): last successfully queried balance
//! - `publisher_balance_checks_total` (counter): balance checks by outcome
//! - `publisher_uploads_total` (counter): uploads by outcome
//! - `publisher_rpc_health` (gauge): 1=chain reachable, 0=unreachable

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_operation_duration(operation: &'static str, elapsed: Duration) {
    histogram!("publisher_operation_duration_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}

pub fn record_balance(balance: f64) {
    gauge!("publisher_wallet_balance").set(balance);
}

pub fn record_balance_check(outcome: &'static str) {
    counter!("publisher_balance_checks_total", "outcome" => outcome).increment(1);
}

pub fn record_upload(outcome: &'static str) {
    counter!("publisher_uploads_total", "outcome" => outcome).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    gauge!("publisher_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
