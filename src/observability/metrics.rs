//! Metrics collection and exposition.
//!
//! # Metrics
//! - `explorer_requests_total` (counter): inbound requests by method, route, status
//! - `explorer_request_duration_seconds` (histogram): inbound latency by route
//! - `explorer_rpc_calls_total` (counter): node calls by method and outcome
//! - `explorer_rpc_duration_seconds` (histogram): node call latency by method
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "explorer_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("explorer_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one node RPC call.
pub fn record_rpc_call(method: &str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "explorer_rpc_calls_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("explorer_rpc_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Route-level middleware feeding [`record_request`].
///
/// Uses the matched route template as the label so hashes and queries do not
/// explode cardinality.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    record_request(&method, &route, response.status().as_u16(), start);
    response
}
