//! Request spans.
//!
//! Every inbound request gets one span carrying its request id, so RPC calls
//! logged while serving it can be correlated.

use axum::http::Request;
use tracing::Span;

use crate::http::request::X_REQUEST_ID;

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
