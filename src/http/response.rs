//! Error-to-response mapping.
//!
//! # Design Decisions
//! - JSON API failures are `{"error": message}` bodies
//! - Node failures on the JSON API are 500s, including "not found"
//! - Pages turn node rejections into the not-found page, anything else into
//!   a generic system error

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::render;
use crate::node::RpcError;

/// JSON API error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        if !err.is_remote() {
            tracing::error!(error = %err, "Node call failed");
        }
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.client_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Rendered not-found page.
pub fn not_found_page(status: StatusCode, message: &str) -> Response {
    (status, Html(render::not_found_page(message))).into_response()
}

/// Rendered page for a failed node lookup of `subject`.
pub fn page_failure(err: RpcError, subject: &str) -> Response {
    if err.is_remote() {
        tracing::debug!(subject, error = %err, "Lookup rejected by node");
        return not_found_page(StatusCode::NOT_FOUND, subject);
    }
    tracing::error!(subject, error = %err, "Page lookup failed");
    system_error(&err)
}

/// Generic 500 page.
pub fn system_error(err: &RpcError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render::error_page(&err.client_message())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_is_500_on_api() {
        let err = ApiError::from(RpcError::Remote {
            code: -5,
            message: "Block not found".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Block not found");
    }

    #[test]
    fn test_page_failure_status() {
        let remote = RpcError::Remote {
            code: -5,
            message: "Block not found".into(),
        };
        assert_eq!(page_failure(remote, "abc").status(), StatusCode::NOT_FOUND);

        let transport = RpcError::Transport("refused".into());
        assert_eq!(
            page_failure(transport, "abc").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
