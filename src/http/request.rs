//! Request ID generation.
//!
//! Every inbound request gets an `x-request-id` (UUID v4) as early as
//! possible; the same id is echoed on the response and carried by the
//! request span.

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 for each request lacking an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_distinct_uuids() {
        let request = Request::new(());
        let mut maker = UuidRequestId;

        let a = maker.make_request_id(&request).unwrap();
        let b = maker.make_request_id(&request).unwrap();

        let a = a.header_value().to_str().unwrap().to_owned();
        let b = b.header_value().to_str().unwrap().to_owned();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
