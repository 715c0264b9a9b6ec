//! Request correlation ID shared by the middleware and response envelopes.
//!
//! The request-id middleware mints one `req_`-prefixed UUIDv7 per request
//! and exposes it as the `x-request-id` header. Handlers extract the same
//! value through [`RequestId`], so the header and the envelope's
//! `request_id` always agree.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_http::request_id::{MakeRequestId, RequestId as HeaderRequestId};

use pokelens_core::api::new_request_id;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates time-ordered `req_`-prefixed UUIDv7 correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<HeaderRequestId> {
        let id = new_request_id().parse().ok()?;
        Some(HeaderRequestId::new(id))
    }
}

/// The correlation ID assigned to the current request.
///
/// Falls back to a freshly minted ID when the middleware is absent (direct
/// handler tests).
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(new_request_id);
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_minted_header_value_matches_envelope_format() {
        let mut make = MakeRequestUuidV7;
        let id = make
            .make_request_id(&Request::new(()))
            .expect("header value is always valid");
        let value = id.header_value().to_str().unwrap();
        assert!(value.starts_with("req_"));
        assert_eq!(value.len(), "req_".len() + 32);
    }

    #[tokio::test]
    async fn test_extractor_reads_middleware_header() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "req_0123")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let RequestId(id) = RequestId::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(id, "req_0123");
    }

    #[tokio::test]
    async fn test_extractor_mints_fallback_without_middleware() {
        let request = Request::builder().body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        let RequestId(id) = RequestId::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(id.starts_with("req_"));
    }
}
