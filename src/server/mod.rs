//! Server-side (Axum) integration for the watch protocol.
//!
//! Two ways to consume watch intent in handlers:
//!
//! - [`WatchLayer`] middleware, which parses headers once per request and
//!   attaches [`WatchState`] to request extensions
//! - the [`Watch`] extractor, declared directly as a handler argument
//!
//! Both reject malformed watch headers with HTTP 400 before the handler runs;
//! the response body is the fixed-format validation message.

mod extract;
mod middleware;

pub use extract::Watch;
pub use middleware::{WatchLayer, WatchState};

use crate::error::WatchError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Every watch validation failure is a client input error: map it to
/// 400 Bad Request with the fixed-format message as a plain-text body.
impl IntoResponse for WatchError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watch_error_maps_to_bad_request() {
        let err = crate::protocol::parse_prefer_wait("wait=0").unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
