//! Handler-argument extractor for watch requests.
//!
//! Lets Axum handlers declare watch intent directly in their signature
//! instead of reading request extensions:
//!
//! ```ignore
//! use watch_axum_http::Watch;
//!
//! async fn get_resource(Watch(watch): Watch) -> Response {
//!     match watch {
//!         Some(watch) => long_poll(watch).await,
//!         None => respond_now().await,
//!     }
//! }
//! ```
//!
//! When [`WatchLayer`](super::WatchLayer) middleware is installed the
//! extractor reuses the state it attached; otherwise it parses the headers
//! itself. Either way a malformed header rejects the request with HTTP 400.

use crate::error::WatchError;
use crate::protocol;
use crate::types::WatchRequest;
use axum::extract::FromRequestParts;
use http::request::Parts;
use std::sync::Arc;

use super::middleware::WatchState;

/// Extractor for a client's watch intent.
///
/// Wraps `Option<WatchRequest>`: `Watch(None)` for an ordinary request,
/// `Watch(Some(_))` for a validated conditional long-poll. Requests with
/// malformed watch headers are rejected before the handler runs.
#[derive(Debug, Clone)]
pub struct Watch(pub Option<WatchRequest>);

impl<S> FromRequestParts<S> for Watch
where
    S: Send + Sync,
{
    type Rejection = WatchError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(state) = parts.extensions.get::<Arc<WatchState>>() {
            return Ok(Watch(state.watch.clone()));
        }
        protocol::parse_watch_request(&parts.headers).map(Watch)
    }
}
