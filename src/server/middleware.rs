//! Axum middleware for conditional long-poll watch support.
//!
//! Provides an Axum layer that parses watch headers from incoming requests
//! once and makes the result available to handlers.
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use watch_axum_http::WatchLayer;
//!
//! let watch = WatchLayer::new();
//! let app = Router::new()
//!     .route("/resource", get(handler))
//!     .layer(middleware::from_fn(watch.middleware()));
//! ```
//!
//! # How It Works
//!
//! The middleware:
//! 1. Parses `If-None-Match` and `Prefer` from the incoming request
//! 2. On a validation failure, short-circuits with a 400 response carrying
//!    the error message; the handler never runs
//! 3. Otherwise attaches the parsed [`WatchState`] to request extensions
//! 4. Handlers extract [`WatchState`] (or the [`Watch`](super::Watch)
//!    extractor) to decide between an immediate response and a long poll

use crate::error::Result;
use crate::protocol;
use crate::types::WatchRequest;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Watch intent extracted from HTTP request headers.
///
/// Immutable per-request state produced by the middleware and made available
/// to handlers via request extensions. `watch` is `None` when the client sent
/// no `If-None-Match` header and the request should be served normally.
///
/// # Examples
///
/// ```ignore
/// use axum::extract::Extension;
/// use watch_axum_http::WatchState;
/// use std::sync::Arc;
///
/// async fn handle_resource(
///     Extension(state): Extension<Arc<WatchState>>,
/// ) -> String {
///     match &state.watch {
///         Some(watch) => format!(
///             "long-poll from {} for up to {} ms",
///             watch.last_known_revision(),
///             watch.timeout_millis(),
///         ),
///         None => "plain read".to_string(),
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct WatchState {
    /// The validated watch request, or `None` for a non-watching request
    pub watch: Option<WatchRequest>,
}

impl WatchState {
    /// Parse watch state from HTTP request headers.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError`](crate::WatchError) when the request carries a
    /// malformed revision token or `Prefer` header.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let watch = protocol::parse_watch_request(headers)?;
        Ok(WatchState { watch })
    }
}

/// Axum middleware layer for watch protocol support.
///
/// `WatchLayer` processes incoming requests, parses their watch headers, and
/// attaches the result to request extensions. Requests with malformed watch
/// headers are rejected with HTTP 400 before reaching the handler.
///
/// # Usage
///
/// ```ignore
/// use axum::{Router, middleware, routing::get};
/// use watch_axum_http::WatchLayer;
///
/// let watch = WatchLayer::new();
/// let app = Router::new()
///     .route("/resource", get(handler))
///     .layer(middleware::from_fn(watch.middleware()));
/// ```
#[derive(Clone, Default)]
pub struct WatchLayer {
    _private: (),
}

impl WatchLayer {
    /// Create a new watch layer.
    #[must_use]
    pub fn new() -> Self {
        WatchLayer::default()
    }

    /// Create the middleware function for use with `axum::middleware::from_fn`.
    ///
    /// Returns a middleware function that parses watch headers, rejects
    /// malformed ones with HTTP 400, and attaches `Arc<WatchState>` to the
    /// extensions of accepted requests.
    #[must_use]
    pub fn middleware(
        &self,
    ) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
           + Send
           + Sync
           + Clone {
        move |mut req: Request, next: Next| {
            Box::pin(async move {
                let state = match WatchState::from_headers(req.headers()) {
                    Ok(state) => state,
                    Err(err) => {
                        warn!(header = err.header(), raw = err.raw(), "rejected watch request");
                        return err.into_response();
                    }
                };
                if let Some(watch) = &state.watch {
                    debug!(
                        revision = %watch.last_known_revision(),
                        timeout_millis = watch.timeout_millis(),
                        "parsed watch request"
                    );
                }
                req.extensions_mut().insert(Arc::new(state));
                next.run(req).await
            })
        }
    }
}
