#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Watch-HTTP: Conditional Long-Polling for Axum
//!
//! This crate implements the request side of a long-poll "watch" API on a
//! versioned resource. A client that holds revision X of a resource asks to
//! be told when the resource moves past X by sending a conditional request:
//!
//! - **`If-None-Match: <revision>`**: the revision the client currently
//!   holds; its presence is what makes the request a watch
//! - **`Prefer: wait=<seconds>`**: optional upper bound on how long the
//!   server may hold the connection open before answering "no change"
//!   (default: 120 seconds)
//!
//! The crate's core is a single pure function, [`parse_watch_request`],
//! that turns those headers into one of three explicit shapes:
//!
//! - `Ok(None)`: not a watch request; serve it normally
//! - `Ok(Some(WatchRequest))`: a validated watch carrying the last known revision and
//!   a positive timeout in milliseconds
//! - `Err(WatchError)`: a malformed header, to be answered with HTTP 400
//!
//! How the server detects "a newer revision exists" and how it blocks and
//! wakes watchers is deliberately out of scope: the produced
//! [`WatchRequest`] is handed to that mechanism, whatever it is.
//!
//! ## Handler Usage
//!
//! ```ignore
//! use axum::{routing::get, Router};
//! use watch_axum_http::Watch;
//!
//! async fn get_resource(Watch(watch): Watch) -> String {
//!     match watch {
//!         Some(watch) => {
//!             // Hand to the long-poll mechanism:
//!             // wait up to watch.timeout() for a revision newer than
//!             // watch.last_known_revision(), then respond.
//!             format!("watching from {}", watch.last_known_revision())
//!         }
//!         None => "current content".to_string(),
//!     }
//! }
//!
//! let app: Router = Router::new().route("/resource", get(get_resource));
//! ```
//!
//! ## Middleware Usage
//!
//! ```ignore
//! use axum::{middleware, routing::get, Router};
//! use watch_axum_http::WatchLayer;
//!
//! let watch = WatchLayer::new();
//! let app: Router = Router::new()
//!     .route("/resource", get(handler))
//!     .layer(middleware::from_fn(watch.middleware()));
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Core value types ([`Revision`], [`WatchRequest`])
//! - **[error]** - Error type and result handling
//! - **[protocol]** - Header names, default timeout, and the header parsers
//! - **[server]** - Axum integration (middleware layer and extractor)

pub mod error;
pub mod protocol;
pub mod server;
pub mod types;

pub use error::{Result, WatchError};
pub use protocol::{parse_prefer_wait, parse_watch_request, DEFAULT_TIMEOUT_MILLIS};
pub use server::{Watch, WatchLayer, WatchState};
pub use types::{Revision, WatchRequest};

#[cfg(test)]
mod tests;
