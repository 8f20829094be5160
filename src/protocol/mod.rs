//! Protocol constants and header parsing for conditional long-poll watches.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | If-None-Match | Opaque revision token | `1-abcdef` |
//! | Prefer | `wait=<seconds>` | `wait=30` |
//!
//! See [`headers`](self::headers) for the parsing rules.

pub mod headers;

pub use headers::{parse_prefer_wait, parse_watch_request, DEFAULT_TIMEOUT_MILLIS};

/// Protocol constants.
pub mod constants {
    /// Header names used by the watch protocol.
    pub mod header_names {
        use http::header::HeaderName;

        /// Conditional version indicator; its presence triggers watch-mode
        /// parsing.
        pub const IF_NONE_MATCH: HeaderName = http::header::IF_NONE_MATCH;

        /// Optional wait-time directive, format `wait=<seconds>`.
        pub const PREFER: HeaderName = HeaderName::from_static("prefer");
    }
}
