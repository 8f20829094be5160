//! Core value types for the watch protocol.
//!
//! # Types
//!
//! - **[`Revision`]**: opaque version token a client reports holding
//! - **[`WatchRequest`]**: validated description of a conditional long-poll
//!
//! Both are plain, immutable data records. A `WatchRequest` is created once
//! per inbound request and handed straight to the long-poll mechanism; it is
//! never stored, cached, or shared beyond that request's lifetime.

use crate::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// An opaque token identifying a point in a resource's change history.
///
/// The string form is captured as-is from the `If-None-Match` header; its
/// internal structure, equality, and ordering semantics are owned by the
/// external versioning system, not by this crate. Construction only rejects
/// tokens that cannot possibly name a revision: empty strings and strings
/// containing control characters.
///
/// # Examples
///
/// ```
/// use watch_axum_http::Revision;
///
/// let rev = Revision::new("1-abcdef").unwrap();
/// assert_eq!(rev.as_str(), "1-abcdef");
///
/// assert!(Revision::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// Construct a revision from its external string form.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError`] if the token is empty or contains control
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_control) {
            return Err(WatchError::invalid_revision(value));
        }
        Ok(Revision(value))
    }

    /// The revision token as received from the client.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Revision {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self> {
        Revision::new(s)
    }
}

/// A validated conditional long-poll request.
///
/// Describes what a watching client is asking for: the last revision it has
/// observed and how long the server may hold the connection open before
/// answering "no change". Produced by [`parse_watch_request`] and consumed by
/// a downstream long-poll mechanism; this crate never observes the timeout
/// itself.
///
/// Invariant: `timeout_millis() > 0` always. The default, applied when the
/// client sends no `Prefer` header, is 120,000 ms.
///
/// [`parse_watch_request`]: crate::protocol::parse_watch_request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRequest {
    last_known_revision: Revision,
    timeout_millis: u64,
}

impl WatchRequest {
    /// Create a watch request from an already-validated revision and timeout.
    ///
    /// Callers must supply a positive timeout; [`parse_watch_request`]
    /// guarantees this for parsed requests.
    ///
    /// [`parse_watch_request`]: crate::protocol::parse_watch_request
    #[must_use]
    pub fn new(last_known_revision: Revision, timeout_millis: u64) -> Self {
        debug_assert!(timeout_millis > 0);
        WatchRequest {
            last_known_revision,
            timeout_millis,
        }
    }

    /// The revision the client reports holding.
    #[inline]
    #[must_use]
    pub fn last_known_revision(&self) -> &Revision {
        &self.last_known_revision
    }

    /// Maximum time in milliseconds the server should wait before responding
    /// with "no newer revision". Always positive.
    #[inline]
    #[must_use]
    pub fn timeout_millis(&self) -> u64 {
        self.timeout_millis
    }

    /// The timeout as a [`Duration`], for handing to timer APIs.
    ///
    /// # Examples
    ///
    /// ```
    /// use watch_axum_http::{Revision, WatchRequest};
    /// use std::time::Duration;
    ///
    /// let watch = WatchRequest::new(Revision::new("1-abcdef").unwrap(), 30_000);
    /// assert_eq!(watch.timeout(), Duration::from_secs(30));
    /// ```
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_roundtrip() {
        let rev = Revision::new("1-abcdef").unwrap();
        assert_eq!(rev.as_str(), "1-abcdef");
        assert_eq!(rev.to_string(), "1-abcdef");
    }

    #[test]
    fn test_revision_rejects_empty() {
        assert!(Revision::new("").is_err());
    }

    #[test]
    fn test_revision_rejects_control_characters() {
        assert!(Revision::new("1-ab\u{0}cd").is_err());
        assert!(Revision::new("1-ab\ncd").is_err());
    }

    #[test]
    fn test_revision_from_str() {
        let rev: Revision = "42".parse().unwrap();
        assert_eq!(rev.as_str(), "42");
    }

    #[test]
    fn test_watch_request_accessors() {
        let watch = WatchRequest::new(Revision::new("v7").unwrap(), 5_000);
        assert_eq!(watch.last_known_revision().as_str(), "v7");
        assert_eq!(watch.timeout_millis(), 5_000);
        assert_eq!(watch.timeout(), Duration::from_secs(5));
    }
}
