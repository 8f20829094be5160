//! Error types and result handling for watch request parsing.
//!
//! The parser has exactly one failure mode: a client sent a header it could
//! not validate. Every error is detected synchronously during parsing, is
//! never worth retrying (the header will not change), and is expected to be
//! mapped to a 4xx response by the HTTP layer.
//!
//! Absence of the `If-None-Match` trigger header is NOT an error; it is
//! represented as `Ok(None)` by [`parse_watch_request`].
//!
//! [`parse_watch_request`]: crate::protocol::parse_watch_request

use thiserror::Error;

/// Result type for watch request parsing operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// A watch-related request header failed validation.
///
/// Carries the offending raw header text and renders a fixed-format message,
/// e.g. `invalid prefer header: wait=0 (expected: wait=seconds)`.
///
/// # Examples
///
/// ```
/// use watch_axum_http::protocol::parse_prefer_wait;
///
/// let err = parse_prefer_wait("wait=0").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "invalid prefer header: wait=0 (expected: wait=seconds)"
/// );
/// assert_eq!(err.raw(), "wait=0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {header} header: {raw} (expected: {expected})")]
pub struct WatchError {
    /// Lowercase name of the header that failed validation
    header: &'static str,
    /// The raw header value as received from the client
    raw: String,
    /// What a well-formed value looks like
    expected: &'static str,
}

impl WatchError {
    /// A malformed `Prefer` header (anything other than `wait=<seconds>`
    /// with a positive integer value).
    pub(crate) fn invalid_prefer(raw: impl Into<String>) -> Self {
        WatchError {
            header: "prefer",
            raw: raw.into(),
            expected: "wait=seconds",
        }
    }

    /// A malformed revision token in the `If-None-Match` header.
    pub(crate) fn invalid_revision(raw: impl Into<String>) -> Self {
        WatchError {
            header: "if-none-match",
            raw: raw.into(),
            expected: "a non-empty revision token",
        }
    }

    /// The raw header value that was rejected.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercase name of the header that was rejected.
    #[must_use]
    pub fn header(&self) -> &'static str {
        self.header
    }

    /// Human-readable description of a well-formed value.
    #[must_use]
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefer_error_message_format() {
        let err = WatchError::invalid_prefer("wait=abc");
        assert_eq!(
            err.to_string(),
            "invalid prefer header: wait=abc (expected: wait=seconds)"
        );
    }

    #[test]
    fn test_error_exposes_raw_value() {
        let err = WatchError::invalid_prefer("foo=bar");
        assert_eq!(err.raw(), "foo=bar");
        assert_eq!(err.header(), "prefer");
        assert_eq!(err.expected(), "wait=seconds");
    }

    #[test]
    fn test_revision_error_names_if_none_match() {
        let err = WatchError::invalid_revision("\u{0}");
        assert!(err.to_string().contains("if-none-match"));
    }
}
