//! Header parsing for conditional long-poll watch requests.
//!
//! A client polls for a new revision of a resource by sending a conditional
//! request: `If-None-Match` carries the revision it currently holds, and an
//! optional `Prefer: wait=<seconds>` directive bounds how long the server may
//! hold the connection open before answering "no change".
//!
//! The parser here turns those two headers into a typed [`WatchRequest`], or
//! reports explicitly that the request is not a watch at all.
//!
//! # Parsing Rules
//!
//! | Input | Result |
//! |-------|--------|
//! | No `If-None-Match` (absent or empty) | `Ok(None)`, `Prefer` ignored |
//! | `If-None-Match` only | watch with the 120 s default timeout |
//! | `If-None-Match` + `Prefer: wait=N` | watch with `N * 1000` ms timeout |
//! | `Prefer` not matching `wait=<positive integer>` | validation error |
//!
//! The `wait=` directive is matched case-insensitively after stripping ALL
//! whitespace, so `wait=30`, `wait = 30`, and `WAIT=30` are equivalent. It is
//! the only directive recognized; headers carrying additional comma-separated
//! preferences are rejected as malformed rather than partially honored.
//!
//! # Examples
//!
//! ```
//! use watch_axum_http::protocol::parse_watch_request;
//! use http::{HeaderMap, HeaderValue, header::IF_NONE_MATCH};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(IF_NONE_MATCH, HeaderValue::from_static("1-abcdef"));
//!
//! let watch = parse_watch_request(&headers).unwrap().unwrap();
//! assert_eq!(watch.last_known_revision().as_str(), "1-abcdef");
//! assert_eq!(watch.timeout_millis(), 120_000);
//! ```

use crate::error::{Result, WatchError};
use crate::types::{Revision, WatchRequest};
use http::header::IF_NONE_MATCH;
use http::{HeaderMap, HeaderValue};

use super::constants::header_names::PREFER;

/// Timeout applied when a watching client sends no `Prefer` header: 120 s.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 120_000;

/// Parse a conditional long-poll watch request from HTTP headers.
///
/// Reads `If-None-Match` and `Prefer` and decides which of three shapes the
/// request takes:
///
/// - `Ok(None)`: no `If-None-Match` header (or an empty one); an ordinary,
///   non-watching request. A stray `Prefer` header is ignored in this case.
/// - `Ok(Some(watch))`: a valid watch request carrying the client's last
///   known revision and a positive timeout in milliseconds.
/// - `Err(_)`: the client sent a malformed revision token or a malformed
///   `Prefer` header.
///
/// The operation is pure: no I/O, no shared state, safe to call from any
/// number of tasks concurrently.
///
/// # Errors
///
/// Returns [`WatchError`] when the `If-None-Match` value is not a valid
/// revision token or the `Prefer` value does not match
/// `wait=<positive-integer-seconds>`.
///
/// # Examples
///
/// ```
/// use watch_axum_http::protocol::parse_watch_request;
/// use http::{HeaderMap, HeaderValue, header::IF_NONE_MATCH};
///
/// // No conditional header: not a watch request.
/// assert!(parse_watch_request(&HeaderMap::new()).unwrap().is_none());
///
/// // Conditional header plus a wait directive.
/// let mut headers = HeaderMap::new();
/// headers.insert(IF_NONE_MATCH, HeaderValue::from_static("1-abcdef"));
/// headers.insert("prefer", HeaderValue::from_static("wait=30"));
///
/// let watch = parse_watch_request(&headers).unwrap().unwrap();
/// assert_eq!(watch.timeout_millis(), 30_000);
/// ```
pub fn parse_watch_request(headers: &HeaderMap) -> Result<Option<WatchRequest>> {
    let if_none_match = match headers.get(IF_NONE_MATCH) {
        Some(value) => header_str(value, WatchError::invalid_revision)?,
        None => return Ok(None),
    };
    if if_none_match.is_empty() {
        return Ok(None);
    }

    let last_known_revision = Revision::new(if_none_match)?;

    let timeout_millis = match headers.get(&PREFER) {
        Some(value) => {
            let prefer = header_str(value, WatchError::invalid_prefer)?;
            if prefer.is_empty() {
                DEFAULT_TIMEOUT_MILLIS
            } else {
                parse_prefer_wait(prefer)?
            }
        }
        None => DEFAULT_TIMEOUT_MILLIS,
    };

    Ok(Some(WatchRequest::new(last_known_revision, timeout_millis)))
}

/// Parse a `Prefer: wait=<seconds>` directive into a timeout in milliseconds.
///
/// The value is normalized by stripping all whitespace and lower-casing, then
/// matched strictly against `wait=<positive-integer>`. Anything else
/// (missing prefix, non-numeric or non-positive seconds, extra directives)
/// is rejected; the parser never extracts `wait=` from a larger structured
/// value.
///
/// # Errors
///
/// Returns [`WatchError`] carrying the raw header value when the directive is
/// malformed, zero, negative, or overflows.
///
/// # Examples
///
/// ```
/// use watch_axum_http::protocol::parse_prefer_wait;
///
/// assert_eq!(parse_prefer_wait("wait=30").unwrap(), 30_000);
/// assert_eq!(parse_prefer_wait("WAIT = 45").unwrap(), 45_000);
/// assert!(parse_prefer_wait("wait=0").is_err());
/// assert!(parse_prefer_wait("wait=30, foo=bar").is_err());
/// ```
pub fn parse_prefer_wait(value: &str) -> Result<u64> {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let seconds = normalized
        .strip_prefix("wait=")
        .and_then(|digits| digits.parse::<u64>().ok())
        .filter(|&seconds| seconds > 0)
        .ok_or_else(|| WatchError::invalid_prefer(value))?;

    seconds
        .checked_mul(1000)
        .ok_or_else(|| WatchError::invalid_prefer(value))
}

/// Decode a header value as a string, reporting undecodable bytes through the
/// supplied error constructor.
fn header_str<F>(value: &HeaderValue, on_invalid: F) -> Result<&str>
where
    F: FnOnce(String) -> WatchError,
{
    value
        .to_str()
        .map_err(|_| on_invalid(String::from_utf8_lossy(value.as_bytes()).into_owned()))
}
