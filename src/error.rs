//! Error types for docproc-client
//!
//! Every failure a submission can hit is funneled into one [`Error`] enum so
//! that embedders can surface a single, categorized message to the user.
//! Categories are deliberately coarse:
//! - input problems caught before any network activity
//! - transport failures (DNS, refused connections, timeouts)
//! - the remote service answering with a non-200 status
//! - a 200 answer whose JSON does not have the expected shape
//! - everything else

use std::time::Duration;
use thiserror::Error;

/// Result type alias for docproc-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum length of a response fragment kept for diagnostics
const MAX_FRAGMENT_LEN: usize = 256;

/// Main error type for docproc-client
///
/// Each variant carries the context needed to report the failure without
/// re-reading the wire: the remote status and raw body for server-side
/// failures, the offending fragment for malformed responses.
#[derive(Debug, Error)]
pub enum Error {
    /// No document was supplied; raised before any network activity
    #[error("no document supplied")]
    MissingInput,

    /// Transport-level failure (DNS, connection refused, TLS)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request did not complete within the configured deadline
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// The deadline that was exceeded
        timeout: Duration,
    },

    /// The remote service answered with a non-200 status
    #[error("remote processing failed with status {status}: {body}")]
    RemoteProcessing {
        /// HTTP status code returned by the service
        status: u16,
        /// Raw response body, kept verbatim for diagnostics
        body: String,
    },

    /// A 200 response whose JSON does not match the expected envelope shape
    #[error("unexpected response shape: {reason} (fragment: {fragment})")]
    ResponseShape {
        /// What was expected and not found (e.g. missing key, wrong type)
        reason: String,
        /// The offending JSON fragment, truncated for diagnostics
        fragment: String,
    },

    /// The credential provider could not supply the named key
    #[error("credential {name:?} unavailable: {reason}")]
    Credential {
        /// Name of the credential that was requested
        name: String,
        /// Why the lookup failed
        reason: String,
    },

    /// A submission is already in flight
    #[error("a submission is already in progress")]
    InFlight,

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (writing the downloaded artifact)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration (e.g. endpoint is not a valid URL)
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Machine-readable category for this error
    ///
    /// Stable strings suitable for user-facing messages, metrics labels, or
    /// structured log fields. Transport timeouts share the `network`
    /// category with other transport failures.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Error::MissingInput => "missing_input",
            Error::Network(_) | Error::Timeout { .. } => "network",
            Error::RemoteProcessing { .. } => "remote_processing",
            Error::ResponseShape { .. } => "response_shape",
            Error::Credential { .. } => "credential",
            Error::InFlight => "busy",
            Error::Config { .. } => "config",
            Error::Serialization(_) | Error::Io(_) | Error::Other(_) => "unexpected",
        }
    }

    /// Build a [`Error::ResponseShape`] with a truncated fragment
    pub(crate) fn shape(reason: impl Into<String>, fragment: &str) -> Self {
        Error::ResponseShape {
            reason: reason.into(),
            fragment: truncate_fragment(fragment),
        }
    }
}

/// Truncate a response fragment to a diagnosable size
///
/// Keeps error messages bounded when the service returns a large body.
/// Truncation respects UTF-8 boundaries.
pub(crate) fn truncate_fragment(fragment: &str) -> String {
    if fragment.len() <= MAX_FRAGMENT_LEN {
        return fragment.to_string();
    }
    let mut end = MAX_FRAGMENT_LEN;
    while !fragment.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &fragment[..end])
}
