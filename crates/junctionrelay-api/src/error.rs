use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `junctionrelay-api` crate.
///
/// A closed taxonomy over every way a call against the JunctionRelay
/// backend can fail. `junctionrelay-core` decides which of these degrade
/// an entity and which block setup.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Request did not complete within the configured timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// TCP connect / DNS / TLS handshake failed before a response arrived.
    #[error("Cannot connect to {url}: {reason}")]
    Connection { url: String, reason: String },

    /// Any other HTTP transport error.
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client itself could not be built (bad CA file, TLS backend).
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    // ── Response ────────────────────────────────────────────────────
    /// The backend answered with anything other than `200 OK`.
    #[error("Unexpected HTTP {status}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape we expected, with the raw body for debugging.
    #[error("Malformed payload: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Classify a `reqwest` failure into the closed taxonomy.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout }
        } else if err.is_connect() {
            Self::Connection {
                url: err.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: err.to_string(),
            }
        } else {
            Self::Transport(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the next poll cycle has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } | Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
