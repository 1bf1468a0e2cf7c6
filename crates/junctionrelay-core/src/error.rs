// ── Core error types ──
//
// User-facing errors from junctionrelay-core. The `From` impl translates
// the api crate's transport taxonomy into domain variants; setup has its
// own two-variant error because only it may block the caller.

use std::time::Duration;

use strum::{AsRefStr, Display};
use thiserror::Error;

/// Unified error type for runtime operations.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to JunctionRelay at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("JunctionRelay did not answer within {timeout:?}")]
    Timeout { timeout: Duration },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Junction not found: {id}")]
    JunctionNotFound { id: String },

    #[error("Malformed response from JunctionRelay: {message}")]
    MalformedPayload { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the backend answered).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<junctionrelay_api::Error> for CoreError {
    fn from(err: junctionrelay_api::Error) -> Self {
        use junctionrelay_api::Error as Api;

        match err {
            Api::Timeout { timeout } => CoreError::Timeout { timeout },
            Api::Connection { url, reason } => CoreError::ConnectionFailed { url, reason },
            Api::Transport(e) => CoreError::Api {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Client(message) => CoreError::Internal(message),
            Api::Status { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            Api::Deserialization { message, body: _ } => CoreError::MalformedPayload { message },
        }
    }
}

// ── Setup ────────────────────────────────────────────────────────────

/// Failure while validating a host during setup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Non-200 status, timeout, refused connection, or unparseable body.
    #[error("Cannot connect to {host}")]
    CannotConnect {
        host: String,
        #[source]
        source: junctionrelay_api::Error,
    },

    /// Anything that is not a connectivity problem.
    #[error("Unexpected error while validating {host}: {message}")]
    Unexpected { host: String, message: String },
}

impl SetupError {
    /// Form error key reported back to the user.
    pub fn form_error(&self) -> FormError {
        match self {
            Self::CannotConnect { .. } => FormError::CannotConnect,
            Self::Unexpected { .. } => FormError::Unknown,
        }
    }
}

/// Error keys shown on the setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FormError {
    CannotConnect,
    Unknown,
}
