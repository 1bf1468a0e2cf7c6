//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use junctionrelay_config::ConfigError;
use junctionrelay_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to JunctionRelay at {url}")]
    #[diagnostic(
        code(junctionrelay::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout}")]
    #[diagnostic(
        code(junctionrelay::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { timeout: String },

    // ── Setup ────────────────────────────────────────────────────────
    #[error("Cannot connect to {host}")]
    #[diagnostic(
        code(junctionrelay::cannot_connect),
        help(
            "The backend must answer GET /api/junctions/summary with HTTP 200 and JSON.\n\
             Check the host and port, then retry: junctionrelay setup <host>"
        )
    )]
    CannotConnect { host: String },

    #[error("Unexpected error while setting up {host}")]
    #[diagnostic(code(junctionrelay::unknown), help("Re-run with -vv for details."))]
    SetupFailed { host: String },

    // ── Entries ──────────────────────────────────────────────────────
    #[error("No config entries configured")]
    #[diagnostic(
        code(junctionrelay::no_entries),
        help(
            "Add one with: junctionrelay setup <host>\n\
             Or pass --host. Config file: {path}"
        )
    )]
    NoEntries { path: String },

    #[error("Several config entries exist; pick one")]
    #[diagnostic(
        code(junctionrelay::ambiguous_entry),
        help("Use --entry with one of: {available}")
    )]
    AmbiguousEntry { available: String },

    #[error("Entry '{entry_id}' not found")]
    #[diagnostic(
        code(junctionrelay::entry_not_found),
        help("Available entries: {available}")
    )]
    EntryNotFound { entry_id: String, available: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Junction '{id}' not found")]
    #[diagnostic(
        code(junctionrelay::not_found),
        help("Run: junctionrelay junctions list")
    )]
    JunctionNotFound { id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error(
        "API error{}: {message}",
        .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
    )]
    #[diagnostic(code(junctionrelay::api_error))]
    ApiError { message: String, status: Option<u16> },

    #[error("Malformed response: {message}")]
    #[diagnostic(
        code(junctionrelay::malformed),
        help("Check that --host points at a JunctionRelay backend.")
    )]
    Malformed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(junctionrelay::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(junctionrelay::config))]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::CannotConnect { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::JunctionNotFound { .. } | Self::EntryNotFound { .. } => exit_code::NOT_FOUND,
            Self::NoEntries { .. } | Self::AmbiguousEntry { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout } => CliError::Timeout {
                timeout: format!("{timeout:?}"),
            },
            CoreError::JunctionNotFound { id } => CliError::JunctionNotFound { id },
            CoreError::MalformedPayload { message } => CliError::Malformed { message },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<junctionrelay_core::api::Error> for CliError {
    fn from(err: junctionrelay_core::api::Error) -> Self {
        CoreError::from(err).into()
    }
}
