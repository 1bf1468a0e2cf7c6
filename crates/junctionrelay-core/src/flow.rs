// ── Setup flow ──
//
// Single-step, single-field form: ask for a host, probe it once, and
// either create an entry or re-show the form with an error key.

use std::collections::BTreeMap;

use junctionrelay_api::{ApiPaths, Error as ApiError, JunctionClient, TransportConfig};
use tracing::{debug, error, info, warn};

use crate::entry::EntryData;
use crate::error::{FormError, SetupError};
use crate::host::Host;

/// Title given to every entry created by the flow.
pub const ENTRY_TITLE: &str = "JunctionRelay";

/// Step id of the only step.
pub const STEP_USER: &str = "user";

/// One field of a setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub required: bool,
}

/// Schema of the user step: a single required `host` string.
pub const DATA_SCHEMA: &[FormField] = &[FormField {
    name: "host",
    required: true,
}];

/// Raw form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub host: String,
}

/// Result of running a flow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    ShowForm {
        step_id: &'static str,
        schema: &'static [FormField],
        /// `"base"` → error key, empty on first display.
        errors: BTreeMap<&'static str, FormError>,
    },
    CreateEntry {
        title: String,
        data: EntryData,
    },
}

/// What a successful validation hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHost {
    pub title: String,
    pub host: Host,
}

/// Normalize the host, then issue one bounded GET against the probe path.
///
/// Any connectivity failure collapses into [`SetupError::CannotConnect`].
pub async fn validate_input(
    input: &UserInput,
    paths: &ApiPaths,
    transport: &TransportConfig,
) -> Result<ValidatedHost, SetupError> {
    let host = Host::normalize(&input.host);
    debug!(%host, "validating host");

    let cannot_connect = |source: ApiError| SetupError::CannotConnect {
        host: host.to_string(),
        source,
    };

    let client =
        JunctionClient::new(host.as_str(), paths.clone(), transport.clone()).map_err(cannot_connect)?;

    match client.probe().await {
        Ok(()) => Ok(ValidatedHost {
            title: ENTRY_TITLE.into(),
            host,
        }),
        Err(ApiError::Client(message)) => Err(SetupError::Unexpected {
            host: host.to_string(),
            message,
        }),
        Err(e) => Err(cannot_connect(e)),
    }
}

/// Setup flow for one backend.
#[derive(Debug, Clone, Default)]
pub struct ConfigFlow {
    paths: ApiPaths,
    transport: TransportConfig,
}

impl ConfigFlow {
    pub fn new(paths: ApiPaths, transport: TransportConfig) -> Self {
        Self { paths, transport }
    }

    /// Handle the user step.
    ///
    /// `None` shows the empty form. A submission either creates an entry
    /// with the normalized host or re-shows the form with a `base` error.
    pub async fn step_user(&self, input: Option<UserInput>) -> FlowResult {
        let Some(input) = input else {
            return show_form(BTreeMap::new());
        };

        match validate_input(&input, &self.paths, &self.transport).await {
            Ok(validated) => {
                info!(host = %validated.host, "creating entry");
                FlowResult::CreateEntry {
                    title: validated.title,
                    data: EntryData {
                        host: validated.host,
                    },
                }
            }
            Err(err) => {
                match &err {
                    SetupError::CannotConnect { host, source } => {
                        warn!(%host, error = %source, "cannot connect");
                    }
                    SetupError::Unexpected { .. } => error!(error = %err, "unexpected exception"),
                }
                show_form(BTreeMap::from([("base", err.form_error())]))
            }
        }
    }
}

fn show_form(errors: BTreeMap<&'static str, FormError>) -> FlowResult {
    FlowResult::ShowForm {
        step_id: STEP_USER,
        schema: DATA_SCHEMA,
        errors,
    }
}
