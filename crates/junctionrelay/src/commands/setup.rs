//! Setup command: run the config flow and persist the resulting entry.

use serde::Serialize;

use junctionrelay_config::Config;
use junctionrelay_core::{ConfigEntry, ConfigFlow, EntryStore, FlowResult, FormError, UserInput};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Created<'a> {
    entry_id: &'a str,
    title: &'a str,
    host: &'a str,
}

pub async fn handle(host: String, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let (paths, transport) = config::flow_settings(global, &cfg.defaults)?;
    let flow = ConfigFlow::new(paths, transport);

    match flow.step_user(Some(UserInput { host: host.clone() })).await {
        FlowResult::CreateEntry { title, data } => {
            let entry = ConfigEntry::new(title, data);
            let mut store = config::FileEntryStore::open()?;
            if let Some(previous) = store.add(entry.clone())? {
                if !global.quiet {
                    eprintln!(
                        "Replaced existing entry {} (was {})",
                        previous.entry_id, previous.data.host
                    );
                }
            }

            let created = Created {
                entry_id: &entry.entry_id,
                title: &entry.title,
                host: entry.data.host.as_str(),
            };
            let out = output::render_single(
                &global.output,
                &created,
                |c| format!("Entry created: {} ({})", c.entry_id, c.host),
                |c| c.entry_id.to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
        FlowResult::ShowForm { errors, .. } => match errors.get("base") {
            Some(FormError::Unknown) => Err(CliError::SetupFailed { host }),
            _ => Err(CliError::CannotConnect { host }),
        },
    }
}
