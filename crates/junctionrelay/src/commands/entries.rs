//! Entry command handlers.

use tabled::Tabled;

use junctionrelay_core::{ConfigEntry, EntryStore};

use crate::cli::{EntriesArgs, EntriesCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Host")]
    host: String,
}

impl From<&ConfigEntry> for EntryRow {
    fn from(e: &ConfigEntry) -> Self {
        Self {
            id: e.entry_id.clone(),
            title: e.title.clone(),
            host: e.data.host.to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: EntriesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut store = config::FileEntryStore::open()?;

    match args.command {
        EntriesCommand::List => {
            let out = output::render_list(
                &global.output,
                store.entries(),
                |e| EntryRow::from(e),
                |e| e.entry_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EntriesCommand::Remove { entry_id } => {
            if store.remove(&entry_id)?.is_none() {
                let available = store
                    .entries()
                    .iter()
                    .map(|e| e.entry_id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CliError::EntryNotFound { entry_id, available });
            }
            if !global.quiet {
                eprintln!("Entry removed");
            }
            Ok(())
        }
    }
}
