//! Junction command handlers: direct reads against the backend.

use serde::Serialize;
use tabled::Tabled;

use junctionrelay_core::api::{Junction, JunctionStatus};
use junctionrelay_core::{Hub, JunctionId};

use crate::cli::{GlobalOpts, JunctionsArgs, JunctionsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct JunctionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Junction> for JunctionRow {
    fn from(j: &Junction) -> Self {
        Self {
            id: j.id.to_string(),
            name: j.name.clone(),
            status: j.status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct StatusView<'a> {
    id: &'a JunctionId,
    #[serde(flatten)]
    status: &'a JunctionStatus,
}

fn detail(view: &StatusView<'_>) -> String {
    let mut lines = vec![
        format!("ID:      {}", view.id),
        format!("Status:  {}", view.status.status.as_deref().unwrap_or("Unknown")),
    ];
    for (key, value) in &view.status.extra {
        lines.push(format!("{key}: {value}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hub: &Hub, args: JunctionsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let client = hub.client();

    match args.command {
        JunctionsCommand::List => {
            let junctions = client.list_junctions().await?;
            let out = output::render_list(
                &global.output,
                &junctions,
                |j| JunctionRow::from(j),
                |j| j.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        JunctionsCommand::Status { id } => {
            let id = JunctionId::from(id);
            let status = client.get_junction(&id).await.map_err(|e| match e.status() {
                Some(404) => CliError::JunctionNotFound { id: id.to_string() },
                _ => e.into(),
            })?;
            let view = StatusView {
                id: &id,
                status: &status,
            };
            let out = output::render_single(&global.output, &view, detail, |v| {
                v.status.status.clone().unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
