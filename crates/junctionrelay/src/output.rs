//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Entity snapshots get their own renderer since sensors, switches and
//! poll cycles all print them the same way.

use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use junctionrelay_core::{EntityKind, EntitySnapshot};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// `yes` in green / `no` in red.
pub fn availability(available: bool, color: bool) -> String {
    match (available, color) {
        (true, true) => "yes".green().to_string(),
        (false, true) => "no".red().to_string(),
        (true, false) => "yes".into(),
        (false, false) => "no".into(),
    }
}

/// Switch state `on` in green, anything else as is.
fn entity_state(snapshot: &EntitySnapshot, color: bool) -> String {
    let state = snapshot.state.as_deref().unwrap_or("-");
    match (snapshot.kind, state, color) {
        (EntityKind::Switch, "on", true) => state.green().to_string(),
        (_, "Unavailable", true) => state.dimmed().to_string(),
        _ => state.to_owned(),
    }
}

/// Local wall-clock time of the last successful refresh.
fn last_updated(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || "-".into(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since detail views don't use `Tabled`.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

// ── Entities ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "Entity ID")]
    unique_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl EntityRow {
    fn new(snapshot: &EntitySnapshot, color: bool) -> Self {
        Self {
            unique_id: snapshot.unique_id.clone(),
            name: snapshot.name.clone(),
            state: entity_state(snapshot, color),
            available: availability(snapshot.available, color),
            icon: snapshot.icon.to_owned(),
            updated: last_updated(snapshot.last_updated),
        }
    }
}

/// Render entity snapshots. Plain output is `unique_id<TAB>state` per line.
pub fn render_entities(format: &OutputFormat, color: &ColorMode, snapshots: &[EntitySnapshot]) -> String {
    let color = should_color(color);
    render_list(format, snapshots, |s| EntityRow::new(s, color), |s| {
        format!("{}\t{}", s.unique_id, s.state.as_deref().unwrap_or_default())
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}
