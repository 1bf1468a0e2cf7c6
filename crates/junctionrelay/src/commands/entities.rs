//! Sensor and switch listings, built from a fresh platform setup.

use junctionrelay_core::{Entity, EntitySnapshot, Hub};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle_sensors(mut hub: Hub, global: &GlobalOpts) -> Result<(), CliError> {
    hub.setup_sensors().await;
    let snapshots: Vec<EntitySnapshot> = hub.sensors().iter().map(Entity::snapshot).collect();
    print(&snapshots, global);
    Ok(())
}

pub async fn handle_switches(mut hub: Hub, global: &GlobalOpts) -> Result<(), CliError> {
    hub.setup_switches().await;
    let snapshots: Vec<EntitySnapshot> = hub.switches().iter().map(Entity::snapshot).collect();
    print(&snapshots, global);
    Ok(())
}

/// Render and print snapshots with the global output settings.
pub(crate) fn print(snapshots: &[EntitySnapshot], global: &GlobalOpts) {
    let out = output::render_entities(&global.output, &global.color, snapshots);
    output::print_output(&out, global.quiet);
}
