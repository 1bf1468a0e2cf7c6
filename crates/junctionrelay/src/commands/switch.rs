//! Start/stop a junction through its switch entity.

use junctionrelay_core::{Entity, Hub, JunctionId};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::entities;

pub async fn handle(mut hub: Hub, id: &str, on: bool, global: &GlobalOpts) -> Result<(), CliError> {
    hub.setup_switches().await;

    let id = JunctionId::from(id);
    if on {
        hub.turn_on(&id).await?;
    } else {
        hub.turn_off(&id).await?;
    }

    let snapshots: Vec<_> = hub.switch(&id).map(Entity::snapshot).into_iter().collect();
    entities::print(&snapshots, global);
    Ok(())
}
