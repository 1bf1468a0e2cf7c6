//! Continuous polling: set up both platforms, then refresh until Ctrl-C.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use junctionrelay_config::Config;
use junctionrelay_core::{Entity, EntitySnapshot, Hub};

use crate::cli::{GlobalOpts, PollArgs};
use crate::config;
use crate::error::CliError;

use super::entities;

pub async fn handle(global: &GlobalOpts, cfg: &Config, args: PollArgs) -> Result<(), CliError> {
    let mut hub_config = config::resolve_hub_config(global, cfg)?;
    if let Some(secs) = args.interval {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        hub_config.scan_interval = Duration::from_secs(secs);
    }

    let mut hub = Hub::new(hub_config)?;
    hub.setup().await;
    print_cycle(&hub, global);

    if args.once {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("interrupt received, stopping");
                ctrl_c.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for interrupt"),
        }
    });

    hub.run(&cancel, |hub| print_cycle(hub, global)).await;
    Ok(())
}

fn print_cycle(hub: &Hub, global: &GlobalOpts) {
    let snapshots: Vec<EntitySnapshot> = hub.entities().map(Entity::snapshot).collect();
    entities::print(&snapshots, global);
}
