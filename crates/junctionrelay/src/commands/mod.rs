//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod entities;
pub mod entries;
pub mod junctions;
pub mod poll;
pub mod setup;
pub mod switch;

use junctionrelay_config::Config;
use junctionrelay_core::Hub;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a command that needs a config file to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    match cmd {
        Command::Setup { host } => setup::handle(host, global, cfg).await,
        Command::Entries(args) => entries::handle(args, global),
        Command::Junctions(args) => junctions::handle(&build_hub(global, cfg)?, args, global).await,
        Command::Sensors => entities::handle_sensors(build_hub(global, cfg)?, global).await,
        Command::Switches => entities::handle_switches(build_hub(global, cfg)?, global).await,
        Command::Start { id } => switch::handle(build_hub(global, cfg)?, &id, true, global).await,
        Command::Stop { id } => switch::handle(build_hub(global, cfg)?, &id, false, global).await,
        Command::Poll(args) => poll::handle(global, cfg, args).await,
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}

fn build_hub(global: &GlobalOpts, cfg: &Config) -> Result<Hub, CliError> {
    let hub_config = config::resolve_hub_config(global, cfg)?;
    tracing::debug!(host = %hub_config.host, "building hub");
    Ok(Hub::new(hub_config)?)
}
