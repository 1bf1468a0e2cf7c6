//! Clap derive structures for the `junctionrelay` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// junctionrelay -- watch and drive JunctionRelay junctions
#[derive(Debug, Parser)]
#[command(
    name = "junctionrelay",
    version,
    about = "Monitor and control JunctionRelay junctions from the command line",
    long_about = "Validates a JunctionRelay backend, polls its junctions as status\n\
        sensors and on/off switches, and starts or stops junction connections.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config entry to use (see `entries list`)
    #[arg(long, short = 'e', env = "JUNCTIONRELAY_ENTRY", global = true)]
    pub entry: Option<String>,

    /// Backend host, bypassing stored entries
    #[arg(long, short = 'H', env = "JUNCTIONRELAY_HOST", global = true)]
    pub host: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JUNCTIONRELAY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "JUNCTIONRELAY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "JUNCTIONRELAY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a backend and store it as a config entry
    Setup {
        /// Host or URL of the backend (scheme defaults to http://)
        host: String,
    },

    /// Manage stored config entries
    Entries(EntriesArgs),

    /// Query junctions directly
    #[command(alias = "j")]
    Junctions(JunctionsArgs),

    /// Show junction status sensors
    Sensors,

    /// Show junction switches
    Switches,

    /// Start a junction's connections
    Start {
        /// Junction id
        id: String,
    },

    /// Stop a junction's connections
    Stop {
        /// Junction id
        id: String,
    },

    /// Set up entities and keep refreshing them
    Poll(PollArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Entries ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntriesArgs {
    #[command(subcommand)]
    pub command: EntriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EntriesCommand {
    /// List stored entries
    #[command(alias = "ls")]
    List,

    /// Remove a stored entry
    #[command(alias = "rm")]
    Remove {
        /// Entry id
        entry_id: String,
    },
}

// ── Junctions ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct JunctionsArgs {
    #[command(subcommand)]
    pub command: JunctionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum JunctionsCommand {
    /// List junctions from the summary endpoint
    #[command(alias = "ls")]
    List,

    /// Fetch one junction's status
    Status {
        /// Junction id
        id: String,
    },
}

// ── Poll ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Refresh once and exit
    #[arg(long)]
    pub once: bool,

    /// Seconds between refresh cycles (overrides config)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
