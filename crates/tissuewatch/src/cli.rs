//! Clap derive structures for the `tissuewatch` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of crate-internal imports so `build.rs` can compile it standalone.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tissuewatch -- battery and power alerts for a dispenser fleet
#[derive(Debug, Parser)]
#[command(
    name = "tissuewatch",
    version,
    about = "Battery and power alerts for tissue dispenser fleets",
    long_about = "Merges device registry, analytics and realtime status snapshots\n\
        into per-device views, then ranks and filters them into the\n\
        battery-off, low-battery and power-off alert lists.",
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
    /// Snapshot profile to use
    #[arg(long, short = 'p', env = "TISSUEWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device registry snapshot (JSON array; overrides profile)
    #[arg(long, env = "TISSUEWATCH_DEVICES", global = true, value_name = "FILE")]
    pub devices: Option<PathBuf>,

    /// Analytics snapshot (JSON array; overrides profile)
    #[arg(long, env = "TISSUEWATCH_ANALYTICS", global = true, value_name = "FILE")]
    pub analytics: Option<PathBuf>,

    /// Realtime status snapshot (JSON array; overrides profile)
    #[arg(long, env = "TISSUEWATCH_STATUS", global = true, value_name = "FILE")]
    pub status: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "TISSUEWATCH_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one device id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Alert list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlertView {
    /// Batteries that are flat or have reported battery-off
    BatteryOff,
    /// Powered devices between 10% and 20% battery, or flagged low
    Low,
    /// Powered devices at or below 10% battery, or flagged critical
    Critical,
    /// Devices without power, as seen from the battery screen
    BatteryPowerOff,
    /// Every battery alert plus unpowered devices
    AllBattery,
    /// Unpowered devices that are not reporting as online
    PowerOff,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a ranked alert list
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Count devices in every alert list
    #[command(alias = "sum")]
    Summary,

    /// Inspect merged device views
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Re-render an alert list whenever the snapshots change
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Alert list to show
    #[arg(value_enum)]
    pub view: AlertView,

    /// Case-insensitive search over name, id, room, floor and battery level
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show at most this many devices
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List every device in registry order
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over name, id, room, floor and battery level
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one device's merged view
    Get {
        /// Device identifier
        device: String,
    },
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Alert list to show
    #[arg(value_enum)]
    pub view: AlertView,

    /// Case-insensitive search over name, id, room, floor and battery level
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Seconds between snapshot reloads [default: from config, else 30]
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Write a starter config with a `default` profile
    Init {
        /// Directory holding devices.json, analytics.json and status.json
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
