//! Command dispatch: bridges CLI args -> core pipeline -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod devices;
pub mod summary;
pub mod util;
pub mod watch;

use tissuewatch_core::{AlertCategory, MergedDeviceView};

use crate::cli::{AlertView, Command};
use crate::config::{Settings, SourcePaths};
use crate::error::CliError;

impl From<AlertView> for AlertCategory {
    fn from(view: AlertView) -> Self {
        match view {
            AlertView::BatteryOff => Self::BatteryOff,
            AlertView::Low => Self::Low,
            AlertView::Critical => Self::Critical,
            AlertView::BatteryPowerOff => Self::BatteryPowerOff,
            AlertView::AllBattery => Self::AllBattery,
            AlertView::PowerOff => Self::PowerOff,
        }
    }
}

/// Dispatch a snapshot-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    sources: &SourcePaths,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        Command::Alerts(args) => alerts::handle(args, sources, settings).await,
        Command::Summary => summary::handle(sources, settings).await,
        Command::Devices(args) => devices::handle(args, sources, settings).await,
        Command::Watch(args) => watch::handle(args, sources, settings).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

// ── Shared cell formatting ──────────────────────────────────────────

fn dash_or(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map_or_else(|| "-".into(), ToOwned::to_owned)
}

/// `"Room 101 / Floor 2"`, whichever parts are known.
pub(crate) fn location(v: &MergedDeviceView) -> String {
    let parts: Vec<String> = [
        v.room.as_deref().map(|r| format!("Room {r}")),
        v.floor.as_deref().map(|f| format!("Floor {f}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if parts.is_empty() {
        "-".into()
    } else {
        parts.join(" / ")
    }
}

pub(crate) fn battery(v: &MergedDeviceView) -> String {
    dash_or(v.battery_label().as_deref())
}

pub(crate) fn power(v: &MergedDeviceView) -> String {
    dash_or(v.power_status.as_deref())
}

pub(crate) fn last_alert(v: &MergedDeviceView) -> String {
    v.last_alert_time
        .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

pub(crate) fn minutes(v: &MergedDeviceView) -> String {
    v.minutes_since_update
        .map_or_else(|| "-".into(), |m| format!("{m:.0}m"))
}
