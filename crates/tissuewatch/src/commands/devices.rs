//! Device command handlers.

use tabled::Tabled;

use tissuewatch_core::{MergedDeviceView, SearchQuery, find_view};

use crate::cli::{DevicesArgs, DevicesCommand};
use crate::config::{Settings, SourcePaths};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&MergedDeviceView> for DeviceRow {
    fn from(v: &MergedDeviceView) -> Self {
        Self {
            id: v.id_label(),
            name: v.device_name.clone(),
            location: super::location(v),
            active: if v.is_active { "yes" } else { "no" }.into(),
            status: v.current_status.clone(),
            battery: super::battery(v),
            power: super::power(v),
            updated: super::minutes(v),
        }
    }
}

fn detail(v: &MergedDeviceView) -> String {
    let c = &v.counts;
    [
        format!("ID:           {}", v.id_label()),
        format!("Name:         {}", v.device_name),
        format!("Location:     {}", super::location(v)),
        format!("Active:       {}", v.is_active),
        format!("Status:       {} (priority {})", v.current_status, v.status_priority),
        format!("Battery:      {}", super::battery(v)),
        format!("Power:        {}", super::power(v)),
        format!("Updated:      {}", super::minutes(v)),
        format!(
            "Live flags:   alert={} tamper={} low={} critical={} off={}",
            v.current_alert, v.current_tamper, v.battery_low, v.battery_critical, v.battery_off
        ),
        format!(
            "Alert counts: battery_off={} low={} critical={} power_off={} tamper={}",
            c.battery_off_count,
            c.battery_low_count,
            c.battery_critical_count,
            c.power_off_count,
            c.tamper_count
        ),
        format!("Entries:      {}", c.total_entries),
        format!("Last alert:   {}", super::last_alert(v)),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: DevicesArgs,
    sources: &SourcePaths,
    settings: &Settings,
) -> Result<(), CliError> {
    let snapshot = util::load_snapshot(sources).await?;
    let views = snapshot.merged();

    match args.command {
        DevicesCommand::List { search } => {
            let query = SearchQuery::new(search.as_deref().unwrap_or_default());
            let matched: Vec<MergedDeviceView> =
                views.into_iter().filter(|v| query.matches(v)).collect();
            let out = output::render_list(
                settings.output,
                &matched,
                |v| DeviceRow::from(v),
                MergedDeviceView::id_label,
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let view = find_view(&views, &device)?;
            let out = output::render_single(
                settings.output,
                view,
                detail,
                MergedDeviceView::id_label,
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}
