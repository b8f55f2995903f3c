//! Alert list handler.

use serde::Serialize;
use tabled::Tabled;

use tissuewatch_core::{AlertCategory, MergedDeviceView, PriorityTier, build_views, score_for};

use crate::cli::AlertsArgs;
use crate::config::{Settings, SourcePaths};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Ranked view ─────────────────────────────────────────────────────

/// A merged view with its score in the list it was ranked for.
#[derive(Debug, Serialize)]
pub(crate) struct Ranked<'a> {
    #[serde(flatten)]
    pub view: &'a MergedDeviceView,
    pub priority: i32,
    pub tier: PriorityTier,
}

impl<'a> Ranked<'a> {
    pub(crate) fn new(category: AlertCategory, view: &'a MergedDeviceView) -> Self {
        let priority = score_for(category, view);
        Self {
            view,
            priority,
            tier: PriorityTier::from_score(priority),
        }
    }
}

/// Score every view for `category`, keeping pipeline order.
pub(crate) fn rank(category: AlertCategory, views: &[MergedDeviceView]) -> Vec<Ranked<'_>> {
    views.iter().map(|v| Ranked::new(category, v)).collect()
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Last alert")]
    last_alert: String,
}

impl From<&Ranked<'_>> for AlertRow {
    fn from(r: &Ranked<'_>) -> Self {
        let v = r.view;
        Self {
            id: v.id_label(),
            name: v.device_name.clone(),
            location: super::location(v),
            battery: super::battery(v),
            power: super::power(v),
            status: v.current_status.clone(),
            priority: format!("{} ({})", r.tier, r.priority),
            last_alert: super::last_alert(v),
        }
    }
}

/// Render one ranked alert list in the configured format.
pub(crate) fn render(settings: &Settings, ranked: &[Ranked<'_>]) -> String {
    output::render_list(
        settings.output,
        ranked,
        |r| AlertRow::from(r),
        |r| r.view.id_label(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: AlertsArgs,
    sources: &SourcePaths,
    settings: &Settings,
) -> Result<(), CliError> {
    let category = AlertCategory::from(args.view);
    let snapshot = util::load_snapshot(sources).await?;

    let mut views = build_views(&snapshot, category, args.search.as_deref().unwrap_or_default());
    tracing::debug!(%category, matched = views.len(), "built alert list");
    if let Some(limit) = args.limit {
        views.truncate(limit);
    }

    let out = render(settings, &rank(category, &views));
    output::print_output(&out, settings.quiet);
    Ok(())
}
