//! Fleet summary handler.

use tissuewatch_core::AlertSummary;

use crate::config::{Settings, SourcePaths};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &AlertSummary) -> String {
    let mut lines = vec![row("Devices", s.total), row("Active", s.active)];
    lines.extend(
        s.categories
            .iter()
            .map(|c| row(c.category.title(), c.devices)),
    );
    lines.join("\n")
}

fn row(label: &str, count: usize) -> String {
    format!("{:<26}{count}", format!("{label}:"))
}

pub async fn handle(sources: &SourcePaths, settings: &Settings) -> Result<(), CliError> {
    let snapshot = util::load_snapshot(sources).await?;
    let summary = AlertSummary::from_views(&snapshot.merged());

    let out = output::render_single(settings.output, &summary, detail, |s| {
        s.categories
            .iter()
            .map(|c| format!("{}\t{}", c.category, c.devices))
            .collect::<Vec<_>>()
            .join("\n")
    });
    output::print_output(&out, settings.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tissuewatch_core::Snapshot;

    #[test]
    fn detail_lists_every_category() {
        let snap = Snapshot::from_values(
            json!([{"id": 1}, {"id": 2}]),
            json!(null),
            json!([{"device_id": 1, "battery_percentage": 0, "is_active": true}]),
        );
        let out = detail(&AlertSummary::from_views(&snap.merged()));

        assert!(out.starts_with(&format!("{:<26}2\n{:<26}1", "Devices:", "Active:")));
        assert!(out.contains(&format!("{:<26}1", "Battery off:")));
        assert_eq!(out.lines().count(), 8);
    }
}
