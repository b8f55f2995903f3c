// ── Alert summary ──
//
// Per-category membership counts for the dashboard's summary cards.

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::category::AlertCategory;
use crate::model::MergedDeviceView;

/// Count of devices in one alert category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: AlertCategory,
    pub devices: usize,
}

/// Fleet-wide alert counts over one set of merged views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub active: usize,
    pub categories: Vec<CategoryCount>,
}

impl AlertSummary {
    pub fn from_views(views: &[MergedDeviceView]) -> Self {
        let categories = AlertCategory::iter()
            .map(|category| CategoryCount {
                category,
                devices: views.iter().filter(|v| category.matches(v)).count(),
            })
            .collect();

        Self {
            total: views.len(),
            active: views.iter().filter(|v| v.is_active).count(),
            categories,
        }
    }

    /// Devices counted under `category`.
    pub fn count(&self, category: AlertCategory) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use serde_json::json;

    #[test]
    fn counts_each_category() {
        let snap = Snapshot::from_values(
            json!([{"id": 1}, {"id": 2}, {"id": 3}]),
            json!([{"device_id": 3, "battery_off_count": 1}]),
            json!([
                {"device_id": 1, "battery_percentage": 15, "power_status": "on", "is_active": true},
                {"device_id": 2, "battery_percentage": 5, "power_status": "on", "is_active": true},
                {"device_id": 3, "current_status": "offline"},
            ]),
        );
        let summary = AlertSummary::from_views(&snap.merged());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.count(AlertCategory::Low), 1);
        assert_eq!(summary.count(AlertCategory::Critical), 1);
        assert_eq!(summary.count(AlertCategory::BatteryOff), 1);
        // device 3 has no power status reported, so it reads as unpowered
        assert_eq!(summary.count(AlertCategory::BatteryPowerOff), 1);
        assert_eq!(summary.count(AlertCategory::PowerOff), 1);
        assert_eq!(summary.count(AlertCategory::AllBattery), 3);
    }

    #[test]
    fn empty_fleet() {
        let summary = AlertSummary::from_views(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.categories.iter().all(|c| c.devices == 0));
    }
}
