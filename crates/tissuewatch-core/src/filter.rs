// ── Category predicates and free-text search ──
//
// Applied after sorting; filtering never reorders.

use crate::category::AlertCategory;
use crate::model::MergedDeviceView;

/// Power-status spellings that mean "no power".
const POWER_OFF_VALUES: [&str; 6] = ["off", "no", "none", "", "0", "false"];

/// Statuses that veto the power-off screen even when power reads "off".
const LIVE_STATUSES: [&str; 3] = ["online", "normal", "active"];

/// Whether a power-status value means the device is unpowered.
///
/// An absent value counts as off. A device that never reported power is
/// indistinguishable from one that reported "off".
pub fn is_power_off(power_status: Option<&str>) -> bool {
    power_status.is_none_or(|raw| {
        let normalized = raw.trim().to_lowercase();
        POWER_OFF_VALUES.contains(&normalized.as_str())
    })
}

fn unpowered(v: &MergedDeviceView) -> bool {
    is_power_off(v.power_status.as_deref())
}

fn battery_in(v: &MergedDeviceView, above: f64, at_most: f64) -> bool {
    v.battery_percentage
        .is_some_and(|pct| pct > above && pct <= at_most)
}

fn reports_live(v: &MergedDeviceView) -> bool {
    let status = v.current_status.trim().to_lowercase();
    LIVE_STATUSES.contains(&status.as_str())
}

#[allow(clippy::float_cmp)]
fn battery_is_empty(v: &MergedDeviceView) -> bool {
    v.battery_percentage == Some(0.0)
}

impl AlertCategory {
    /// Whether `view` belongs in this category's alert view.
    pub fn matches(self, v: &MergedDeviceView) -> bool {
        match self {
            Self::BatteryOff => {
                v.has_battery_off_flag()
                    || battery_is_empty(v)
                    || v.status_is("battery_off")
                    || v.counts.battery_off_count > 0
            }
            Self::Low => !unpowered(v) && (v.has_low_flag() || battery_in(v, 10.0, 20.0)),
            Self::Critical => {
                !unpowered(v) && (v.has_critical_flag() || battery_in(v, 0.0, 10.0))
            }
            Self::BatteryPowerOff => unpowered(v),
            Self::AllBattery => {
                let battery_alert = v.has_low_flag()
                    || v.has_critical_flag()
                    || v.battery_percentage.is_some_and(|pct| pct <= 20.0);
                (!unpowered(v) && battery_alert) || unpowered(v)
            }
            Self::PowerOff => unpowered(v) && !reports_live(v),
        }
    }
}

// ── Search ─────────────────────────────────────────────────────────

/// A normalized free-text search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(Option<String>);

impl SearchQuery {
    /// Blank terms match everything.
    pub fn new(term: &str) -> Self {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            Self(None)
        } else {
            Self(Some(trimmed.to_lowercase()))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The lowercased term, empty when the query matches everything.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    pub fn matches(&self, view: &MergedDeviceView) -> bool {
        match &self.0 {
            None => true,
            Some(term) => searchable_text(view).to_lowercase().contains(term.as_str()),
        }
    }
}

/// Space-joined text a search term is matched against.
///
/// Includes synthesized `"room {room}"` and `"floor {floor}"` tokens so a
/// term like "floor 2" finds devices on floor 2.
pub fn searchable_text(v: &MergedDeviceView) -> String {
    let token = |label: &str, value: Option<&String>| {
        value
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .map(|raw| format!("{label} {raw}"))
    };
    let room_token = token("room", v.room.as_ref());
    let floor_token = token("floor", v.floor.as_ref());
    [
        Some(v.device_name.clone()),
        v.device_id.as_ref().map(ToString::to_string),
        v.room.clone(),
        v.floor.clone(),
        room_token,
        floor_token,
        v.battery_label(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Keep the views that belong to `category` and match `search`, in order.
pub fn filter(
    views: Vec<MergedDeviceView>,
    category: AlertCategory,
    search: &str,
) -> Vec<MergedDeviceView> {
    let query = SearchQuery::new(search);
    views
        .into_iter()
        .filter(|v| category.matches(v) && query.matches(v))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::view;
    use serde_json::json;

    #[test]
    fn power_off_normalization() {
        for off in [None, Some("off"), Some(" OFF "), Some("no"), Some("None"), Some(""), Some("0"), Some("false")] {
            assert!(is_power_off(off), "{off:?} should read as off");
        }
        for on in [Some("on"), Some("1"), Some("true"), Some("mains")] {
            assert!(!is_power_off(on), "{on:?} should read as on");
        }
    }

    #[test]
    fn fifteen_percent_is_low_only() {
        let v = view("d", json!({"battery_percentage": 15, "battery_low": 0, "power_status": "on"}), json!({}));
        assert!(AlertCategory::Low.matches(&v));
        assert!(!AlertCategory::Critical.matches(&v));
        assert!(!AlertCategory::BatteryPowerOff.matches(&v));
        assert!(AlertCategory::AllBattery.matches(&v));
    }

    #[test]
    fn low_and_critical_bounds() {
        let at = |pct: f64| view("d", json!({"battery_percentage": pct, "power_status": "on"}), json!({}));
        assert!(!AlertCategory::Low.matches(&at(10.0)));
        assert!(AlertCategory::Low.matches(&at(20.0)));
        assert!(!AlertCategory::Low.matches(&at(21.0)));
        assert!(AlertCategory::Critical.matches(&at(10.0)));
        assert!(!AlertCategory::Critical.matches(&at(0.0)));
    }

    #[test]
    fn unpowered_devices_leave_battery_views() {
        let v = view("d", json!({"battery_percentage": 5, "battery_critical": 1, "power_status": "off"}), json!({}));
        assert!(!AlertCategory::Critical.matches(&v));
        assert!(!AlertCategory::Low.matches(&v));
        assert!(AlertCategory::BatteryPowerOff.matches(&v));
        assert!(AlertCategory::AllBattery.matches(&v));
    }

    #[test]
    fn battery_off_predicate_branches() {
        assert!(AlertCategory::BatteryOff.matches(&view("d", json!({"battery_off": 1}), json!({}))));
        assert!(AlertCategory::BatteryOff.matches(&view("d", json!({"battery_percentage": 0}), json!({}))));
        assert!(AlertCategory::BatteryOff.matches(&view("d", json!({"current_status": "battery_off"}), json!({}))));
        assert!(AlertCategory::BatteryOff.matches(&view("d", json!({}), json!({"battery_off_count": 1}))));
        assert!(!AlertCategory::BatteryOff.matches(&view("d", json!({"battery_percentage": 1}), json!({}))));
    }

    #[test]
    fn online_status_vetoes_power_off_screen() {
        let v = view("d", json!({"power_status": null, "current_status": "online"}), json!({}));
        assert!(!AlertCategory::PowerOff.matches(&v));
        // the battery view's power-off filter has no veto
        assert!(AlertCategory::BatteryPowerOff.matches(&v));

        let v = view("d", json!({"power_status": null, "current_status": "offline"}), json!({}));
        assert!(AlertCategory::PowerOff.matches(&v));
    }

    #[test]
    fn live_status_veto_ignores_case_and_whitespace() {
        for live in ["Online", " online ", "ACTIVE", "Normal", "\tnormal\n"] {
            let v = view("d", json!({"power_status": null, "current_status": live}), json!({}));
            assert!(!AlertCategory::PowerOff.matches(&v), "{live:?} should veto");
        }
        let v = view("d", json!({"power_status": null, "current_status": " Offline "}), json!({}));
        assert!(AlertCategory::PowerOff.matches(&v));
    }

    #[test]
    fn blank_room_and_floor_add_no_tokens() {
        let mut v = view("d", json!({}), json!({}));
        v.room = Some(String::new());
        v.floor = Some("  ".into());
        let text = searchable_text(&v);
        assert!(!text.contains("room"), "{text:?}");
        assert!(!text.contains("floor"), "{text:?}");
        assert!(!SearchQuery::new("room").matches(&v));
    }

    #[test]
    fn search_matches_synthesized_floor_token() {
        let mut on_two = view("a", json!({}), json!({}));
        on_two.floor = Some("2".into());
        let mut on_three = view("b", json!({}), json!({}));
        on_three.floor = Some("3".into());

        let query = SearchQuery::new("Floor 2");
        assert!(query.matches(&on_two));
        assert!(!query.matches(&on_three));
    }

    #[test]
    fn search_covers_name_id_room_and_battery() {
        let mut v = view("disp-42", json!({"battery_percentage": 15}), json!({}));
        v.device_name = "West Restroom".into();
        v.room = Some("B12".into());

        assert!(SearchQuery::new("west").matches(&v));
        assert!(SearchQuery::new("disp-42").matches(&v));
        assert!(SearchQuery::new("room b12").matches(&v));
        assert!(SearchQuery::new("15%").matches(&v));
        assert!(!SearchQuery::new("east").matches(&v));
    }

    #[test]
    fn blank_search_matches_all() {
        let q = SearchQuery::new("   ");
        assert!(q.is_empty());
        assert!(q.matches(&view("x", json!({}), json!({}))));
    }

    #[test]
    fn filter_preserves_order() {
        let views = vec![
            view("c", json!({"battery_off": 1}), json!({})),
            view("skip", json!({}), json!({})),
            view("a", json!({"battery_off": 1}), json!({})),
        ];
        let kept = filter(views, AlertCategory::BatteryOff, "");
        let ids: Vec<String> = kept.iter().map(MergedDeviceView::id_label).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }
}
