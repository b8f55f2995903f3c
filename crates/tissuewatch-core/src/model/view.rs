// ── Merged per-device view model ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::entity_id::DeviceId;

/// Status reported when no source knows the device's state.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Priority reported when no realtime status carries one.
pub const UNKNOWN_PRIORITY: i64 = -1;

/// Aggregated alert counters, all defaulting to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub battery_off_count: i64,
    pub battery_low_count: i64,
    pub battery_critical_count: i64,
    pub power_off_count: i64,
    pub tamper_count: i64,
    pub low_alert_count: i64,
    pub total_entries: i64,
}

/// Denormalized record combining device, analytics and realtime status.
///
/// Derived on every input change and never mutated afterwards; consumers
/// treat it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedDeviceView {
    pub device_id: Option<DeviceId>,
    pub device_name: String,
    pub room: Option<String>,
    pub floor: Option<String>,

    pub is_active: bool,
    pub current_status: String,
    pub minutes_since_update: Option<f64>,
    pub status_priority: i64,
    pub battery_percentage: Option<f64>,
    pub power_status: Option<String>,
    pub current_alert: i64,
    pub current_tamper: i64,
    pub current_count: i64,

    pub battery_low: i64,
    pub battery_critical: i64,
    pub battery_off: i64,

    #[serde(flatten)]
    pub counts: AlertCounts,
    pub last_alert_time: Option<DateTime<Utc>>,
}

impl MergedDeviceView {
    pub fn has_low_flag(&self) -> bool {
        self.battery_low == 1
    }

    pub fn has_critical_flag(&self) -> bool {
        self.battery_critical == 1
    }

    pub fn has_battery_off_flag(&self) -> bool {
        self.battery_off == 1
    }

    pub fn status_is(&self, status: &str) -> bool {
        self.current_status == status
    }

    /// `"15%"`, or `None` when the battery level is unknown.
    pub fn battery_label(&self) -> Option<String> {
        self.battery_percentage.map(|pct| format!("{pct}%"))
    }

    /// Last alert as epoch milliseconds; a missing time sorts as epoch 0.
    pub fn last_alert_millis(&self) -> i64 {
        self.last_alert_time
            .map_or(0, |t| t.timestamp_millis())
    }

    /// Identifier as display text, empty when the record had none.
    pub fn id_label(&self) -> String {
        self.device_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
