// ── Analytics aggregates ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::{DeviceId, Identified};
use super::lenient;

/// Periodically aggregated counters for one device.
///
/// Keyed by `device_id` when present, else `id`. The status and activity
/// fields are derived by the aggregation service and only used as
/// fallbacks when no realtime status exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub device_id: Option<DeviceId>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<DeviceId>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub device_name: Option<String>,

    // Counters
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub battery_off_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub battery_low_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub battery_critical_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub power_off_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub tamper_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub low_alert_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub total_entries: Option<i64>,

    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub last_alert_time: Option<DateTime<Utc>>,

    // Derived fallbacks
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub current_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_active: Option<bool>,
}

impl Identified for AnalyticsRecord {
    fn id_candidates(&self) -> [Option<&DeviceId>; 2] {
        [self.device_id.as_ref(), self.id.as_ref()]
    }
}
