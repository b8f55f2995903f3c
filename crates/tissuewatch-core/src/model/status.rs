// ── Realtime status snapshots ──

use serde::{Deserialize, Serialize};

use super::entity_id::{DeviceId, Identified};
use super::lenient;

/// Latest live telemetry for one device, keyed by `device_id`.
///
/// The most authoritative source for every "current" field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeStatusRecord {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub device_id: Option<DeviceId>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub current_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub minutes_since_update: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub status_priority: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub battery_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub power_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub current_alert: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub current_tamper: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub current_count: Option<i64>,

    // Live alert flags (1 = raised)
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub battery_low: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub battery_critical: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub battery_off: Option<i64>,
}

impl Identified for RealtimeStatusRecord {
    fn id_candidates(&self) -> [Option<&DeviceId>; 2] {
        [self.device_id.as_ref(), None]
    }
}
