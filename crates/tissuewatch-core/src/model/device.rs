// ── Base device records ──

use serde::{Deserialize, Serialize};

use super::entity_id::{DeviceId, Identified};
use super::lenient;

/// A dispenser as registered in the device registry.
///
/// Static attributes plus the last-known live values the registry caches;
/// the latter sit at the bottom of the merge precedence chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<DeviceId>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub device_id: Option<DeviceId>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub floor: Option<String>,

    // Last-known values
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub current_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub battery_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub power_status: Option<String>,
}

impl Identified for DeviceRecord {
    fn id_candidates(&self) -> [Option<&DeviceId>; 2] {
        [self.id.as_ref(), self.device_id.as_ref()]
    }
}
