// ── Input snapshots ──
//
// The three collections as last fetched, decoded leniently: anything that
// is not a JSON array is an empty collection, and any element that is not
// an object decodes as an all-absent record.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;
use crate::merge::merge;
use crate::model::{AnalyticsRecord, DeviceRecord, MergedDeviceView, RealtimeStatusRecord};

/// One consistent set of the three input collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub devices: Vec<DeviceRecord>,
    pub analytics: Vec<AnalyticsRecord>,
    pub status: Vec<RealtimeStatusRecord>,
}

impl Snapshot {
    pub fn new(
        devices: Vec<DeviceRecord>,
        analytics: Vec<AnalyticsRecord>,
        status: Vec<RealtimeStatusRecord>,
    ) -> Self {
        Self {
            devices,
            analytics,
            status,
        }
    }

    /// Decode all three collections from already-parsed JSON.
    pub fn from_values(devices: Value, analytics: Value, status: Value) -> Self {
        Self {
            devices: records_from_value(devices),
            analytics: records_from_value(analytics),
            status: records_from_value(status),
        }
    }

    /// Merge into one view per device, in device order.
    pub fn merged(&self) -> Vec<MergedDeviceView> {
        merge(&self.devices, &self.analytics, &self.status)
    }
}

/// Decode a collection from JSON, coercing every malformed shape.
pub fn records_from_value<T>(value: Value) -> Vec<T>
where
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::debug!("snapshot payload is not an array; treating as empty");
        }
        return Vec::new();
    };

    items
        .into_iter()
        .map(|item| {
            if !item.is_object() {
                return T::default();
            }
            serde_json::from_value(item).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "undecodable record; using empty record");
                T::default()
            })
        })
        .collect()
}

/// Parse JSON text and decode a collection from it.
///
/// Blank text is an empty collection. Only malformed JSON syntax fails.
pub fn records_from_str<T>(source_name: &str, raw: &str) -> Result<Vec<T>, CoreError>
where
    T: DeserializeOwned + Default,
{
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(raw).map_err(|err| CoreError::Decode {
        source_name: source_name.into(),
        message: err.to_string(),
    })?;
    Ok(records_from_value(value))
}
