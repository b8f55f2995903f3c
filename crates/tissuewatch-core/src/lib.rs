//! Device view-model pipeline for the tissuewatch dispenser dashboard.
//!
//! Turns three independently fetched collections into the ordered alert
//! lists the dashboard renders:
//!
//! - **[`merge()`]** joins base [`DeviceRecord`]s, [`AnalyticsRecord`]s and
//!   [`RealtimeStatusRecord`]s by device identifier into one
//!   [`MergedDeviceView`] per device. Realtime status wins over analytics,
//!   which wins over the base record, field by field.
//!
//! - **[`sort_by_priority()`]** scores each view for an [`AlertCategory`]
//!   (tiers 100/80/60/40/0) and orders by descending urgency with a
//!   category-specific tie-break.
//!
//! - **[`filter()`]** keeps the views that belong to the category and match
//!   an optional free-text search.
//!
//! - **[`DeviceFeed`]** holds the latest inputs for long-running consumers,
//!   memoizes pipeline output per generation and notifies subscribers when
//!   any collection changes.
//!
//! Everything except decoding raw text is infallible: malformed inputs
//! degrade to defaulted fields rather than errors.

pub mod category;
pub mod error;
pub mod filter;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod priority;
pub mod snapshot;
pub mod store;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use category::{AlertCategory, ScoreRule};
pub use error::CoreError;
pub use filter::{SearchQuery, filter, is_power_off, searchable_text};
pub use merge::merge;
pub use pipeline::{build_views, find_view};
pub use priority::{PriorityTier, score_for, sort_by_priority};
pub use snapshot::{Snapshot, records_from_str, records_from_value};
pub use store::DeviceFeed;
pub use summary::{AlertSummary, CategoryCount};

pub use model::{
    AlertCounts, AnalyticsRecord, DeviceId, DeviceRecord, MergedDeviceView,
    RealtimeStatusRecord,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::needless_pass_by_value)]
pub(crate) mod testing {
    use serde_json::Value;

    use crate::merge::merge;
    use crate::model::{AnalyticsRecord, DeviceRecord, MergedDeviceView, RealtimeStatusRecord};

    pub(crate) fn device(json: Value) -> DeviceRecord {
        serde_json::from_value(json).unwrap()
    }

    pub(crate) fn analytics(json: Value) -> AnalyticsRecord {
        serde_json::from_value(json).unwrap()
    }

    pub(crate) fn status(json: Value) -> RealtimeStatusRecord {
        serde_json::from_value(json).unwrap()
    }

    /// Merge one device named and keyed `id` with the given status and
    /// analytics fields.
    pub(crate) fn view(id: &str, status_fields: Value, analytics_fields: Value) -> MergedDeviceView {
        let with_id = |fields: Value| {
            let mut obj = fields.as_object().cloned().unwrap_or_default();
            obj.insert("device_id".into(), Value::String(id.into()));
            Value::Object(obj)
        };
        let d = device(serde_json::json!({"id": id, "name": id}));
        let s = status(with_id(status_fields));
        let a = analytics(with_id(analytics_fields));
        merge(&[d], &[a], &[s]).remove(0)
    }
}
