// ── Domain model ──
//
// The three upstream record shapes and the merged view built from them.
// Input records decode leniently from whatever JSON the services emit;
// every field is optional so a partial record never fails to load.

pub mod analytics;
pub mod device;
pub mod entity_id;
pub(crate) mod lenient;
pub mod status;
pub mod view;

// ── Re-exports ──────────────────────────────────────────────────────

pub use analytics::AnalyticsRecord;
pub use device::DeviceRecord;
pub use entity_id::{DeviceId, Identified, InvalidDeviceId, resolve_id};
pub use status::RealtimeStatusRecord;
pub use view::{AlertCounts, MergedDeviceView, UNKNOWN_PRIORITY, UNKNOWN_STATUS};
