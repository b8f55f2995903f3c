// ── View pipeline ──
//
// raw collections -> merge -> sort by priority -> filter + search.
// Inputs are passed in explicitly; nothing here reads shared state.

use crate::category::AlertCategory;
use crate::error::CoreError;
use crate::filter::filter;
use crate::model::MergedDeviceView;
use crate::priority::sort_by_priority;
use crate::snapshot::Snapshot;

/// Build the ordered, filtered view list for one alert category.
pub fn build_views(
    snapshot: &Snapshot,
    category: AlertCategory,
    search: &str,
) -> Vec<MergedDeviceView> {
    let merged = snapshot.merged();
    let sorted = sort_by_priority(merged, category);
    filter(sorted, category, search)
}

/// Find one merged view by device identifier.
pub fn find_view<'a>(
    views: &'a [MergedDeviceView],
    identifier: &str,
) -> Result<&'a MergedDeviceView, CoreError> {
    let wanted = identifier.trim();
    views
        .iter()
        .find(|v| v.device_id.as_ref().is_some_and(|id| id.as_str() == wanted))
        .ok_or_else(|| CoreError::DeviceNotFound {
            identifier: identifier.into(),
        })
}
