// ── Three-way device merge ──
//
// Joins base device records, analytics aggregates and realtime status by
// device identifier. Every field resolves through a nullish chain:
// realtime status, then analytics, then the base device, then a default.
// A present `false` or `0` wins; only absence falls through.

use std::collections::HashMap;

use crate::model::{
    AlertCounts, AnalyticsRecord, DeviceId, DeviceRecord, Identified, MergedDeviceView,
    RealtimeStatusRecord, UNKNOWN_PRIORITY, UNKNOWN_STATUS,
};

/// Name shown for a device no source could name.
pub const UNNAMED_DEVICE: &str = "Unknown device";

/// Index records by their resolved identifier. Later duplicates replace
/// earlier ones; records without an identifier are left out.
fn index_by_id<T: Identified>(records: &[T]) -> HashMap<&DeviceId, &T> {
    records
        .iter()
        .filter_map(|r| r.identifier().map(|id| (id, r)))
        .collect()
}

/// Merge the three collections into one view per device, in device order.
///
/// Analytics and status entries whose identifier matches no device are
/// dropped.
pub fn merge(
    devices: &[DeviceRecord],
    analytics: &[AnalyticsRecord],
    status: &[RealtimeStatusRecord],
) -> Vec<MergedDeviceView> {
    let analytics_by_id = index_by_id(analytics);
    let status_by_id = index_by_id(status);

    let empty_analytics = AnalyticsRecord::default();
    let empty_status = RealtimeStatusRecord::default();

    let views: Vec<MergedDeviceView> = devices
        .iter()
        .map(|device| {
            let id = device.identifier();
            let a = id
                .and_then(|id| analytics_by_id.get(id).copied())
                .unwrap_or(&empty_analytics);
            let s = id
                .and_then(|id| status_by_id.get(id).copied())
                .unwrap_or(&empty_status);
            merge_one(device, a, s)
        })
        .collect();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let known: std::collections::HashSet<&DeviceId> =
            devices.iter().filter_map(Identified::identifier).collect();
        let orphaned_analytics = analytics_by_id.keys().filter(|id| !known.contains(*id)).count();
        let orphaned_status = status_by_id.keys().filter(|id| !known.contains(*id)).count();
        tracing::debug!(
            devices = views.len(),
            analytics = analytics.len(),
            status = status.len(),
            orphaned_analytics,
            orphaned_status,
            "merged device views"
        );
    }

    views
}

fn merge_one(
    device: &DeviceRecord,
    a: &AnalyticsRecord,
    s: &RealtimeStatusRecord,
) -> MergedDeviceView {
    let device_id = device.identifier().cloned();

    let device_name = device
        .name
        .clone()
        .or_else(|| a.device_name.clone())
        .or_else(|| device_id.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| UNNAMED_DEVICE.into());

    MergedDeviceView {
        device_name,
        room: device.room.clone(),
        floor: device.floor.clone(),

        is_active: s.is_active.or(a.is_active).or(device.is_active).unwrap_or(false),
        current_status: s
            .current_status
            .clone()
            .or_else(|| a.current_status.clone())
            .or_else(|| device.current_status.clone())
            .unwrap_or_else(|| UNKNOWN_STATUS.into()),
        minutes_since_update: s.minutes_since_update,
        status_priority: s.status_priority.unwrap_or(UNKNOWN_PRIORITY),
        battery_percentage: s.battery_percentage.or(device.battery_percentage),
        power_status: s
            .power_status
            .clone()
            .or_else(|| device.power_status.clone()),
        current_alert: s.current_alert.unwrap_or(0),
        current_tamper: s.current_tamper.unwrap_or(0),
        current_count: s.current_count.unwrap_or(0),

        battery_low: s.battery_low.unwrap_or(0),
        battery_critical: s.battery_critical.unwrap_or(0),
        battery_off: s.battery_off.unwrap_or(0),

        counts: AlertCounts {
            battery_off_count: a.battery_off_count.unwrap_or(0),
            battery_low_count: a.battery_low_count.unwrap_or(0),
            battery_critical_count: a.battery_critical_count.unwrap_or(0),
            power_off_count: a.power_off_count.unwrap_or(0),
            tamper_count: a.tamper_count.unwrap_or(0),
            low_alert_count: a.low_alert_count.unwrap_or(0),
            total_entries: a.total_entries.unwrap_or(0),
        },
        last_alert_time: a.last_alert_time,

        device_id,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{analytics, device, status};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn every_device_yields_one_view() {
        let devices = vec![device(json!({"id": 1})), device(json!({"id": 2})), device(json!({}))];
        let views = merge(&devices, &[], &[]);
        assert_eq!(views.len(), 3);
    }

    #[test]
    fn unmatched_device_gets_defaults() {
        let views = merge(&[device(json!({"id": "d1", "name": "Lobby"}))], &[], &[]);
        let v = &views[0];
        assert_eq!(v.counts, AlertCounts::default());
        assert_eq!(v.current_status, "unknown");
        assert_eq!(v.status_priority, -1);
        assert!(!v.is_active);
        assert_eq!(v.battery_percentage, None);
    }

    #[test]
    fn output_preserves_device_order() {
        let devices = vec![
            device(json!({"id": "c"})),
            device(json!({"id": "a"})),
            device(json!({"id": "b"})),
        ];
        let ids: Vec<String> = merge(&devices, &[], &[]).iter().map(MergedDeviceView::id_label).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn status_wins_over_analytics_over_device() {
        let devices = vec![device(json!({"id": 1, "current_status": "from-device", "is_active": true}))];
        let a = vec![analytics(json!({"device_id": 1, "current_status": "from-analytics", "is_active": true}))];
        let s = vec![status(json!({"device_id": 1, "current_status": "from-status", "is_active": false}))];

        let v = &merge(&devices, &a, &s)[0];
        assert_eq!(v.current_status, "from-status");
        // a present `false` must not fall through
        assert!(!v.is_active);
    }

    #[test]
    fn absent_status_field_falls_through() {
        let devices = vec![device(json!({"id": 1, "current_status": "from-device"}))];
        let a = vec![analytics(json!({"device_id": 1, "current_status": "from-analytics"}))];
        let s = vec![status(json!({"device_id": 1, "current_status": null}))];
        assert_eq!(merge(&devices, &a, &s)[0].current_status, "from-analytics");

        let a = vec![analytics(json!({"device_id": 1}))];
        assert_eq!(merge(&devices, &a, &s)[0].current_status, "from-device");
    }

    #[test]
    fn analytics_keyed_by_id_when_device_id_missing() {
        let devices = vec![device(json!({"id": 7}))];
        let a = vec![analytics(json!({"id": "7", "power_off_count": 3}))];
        assert_eq!(merge(&devices, &a, &[])[0].counts.power_off_count, 3);
    }

    #[test]
    fn orphans_are_dropped() {
        let devices = vec![device(json!({"id": 1}))];
        let a = vec![analytics(json!({"device_id": 99, "tamper_count": 5}))];
        let s = vec![status(json!({"device_id": 98, "battery_percentage": 3}))];
        let views = merge(&devices, &a, &s);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].counts.tamper_count, 0);
        assert_eq!(views[0].battery_percentage, None);
    }

    #[test]
    fn records_without_identifier_never_match() {
        let devices = vec![device(json!({"name": "ghost"}))];
        let s = vec![status(json!({"battery_percentage": 50}))];
        let v = &merge(&devices, &[], &s)[0];
        assert_eq!(v.device_id, None);
        assert_eq!(v.battery_percentage, None);
        assert_eq!(v.device_name, "ghost");
    }

    #[test]
    fn name_falls_back_to_analytics_then_id() {
        let devices = vec![device(json!({"id": 4})), device(json!({"id": 5}))];
        let a = vec![analytics(json!({"device_id": 4, "device_name": "Atrium"}))];
        let views = merge(&devices, &a, &[]);
        assert_eq!(views[0].device_name, "Atrium");
        assert_eq!(views[1].device_name, "5");
    }

    #[test]
    fn battery_zero_from_status_is_kept() {
        let devices = vec![device(json!({"id": 1, "name": "A"}))];
        let s = vec![status(json!({"device_id": 1, "battery_percentage": 0}))];
        let v = &merge(&devices, &[], &s)[0];
        assert_eq!(v.battery_percentage, Some(0.0));
        assert_eq!(v.current_status, "unknown");
    }

    #[test]
    fn merge_is_deterministic() {
        let devices = vec![device(json!({"id": 1})), device(json!({"id": 2}))];
        let s = vec![status(json!({"device_id": 2, "battery_percentage": 12}))];
        assert_eq!(merge(&devices, &[], &s), merge(&devices, &[], &s));
    }
}
