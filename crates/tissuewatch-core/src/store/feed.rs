// ── Device feed ──
//
// Lock-free holder of the three input collections. Writers replace whole
// collections; every replacement bumps a generation number published over
// a `watch` channel. Pipeline output is memoized per (generation, category,
// search) so unrelated re-renders reuse the previous result.

use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use tokio::sync::watch;

use crate::category::AlertCategory;
use crate::filter::SearchQuery;
use crate::model::{AnalyticsRecord, DeviceRecord, MergedDeviceView, RealtimeStatusRecord};
use crate::pipeline::build_views;
use crate::snapshot::Snapshot;

/// Inputs tagged with the generation that produced them.
struct Generation {
    number: u64,
    snapshot: Arc<Snapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ViewKey {
    generation: u64,
    category: AlertCategory,
    search: SearchQuery,
}

/// Shared, memoizing source of merged device views.
pub struct DeviceFeed {
    current: ArcSwap<Generation>,
    generation: watch::Sender<u64>,
    views: DashMap<ViewKey, Arc<Vec<MergedDeviceView>>>,
}

impl Default for DeviceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceFeed {
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let (generation, _) = watch::channel(0u64);
        Self {
            current: ArcSwap::from_pointee(Generation {
                number: 0,
                snapshot: Arc::new(snapshot),
            }),
            generation,
            views: DashMap::new(),
        }
    }

    /// The current inputs (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.load().snapshot)
    }

    /// Current generation number; starts at 0.
    pub fn generation(&self) -> u64 {
        self.current.load().number
    }

    /// Subscribe to generation changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    /// Replace all three collections. Returns `false` (and publishes
    /// nothing) when `snapshot` equals the current inputs.
    pub fn apply(&self, snapshot: Snapshot) -> bool {
        if *self.current.load().snapshot == snapshot {
            return false;
        }
        let snapshot = Arc::new(snapshot);
        self.swap(|_| Arc::clone(&snapshot));
        true
    }

    pub fn replace_devices(&self, devices: Vec<DeviceRecord>) {
        self.swap(|cur| {
            Arc::new(Snapshot {
                devices: devices.clone(),
                ..cur.clone()
            })
        });
    }

    pub fn replace_analytics(&self, analytics: Vec<AnalyticsRecord>) {
        self.swap(|cur| {
            Arc::new(Snapshot {
                analytics: analytics.clone(),
                ..cur.clone()
            })
        });
    }

    pub fn replace_status(&self, status: Vec<RealtimeStatusRecord>) {
        self.swap(|cur| {
            Arc::new(Snapshot {
                status: status.clone(),
                ..cur.clone()
            })
        });
    }

    /// Ordered, filtered views for `category`, memoized per generation.
    pub fn views(&self, category: AlertCategory, search: &str) -> Arc<Vec<MergedDeviceView>> {
        let current = self.current.load_full();
        let key = ViewKey {
            generation: current.number,
            category,
            search: SearchQuery::new(search),
        };

        if let Some(hit) = self.views.get(&key) {
            tracing::trace!(generation = key.generation, %category, "view cache hit");
            return Arc::clone(hit.value());
        }

        let built = Arc::new(build_views(&current.snapshot, category, key.search.as_str()));
        self.cache(key, &built);
        built
    }

    /// Memoize `views` under `key` unless a writer has moved past its
    /// generation. A swap landing between insert and the re-check has
    /// already run its eviction, so the stale entry is removed here.
    fn cache(&self, key: ViewKey, views: &Arc<Vec<MergedDeviceView>>) {
        if self.generation() != key.generation {
            return;
        }
        let generation = key.generation;
        self.views.insert(key.clone(), Arc::clone(views));
        if self.generation() != generation {
            self.views.remove(&key);
        }
    }

    /// Install a new snapshot derived from the current one, publish the new
    /// generation, and evict memoized views of older generations.
    fn swap(&self, derive: impl Fn(&Snapshot) -> Arc<Snapshot>) {
        let previous = self.current.rcu(|cur| Generation {
            number: cur.number + 1,
            snapshot: derive(&cur.snapshot),
        });
        let number = previous.number + 1;

        self.views.retain(|k, _| k.generation >= number);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.generation.send_modify(|g| *g = (*g).max(number));
        tracing::debug!(generation = number, "device feed updated");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{device, status};
    use serde_json::json;

    fn feed() -> DeviceFeed {
        DeviceFeed::with_snapshot(Snapshot::new(
            vec![device(json!({"id": 1, "name": "A"})), device(json!({"id": 2, "name": "B"}))],
            Vec::new(),
            vec![status(json!({"device_id": 2, "battery_percentage": 0}))],
        ))
    }

    #[test]
    fn views_are_memoized_within_a_generation() {
        let feed = feed();
        let first = feed.views(AlertCategory::BatteryOff, "");
        let second = feed.views(AlertCategory::BatteryOff, "  ");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn replacing_a_collection_invalidates_views() {
        let feed = feed();
        let before = feed.views(AlertCategory::BatteryOff, "");

        feed.replace_status(vec![
            status(json!({"device_id": 1, "battery_percentage": 0})),
            status(json!({"device_id": 2, "battery_percentage": 0})),
        ]);

        let after = feed.views(AlertCategory::BatteryOff, "");
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
        assert_eq!(feed.generation(), 1);
    }

    #[test]
    fn replace_keeps_other_collections() {
        let feed = feed();
        feed.replace_devices(vec![device(json!({"id": 2, "name": "B2"}))]);
        let snap = feed.snapshot();
        assert_eq!(snap.devices.len(), 1);
        assert_eq!(snap.status.len(), 1);
    }

    #[test]
    fn subscribers_see_new_generations() {
        let feed = feed();
        let mut rx = feed.subscribe();
        assert!(!rx.has_changed().unwrap());

        feed.replace_analytics(Vec::new());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[test]
    fn stale_generation_views_are_not_cached() {
        let feed = feed();
        let stale = ViewKey {
            generation: feed.generation(),
            category: AlertCategory::BatteryOff,
            search: SearchQuery::default(),
        };
        let built = feed.views(AlertCategory::BatteryOff, "");
        feed.replace_analytics(Vec::new());

        feed.cache(stale.clone(), &built);
        assert!(!feed.views.contains_key(&stale));
        assert!(feed.views.is_empty());
    }

    #[test]
    fn apply_ignores_identical_snapshots() {
        let feed = feed();
        let same = (*feed.snapshot()).clone();
        assert!(!feed.apply(same));
        assert_eq!(feed.generation(), 0);

        assert!(feed.apply(Snapshot::default()));
        assert_eq!(feed.generation(), 1);
        assert!(feed.views(AlertCategory::AllBattery, "").is_empty());
    }
}
