// ── Reactive view store ──
//
// Holds the latest input collections and memoizes pipeline output per
// generation, with push-based change notification.

mod feed;

pub use feed::DeviceFeed;
