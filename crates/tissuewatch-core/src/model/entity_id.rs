// ── Device identity ──
//
// The three upstream collections name their join key differently
// (`id`, `device_id`) and type it loosely (number or string). `DeviceId`
// normalizes both into one comparable string key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::lenient;

/// Canonical device identifier.
///
/// Numeric and string spellings of the same id compare equal:
/// `1`, `1.0` and `"1"` all become `DeviceId("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Build an id from raw text. Blank input yields `None`.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Decode an id from any JSON value. Only strings and numbers qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::new(s),
            Value::Number(n) => Self::new(lenient::number_to_string(n)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = InvalidDeviceId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or(InvalidDeviceId)
    }
}

impl From<u64> for DeviceId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Returned when parsing a blank identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("device identifier must not be blank")]
pub struct InvalidDeviceId;

// ── Identifier resolution ──────────────────────────────────────────

/// Records that can be joined on a device identifier.
pub trait Identified {
    /// The identifier candidates in priority order; the first present wins.
    fn id_candidates(&self) -> [Option<&DeviceId>; 2];

    fn identifier(&self) -> Option<&DeviceId> {
        resolve_id(self.id_candidates())
    }
}

/// Pick the first present identifier from an ordered list of candidates.
pub fn resolve_id<'a>(
    candidates: impl IntoIterator<Item = Option<&'a DeviceId>>,
) -> Option<&'a DeviceId> {
    candidates.into_iter().flatten().next()
}
