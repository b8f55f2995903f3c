// ── Alert categories ──
//
// One tagged variant per dashboard alert view. Each category selects a
// scoring rule (how urgent is this device) and a membership predicate
// (does it belong in this view); both live in `priority` and `filter`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Dashboard alert view.
///
/// `Low`, `Critical`, `BatteryPowerOff` and `AllBattery` are the sub-filters
/// of the low-battery screen and share its scoring rule. `PowerOff` is the
/// dedicated power-off screen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlertCategory {
    BatteryOff,
    Low,
    Critical,
    BatteryPowerOff,
    AllBattery,
    PowerOff,
}

/// Scoring rule table shared by one or more categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreRule {
    BatteryOff,
    BatteryFamily,
    PowerOff,
}

impl AlertCategory {
    pub fn rule(self) -> ScoreRule {
        match self {
            Self::BatteryOff => ScoreRule::BatteryOff,
            Self::Low | Self::Critical | Self::BatteryPowerOff | Self::AllBattery => {
                ScoreRule::BatteryFamily
            }
            Self::PowerOff => ScoreRule::PowerOff,
        }
    }

    /// Human title for headers.
    pub fn title(self) -> &'static str {
        match self {
            Self::BatteryOff => "Battery off",
            Self::Low => "Low battery",
            Self::Critical => "Critical battery",
            Self::BatteryPowerOff => "Unpowered (battery view)",
            Self::AllBattery => "All battery alerts",
            Self::PowerOff => "Power off",
        }
    }
}
