// ── Priority scoring and ordering ──
//
// Each category's rule table maps a merged view to an urgency tier
// (100 / 80 / 60 / 40 / 0). Views sort by descending tier with a
// rule-specific tie-break; the sort is stable.

use std::cmp::{Ordering, Reverse};

use serde::Serialize;

use crate::category::{AlertCategory, ScoreRule};
use crate::model::MergedDeviceView;

pub const TIER_URGENT: i32 = 100;
pub const TIER_HIGH: i32 = 80;
pub const TIER_ELEVATED: i32 = 60;
pub const TIER_WATCH: i32 = 40;
pub const TIER_NORMAL: i32 = 0;

/// Battery level assumed when unknown, for ordering only.
const BATTERY_UNKNOWN_SORTS_AS: f64 = 100.0;

/// Display classification of a priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, strum::Display)]
pub enum PriorityTier {
    Normal,
    Watch,
    Elevated,
    High,
    Urgent,
}

impl PriorityTier {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= TIER_URGENT => Self::Urgent,
            s if s >= TIER_HIGH => Self::High,
            s if s >= TIER_ELEVATED => Self::Elevated,
            s if s >= TIER_WATCH => Self::Watch,
            _ => Self::Normal,
        }
    }
}

fn power_status_is_off(view: &MergedDeviceView) -> bool {
    view.power_status
        .as_deref()
        .is_some_and(|p| p.eq_ignore_ascii_case("off"))
}

#[allow(clippy::float_cmp)]
fn score_battery_off(v: &MergedDeviceView) -> i32 {
    if v.battery_percentage == Some(0.0) || v.status_is("battery_off") {
        TIER_URGENT
    } else if v.counts.battery_off_count > 0 {
        TIER_HIGH
    } else {
        TIER_NORMAL
    }
}

fn score_battery_family(v: &MergedDeviceView) -> i32 {
    if v.has_critical_flag() || v.counts.battery_critical_count > 0 {
        TIER_URGENT
    } else if v.has_low_flag() || v.counts.battery_low_count > 0 {
        TIER_HIGH
    } else if power_status_is_off(v) || v.counts.power_off_count > 0 {
        TIER_ELEVATED
    } else if v.battery_percentage.is_some_and(|pct| pct <= 20.0) {
        TIER_WATCH
    } else {
        TIER_NORMAL
    }
}

fn score_power_off(v: &MergedDeviceView) -> i32 {
    if power_status_is_off(v) || v.status_is("power_off") {
        TIER_URGENT
    } else if v.status_is("offline") || v.status_is("disconnected") {
        TIER_HIGH
    } else if v.status_is("inactive") {
        TIER_ELEVATED
    } else if v.counts.power_off_count > 0 {
        TIER_WATCH
    } else {
        TIER_NORMAL
    }
}

/// Urgency score of `view` within `category`.
pub fn score_for(category: AlertCategory, view: &MergedDeviceView) -> i32 {
    match category.rule() {
        ScoreRule::BatteryOff => score_battery_off(view),
        ScoreRule::BatteryFamily => score_battery_family(view),
        ScoreRule::PowerOff => score_power_off(view),
    }
}

/// Tie-break between two views of equal score.
fn tie_break(rule: ScoreRule, a: &MergedDeviceView, b: &MergedDeviceView) -> Ordering {
    match rule {
        // Most recent alert first
        ScoreRule::BatteryOff => Reverse(a.last_alert_millis()).cmp(&Reverse(b.last_alert_millis())),
        // Emptiest battery first, then the freshest report
        ScoreRule::BatteryFamily | ScoreRule::PowerOff => {
            let battery = |v: &MergedDeviceView| v.battery_percentage.unwrap_or(BATTERY_UNKNOWN_SORTS_AS);
            let minutes = |v: &MergedDeviceView| v.minutes_since_update.unwrap_or(0.0);
            battery(a)
                .total_cmp(&battery(b))
                .then_with(|| minutes(a).total_cmp(&minutes(b)))
        }
    }
}

/// Order views by descending priority within `category`.
///
/// Stable: views equal in score and tie-break keep their input order.
pub fn sort_by_priority(
    views: Vec<MergedDeviceView>,
    category: AlertCategory,
) -> Vec<MergedDeviceView> {
    let rule = category.rule();
    let mut scored: Vec<(i32, MergedDeviceView)> = views
        .into_iter()
        .map(|v| (score_for(category, &v), v))
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| tie_break(rule, a, b)));
    scored.into_iter().map(|(_, v)| v).collect()
}
