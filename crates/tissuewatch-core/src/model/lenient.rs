// ── Lenient field decoding ──
//
// The device registry, analytics and live-status services all emit loosely
// typed JSON: numbers as strings, flags as booleans or 0/1, identifiers as
// either. Every helper here maps an arbitrary JSON value to the strong type
// or `None`; none of them ever fails deserialization.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::entity_id::DeviceId;

// ── Value conversions ──────────────────────────────────────────────

/// Text field. Scalars are stringified; `null`, arrays and objects are absent.
pub(crate) fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Floating-point field. Numeric strings are parsed; blanks are absent.
pub(crate) fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
        _ => None,
    }
}

/// Integer field (counters, flags, priorities). Booleans map to 1 / 0.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub(crate) fn integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(_) => number(v).map(|f| f as i64),
        _ => None,
    }
}

/// Boolean field. Numbers are truthy when non-zero.
pub(crate) fn boolean(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Timestamp field: RFC 3339, naive ISO (taken as UTC) or epoch milliseconds.
pub(crate) fn timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| integer(v))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_datetime(s.trim()),
        _ => None,
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Render a JSON number without a trailing `.0` for integral floats.
#[allow(
    clippy::cast_possible_truncation,
    clippy::as_conversions,
    clippy::float_cmp
)]
pub(crate) fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 9.0e15 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

// ── serde adapters ─────────────────────────────────────────────────
//
// Used as `#[serde(default, deserialize_with = "...")]`. A missing key never
// reaches these; an explicit `null` arrives as `None`.

pub(crate) fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(text))
}

pub(crate) fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(number))
}

pub(crate) fn opt_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(integer))
}

pub(crate) fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(boolean))
}

pub(crate) fn opt_timestamp<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(timestamp))
}

pub(crate) fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DeviceId>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(DeviceId::from_value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_stringifies_scalars() {
        assert_eq!(text(&json!("Lobby")), Some("Lobby".into()));
        assert_eq!(text(&json!(2)), Some("2".into()));
        assert_eq!(text(&json!(false)), Some("false".into()));
        assert_eq!(text(&json!(null)), None);
        assert_eq!(text(&json!({"a": 1})), None);
    }

    #[test]
    fn number_parses_numeric_strings() {
        assert_eq!(number(&json!(15)), Some(15.0));
        assert_eq!(number(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(number(&json!("")), None);
        assert_eq!(number(&json!("n/a")), None);
        assert_eq!(number(&json!(true)), None);
    }

    #[test]
    fn integer_accepts_bools_and_floats() {
        assert_eq!(integer(&json!(true)), Some(1));
        assert_eq!(integer(&json!(3.0)), Some(3));
        assert_eq!(integer(&json!("4")), Some(4));
        assert_eq!(integer(&json!([1])), None);
    }

    #[test]
    fn boolean_handles_truthy_numbers() {
        assert_eq!(boolean(&json!(1)), Some(true));
        assert_eq!(boolean(&json!(0)), Some(false));
        assert_eq!(boolean(&json!("TRUE")), Some(true));
        assert_eq!(boolean(&json!("maybe")), None);
    }

    #[test]
    fn timestamp_accepts_common_shapes() {
        let rfc = timestamp(&json!("2024-03-01T10:00:00Z")).unwrap();
        let naive = timestamp(&json!("2024-03-01 10:00:00")).unwrap();
        let millis = timestamp(&json!(1_709_287_200_000_i64)).unwrap();
        assert_eq!(rfc, naive);
        assert_eq!(rfc, millis);
        assert!(timestamp(&json!("yesterday")).is_none());
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        let n = serde_json::Number::from_f64(7.0).unwrap();
        assert_eq!(number_to_string(&n), "7");
        let n = serde_json::Number::from_f64(7.5).unwrap();
        assert_eq!(number_to_string(&n), "7.5");
    }
}
