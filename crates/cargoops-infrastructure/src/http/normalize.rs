// ============================================================================
// CargoOps Infrastructure - Payload Normalization
// File: crates/cargoops-infrastructure/src/http/normalize.rs
// Description: Loosely typed wire fields into domain values
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use cargoops_core::{BinMap, PickTask};

/// Non-negative whole quantity from a number or numeric string.
pub fn quantity(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(int) = n.as_u64() {
                return u32::try_from(int).ok();
            }
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32)
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(|f| quantity(&Value::from(f))))
        }
        _ => None,
    }
}

/// Bin map from an object, a JSON-in-string, or null/absent.
///
/// An unparseable value yields an empty map and a warning.
pub fn bin_map(value: &Value, field: &str, record_id: &str) -> BinMap {
    match value {
        Value::Null => BinMap::new(),
        Value::Object(entries) => {
            let mut map = BinMap::new();
            for (bin, qty) in entries {
                match quantity(qty) {
                    Some(q) => {
                        map.insert(bin.clone(), q);
                    }
                    None => warn!(record_id, field, bin = %bin, "Dropping bin entry with invalid quantity"),
                }
            }
            map
        }
        Value::String(raw) if raw.trim().is_empty() => BinMap::new(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(inner @ (Value::Object(_) | Value::Null)) => bin_map(&inner, field, record_id),
            Ok(_) | Err(_) => {
                warn!(record_id, field, "Unparseable bin map, defaulting to empty");
                BinMap::new()
            }
        },
        _ => {
            warn!(record_id, field, "Unexpected bin map type, defaulting to empty");
            BinMap::new()
        }
    }
}

/// Pick tasks from an array, a single object, or a single-quoted string.
pub fn pick_tasks(value: &Value, record_id: &str) -> Vec<PickTask> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(|item| pick_task(item, record_id)).collect(),
        Value::Object(_) => pick_task(value, record_id).into_iter().collect(),
        Value::String(raw) if raw.trim().is_empty() => Vec::new(),
        Value::String(raw) => match serde_json::from_str::<Value>(&raw.replace('\'', "\"")) {
            Ok(inner @ (Value::Array(_) | Value::Object(_))) => pick_tasks(&inner, record_id),
            Ok(_) | Err(_) => {
                warn!(record_id, "Unparseable pick_task, defaulting to empty");
                Vec::new()
            }
        },
        _ => {
            warn!(record_id, "Unexpected pick_task type, defaulting to empty");
            Vec::new()
        }
    }
}

fn pick_task(value: &Value, record_id: &str) -> Option<PickTask> {
    let text = |key: &str| value.get(key).map(value_text).filter(|s| !s.is_empty());

    let task = (|| {
        Some(PickTask {
            bin_id: text("bin_id")?,
            product_id: text("product_id").or_else(|| text("product_Id"))?,
            quantity: value.get("quantity").and_then(quantity)?,
        })
    })();

    if task.is_none() {
        warn!(record_id, "Dropping incomplete pick task");
    }
    task
}

/// Package ids from an array or a `[PKG-1;PKG-2]` style string.
pub fn package_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| value_text(item).trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        Value::String(raw) => raw
            .replace(['[', ']'], "")
            .split(';')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Calendar date from a plain date or a timestamp.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Text rendering of a scalar; null becomes empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Text of `primary`, or of `fallback` when the primary field is blank.
pub fn first_text(primary: &Value, fallback: &Value) -> String {
    let text = value_text(primary);
    if text.trim().is_empty() {
        value_text(fallback)
    } else {
        text
    }
}

/// Serde helper: accept string, number, bool or null as a string field.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}
