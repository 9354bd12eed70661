// ============================================================================
// CargoOps Infrastructure - Response Envelopes
// File: crates/cargoops-infrastructure/src/http/envelope.rs
// Description: Tolerant per-record decoding of list responses
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use cargoops_core::{DomainError, FetchOutcome, SkippedRecord};

/// Pull the record array out of `{ "data": [...] }` or a bare array.
pub fn records(body: Value, resource: &str) -> Result<Vec<Value>, DomainError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(Vec::new()),
            _ => Err(DomainError::malformed(resource, "expected a `data` array")),
        },
        _ => Err(DomainError::malformed(resource, "expected an object or array")),
    }
}

/// Decode each record on its own; undecodable ones are skipped and reported.
pub fn decode_list<R, T>(body: Value, resource: &str) -> Result<FetchOutcome<T>, DomainError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = DomainError>,
{
    let items = records(body, resource)?;
    let mut outcome = FetchOutcome::new(Vec::with_capacity(items.len()));

    for (index, item) in items.into_iter().enumerate() {
        let decoded = serde_json::from_value::<R>(item)
            .map_err(|e| DomainError::malformed(resource, e.to_string()))
            .and_then(T::try_from);

        match decoded {
            Ok(row) => outcome.rows.push(row),
            Err(e) => {
                warn!(resource, index, error = %e, "Skipping undecodable record");
                outcome.skipped.push(SkippedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::dto::StoringOrderRow;
    use cargoops_core::StoringOrder;
    use serde_json::json;

    #[test]
    fn test_envelope_and_bare_array() {
        assert_eq!(records(json!({"data": [1, 2]}), "x").unwrap().len(), 2);
        assert_eq!(records(json!([1]), "x").unwrap().len(), 1);
        assert!(records(json!({"data": null}), "x").unwrap().is_empty());
        assert!(records(json!({"items": []}), "x").is_err());
        assert!(records(json!("nope"), "x").is_err());
    }

    #[test]
    fn test_missing_identifier_skipped_and_counted() {
        let body = json!({"data": [
            {"storing_order_id": "SO-1", "status": "OPEN"},
            {"status": "OPEN"},
            {"storing_order_id": 42}
        ]});
        let outcome: FetchOutcome<StoringOrder> =
            decode_list::<StoringOrderRow, _>(body, "storing-orders").unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[1].storing_order_id, "42");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
    }
}
