//! Unwrapping the many envelopes the booking API puts around its payloads.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiClientError;

/// Pull a list out of `[...]`, `{data: [...]}`, a Laravel paginator
/// `{data: {data: [...]}}`, `{<key>: [...]}` or the first array field.
/// Elements that do not decode are skipped.
pub fn extract_list<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, ApiClientError> {
    let items = find_array(value, key).ok_or_else(|| ApiClientError::Rejected {
        status: 502,
        message: format!("Expected a list of {key} from the booking service"),
        errors: None,
    })?;

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping malformed {key} entry: {e}");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        warn!("Decoded {} of {} {key}", decoded.len(), total);
    }
    Ok(decoded)
}

fn find_array(value: Value, key: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(inner) = map.remove("data") {
                if let Some(items) = find_array(inner, key) {
                    return Some(items);
                }
            }
            if let Some(Value::Array(items)) = map.remove(key) {
                return Some(items);
            }
            map.into_iter().find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
        }
        _ => None,
    }
}

/// Pull one record out of `{...}`, `{data: {...}}` or `{<key>: {...}}`.
pub fn extract_item<T: DeserializeOwned>(value: Value, key: &str) -> Result<T, ApiClientError> {
    let item = match value {
        Value::Object(mut map) => {
            if let Some(inner @ Value::Object(_)) = map.remove("data") {
                inner
            } else if let Some(inner @ Value::Object(_)) = map.remove(key) {
                inner
            } else {
                Value::Object(map)
            }
        }
        other => other,
    };
    Ok(serde_json::from_value(item)?)
}

/// Human readable message from an error body.
pub fn error_message(body: &Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .filter_map(|k| body.get(*k))
        .find_map(|v| v.as_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawHotel;
    use serde_json::json;

    fn names(value: Value) -> Vec<Option<String>> {
        extract_list::<RawHotel>(value, "hotels")
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect()
    }

    #[test]
    fn lists_are_found_in_every_envelope() {
        let expected = vec![Some("A".to_string())];
        assert_eq!(names(json!([{ "name": "A" }])), expected);
        assert_eq!(names(json!({ "data": [{ "name": "A" }] })), expected);
        assert_eq!(
            names(json!({ "data": { "current_page": 1, "data": [{ "name": "A" }] } })),
            expected
        );
        assert_eq!(names(json!({ "hotels": [{ "name": "A" }] })), expected);
        assert_eq!(names(json!({ "success": true, "results": [{ "name": "A" }] })), expected);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert_eq!(names(json!([{ "name": "A" }, 42, "x"])).len(), 1);
    }

    #[test]
    fn non_list_is_an_error() {
        assert!(extract_list::<RawHotel>(json!({ "ok": true }), "hotels").is_err());
    }

    #[test]
    fn items_are_unwrapped() {
        let hotel: RawHotel = extract_item(json!({ "data": { "name": "B" } }), "hotel").unwrap();
        assert_eq!(hotel.name.as_deref(), Some("B"));
        let hotel: RawHotel = extract_item(json!({ "hotel": { "name": "C" } }), "hotel").unwrap();
        assert_eq!(hotel.name.as_deref(), Some("C"));
        let hotel: RawHotel = extract_item(json!({ "name": "D" }), "hotel").unwrap();
        assert_eq!(hotel.name.as_deref(), Some("D"));
    }

    #[test]
    fn error_message_prefers_message() {
        assert_eq!(
            error_message(&json!({ "message": "Invalid credentials", "error": "x" })).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(error_message(&json!({ "ok": false })), None);
    }
}
