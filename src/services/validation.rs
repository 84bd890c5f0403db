//! Runtime guards between untrusted JSON (query strings, request bodies,
//! persisted files, store responses) and the typed shapes the rest of the
//! crate consumes. Every validator is total: it returns `Some(valid)` or
//! `None`, and never panics.

use serde_json::Value;

use crate::models::{
    AdvantageMode, CharsetKind, GenerationResult, GeneratorParams, PoolSpec, ResultValue,
    SavedItem, SortDir,
};
use crate::utils::truncate_chars;

pub const MAX_FORMATTED_CHARS: usize = 10_000;
pub const MAX_WARNINGS: usize = 10;
pub const MAX_HISTORY_ENTRIES: usize = 100;
pub const MAX_HISTORY_ENTRY_CHARS: usize = 200;
pub const MAX_TICKET_ENTRIES: usize = 10_000;

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

fn finite_int(value: &Value) -> Option<i64> {
    finite_number(value).map(|n| n.floor() as i64)
}

/// Booleans arrive as `true`, `"true"`, `"1"`, `1` and friends from query
/// strings and old storage payloads.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_entry_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_result_value(value: &Value) -> Option<ResultValue> {
    match value {
        Value::String(s) => Some(ResultValue::Text(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(ResultValue::Int(i))
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(ResultValue::Float)
            }
        }
        _ => None,
    }
}

fn validate_pool(value: &Value) -> Option<PoolSpec> {
    let obj = value.as_object()?;
    // All three fields must be finite numbers or the whole pool is dropped
    let min = finite_int(obj.get("min")?)?;
    let max = finite_int(obj.get("max")?)?;
    let pick = finite_int(obj.get("pick")?)?;
    Some(PoolSpec { min, max, pick })
}

fn validate_items(value: &Value) -> Option<Vec<String>> {
    let arr = value.as_array()?;
    let items: Vec<String> = arr.iter().filter_map(coerce_entry_text).collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Align weights positionally with the already-filtered items list: a
/// position without a finite weight gets the default 1.0, negatives clamp
/// to 0, and weights past the item count are dropped.
fn validate_weights(value: &Value, item_count: usize) -> Option<Vec<f64>> {
    let arr = value.as_array()?;
    let weights: Vec<f64> = (0..item_count)
        .map(|i| match arr.get(i).and_then(|w| w.as_f64()) {
            Some(w) if w.is_finite() => w.max(0.0),
            _ => 1.0,
        })
        .collect();
    Some(weights)
}

fn validate_coin_labels(value: &Value) -> Option<(String, String)> {
    let arr = value.as_array()?;
    if arr.len() != 2 {
        return None;
    }
    let a = coerce_entry_text(&arr[0])?;
    let b = coerce_entry_text(&arr[1])?;
    Some((a, b))
}

fn validate_sort(value: &Value) -> Option<SortDir> {
    match value.as_str()? {
        "none" => Some(SortDir::None),
        "asc" => Some(SortDir::Asc),
        "desc" => Some(SortDir::Desc),
        _ => None,
    }
}

fn validate_advantage(value: &Value) -> Option<AdvantageMode> {
    match value.as_str()? {
        "normal" => Some(AdvantageMode::Normal),
        "advantage" => Some(AdvantageMode::Advantage),
        "disadvantage" => Some(AdvantageMode::Disadvantage),
        _ => None,
    }
}

fn validate_charset(value: &Value) -> Option<CharsetKind> {
    match value.as_str()? {
        "numeric" => Some(CharsetKind::Numeric),
        "hex" => Some(CharsetKind::Hex),
        "alphanumeric" => Some(CharsetKind::Alphanumeric),
        "strong" => Some(CharsetKind::Strong),
        "custom" => Some(CharsetKind::Custom),
        _ => None,
    }
}

fn nonempty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

/// Sanitize an untrusted params payload into `GeneratorParams`. Returns
/// `None` unless the payload is a JSON object; unrecognized or ill-typed
/// fields are simply omitted, never carried through.
pub fn validate_generator_params(value: &Value) -> Option<GeneratorParams> {
    let obj = value.as_object()?;
    let mut params = GeneratorParams::default();

    params.min = obj.get("min").and_then(finite_number);
    params.max = obj.get("max").and_then(finite_number);
    params.step = obj.get("step").and_then(finite_number);
    params.precision = obj
        .get("precision")
        .and_then(finite_int)
        .map(|p| p.clamp(-10, 10) as i32);
    params.count = obj.get("count").and_then(finite_int);
    params.length = obj.get("length").and_then(finite_int);
    params.dice_count = obj.get("dice_count").and_then(finite_int);
    params.dice_sides = obj.get("dice_sides").and_then(finite_int);
    params.group_size = obj.get("group_size").and_then(finite_int);
    params.prime_max = obj.get("prime_max").and_then(finite_int);
    params.fraction_max = obj.get("fraction_max").and_then(finite_int);
    params.roman_max = obj.get("roman_max").and_then(finite_int);

    params.unique = obj.get("unique").and_then(coerce_bool);
    params.ensure_each = obj.get("ensure_each").and_then(coerce_bool);
    params.exclude_ambiguous = obj.get("exclude_ambiguous").and_then(coerce_bool);
    params.simplify = obj.get("simplify").and_then(coerce_bool);

    params.sort = obj.get("sort").and_then(validate_sort);
    params.advantage = obj.get("advantage").and_then(validate_advantage);
    params.charset = obj.get("charset").and_then(validate_charset);

    params.exclude_chars = obj.get("exclude_chars").and_then(nonempty_string);
    params.custom_chars = obj.get("custom_chars").and_then(nonempty_string);

    params.pool_a = obj.get("pool_a").and_then(validate_pool);
    params.pool_b = obj.get("pool_b").and_then(validate_pool);

    params.items = obj.get("items").and_then(validate_items);
    // Weights only make sense alongside items
    if let Some(items) = &params.items {
        params.weights = obj
            .get("weights")
            .and_then(|w| validate_weights(w, items.len()));
    }

    params.dice_custom_faces = obj.get("dice_custom_faces").and_then(validate_items);
    params.coin_labels = obj.get("coin_labels").and_then(validate_coin_labels);
    params.ticket_remaining = obj.get("ticket_remaining").and_then(validate_ticket_log);

    Some(params)
}

/// Whitelist an untrusted result payload (e.g. deserialized history).
/// A result with no valid values is invalid as a whole.
pub fn validate_generation_result(value: &Value) -> Option<GenerationResult> {
    let obj = value.as_object()?;
    let values: Vec<ResultValue> = obj
        .get("values")?
        .as_array()?
        .iter()
        .filter_map(coerce_result_value)
        .collect();
    if values.is_empty() {
        return None;
    }
    let bonus_values: Vec<ResultValue> = obj
        .get("bonus_values")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(coerce_result_value).collect())
        .unwrap_or_default();
    let formatted = obj
        .get("formatted")
        .and_then(|v| v.as_str())
        .map(|s| truncate_chars(s, MAX_FORMATTED_CHARS))
        .unwrap_or_default();
    let timestamp = obj
        .get("timestamp")
        .and_then(finite_int)
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    let mut warnings: Vec<String> = obj
        .get("warnings")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|w| w.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();
    warnings.truncate(MAX_WARNINGS);

    Some(GenerationResult {
        values,
        bonus_values,
        formatted,
        timestamp,
        warnings,
        meta: None,
    })
}

/// History entries: trimmed strings capped at 200 chars each, at most 100
/// entries, empties dropped.
pub fn validate_history_array(value: &Value) -> Option<Vec<String>> {
    let arr = value.as_array()?;
    let entries: Vec<String> = arr
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| truncate_chars(s.trim(), MAX_HISTORY_ENTRY_CHARS))
        .filter(|s| !s.is_empty())
        .take(MAX_HISTORY_ENTRIES)
        .collect();
    Some(entries)
}

/// A ticket pool: string or number entries, capped.
pub fn validate_ticket_log(value: &Value) -> Option<Vec<ResultValue>> {
    let arr = value.as_array()?;
    Some(
        arr.iter()
            .filter_map(coerce_result_value)
            .take(MAX_TICKET_ENTRIES)
            .collect(),
    )
}

/// One favorite/recent entry; `key` defaults to the canonicalized href.
pub fn validate_saved_item(value: &Value) -> Option<SavedItem> {
    let obj = value.as_object()?;
    let href = nonempty_string(obj.get("href")?)?;
    let title = nonempty_string(obj.get("title")?)?;
    let key = obj
        .get("key")
        .and_then(nonempty_string)
        .unwrap_or_else(|| crate::utils::normalize_path_key(&href));
    let description = obj.get("description").and_then(nonempty_string);
    let saved_at = obj
        .get("saved_at")
        .and_then(finite_int)
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    Some(SavedItem {
        key,
        href,
        title,
        description,
        saved_at,
    })
}

/// Favorites/recents arrays loaded from disk; bad entries are dropped,
/// the array is capped, and a non-array payload invalidates the whole key.
pub fn validate_saved_items(value: &Value, cap: usize) -> Option<Vec<SavedItem>> {
    let arr = value.as_array()?;
    Some(arr.iter().filter_map(validate_saved_item).take(cap).collect())
}

/// Parse raw JSON defensively and run it through a validator. Malformed
/// JSON or a rejected payload both return the fallback verbatim.
pub fn safe_parse_and_validate<T, F>(raw: &str, validator: F, fallback: T) -> T
where
    F: Fn(&Value) -> Option<T>,
{
    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => match validator(&parsed) {
            Some(valid) => valid,
            None => fallback,
        },
        Err(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_rejects_ill_typed_fields() {
        let parsed =
            validate_generator_params(&json!({"min": "12", "max": true, "sort": "invalid"}))
                .unwrap();
        assert!(parsed.min.is_none());
        assert!(parsed.max.is_none());
        assert!(parsed.sort.is_none());
    }

    #[test]
    fn test_params_accepts_well_typed_fields() {
        let parsed = validate_generator_params(&json!({
            "min": 1.5, "max": 10, "count": 3.9, "unique": "true",
            "sort": "asc", "charset": "strong"
        }))
        .unwrap();
        assert_eq!(parsed.min, Some(1.5));
        assert_eq!(parsed.max, Some(10.0));
        assert_eq!(parsed.count, Some(3)); // floored
        assert_eq!(parsed.unique, Some(true));
        assert_eq!(parsed.sort, Some(SortDir::Asc));
        assert_eq!(parsed.charset, Some(CharsetKind::Strong));
    }

    #[test]
    fn test_params_non_object_is_none() {
        assert!(validate_generator_params(&json!([1, 2, 3])).is_none());
        assert!(validate_generator_params(&json!("range")).is_none());
        assert!(validate_generator_params(&Value::Null).is_none());
    }

    #[test]
    fn test_pool_dropped_on_any_bad_field() {
        let parsed = validate_generator_params(&json!({
            "pool_a": {"min": "x", "max": 69, "pick": 5},
            "pool_b": {"min": 1, "max": 26, "pick": 1}
        }))
        .unwrap();
        assert!(parsed.pool_a.is_none());
        assert_eq!(
            parsed.pool_b,
            Some(PoolSpec {
                min: 1,
                max: 26,
                pick: 1
            })
        );

        // Missing field also drops the pool
        let parsed =
            validate_generator_params(&json!({"pool_a": {"min": 1, "max": 69}})).unwrap();
        assert!(parsed.pool_a.is_none());
    }

    #[test]
    fn test_items_trimmed_and_weights_aligned() {
        let parsed = validate_generator_params(&json!({
            "items": ["  a  ", "", "b", 3, null],
            "weights": [2.0, -1.0]
        }))
        .unwrap();
        // Empty and null entries removed, numbers stringified
        assert_eq!(parsed.items, Some(vec!["a".into(), "b".into(), "3".into()]));
        // Negative clamps to 0, missing positions pad with 1, extras dropped
        assert_eq!(parsed.weights, Some(vec![2.0, 0.0, 1.0]));
    }

    #[test]
    fn test_weights_without_items_dropped() {
        let parsed = validate_generator_params(&json!({"weights": [1.0, 2.0]})).unwrap();
        assert!(parsed.weights.is_none());
    }

    #[test]
    fn test_coin_labels() {
        let parsed =
            validate_generator_params(&json!({"coin_labels": ["Yes", "No"]})).unwrap();
        assert_eq!(parsed.coin_labels, Some(("Yes".into(), "No".into())));

        let parsed = validate_generator_params(&json!({"coin_labels": ["Only one"]})).unwrap();
        assert!(parsed.coin_labels.is_none());
    }

    #[test]
    fn test_safe_parse_and_validate_fallback() {
        let fallback = GeneratorParams {
            count: Some(9),
            ..Default::default()
        };
        let out = safe_parse_and_validate("not json", validate_generator_params, fallback.clone());
        assert_eq!(out, fallback);

        let out = safe_parse_and_validate("[1,2]", validate_generator_params, fallback.clone());
        assert_eq!(out, fallback);

        let out = safe_parse_and_validate(r#"{"count": 4}"#, validate_generator_params, fallback);
        assert_eq!(out.count, Some(4));
    }

    #[test]
    fn test_history_array_caps() {
        let long = "x".repeat(500);
        let parsed =
            validate_history_array(&json!([" trimmed ", "", long, 42])).unwrap();
        assert_eq!(parsed[0], "trimmed");
        assert_eq!(parsed[1].chars().count(), MAX_HISTORY_ENTRY_CHARS);
        assert_eq!(parsed.len(), 2); // empty and non-string dropped

        let many: Vec<Value> = (0..300).map(|i| json!(format!("entry {i}"))).collect();
        let parsed = validate_history_array(&Value::Array(many)).unwrap();
        assert_eq!(parsed.len(), MAX_HISTORY_ENTRIES);
    }

    #[test]
    fn test_ticket_log() {
        let parsed = validate_ticket_log(&json!(["A", 2, null, 3.5])).unwrap();
        assert_eq!(
            parsed,
            vec![
                ResultValue::Text("A".into()),
                ResultValue::Int(2),
                ResultValue::Float(3.5)
            ]
        );
        assert!(validate_ticket_log(&json!("nope")).is_none());
    }

    #[test]
    fn test_generation_result_requires_values() {
        assert!(validate_generation_result(&json!({"values": [], "formatted": ""})).is_none());
        let parsed = validate_generation_result(&json!({
            "values": [1, "two"],
            "formatted": "1, two",
            "timestamp": 1700000000000i64
        }))
        .unwrap();
        assert_eq!(parsed.values.len(), 2);
        assert_eq!(parsed.timestamp, 1700000000000);
    }

    #[test]
    fn test_saved_items() {
        let parsed = validate_saved_items(
            &json!([
                {"href": "/dice-roller/", "title": "Dice Roller"},
                {"href": "", "title": "bad"},
                {"title": "no href"}
            ]),
            10,
        )
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].key, "/dice-roller");
    }
}
