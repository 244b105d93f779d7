//! Input sanitizer
//!
//! Turns raw, untyped request fields into canonical values. Nothing here
//! fails: malformed input degrades to the empty/default value and callers
//! apply required-field checks themselves.

use serde_json::Value;
use shared::models::{AllergenSet, CategoryOrder, CategoryRank};

/// String-coerce and trim; `null`/absent becomes `""`
pub fn clean_str(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Objects and arrays carry no scalar text
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Same as [`clean_str`] for an optional field
pub fn clean_field(v: Option<&Value>) -> String {
    v.map(clean_str).unwrap_or_default()
}

/// Allergen tags restricted to the fixed vocabulary, canonical order, no duplicates
pub fn normalize_allergens(v: &Value) -> AllergenSet {
    match v {
        Value::Array(tags) => AllergenSet::from_tags(tags.iter().map(clean_str)),
        _ => AllergenSet::default(),
    }
}

/// Loose numeric coercion
///
/// Numbers pass through, numeric strings parse (blank is 0), booleans are
/// 0/1 and null is 0. Objects, arrays and non-numeric strings have no value.
pub fn coerce_number(v: &Value) -> Option<f64> {
    match v {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|f| !f.is_nan())
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loose coercion to a whole number; fractional or infinite values are rejected
pub fn coerce_integer(v: &Value) -> Option<i64> {
    let f = coerce_number(v)?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Truthiness of a loosely-typed flag
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Boolean flag with the literals Postgres accepts for `boolean`
///
/// JSON booleans and numbers (non-zero is true) pass; strings must be one
/// of `true/t/yes/y/on/1` or `false/f/no/n/off/0`, any case, trimmed.
pub fn coerce_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Normalise a stored or submitted `{ categories: [{ name, order }] }` document
///
/// Names are trimmed and blank entries dropped. An order that is missing or
/// not numeric takes `default_rank`; fractional orders are rounded.
pub fn category_order(doc: &Value, default_rank: i64) -> CategoryOrder {
    let categories = doc
        .get("categories")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let name = clean_field(entry.get("name"));
                    if name.is_empty() {
                        return None;
                    }
                    let order = entry
                        .get("order")
                        .and_then(coerce_number)
                        .filter(|f| f.is_finite())
                        .map(|f| f.round() as i64)
                        .unwrap_or(default_rank);
                    Some(CategoryRank { name, order })
                })
                .collect()
        })
        .unwrap_or_default();

    CategoryOrder { categories }
}
