//! Recursive structure transforms applied to decoded responses.
//!
//! The provider's XML envelope arrives as a mapping-of-mappings with
//! PascalCase-first keys, string-only leaves and repeated elements encoded
//! as numeric-keyed objects. Three passes normalize that shape:
//!
//! 1. [`normalize_keys`] - first-character case folding plus `#` stripping
//! 2. [`coerce_types`] - string leaves to bool/number where they parse
//! 3. [`arrayify`] - all-numeric-keyed objects to ordered sequences
//!
//! The encode path reuses [`normalize_keys`] in the [`Case::Upper`]
//! direction for outbound query parameters.

use serde_json::{Map, Value};

/// Direction for first-character key folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Decode direction: `DomainName` becomes `domainName`.
    Lower,
    /// Encode direction: `domainName` becomes `DomainName`.
    Upper,
}

/// Rewrite every mapping key, depth first: strip every literal `#` from the
/// key, then fold only its first character to the requested case. Values are
/// never dropped; arrays are recursed element-wise.
pub fn normalize_keys(value: Value, case: Case) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                let key = fold_first_char(&key.replace('#', ""), case);
                out.insert(key, normalize_keys(inner, case));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize_keys(item, case))
                .collect(),
        ),
        other => other,
    }
}

fn fold_first_char(key: &str, case: Case) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            let folded: String = match case {
                Case::Lower => first.to_lowercase().collect(),
                Case::Upper => first.to_uppercase().collect(),
            };
            folded + chars.as_str()
        }
        None => String::new(),
    }
}

/// Coerce every string leaf: case-insensitive `"true"`/`"false"` become
/// booleans, fully numeric strings become numbers, everything else stays the
/// original string. Non-string leaves are untouched.
pub fn coerce_types(value: Value) -> Value {
    match value {
        Value::String(s) => coerce_scalar(s),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, coerce_types(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_types).collect()),
        other => other,
    }
}

fn coerce_scalar(s: String) -> Value {
    let lowered = s.to_lowercase();
    if lowered == "true" {
        return Value::Bool(true);
    }
    if lowered == "false" {
        return Value::Bool(false);
    }
    if let Ok(n) = lowered.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = lowered.parse::<f64>() {
        // Non-finite parses ("infinity", "nan") have no JSON number
        // representation and fall through to the original string.
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(s)
}

/// Convert every object whose keys are all numeric strings into an ordered
/// sequence, bottom-up. Element order follows key insertion order, not
/// ascending numeric order. Objects with any non-numeric key, and empty
/// objects, are left unchanged.
///
/// This conflates "repeated XML element" with "object that happens to have
/// numeric keys"; the remote envelope never produces the latter on its own,
/// so the heuristic is kept as the behavioral contract.
pub fn arrayify(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                out.insert(key, arrayify(inner));
            }
            let all_numeric = !out.is_empty() && out.keys().all(|k| k.parse::<f64>().is_ok());
            if all_numeric {
                Value::Array(out.into_iter().map(|(_, inner)| inner).collect())
            } else {
                Value::Object(out)
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(arrayify).collect()),
        other => other,
    }
}
