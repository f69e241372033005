//! Value helpers over `serde_json::Value`.
//!
//! Templates and wedding data are plain JSON documents, so the renderer works
//! on `serde_json::Value` directly. The helpers here pin down how a JSON value
//! is shown as text, when it counts as falsy, and what strict equality means.

use serde_json::{Number, Value};

/// Stringify a resolved value for substitution into text.
///
/// Integers print without a fraction, booleans as `true`/`false`, arrays as
/// their elements joined by `,`, objects as `[object Object]`, null as `""`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => stringify_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn stringify_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Check whether the value is falsy.
/// Falsy values: null, false, 0, ""
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0 || f.is_nan()).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Strict equality between a resolved value and a literal.
///
/// A missing value never equals anything. Scalars compare by value (numbers
/// numerically); arrays and objects are never equal to a literal.
pub fn strict_equals(resolved: Option<&Value>, expected: &Value) -> bool {
    match (resolved, expected) {
        (None, _) => false,
        (Some(Value::Null), Value::Null) => true,
        (Some(Value::Bool(a)), Value::Bool(b)) => a == b,
        (Some(Value::Number(a)), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Some(Value::String(a)), Value::String(b)) => a == b,
        _ => false,
    }
}

/// Get the type name for log messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
