//! Lenient coercion of raw configuration values.
//!
//! Stored settings are loosely typed: a flag may be `true`, `1` or `"1"`, an
//! id may be a string or a bare number. Both coercions are total and treat a
//! missing value as `false` / `""`.

use toml::Value;

/// Coerces a raw value to a flag.
///
/// False for: missing, `false`, `0`, `0.0`, `""`, `"0"`, `"false"` (any case),
/// and empty arrays or tables. Everything else is true.
///
/// Unlike plain dynamic-language truthiness, the string `"false"` is false:
/// a flag written out as `"false"` must not switch a feature on.
pub fn to_bool(value: Option<&Value>) -> bool {
    match value {
        None => false,
        Some(Value::Boolean(b)) => *b,
        Some(Value::Integer(i)) => *i != 0,
        Some(Value::Float(f)) => *f != 0.0,
        Some(Value::String(s)) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
        Some(Value::Datetime(_)) => true,
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Table(t)) => !t.is_empty(),
    }
}

/// Coerces a raw value to a string.
///
/// Booleans follow the stored-flag convention (`"1"` / `""`). Arrays and
/// tables have no scalar form and become `""`.
pub fn to_string(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Integer(i)) => i.to_string(),
        Some(Value::Float(f)) => f.to_string(),
        Some(Value::Boolean(true)) => "1".to_string(),
        Some(Value::Boolean(false)) => String::new(),
        Some(Value::Datetime(dt)) => dt.to_string(),
        Some(Value::Array(_) | Value::Table(_)) => String::new(),
    }
}
