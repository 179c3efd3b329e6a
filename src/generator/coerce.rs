//! Typed value coercion.
//!
//! Converts raw literal text into the correctly-typed native value for a
//! declared scalar data type, and synthesizes a per-type default when no
//! value is supplied. Both operations are pure and never fail: malformed
//! input degrades to the type's zero value.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::{json, Value};

use crate::domain::{ScalarShape, ScalarType};

/// Window around "now" used for randomized plausible date/time defaults.
const PLAUSIBLE_WINDOW_SECS: i64 = 365 * 24 * 60 * 60;

/// Coerces raw literal text per the declared scalar type.
///
/// Numeric families parse as integer first, then float; invalid numeric
/// text yields `0`. Booleans match the literals `"true"`/`"false"` only;
/// anything else is `false`. Nil always yields `null`. Every other type
/// keeps the raw text unchanged.
pub fn coerce(raw: &str, scalar_type: ScalarType) -> Value {
    match scalar_type {
        ScalarType::Number => coerce_number(raw),
        ScalarType::Boolean => Value::Bool(raw == "true"),
        ScalarType::Nil => Value::Null,
        _ => Value::String(raw.to_string()),
    }
}

fn coerce_number(raw: &str) -> Value {
    if let Ok(int) = raw.trim().parse::<i64>() {
        return json!(int);
    }
    match raw.trim().parse::<f64>() {
        Ok(float) if float.is_finite() => json!(float),
        _ => json!(0),
    }
}

/// Synthesizes a default value for a scalar shape with no explicit value.
///
/// String types yield `""`, numeric types `0`, booleans `false`, nil
/// `null`. Date and time families yield a freshly generated plausible
/// value; full date-times honor the shape's declared sub-format
/// (`rfc2616` renders an HTTP-date, everything else ISO-8601 with
/// milliseconds and `Z`). Unmapped types synthesize nothing.
pub fn synthesize_default(scalar: &ScalarShape) -> Option<Value> {
    let instant = plausible_instant();
    match scalar.scalar_type() {
        ScalarType::Str => Some(json!("")),
        ScalarType::Number => Some(json!(0)),
        ScalarType::Boolean => Some(json!(false)),
        ScalarType::Nil => Some(Value::Null),
        ScalarType::Date => Some(json!(instant.format("%Y-%m-%d").to_string())),
        ScalarType::Time => Some(json!(instant.format("%H:%M:%S").to_string())),
        ScalarType::DateTimeOnly => Some(json!(instant.format("%Y-%m-%dT%H:%M:%S").to_string())),
        ScalarType::DateTime => Some(json!(format_date_time(instant, scalar.format.as_deref()))),
        ScalarType::Unknown => None,
    }
}

fn format_date_time(instant: DateTime<Utc>, format: Option<&str>) -> String {
    match format {
        Some("rfc2616") => instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        // rfc3339 / date-time / unset
        _ => instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    }
}

/// A random instant within a year of now.
fn plausible_instant() -> DateTime<Utc> {
    let offset = rand::thread_rng().gen_range(-PLAUSIBLE_WINDOW_SECS..=PLAUSIBLE_WINDOW_SECS);
    Utc::now() + Duration::seconds(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(data_type: &str) -> ScalarShape {
        ScalarShape {
            data_type: data_type.to_string(),
            ..ScalarShape::default()
        }
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce("42", ScalarType::Number), json!(42));
        assert_eq!(coerce("4.5", ScalarType::Number), json!(4.5));
        assert_eq!(coerce("123456", ScalarType::Number), json!(123456));
        assert_eq!(coerce("not a number", ScalarType::Number), json!(0));
        assert_eq!(coerce("", ScalarType::Number), json!(0));
    }

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce("true", ScalarType::Boolean), json!(true));
        assert_eq!(coerce("false", ScalarType::Boolean), json!(false));
        assert_eq!(coerce("TRUE", ScalarType::Boolean), json!(false));
        assert_eq!(coerce("yes", ScalarType::Boolean), json!(false));
    }

    #[test]
    fn test_coerce_nil_and_strings() {
        assert_eq!(coerce("anything", ScalarType::Nil), Value::Null);
        assert_eq!(coerce("hello", ScalarType::Str), json!("hello"));
        assert_eq!(coerce("opaque", ScalarType::Unknown), json!("opaque"));
    }

    #[test]
    fn test_synthesize_zero_values() {
        assert_eq!(synthesize_default(&scalar("string")), Some(json!("")));
        assert_eq!(synthesize_default(&scalar("integer")), Some(json!(0)));
        assert_eq!(synthesize_default(&scalar("boolean")), Some(json!(false)));
        assert_eq!(synthesize_default(&scalar("nil")), Some(Value::Null));
        assert_eq!(synthesize_default(&scalar("anyURI")), None);
    }

    #[test]
    fn test_synthesize_date_shapes() {
        let date = synthesize_default(&scalar("date")).unwrap();
        let date = date.as_str().unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');

        let time = synthesize_default(&scalar("time")).unwrap();
        let time = time.as_str().unwrap();
        assert_eq!(time.len(), 8);
        assert_eq!(time.as_bytes()[2], b':');

        let dt_only = synthesize_default(&scalar("dateTimeOnly")).unwrap();
        assert_eq!(dt_only.as_str().unwrap().len(), 19);
    }

    #[test]
    fn test_synthesize_date_time_formats() {
        let iso = synthesize_default(&scalar("dateTime")).unwrap();
        let iso = iso.as_str().unwrap();
        assert!(iso.ends_with('Z'));
        assert!(iso.contains('.'));

        let mut http = scalar("dateTime");
        http.format = Some("rfc2616".to_string());
        let http = synthesize_default(&http).unwrap();
        assert!(http.as_str().unwrap().ends_with("GMT"));
    }
}
