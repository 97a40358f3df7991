//! Scalar kinds and the conversion rules used when a raw value is assigned to
//! a scalar field.

use std::fmt;

use serde_json::{Number, Value};

/// Declared kind of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Str,
    Int,
    Float,
}

/// A scalar value held by a typed field.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Str => "str",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
        }
    }

    /// The value a field of this kind starts with when the template gives no
    /// default.
    pub fn zero(self) -> Scalar {
        match self {
            ScalarKind::Bool => Scalar::Bool(false),
            ScalarKind::Str => Scalar::Str(String::new()),
            ScalarKind::Int => Scalar::Int(0),
            ScalarKind::Float => Scalar::Float(0.0),
        }
    }

    /// Convert `raw` to this kind.
    ///
    /// With `convert` off only values already of this kind are accepted (any
    /// JSON number counts as a float). Returns `None` when no conversion
    /// applies.
    pub fn coerce(self, raw: &Value, convert: bool) -> Option<Scalar> {
        if !convert {
            return self.exact(raw);
        }
        match self {
            ScalarKind::Bool => to_bool(raw).map(Scalar::Bool),
            ScalarKind::Str => to_str(raw).map(Scalar::Str),
            ScalarKind::Int => to_int(raw).map(Scalar::Int),
            ScalarKind::Float => to_float(raw).map(Scalar::Float),
        }
    }

    fn exact(self, raw: &Value) -> Option<Scalar> {
        match (self, raw) {
            (ScalarKind::Bool, Value::Bool(b)) => Some(Scalar::Bool(*b)),
            (ScalarKind::Str, Value::String(s)) => Some(Scalar::Str(s.clone())),
            (ScalarKind::Int, Value::Number(n)) => n.as_i64().map(Scalar::Int),
            (ScalarKind::Float, Value::Number(n)) => n.as_f64().map(Scalar::Float),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Str(_) => ScalarKind::Str,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Str(s) => Value::String(s.clone()),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        }
    }
}

fn to_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn to_str(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_float(raw: &Value) -> Option<f64> {
    match raw {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Truncate toward zero, rejecting values an `i64` cannot hold.
fn truncate(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_values() {
        assert_eq!(ScalarKind::Bool.zero(), Scalar::Bool(false));
        assert_eq!(ScalarKind::Str.zero(), Scalar::Str(String::new()));
        assert_eq!(ScalarKind::Int.zero(), Scalar::Int(0));
        assert_eq!(ScalarKind::Float.zero(), Scalar::Float(0.0));
    }

    #[test]
    fn int_truncates_floats() {
        assert_eq!(ScalarKind::Int.coerce(&json!(9.7), true), Some(Scalar::Int(9)));
        assert_eq!(ScalarKind::Int.coerce(&json!(-3.9), true), Some(Scalar::Int(-3)));
        assert_eq!(ScalarKind::Int.coerce(&json!(13.4), true), Some(Scalar::Int(13)));
    }

    #[test]
    fn int_parses_numeric_strings() {
        assert_eq!(ScalarKind::Int.coerce(&json!("67"), true), Some(Scalar::Int(67)));
        assert_eq!(ScalarKind::Int.coerce(&json!(" -5 "), true), Some(Scalar::Int(-5)));
    }

    #[test]
    fn int_rejects_non_numeric() {
        assert_eq!(ScalarKind::Int.coerce(&json!("hello"), true), None);
        assert_eq!(ScalarKind::Int.coerce(&json!("3.5"), true), None);
        assert_eq!(ScalarKind::Int.coerce(&json!(null), true), None);
        assert_eq!(ScalarKind::Int.coerce(&json!([1]), true), None);
    }

    #[test]
    fn int_rejects_out_of_range_floats() {
        assert_eq!(ScalarKind::Int.coerce(&json!(1e300), true), None);
        assert_eq!(ScalarKind::Int.coerce(&json!(u64::MAX), true), None);
    }

    #[test]
    fn float_accepts_ints_and_strings() {
        assert_eq!(ScalarKind::Float.coerce(&json!(3), true), Some(Scalar::Float(3.0)));
        assert_eq!(
            ScalarKind::Float.coerce(&json!("-3.14"), true),
            Some(Scalar::Float(-3.14))
        );
        assert_eq!(ScalarKind::Float.coerce(&json!("nan"), true), None);
        assert_eq!(ScalarKind::Float.coerce(&json!("inf"), true), None);
    }

    #[test]
    fn str_renders_numbers_and_bools() {
        assert_eq!(
            ScalarKind::Str.coerce(&json!(42), true),
            Some(Scalar::Str("42".into()))
        );
        assert_eq!(
            ScalarKind::Str.coerce(&json!(true), true),
            Some(Scalar::Str("true".into()))
        );
        assert_eq!(ScalarKind::Str.coerce(&json!({"a": 1}), true), None);
    }

    #[test]
    fn bool_accepts_words_and_numbers() {
        assert_eq!(ScalarKind::Bool.coerce(&json!("YES"), true), Some(Scalar::Bool(true)));
        assert_eq!(ScalarKind::Bool.coerce(&json!("off"), true), Some(Scalar::Bool(false)));
        assert_eq!(ScalarKind::Bool.coerce(&json!(0), true), Some(Scalar::Bool(false)));
        assert_eq!(ScalarKind::Bool.coerce(&json!(2.5), true), Some(Scalar::Bool(true)));
        assert_eq!(ScalarKind::Bool.coerce(&json!("maybe"), true), None);
    }

    #[test]
    fn strict_mode_requires_matching_kind() {
        assert_eq!(ScalarKind::Int.coerce(&json!(9.7), false), None);
        assert_eq!(ScalarKind::Int.coerce(&json!("67"), false), None);
        assert_eq!(ScalarKind::Int.coerce(&json!(67), false), Some(Scalar::Int(67)));
        assert_eq!(ScalarKind::Str.coerce(&json!(1), false), None);
        assert_eq!(ScalarKind::Bool.coerce(&json!("true"), false), None);
    }

    #[test]
    fn strict_float_accepts_json_integers() {
        assert_eq!(ScalarKind::Float.coerce(&json!(2), false), Some(Scalar::Float(2.0)));
    }

    #[test]
    fn to_value_round_trips_kinds() {
        assert_eq!(Scalar::Int(9).to_value(), json!(9));
        assert_eq!(Scalar::Float(42.2).to_value(), json!(42.2));
        assert_eq!(Scalar::Str("a".into()).to_value(), json!("a"));
        assert_eq!(Scalar::Bool(true).to_value(), json!(true));
    }
}
