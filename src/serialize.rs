//! Turning typed trees back into plain values.
//!
//! Scalars and inert values pass through, selects render as the selected
//! member's **name**, sequences as arrays and objects as mappings holding
//! every schema field in declaration order. The same rules back both
//! `to_value()` and the `serde::Serialize` impls, so a tree can be handed
//! straight to `serde_json::to_string`.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

use crate::field::Field;
use crate::object::TypedObject;
use crate::scalar::Scalar;
use crate::select::TypedEnum;
use crate::sequence::TypedSequence;

impl Field {
    pub fn to_value(&self) -> Value {
        match self {
            Field::Inert(v) => v.clone(),
            Field::Scalar(s) => s.to_value(),
            Field::Select(e) => e.to_value(),
            Field::List(l) => l.to_value(),
            Field::Object(o) => o.to_value(),
        }
    }
}

impl TypedEnum {
    pub fn to_value(&self) -> Value {
        Value::String(self.name().to_string())
    }
}

impl TypedSequence {
    pub fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Field::to_value).collect())
    }
}

impl TypedObject {
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(name, field)| (name.to_string(), field.to_value()))
            .collect()
    }

    /// Flatten into dotted key-value pairs. Objects are recursed into; lists,
    /// selects and scalars are leaves.
    ///
    /// `{attribute: {value: {end: 5}}}` → `[("attribute.value.end", 5)]`
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        collect_entries(self, "", &mut out);
        out
    }
}

fn collect_entries(object: &TypedObject, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (name, field) in object.iter() {
        let dotted = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        match field {
            Field::Object(nested) => collect_entries(nested, &dotted, out),
            leaf => out.push((dotted, leaf.to_value())),
        }
    }
}

/// Format a value for a `key = value` listing.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One `key = value` line per leaf, in declaration order.
impl fmt::Display for TypedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key} = {}", format_value(value))?;
        }
        Ok(())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Str(s) => serializer.serialize_str(s),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(x) => serializer.serialize_f64(*x),
        }
    }
}

impl Serialize for TypedEnum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Inert(v) => v.serialize(serializer),
            Field::Scalar(s) => s.serialize(serializer),
            Field::Select(e) => e.serialize(serializer),
            Field::List(l) => l.serialize(serializer),
            Field::Object(o) => o.serialize(serializer),
        }
    }
}

impl Serialize for TypedSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for TypedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, field) in self.iter() {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{simulator_config, simulator_template};
    use crate::schema::compile;
    use serde_json::json;

    #[test]
    fn select_serializes_to_name() {
        let config = compile(&simulator_template()).unwrap();
        assert_eq!(config.to_value()["log_level"], json!("ERROR"));
        let level = config.get("log_level").unwrap().as_enum().unwrap();
        assert_eq!(level.value(), &json!(40));
    }

    #[test]
    fn serde_output_matches_to_value() {
        let mut config = compile(&simulator_template()).unwrap().instantiate();
        config.update(&json!({"tags": ["a", "b"], "log_level": 10})).unwrap();
        let via_serde = serde_json::to_value(&config).unwrap();
        assert_eq!(via_serde, config.to_value());
        assert_eq!(via_serde["log_level"], json!("DEBUG"));
    }

    #[test]
    fn to_string_keeps_declaration_order() {
        let config = compile(&json!({
            "zeta": {"type": "int", "default": 1},
            "alpha": {"type": "int", "default": 2},
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"zeta":1,"alpha":2}"#
        );
    }

    #[test]
    fn every_field_is_present() {
        let config = compile(&simulator_template()).unwrap();
        let out = config.to_map();
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, config.keys().collect::<Vec<_>>());
        assert_eq!(config.to_value(), simulator_config());
    }

    #[test]
    fn entries_flatten_objects_only() {
        let config = compile(&simulator_template()).unwrap();
        let entries = config.entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"attribute.value.end"));
        assert!(keys.contains(&"interval.days"));
        assert!(keys.contains(&"tags"));
        assert!(!keys.contains(&"attribute"));
        let end = entries.iter().find(|(k, _)| k == "attribute.value.end").unwrap();
        assert_eq!(end.1, json!(-1));
    }

    #[test]
    fn display_lists_one_leaf_per_line() {
        let config = compile(&json!({
            "name": {"type": "str", "default": "sim"},
            "interval": {"type": "timedelta", "template": {"days": {"type": "int", "default": 2}}},
            "tags": {"type": "list", "template": {"type": "str"}, "default": ["x"]},
        }))
        .unwrap();
        assert_eq!(
            config.to_string(),
            "name = sim\ninterval.days = 2\ntags = [\"x\"]"
        );
    }
}
