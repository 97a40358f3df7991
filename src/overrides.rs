//! Convert dotted-key overrides into a nested raw mapping.
//!
//! Each `("attribute.value.end", Value)` pair is expanded into the nested
//! mapping a merge expects, so user edits addressed by path go through the
//! same coercion and shape checks as any other raw config.

use serde_json::{Map, Value};

/// Convert dotted-key overrides into a nested mapping.
///
/// `("attribute.name", "sim")` becomes `{"attribute": {"name": "sim"}}`.
///
/// If multiple entries target the same key, the last one wins. An entry that
/// descends through a key previously set to a non-mapping replaces it.
pub fn overrides_to_map(entries: &[(String, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (dotted_key, value) in entries {
        set_nested(&mut map, dotted_key, value.clone());
    }
    map
}

/// Wrap `value` in one mapping per segment of `dotted_key`.
pub fn nest(dotted_key: &str, value: Value) -> Value {
    dotted_key
        .rsplit('.')
        .fold(value, |inner, segment| {
            let mut map = Map::new();
            map.insert(segment.to_string(), inner);
            Value::Object(map)
        })
}

fn set_nested(map: &mut Map<String, Value>, dotted_key: &str, value: Value) {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let mut current = map;
    for segment in path.into_iter().flat_map(|p| p.split('.')) {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }

    current.insert(leaf.to_string(), value);
}
