#[cfg(test)]
pub mod test {
    use serde_json::{Value, json};

    use crate::field::Field;
    use crate::object::TypedObject;
    use crate::scalar::Scalar;
    use crate::types::ObjectKind;

    /// Three flat fields, the smallest useful block template.
    pub fn simple_template() -> Value {
        json!({
            "name": {"type": "str", "default": ""},
            "type": {"type": "str", "default": ""},
            "value": {"type": "int", "default": 0}
        })
    }

    /// A simulator-style block template covering every node kind.
    pub fn simulator_template() -> Value {
        json!({
            "name": {"type": "str", "default": "fastsim"},
            "type": {"type": "str", "default": "SimulatorFast"},
            "log_level": {
                "type": "select",
                "options": {"DEBUG": 10, "INFO": 20, "ERROR": 40},
                "default": "ERROR"
            },
            "attribute": {
                "type": "object",
                "template": {
                    "name": {"type": "str", "default": "sim"},
                    "value": {
                        "type": "object",
                        "template": {
                            "start": {"type": "int", "default": 0},
                            "end": {"type": "int", "default": -1},
                            "step": {"type": "float", "default": 1.0}
                        }
                    }
                }
            },
            "interval": {
                "type": "timedelta",
                "template": {
                    "days": {"type": "int"},
                    "seconds": {"type": "int", "default": 1},
                    "microseconds": {"type": "int"}
                }
            },
            "tags": {"type": "list", "template": {"type": "str"}},
            "key": "std"
        })
    }

    /// What [`simulator_template`] serializes to before any edits.
    pub fn simulator_config() -> Value {
        json!({
            "name": "fastsim",
            "type": "SimulatorFast",
            "log_level": "ERROR",
            "attribute": {
                "name": "sim",
                "value": {"start": 0, "end": -1, "step": 1.0}
            },
            "interval": {"days": 0, "seconds": 1, "microseconds": 0},
            "tags": [],
            "key": "std"
        })
    }

    /// Element template for attribute lists.
    pub fn attribute_object() -> TypedObject {
        TypedObject::from_fields(
            ObjectKind::Object,
            true,
            [
                ("name", Field::from(Scalar::Str("attrname".into()))),
                ("value", Field::from(Scalar::Float(42.2))),
            ],
        )
    }

    #[test]
    fn simulator_fixture_pairs_up() {
        let template = crate::schema::compile(&simulator_template()).unwrap();
        assert_eq!(template.to_value(), simulator_config());
    }
}
