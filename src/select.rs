//! Closed enum domains and the resolver behind `select` fields.
//!
//! A [`TypedEnum`] always has exactly one selected [`Member`]. Assignments are
//! resolved in a fixed order, first match wins:
//!
//! 1. the input already is a member of the domain,
//! 2. the input equals a member **name**,
//! 3. the input equals a member's underlying **value**.
//!
//! Names win over values, so an option named `"X"` is selected by `"X"` even
//! when another option's value is also `"X"`.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::PropsError;

/// One named option of an enum domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: String,
    value: Value,
}

impl Member {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Member {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Input accepted by [`TypedEnum::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum EnumInput<'a> {
    Member(&'a Member),
    Raw(&'a Value),
}

impl<'a> From<&'a Member> for EnumInput<'a> {
    fn from(member: &'a Member) -> Self {
        EnumInput::Member(member)
    }
}

impl<'a> From<&'a Value> for EnumInput<'a> {
    fn from(value: &'a Value) -> Self {
        EnumInput::Raw(value)
    }
}

impl<'a> From<&'a TypedEnum> for EnumInput<'a> {
    fn from(other: &'a TypedEnum) -> Self {
        EnumInput::Member(other.member())
    }
}

/// A `select` field: a shared, immutable domain plus the selected member.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedEnum {
    domain: Arc<[Member]>,
    selected: usize,
}

impl TypedEnum {
    /// Build a domain from `options` (name → underlying value), selecting the
    /// first declared option.
    ///
    /// Names are unique by construction; values must be unique too.
    pub fn from_options(options: &Map<String, Value>) -> Result<Self, String> {
        if options.is_empty() {
            return Err("options must declare at least one member".into());
        }
        let mut members: Vec<Member> = Vec::with_capacity(options.len());
        for (name, value) in options {
            if let Some(other) = members.iter().find(|m| loosely_equal(&m.value, value)) {
                return Err(format!(
                    "options '{}' and '{name}' share the value {value}",
                    other.name
                ));
            }
            members.push(Member::new(name.clone(), value.clone()));
        }
        Ok(TypedEnum {
            domain: members.into(),
            selected: 0,
        })
    }

    pub fn members(&self) -> &[Member] {
        &self.domain
    }

    pub fn member(&self) -> &Member {
        &self.domain[self.selected]
    }

    /// Name of the selected member. This is the enum's externally observed value.
    pub fn name(&self) -> &str {
        self.member().name()
    }

    /// Underlying value of the selected member.
    pub fn value(&self) -> &Value {
        self.member().value()
    }

    /// Resolve `input` against the domain without changing the selection.
    pub fn resolve<'a>(&self, input: impl Into<EnumInput<'a>>) -> Option<&Member> {
        self.position(input.into()).map(|i| &self.domain[i])
    }

    /// Select the member `input` resolves to.
    pub fn set<'a>(&mut self, input: impl Into<EnumInput<'a>>) -> Result<(), PropsError> {
        self.select_at("<select>", input.into())
    }

    pub(crate) fn select_at(&mut self, key: &str, input: EnumInput<'_>) -> Result<(), PropsError> {
        match self.position(input) {
            Some(i) => {
                self.selected = i;
                Ok(())
            }
            None => Err(PropsError::NotInDomain {
                key: key.to_string(),
                value: describe(input),
                names: self.domain.iter().map(|m| m.name.clone()).collect(),
            }),
        }
    }

    fn position(&self, input: EnumInput<'_>) -> Option<usize> {
        match input {
            EnumInput::Member(member) => self.domain.iter().position(|m| m == member),
            EnumInput::Raw(raw) => self
                .domain
                .iter()
                .position(|m| raw.as_str() == Some(m.name.as_str()))
                .or_else(|| {
                    self.domain
                        .iter()
                        .position(|m| loosely_equal(&m.value, raw))
                }),
        }
    }
}

fn describe(input: EnumInput<'_>) -> String {
    match input {
        EnumInput::Member(member) => format!("member '{}'", member.name),
        EnumInput::Raw(raw) => raw.to_string(),
    }
}

/// JSON equality that treats `40` and `40.0` as the same number.
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn levels() -> TypedEnum {
        let options = json!({"DEBUG": 10, "ERROR": 40});
        TypedEnum::from_options(options.as_object().unwrap()).unwrap()
    }

    fn abc() -> TypedEnum {
        let options = json!({"a": 0, "b": 1, "c": 2});
        TypedEnum::from_options(options.as_object().unwrap()).unwrap()
    }

    #[test]
    fn first_declared_option_is_selected() {
        let level = levels();
        assert_eq!(level.name(), "DEBUG");
        assert_eq!(level.value(), &json!(10));
    }

    #[test]
    fn resolves_by_name() {
        let mut level = levels();
        level.set(&json!("ERROR")).unwrap();
        assert_eq!(level.name(), "ERROR");
        level.set(&json!("DEBUG")).unwrap();
        assert_eq!(level.name(), "DEBUG");
    }

    #[test]
    fn resolves_by_value() {
        let mut level = levels();
        level.set(&json!(40)).unwrap();
        assert_eq!(level.name(), "ERROR");
    }

    #[test]
    fn float_value_matches_integer_option() {
        let mut level = levels();
        level.set(&json!(40.0)).unwrap();
        assert_eq!(level.name(), "ERROR");
    }

    #[test]
    fn rejects_values_outside_domain() {
        let mut level = levels();
        let err = level.set(&json!("BAD")).unwrap_err();
        assert!(matches!(err, PropsError::NotInDomain { .. }));
        assert_eq!(level.name(), "DEBUG");
        assert!(level.set(&json!(6)).is_err());
    }

    #[test]
    fn name_wins_over_colliding_value() {
        let options = json!({"X": 1, "Y": "X"});
        let mut e = TypedEnum::from_options(options.as_object().unwrap()).unwrap();
        e.set(&json!("Y")).unwrap();
        e.set(&json!("X")).unwrap();
        assert_eq!(e.name(), "X");
        e.set(&json!(1)).unwrap();
        assert_eq!(e.name(), "X");
    }

    #[test]
    fn set_from_member() {
        let mut e = abc();
        let c = e.members()[2].clone();
        e.set(&c).unwrap();
        assert_eq!(e.name(), "c");
    }

    #[test]
    fn foreign_member_is_not_in_domain() {
        let mut e = abc();
        let stranger = Member::new("a", 99);
        assert!(e.set(&stranger).is_err());
    }

    #[test]
    fn set_from_another_enum() {
        let mut target = abc();
        let mut source = abc();
        source.set(&json!("b")).unwrap();
        target.set(&source).unwrap();
        assert_eq!(target.name(), "b");
        assert_eq!(target.value(), &json!(1));
    }

    #[test]
    fn resolve_does_not_mutate() {
        let level = levels();
        let member = level.resolve(&json!(40)).unwrap();
        assert_eq!(member.name(), "ERROR");
        assert_eq!(level.name(), "DEBUG");
        assert!(level.resolve(&json!("nope")).is_none());
    }

    #[test]
    fn empty_options_rejected() {
        let err = TypedEnum::from_options(&Map::new()).unwrap_err();
        assert!(err.contains("at least one"));
    }

    #[test]
    fn duplicate_values_rejected() {
        let options = json!({"a": 1, "b": 1.0});
        let err = TypedEnum::from_options(options.as_object().unwrap()).unwrap_err();
        assert!(err.contains("'a'"));
        assert!(err.contains("'b'"));
    }

    proptest::proptest! {
        #[test]
        fn names_shadow_colliding_values(
            names in proptest::collection::btree_set("[A-Z]{1,4}", 2..6),
        ) {
            // Every member's value is the next member's name.
            let names: Vec<String> = names.into_iter().collect();
            let mut options = Map::new();
            for (i, name) in names.iter().enumerate() {
                let next = &names[(i + 1) % names.len()];
                options.insert(name.clone(), json!(next));
            }
            let mut e = TypedEnum::from_options(&options).unwrap();
            for name in &names {
                e.set(&json!(name)).unwrap();
                proptest::prop_assert_eq!(e.name(), name.as_str());
            }
        }
    }

    #[test]
    fn clones_share_domain_but_not_selection() {
        let mut a = levels();
        let b = a.clone();
        a.set(&json!("ERROR")).unwrap();
        assert_eq!(b.name(), "DEBUG");
        assert_eq!(a.members(), b.members());
    }
}
