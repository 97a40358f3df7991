use serde_json::Value;

use crate::error::PropsError;
use crate::merge::MergeOptions;
use crate::object::TypedObject;
use crate::scalar::Scalar;
use crate::select::{EnumInput, TypedEnum};
use crate::sequence::TypedSequence;

/// One typed value in a config tree.
///
/// Every variant carries its own assignment rule, see [`Field::assign`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// An untyped template value, kept and replaced verbatim.
    Inert(Value),
    Scalar(Scalar),
    Select(TypedEnum),
    List(TypedSequence),
    Object(TypedObject),
}

impl Field {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Field::Inert(_) => "an inert value",
            Field::Scalar(_) => "a scalar",
            Field::Select(_) => "a select",
            Field::List(_) => "a list",
            Field::Object(_) => "an object",
        }
    }

    pub fn as_inert(&self) -> Option<&Value> {
        match self {
            Field::Inert(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Field::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    /// String scalars, or the selected name of a select field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Scalar(s) => s.as_str(),
            Field::Select(e) => Some(e.name()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    pub fn as_enum(&self) -> Option<&TypedEnum> {
        match self {
            Field::Select(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TypedSequence> {
        match self {
            Field::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&TypedObject> {
        match self {
            Field::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Assign `raw` through this field's own rule: verbatim for inert values,
    /// coercion for scalars, resolution for selects, and a recursive merge
    /// for objects and lists.
    ///
    /// `options` must already point at this field's path.
    pub(crate) fn assign(
        &mut self,
        raw: &Value,
        convert: bool,
        options: &mut MergeOptions<'_>,
    ) -> Result<(), PropsError> {
        match self {
            Field::Inert(v) => {
                *v = raw.clone();
                Ok(())
            }
            Field::Scalar(s) => {
                let kind = s.kind();
                *s = kind
                    .coerce(raw, convert)
                    .ok_or_else(|| PropsError::Coercion {
                        key: options.current(),
                        expected: kind.as_str(),
                        value: raw.to_string(),
                    })?;
                Ok(())
            }
            Field::Select(e) => e.select_at(&options.current(), EnumInput::Raw(raw)),
            Field::List(l) => l.merge(raw, options),
            Field::Object(o) => o.merge(raw, options),
        }
    }

    pub(crate) fn set_readonly(&mut self, readonly: bool) {
        match self {
            Field::List(l) => l.set_readonly(readonly),
            Field::Object(o) => o.set_readonly(readonly),
            Field::Inert(_) | Field::Scalar(_) | Field::Select(_) => {}
        }
    }

    /// Record `path` as this field's place in the tree.
    pub(crate) fn relocate(&mut self, path: &str) {
        match self {
            Field::List(l) => l.relocate(path),
            Field::Object(o) => o.relocate(path),
            Field::Inert(_) | Field::Scalar(_) | Field::Select(_) => {}
        }
    }
}

impl From<Scalar> for Field {
    fn from(s: Scalar) -> Self {
        Field::Scalar(s)
    }
}

impl From<TypedEnum> for Field {
    fn from(e: TypedEnum) -> Self {
        Field::Select(e)
    }
}

impl From<TypedSequence> for Field {
    fn from(l: TypedSequence) -> Self {
        Field::List(l)
    }
}

impl From<TypedObject> for Field {
    fn from(o: TypedObject) -> Self {
        Field::Object(o)
    }
}
