//! Fixed-shape typed objects: the nodes of a config tree.

use serde_json::Value;

use crate::error::PropsError;
use crate::field::Field;
use crate::merge::{MergeOptions, join};
use crate::overrides;
use crate::select::TypedEnum;
use crate::sequence::TypedSequence;
use crate::types::ObjectKind;

/// A named-field container whose field set and field kinds are pinned at
/// construction.
///
/// Fields keep their declaration order. A `readonly` object refuses every
/// mutation; the flag is shared down the tree by [`set_readonly`](Self::set_readonly).
#[derive(Debug, Clone, PartialEq)]
pub struct TypedObject {
    kind: ObjectKind,
    fields: Vec<(String, Field)>,
    convert: bool,
    readonly: bool,
}

impl TypedObject {
    /// Build an object from its complete field list. Later duplicates of a
    /// name replace earlier ones in place.
    pub fn from_fields<I, K>(kind: ObjectKind, convert: bool, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        let mut object = TypedObject {
            kind,
            fields: Vec::new(),
            convert,
            readonly: false,
        };
        for (name, field) in fields {
            let name = name.into();
            match object.fields.iter_mut().find(|(n, _)| *n == name) {
                Some((_, slot)) => *slot = field,
                None => object.fields.push((name, field)),
            }
        }
        object
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn converts(&self) -> bool {
        self.convert
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Set or clear the read-only flag on this object and everything below it.
    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        for (_, field) in &mut self.fields {
            field.set_readonly(readonly);
        }
    }

    pub(crate) fn relocate(&mut self, prefix: &str) {
        for (name, field) in &mut self.fields {
            field.relocate(&join(prefix, name));
        }
    }

    /// Deep clone with the read-only flag cleared: a live config built from a
    /// template instance.
    pub fn instantiate(&self) -> TypedObject {
        let mut live = self.clone();
        live.set_readonly(false);
        live
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Look up a field by dotted path. Numeric segments index into lists.
    pub fn get_path(&self, dotted: &str) -> Option<&Field> {
        let mut segments = dotted.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Field::Object(o) => o.get(segment)?,
                Field::List(l) => l.get(segment.parse().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Assign `value` to `name` through the field's own rule. Nested objects
    /// and lists merge `value` rather than being replaced.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PropsError> {
        if self.readonly {
            return Err(PropsError::ReadOnly(name.to_string()));
        }
        let convert = self.convert;
        let field = self
            .field_mut(name)
            .ok_or_else(|| PropsError::UnknownField(name.to_string()))?;
        let mut options = MergeOptions::strict().at(name);
        field.assign(&value.into(), convert, &mut options)
    }

    /// Assign through nested objects, e.g. `set_path("attribute.value.end", 5)`.
    pub fn set_path(&mut self, dotted: &str, value: impl Into<Value>) -> Result<(), PropsError> {
        let raw = overrides::nest(dotted, value.into());
        self.update(&raw)
    }

    pub fn object_mut(&mut self, name: &str) -> Result<&mut TypedObject, PropsError> {
        match self.handle_mut(name)? {
            Field::Object(o) => Ok(o),
            _ => Err(mismatch(name, "an object")),
        }
    }

    pub fn list_mut(&mut self, name: &str) -> Result<&mut TypedSequence, PropsError> {
        match self.handle_mut(name)? {
            Field::List(l) => Ok(l),
            _ => Err(mismatch(name, "a list")),
        }
    }

    pub fn enum_mut(&mut self, name: &str) -> Result<&mut TypedEnum, PropsError> {
        match self.handle_mut(name)? {
            Field::Select(e) => Ok(e),
            _ => Err(mismatch(name, "a select")),
        }
    }

    /// Strict merge: unknown keys are an error.
    pub fn update(&mut self, raw: &Value) -> Result<(), PropsError> {
        self.merge(raw, &mut MergeOptions::strict())
    }

    /// Project the raw mapping `raw` onto this object. See [`crate::merge`].
    pub fn merge(&mut self, raw: &Value, options: &mut MergeOptions<'_>) -> Result<(), PropsError> {
        if self.readonly {
            return Err(PropsError::ReadOnly(options.current()));
        }
        let Some(map) = raw.as_object() else {
            return Err(PropsError::Coercion {
                key: options.current(),
                expected: "object",
                value: raw.to_string(),
            });
        };
        let convert = self.convert;
        for (key, value) in map {
            let Some(field) = self.field_mut(key) else {
                options.unknown(key)?;
                continue;
            };
            options.descend(key, |o| field.assign(value, convert, o))?;
        }
        Ok(())
    }

    /// Merge dotted-key overrides such as `("attribute.value.end", 5)`.
    pub fn apply_overrides(
        &mut self,
        entries: &[(String, Value)],
        options: &mut MergeOptions<'_>,
    ) -> Result<(), PropsError> {
        let raw = Value::Object(overrides::overrides_to_map(entries));
        self.merge(&raw, options)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    fn handle_mut(&mut self, name: &str) -> Result<&mut Field, PropsError> {
        if self.readonly {
            return Err(PropsError::ReadOnly(name.to_string()));
        }
        self.field_mut(name)
            .ok_or_else(|| PropsError::UnknownField(name.to_string()))
    }
}

fn mismatch(name: &str, expected: &'static str) -> PropsError {
    PropsError::FieldKindMismatch {
        key: name.to_string(),
        expected,
    }
}
