//! Homogeneous, type-enforced sequences built from one element template.

use serde_json::Value;

use crate::error::PropsError;
use crate::field::Field;
use crate::merge::{MergeOptions, join};
use crate::object::TypedObject;

/// An ordered list whose elements are all clones of one element template,
/// each assigned its raw value on the way in.
///
/// A sequence remembers its dotted path in the tree it was compiled into, so
/// errors from direct `push`/`insert`/`set` calls name the field.
#[derive(Debug, Clone)]
pub struct TypedSequence {
    element: Box<Field>,
    items: Vec<Field>,
    convert: bool,
    noset: bool,
    readonly: bool,
    path: String,
}

impl PartialEq for TypedSequence {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
            && self.items == other.items
            && self.convert == other.convert
            && self.noset == other.noset
            && self.readonly == other.readonly
    }
}

impl TypedSequence {
    pub fn new(element: impl Into<Field>, convert: bool) -> Self {
        let mut element = element.into();
        element.set_readonly(false);
        TypedSequence {
            element: Box::new(element),
            items: Vec::new(),
            convert,
            noset: false,
            readonly: false,
            path: String::new(),
        }
    }

    /// Dotted path of this sequence, empty when it is not part of a tree.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Stamp `path` on this sequence and everything nested in its elements.
    pub(crate) fn relocate(&mut self, path: &str) {
        self.path = path.to_string();
        for (i, item) in self.items.iter_mut().enumerate() {
            item.relocate(&join(path, &i.to_string()));
        }
    }

    /// Forbid replacing elements in place; appends and inserts still work.
    pub fn with_noset(mut self, noset: bool) -> Self {
        self.noset = noset;
        self
    }

    pub fn is_noset(&self) -> bool {
        self.noset
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        for item in &mut self.items {
            item.set_readonly(readonly);
        }
    }

    /// The template every element is cloned from.
    pub fn element(&self) -> &Field {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.items.iter()
    }

    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), PropsError> {
        let mut options = self.options();
        self.push_with(&value.into(), &mut options)
    }

    pub fn extend<I>(&mut self, values: I) -> Result<(), PropsError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self.push(value)?;
        }
        Ok(())
    }

    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<(), PropsError> {
        let mut options = self.options();
        self.guard(&options)?;
        if index > self.items.len() {
            return Err(self.out_of_range(&options, index));
        }
        let item = self.build(index, &value.into(), &mut options)?;
        self.items.insert(index, item);
        self.renumber();
        Ok(())
    }

    /// Replace the element at `index`. Refused when the sequence is `noset`.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<(), PropsError> {
        let mut options = self.options();
        self.guard(&options)?;
        if self.noset {
            return Err(PropsError::NoSet(options.current()));
        }
        if index >= self.items.len() {
            return Err(self.out_of_range(&options, index));
        }
        let item = self.build(index, &value.into(), &mut options)?;
        self.items[index] = item;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Field, PropsError> {
        let options = self.options();
        self.guard(&options)?;
        if index >= self.items.len() {
            return Err(self.out_of_range(&options, index));
        }
        let removed = self.items.remove(index);
        self.renumber();
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), PropsError> {
        self.guard(&self.options())?;
        self.items.clear();
        Ok(())
    }

    /// Live handle to an object element.
    pub fn object_mut(&mut self, index: usize) -> Result<&mut TypedObject, PropsError> {
        let options = self.options();
        self.guard(&options)?;
        let len = self.items.len();
        let key = join(&self.path, &index.to_string());
        match self.items.get_mut(index) {
            Some(Field::Object(o)) => Ok(o),
            Some(_) => Err(PropsError::FieldKindMismatch {
                key,
                expected: "an object",
            }),
            None => Err(PropsError::IndexOutOfRange {
                key: options.current(),
                index,
                len,
            }),
        }
    }

    /// Replace the whole contents with elements built from `raw`, which must
    /// be an array. Elements are never matched against the old contents.
    pub fn merge(&mut self, raw: &Value, options: &mut MergeOptions<'_>) -> Result<(), PropsError> {
        self.guard(options)?;
        let Some(values) = raw.as_array() else {
            return Err(PropsError::Coercion {
                key: options.current(),
                expected: "list",
                value: raw.to_string(),
            });
        };
        self.items.clear();
        for value in values {
            self.push_with(value, options)?;
        }
        Ok(())
    }

    fn push_with(&mut self, raw: &Value, options: &mut MergeOptions<'_>) -> Result<(), PropsError> {
        self.guard(options)?;
        let item = self.build(self.items.len(), raw, options)?;
        self.items.push(item);
        Ok(())
    }

    /// A fresh element for position `index`, built from the element template.
    fn build(
        &self,
        index: usize,
        raw: &Value,
        options: &mut MergeOptions<'_>,
    ) -> Result<Field, PropsError> {
        let segment = index.to_string();
        let mut item = (*self.element).clone();
        options.descend(&segment, |o| item.assign(raw, self.convert, o))?;
        item.relocate(&join(&self.path, &segment));
        Ok(item)
    }

    fn options(&self) -> MergeOptions<'static> {
        if self.path.is_empty() {
            MergeOptions::strict()
        } else {
            MergeOptions::strict().at(&self.path)
        }
    }

    fn renumber(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.relocate(&path);
    }

    fn guard(&self, options: &MergeOptions<'_>) -> Result<(), PropsError> {
        if self.readonly {
            return Err(PropsError::ReadOnly(options.current()));
        }
        Ok(())
    }

    fn out_of_range(&self, options: &MergeOptions<'_>, index: usize) -> PropsError {
        PropsError::IndexOutOfRange {
            key: options.current(),
            index,
            len: self.items.len(),
        }
    }
}

impl<'a> IntoIterator for &'a TypedSequence {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
