//! Template compilation: raw template descriptions to read-only typed trees.
//!
//! A description is a mapping from field name to node. A node without a
//! string `type` is an inert value kept verbatim. A typed node dispatches on its
//! tag:
//!
//! | tag | result |
//! |-----|--------|
//! | `bool` `str` `int` `float` | scalar from `default`, or the kind's zero |
//! | `object` `properties` `timedelta` | nested object compiled from `template` |
//! | `select` | enum over `options`, selecting `default` or the first option |
//! | `list` | sequence of `template` elements, filled from `default` |
//!
//! A list `template` without its own `type` is treated as an `object`
//! template. Attributes other than `type`, `default`, `template` and
//! `options` are logged and ignored.
//!
//! Compilation is all-or-nothing: the first malformed node fails the whole
//! description.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PropsError;
use crate::field::Field;
use crate::merge::{MergeOptions, join};
use crate::object::TypedObject;
use crate::scalar::ScalarKind;
use crate::select::{EnumInput, TypedEnum};
use crate::sequence::TypedSequence;
use crate::settings::Settings;
use crate::types::{ObjectKind, TypeTag};

/// The recognised attributes of a typed node.
#[derive(Debug, Deserialize)]
struct NodeSpec {
    #[serde(rename = "type")]
    tag: TypeTag,
    default: Option<Value>,
    template: Option<Value>,
    options: Option<Map<String, Value>>,
}

/// Compiles template descriptions with a fixed set of [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    settings: Settings,
}

/// Compile `description` with default settings.
pub fn compile(description: &Value) -> Result<TypedObject, PropsError> {
    Compiler::default().compile(description)
}

impl Compiler {
    pub fn new(settings: Settings) -> Self {
        Compiler { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compile a description into a read-only template instance.
    pub fn compile(&self, description: &Value) -> Result<TypedObject, PropsError> {
        let fields = description
            .as_object()
            .ok_or_else(|| invalid("<root>", "template description must be a mapping"))?;
        let mut object = self.compile_fields(fields, "", ObjectKind::Properties)?;
        object.set_readonly(true);
        tracing::debug!(fields = object.len(), "compiled template");
        Ok(object)
    }

    /// Compile a JSON-encoded description.
    pub fn compile_json(&self, text: &str) -> Result<TypedObject, PropsError> {
        let description: Value = serde_json::from_str(text)?;
        self.compile(&description)
    }

    /// Compile a TOML-encoded description.
    pub fn compile_toml(&self, text: &str) -> Result<TypedObject, PropsError> {
        let table: toml::Table = toml::from_str(text)?;
        let description = serde_json::to_value(table)?;
        self.compile(&description)
    }

    fn compile_fields(
        &self,
        fields: &Map<String, Value>,
        prefix: &str,
        kind: ObjectKind,
    ) -> Result<TypedObject, PropsError> {
        let compiled = fields
            .iter()
            .map(|(name, node)| {
                let path = join(prefix, name);
                self.compile_node(node, &path).map(|f| (name.clone(), f))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypedObject::from_fields(kind, self.settings.convert, compiled))
    }

    fn compile_node(&self, node: &Value, path: &str) -> Result<Field, PropsError> {
        let Some(tag) = type_tag(node) else {
            return Ok(Field::Inert(node.clone()));
        };
        if tag.parse::<TypeTag>().is_err() {
            return Err(PropsError::UnknownType {
                path: path.to_string(),
                tag: tag.to_string(),
            });
        }
        let spec = parse_spec(node, path)?;

        match spec.tag {
            TypeTag::Bool => self.scalar(ScalarKind::Bool, spec.default, path),
            TypeTag::Str => self.scalar(ScalarKind::Str, spec.default, path),
            TypeTag::Int => self.scalar(ScalarKind::Int, spec.default, path),
            TypeTag::Float => self.scalar(ScalarKind::Float, spec.default, path),
            TypeTag::TimeDelta => self.object(ObjectKind::TimeDelta, spec, path),
            TypeTag::Object => self.object(ObjectKind::Object, spec, path),
            TypeTag::Properties => self.object(ObjectKind::Properties, spec, path),
            TypeTag::Select => self.select(spec, path),
            TypeTag::List => self.list(spec, path),
        }
    }

    fn scalar(
        &self,
        kind: ScalarKind,
        default: Option<Value>,
        path: &str,
    ) -> Result<Field, PropsError> {
        let Some(raw) = default else {
            return Ok(Field::Scalar(kind.zero()));
        };
        kind.coerce(&raw, self.settings.convert)
            .map(Field::Scalar)
            .ok_or_else(|| {
                invalid_default(
                    path,
                    PropsError::Coercion {
                        key: path.to_string(),
                        expected: kind.as_str(),
                        value: raw.to_string(),
                    },
                )
            })
    }

    fn object(&self, kind: ObjectKind, spec: NodeSpec, path: &str) -> Result<Field, PropsError> {
        let template = required_template(&spec, path)?;
        let fields = template
            .as_object()
            .ok_or_else(|| invalid(path, "'template' must be a mapping"))?;
        let mut object = self.compile_fields(fields, path, kind)?;
        if let Some(default) = &spec.default {
            object
                .merge(default, &mut MergeOptions::strict().at(path))
                .map_err(|e| invalid_default(path, e))?;
        }
        Ok(Field::Object(object))
    }

    fn select(&self, spec: NodeSpec, path: &str) -> Result<Field, PropsError> {
        let options = spec
            .options
            .as_ref()
            .ok_or_else(|| invalid(path, "select requires 'options'"))?;
        let mut select = TypedEnum::from_options(options).map_err(|reason| invalid(path, reason))?;
        if let Some(default) = &spec.default {
            select
                .select_at(path, EnumInput::Raw(default))
                .map_err(|e| invalid_default(path, e))?;
        }
        Ok(Field::Select(select))
    }

    fn list(&self, spec: NodeSpec, path: &str) -> Result<Field, PropsError> {
        let template = required_template(&spec, path)?;
        let element_node = match template {
            Value::Object(_) if type_tag(template).is_none() => {
                let mut wrapped = Map::new();
                wrapped.insert("type".into(), Value::from(TypeTag::Object.as_str()));
                wrapped.insert("template".into(), template.clone());
                Value::Object(wrapped)
            }
            Value::Object(_) => template.clone(),
            _ => return Err(invalid(path, "'template' must be a mapping")),
        };
        let element = self.compile_node(&element_node, &join(path, "template"))?;
        let mut sequence = TypedSequence::new(element, self.settings.convert);
        sequence.relocate(path);
        if let Some(default) = &spec.default {
            sequence
                .merge(default, &mut MergeOptions::strict().at(path))
                .map_err(|e| invalid_default(path, e))?;
        }
        Ok(Field::List(sequence))
    }
}

/// Deserialize the recognised attributes, logging any others.
/// The node's type tag. Only a string `type` counts: a mapping under `type`
/// is a field of that name, not a tag.
fn type_tag(node: &Value) -> Option<&str> {
    node.as_object()?.get("type")?.as_str()
}

fn parse_spec(node: &Value, path: &str) -> Result<NodeSpec, PropsError> {
    let mut ignored: Vec<String> = Vec::new();
    let spec: NodeSpec = serde_ignored::deserialize(node.clone(), |attr| {
        ignored.push(attr.to_string());
    })
    .map_err(|e| invalid(path, e.to_string()))?;
    for attr in ignored {
        tracing::debug!(path, attr = %attr, "ignoring template attribute");
    }
    Ok(spec)
}

fn required_template<'a>(spec: &'a NodeSpec, path: &str) -> Result<&'a Value, PropsError> {
    spec.template
        .as_ref()
        .ok_or_else(|| invalid(path, format!("{} requires 'template'", spec.tag)))
}

fn invalid(path: &str, reason: impl Into<String>) -> PropsError {
    PropsError::InvalidTemplate {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn invalid_default(path: &str, source: PropsError) -> PropsError {
    PropsError::InvalidDefault {
        path: path.to_string(),
        source: Box::new(source),
    }
}
