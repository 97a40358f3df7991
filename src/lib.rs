//! Schema-driven, strongly-typed configuration trees. Describe the shape once,
//! get a typed tree that only accepts values fitting it.
//!
//! A remote service hands out a *template description* per type it manages:
//! field names, declared types, defaults and nested shapes, as plain JSON.
//! Typedprops compiles that description into a read-only *template
//! instance*, hands out live copies of it, and projects untrusted raw values
//! (a server response, a user edit) onto those copies with coercion, shape
//! checks and optional dropping of unknown keys.
//!
//! ```ignore
//! let template = typedprops::compile(&description)?;
//! let mut config = template.instantiate();
//! config.update(&server_response)?;
//! let body = config.to_value();
//! ```
//!
//! # Data flow
//!
//! ```text
//! template description ──compile──▶ template instance (read-only)
//!                                        │ instantiate()
//!                                        ▼
//!           raw mapping ──merge──▶ live config ──to_value()──▶ plain value
//! ```
//!
//! # Template descriptions
//!
//! Each field of a description is a node. A node without a `type` key is an
//! *inert* value, kept and replaced verbatim. Typed nodes use the tags
//! `bool`, `str`, `int`, `float`, `select`, `list`, `object`, `properties`
//! and `timedelta`, plus the attributes `default`, `template` (nested shape)
//! and `options` (the name → value domain of a `select`). See the
//! [`schema`] module for the full rules. Descriptions can also be compiled
//! from JSON or TOML text through [`Compiler`].
//!
//! # Fixed shape
//!
//! A [`TypedObject`] never gains or loses fields after compilation, and every
//! field keeps its kind:
//!
//! - **Scalars** convert assigned values to their declared kind (`9.7`
//!   assigned to an `int` becomes `9`) or fail with a coercion error.
//!   [`Settings::convert`] turns conversion off for strict typing.
//! - **Selects** ([`TypedEnum`]) always hold one member of their domain. An
//!   input selects the member it *is*, else the member it *names*, else the
//!   member whose *value* it equals. They read back, and serialize, as the
//!   member name.
//! - **Objects** merge assigned mappings field by field and keep their
//!   identity.
//! - **Lists** ([`TypedSequence`]) build each element from one element
//!   template. Merging a list **replaces it wholesale**: there is no
//!   positional or keyed matching against old elements.
//!
//! # Read-only templates
//!
//! [`compile`] returns a tree marked read-only, top to bottom. Any `set`,
//! `merge` or mutable handle on it fails with [`PropsError::ReadOnly`]. Call
//! [`TypedObject::instantiate`] for a deep copy with the flag cleared. That is
//! the only way to get a mutable config and also the only way to get one that
//! is independent of every other copy.
//!
//! # Unknown keys
//!
//! Merging is strict by default: a raw key outside the schema fails with
//! [`PropsError::UnknownField`], carrying its dotted path. With
//! [`MergeOptions::drop_unknown`] such keys are skipped instead, logged at
//! debug level and passed to the [`on_drop`](MergeOptions::on_drop)
//! callback once each. Merges are not atomic: keys applied before a failure
//! stay applied.
//!
//! # Dotted overrides
//!
//! [`overrides_to_map`] turns dotted `key = value` pairs into a raw mapping,
//! so overrides go through the same merge as any other raw config.
//!
//! # Error handling
//!
//! Every fallible operation returns [`PropsError`]. Use
//! [`PropsError::category`] to tell schema, shape, protection, coercion and
//! domain errors apart.

pub mod error;
pub mod merge;
pub mod schema;
pub mod types;

mod field;
mod object;
mod overrides;
mod scalar;
mod select;
mod sequence;
mod serialize;
mod settings;

#[cfg(test)]
mod fixtures;

pub use error::{ErrorCategory, PropsError};
pub use field::Field;
pub use merge::MergeOptions;
pub use object::TypedObject;
pub use overrides::{nest, overrides_to_map};
pub use scalar::{Scalar, ScalarKind};
pub use schema::{Compiler, compile};
pub use select::{EnumInput, Member, TypedEnum};
pub use sequence::TypedSequence;
pub use settings::Settings;
pub use types::{ObjectKind, TypeTag};
