use thiserror::Error;

/// Broad class of a [`PropsError`], useful when callers only care about
/// which contract was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The template description itself is malformed.
    Schema,
    /// A key or index does not exist in the fixed shape.
    Shape,
    /// A mutation was attempted on a protected tree or sequence.
    Protection,
    /// A scalar could not be converted to its declared kind.
    Coercion,
    /// A value matched no member of an enum domain.
    Domain,
}

#[derive(Debug, Error)]
pub enum PropsError {
    #[error("Unknown type '{tag}' at '{path}'")]
    UnknownType { path: String, tag: String },

    #[error("Invalid template at '{path}': {reason}")]
    InvalidTemplate { path: String, reason: String },

    #[error("Invalid default at '{path}': {source}")]
    InvalidDefault {
        path: String,
        source: Box<PropsError>,
    },

    #[error("Failed to parse TOML template: {0}")]
    TemplateToml(#[from] toml::de::Error),

    #[error("Failed to parse JSON template: {0}")]
    TemplateJson(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{key}' is not {expected}")]
    FieldKindMismatch { key: String, expected: &'static str },

    #[error("Index {index} out of range for '{key}' (length {len})")]
    IndexOutOfRange { key: String, index: usize, len: usize },

    #[error("Cannot modify '{0}': config is read-only")]
    ReadOnly(String),

    #[error("Cannot replace elements of '{0}': sequence only allows appends")]
    NoSet(String),

    #[error("Cannot convert {value} to {expected} for '{key}'")]
    Coercion {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("{value} is not an option of '{key}' (expected one of: {})", .names.join(", "))]
    NotInDomain {
        key: String,
        value: String,
        names: Vec<String>,
    },
}

impl PropsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PropsError::UnknownType { .. }
            | PropsError::InvalidTemplate { .. }
            | PropsError::InvalidDefault { .. }
            | PropsError::TemplateToml(_)
            | PropsError::TemplateJson(_)
            | PropsError::Settings(_) => ErrorCategory::Schema,
            PropsError::UnknownField(_)
            | PropsError::FieldKindMismatch { .. }
            | PropsError::IndexOutOfRange { .. } => ErrorCategory::Shape,
            PropsError::ReadOnly(_) | PropsError::NoSet(_) => ErrorCategory::Protection,
            PropsError::Coercion { .. } => ErrorCategory::Coercion,
            PropsError::NotInDomain { .. } => ErrorCategory::Domain,
        }
    }
}
