use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The closed set of `type` tags a template node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Bool,
    Str,
    Int,
    Float,
    TimeDelta,
    Select,
    List,
    Object,
    Properties,
}

impl TypeTag {
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Bool,
        TypeTag::Str,
        TypeTag::Int,
        TypeTag::Float,
        TypeTag::TimeDelta,
        TypeTag::Select,
        TypeTag::List,
        TypeTag::Object,
        TypeTag::Properties,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Bool => "bool",
            TypeTag::Str => "str",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::TimeDelta => "timedelta",
            TypeTag::Select => "select",
            TypeTag::List => "list",
            TypeTag::Object => "object",
            TypeTag::Properties => "properties",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or(())
    }
}

/// Symbolic flavour of a [`TypedObject`](crate::TypedObject). All three share
/// one shape; the tag only records which template node produced the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Properties,
    Object,
    TimeDelta,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Properties => "properties",
            ObjectKind::Object => "object",
            ObjectKind::TimeDelta => "timedelta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_tag() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.as_str().parse::<TypeTag>(), Ok(tag));
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!("decimal".parse::<TypeTag>().is_err());
        assert!("Int".parse::<TypeTag>().is_err());
    }

    #[test]
    fn serde_names_match_display() {
        let tag: TypeTag = serde_json::from_str("\"timedelta\"").unwrap();
        assert_eq!(tag, TypeTag::TimeDelta);
        assert_eq!(tag.to_string(), "timedelta");
    }
}
