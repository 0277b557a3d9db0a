use std::fmt;

use serde::Serialize;

/// The closed set of runtime type tags every [`crate`]-level `Value`
/// carries. Also doubles as the vocabulary for `variable x: <tag> = ...`
/// and function parameter/return type annotations, matching the Spanish
/// tag names the source language uses (`entero`, `decimal`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Integer,
    Decimal,
    String,
    Boolean,
    Null,
    List,
    Dict,
    Function,
    Html,
    Css,
}

impl TypeTag {
    /// Parse a declared-type annotation identifier (`entero`, `cadena`, ...)
    /// into its tag, or `None` if it names no known tag.
    pub fn from_annotation(name: &str) -> Option<Self> {
        Some(match name {
            "entero" => Self::Integer,
            "decimal" => Self::Decimal,
            "cadena" => Self::String,
            "booleano" => Self::Boolean,
            "nulo" => Self::Null,
            "lista" => Self::List,
            "diccionario" => Self::Dict,
            "funcion" => Self::Function,
            "html" => Self::Html,
            "css" => Self::Css,
            _ => return None,
        })
    }

    /// Whether this tag is a legal dictionary key type
    /// (`integer`, `decimal`, `string`, `boolean`).
    pub fn is_valid_dict_key(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Decimal | Self::String | Self::Boolean
        )
    }

    /// Whether this tag is one of the two numeric tags.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "entero",
            Self::Decimal => "decimal",
            Self::String => "cadena",
            Self::Boolean => "booleano",
            Self::Null => "nulo",
            Self::List => "lista",
            Self::Dict => "diccionario",
            Self::Function => "funcion",
            Self::Html => "html",
            Self::Css => "css",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_annotation_names() {
        for tag in [
            TypeTag::Integer,
            TypeTag::Decimal,
            TypeTag::String,
            TypeTag::Boolean,
            TypeTag::Null,
            TypeTag::List,
            TypeTag::Dict,
            TypeTag::Function,
            TypeTag::Html,
            TypeTag::Css,
        ] {
            assert_eq!(TypeTag::from_annotation(&tag.to_string()), Some(tag));
        }
    }

    #[test]
    fn unknown_annotation_is_none() {
        assert_eq!(TypeTag::from_annotation("no-existe"), None);
    }

    #[test]
    fn dict_key_validity() {
        assert!(TypeTag::Integer.is_valid_dict_key());
        assert!(TypeTag::String.is_valid_dict_key());
        assert!(!TypeTag::List.is_valid_dict_key());
        assert!(!TypeTag::Null.is_valid_dict_key());
    }
}
