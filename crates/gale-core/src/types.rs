//! The eight JSON value shapes.

use std::fmt;

/// Type of a parsed JSON value.
///
/// Integers are classified by the engine from the literal's lexical form:
/// a value that fits `i64` is [`JsonType::Int64`], a positive value that
/// only fits `u64` is [`JsonType::Uint64`], and anything with a fraction
/// or exponent is [`JsonType::Double`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// The `null` literal.
    Null,
    /// `true` or `false`.
    Bool,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer above `i64::MAX`.
    Uint64,
    /// Double-precision float.
    Double,
    /// String.
    String,
    /// Array.
    Array,
    /// Object.
    Object,
}

impl JsonType {
    /// Whether this is one of the three numeric shapes.
    pub fn is_number(self) -> bool {
        matches!(self, Self::Int64 | Self::Uint64 | Self::Double)
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Double => "double",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_classification() {
        assert!(JsonType::Int64.is_number());
        assert!(JsonType::Uint64.is_number());
        assert!(JsonType::Double.is_number());
        assert!(!JsonType::String.is_number());
        assert!(!JsonType::Null.is_number());
    }

    #[test]
    fn display_names() {
        assert_eq!(JsonType::Object.to_string(), "object");
        assert_eq!(JsonType::Uint64.to_string(), "uint64");
    }
}
