//! The closed error vocabulary for parsing and value access.
//!
//! Every engine failure mode is mapped into [`ErrorCode`] before it crosses
//! any API boundary; no engine-internal error type ever escapes. The set is
//! two-tiered: parse-time codes are produced once and attached to a
//! `Document`, access-time codes are produced per navigation or extraction
//! call and never mutate the document they came from.

use std::fmt;

/// Result alias used across the Gale crates.
///
/// This is the non-throwing surface of every fallible operation: the same
/// code a checked call would propagate with `?` is carried in the `Err`
/// arm, so the two surfaces agree by construction.
pub type Result<T> = std::result::Result<T, ErrorCode>;

/// Closed set of failure codes for the binding layer.
///
/// Parse-time codes (see [`ErrorCode::is_parse_error`]) describe why an
/// input could not be turned into a document. Access-time codes describe
/// why a navigation or extraction call on a parsed value failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Input exceeds the parser's configured maximum capacity.
    Capacity,
    /// Nesting exceeds the engine's depth limit.
    DepthExceeded,
    /// Malformed structural JSON (misplaced or missing punctuation).
    TapeError,
    /// Invalid string contents (bad escape sequence or lone surrogate).
    StringError,
    /// Malformed `true` literal.
    TAtomError,
    /// Malformed `false` literal.
    FAtomError,
    /// Malformed `null` literal.
    NAtomError,
    /// Malformed number, or a literal whose magnitude no numeric type
    /// can represent.
    NumberError,
    /// Input is not valid UTF-8.
    Utf8Error,
    /// Empty input (or whitespace only).
    Empty,
    /// Unescaped control character inside a string.
    UnescapedChars,
    /// String not closed before end of input.
    UnclosedString,
    /// Extra content after the first complete document.
    TrailingContent,
    /// The value's type does not match the requested operation.
    IncorrectType,
    /// The value is numeric but does not fit the requested integer type.
    NumberOutOfRange,
    /// Array index is at or past the end of the array.
    IndexOutOfBounds,
    /// The object has no field with the requested key.
    NoSuchField,
    /// Operation on a null or never-initialized handle.
    Uninitialized,
    /// Internal invariant violation surfaced as an error.
    Unexpected,
    /// Engine condition with no mapping in this vocabulary.
    Unknown,
}

impl ErrorCode {
    /// Static human-readable message for this code. Never allocates.
    pub fn message(self) -> &'static str {
        match self {
            Self::Capacity => "document exceeds parser capacity",
            Self::DepthExceeded => "document exceeds depth limit",
            Self::TapeError => "malformed JSON structure",
            Self::StringError => "invalid string contents",
            Self::TAtomError => "invalid 'true' literal",
            Self::FAtomError => "invalid 'false' literal",
            Self::NAtomError => "invalid 'null' literal",
            Self::NumberError => "invalid number",
            Self::Utf8Error => "input is not valid UTF-8",
            Self::Empty => "empty input",
            Self::UnescapedChars => "unescaped control character in string",
            Self::UnclosedString => "unclosed string",
            Self::TrailingContent => "trailing content after document",
            Self::IncorrectType => "incorrect type for operation",
            Self::NumberOutOfRange => "number out of range for requested type",
            Self::IndexOutOfBounds => "array index out of bounds",
            Self::NoSuchField => "object field not found",
            Self::Uninitialized => "uninitialized handle",
            Self::Unexpected => "unexpected internal error",
            Self::Unknown => "unknown error",
        }
    }

    /// Whether this code belongs to the parse-time tier.
    ///
    /// Parse-time codes are produced once by `Parser::parse` and stored on
    /// the resulting document; everything else is produced per access call.
    pub fn is_parse_error(self) -> bool {
        matches!(
            self,
            Self::Capacity
                | Self::DepthExceeded
                | Self::TapeError
                | Self::StringError
                | Self::TAtomError
                | Self::FAtomError
                | Self::NAtomError
                | Self::NumberError
                | Self::Utf8Error
                | Self::Empty
                | Self::UnescapedChars
                | Self::UnclosedString
                | Self::TrailingContent
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ErrorCode {}
