//! C-compatible status codes.
//!
//! [`GaleStatus`] is the single result type of the C surface: `Ok` is 0,
//! every failure is negative, and the values are ABI-stable. The first
//! block mirrors the library's error codes one-to-one; the tail covers
//! conditions that only exist at the boundary (bad handles, bad
//! arguments, poisoned state, caught panics).

use gale_core::ErrorCode;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaleStatus {
    /// Success.
    Ok = 0,
    /// Input exceeds the parser's capacity bound.
    Capacity = -1,
    /// Nesting exceeds the depth limit.
    DepthExceeded = -2,
    /// Structurally malformed document.
    TapeError = -3,
    /// Invalid escape sequence or lone surrogate in a string.
    StringError = -4,
    /// Malformed `true` literal.
    TAtomError = -5,
    /// Malformed `false` literal.
    FAtomError = -6,
    /// Malformed `null` literal.
    NAtomError = -7,
    /// Malformed or unrepresentable number literal.
    NumberError = -8,
    /// Input is not valid UTF-8.
    Utf8Error = -9,
    /// Empty or whitespace-only input.
    Empty = -10,
    /// Unescaped control byte inside a string.
    UnescapedChars = -11,
    /// Input ended inside a string literal.
    UnclosedString = -12,
    /// Bytes remain after the first complete document.
    TrailingContent = -13,
    /// The value's shape does not match the requested extraction.
    IncorrectType = -14,
    /// A numeric value exists but does not fit the requested type.
    NumberOutOfRange = -15,
    /// Array index past the end.
    IndexOutOfBounds = -16,
    /// No field with the requested name.
    NoSuchField = -17,
    /// Operation on an uninitialized or out-of-range value.
    Uninitialized = -18,
    /// Internal invariant violation.
    Unexpected = -19,
    /// Unclassified error.
    Unknown = -20,
    /// Handle is invalid or was already freed.
    InvalidHandle = -21,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -22,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -23,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<ErrorCode> for GaleStatus {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Capacity => GaleStatus::Capacity,
            ErrorCode::DepthExceeded => GaleStatus::DepthExceeded,
            ErrorCode::TapeError => GaleStatus::TapeError,
            ErrorCode::StringError => GaleStatus::StringError,
            ErrorCode::TAtomError => GaleStatus::TAtomError,
            ErrorCode::FAtomError => GaleStatus::FAtomError,
            ErrorCode::NAtomError => GaleStatus::NAtomError,
            ErrorCode::NumberError => GaleStatus::NumberError,
            ErrorCode::Utf8Error => GaleStatus::Utf8Error,
            ErrorCode::Empty => GaleStatus::Empty,
            ErrorCode::UnescapedChars => GaleStatus::UnescapedChars,
            ErrorCode::UnclosedString => GaleStatus::UnclosedString,
            ErrorCode::TrailingContent => GaleStatus::TrailingContent,
            ErrorCode::IncorrectType => GaleStatus::IncorrectType,
            ErrorCode::NumberOutOfRange => GaleStatus::NumberOutOfRange,
            ErrorCode::IndexOutOfBounds => GaleStatus::IndexOutOfBounds,
            ErrorCode::NoSuchField => GaleStatus::NoSuchField,
            ErrorCode::Uninitialized => GaleStatus::Uninitialized,
            ErrorCode::Unexpected => GaleStatus::Unexpected,
            ErrorCode::Unknown => GaleStatus::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(GaleStatus::Ok as i32, 0);
        assert_eq!(GaleStatus::Capacity as i32, -1);
        assert_eq!(GaleStatus::DepthExceeded as i32, -2);
        assert_eq!(GaleStatus::TapeError as i32, -3);
        assert_eq!(GaleStatus::StringError as i32, -4);
        assert_eq!(GaleStatus::TAtomError as i32, -5);
        assert_eq!(GaleStatus::FAtomError as i32, -6);
        assert_eq!(GaleStatus::NAtomError as i32, -7);
        assert_eq!(GaleStatus::NumberError as i32, -8);
        assert_eq!(GaleStatus::Utf8Error as i32, -9);
        assert_eq!(GaleStatus::Empty as i32, -10);
        assert_eq!(GaleStatus::UnescapedChars as i32, -11);
        assert_eq!(GaleStatus::UnclosedString as i32, -12);
        assert_eq!(GaleStatus::TrailingContent as i32, -13);
        assert_eq!(GaleStatus::IncorrectType as i32, -14);
        assert_eq!(GaleStatus::NumberOutOfRange as i32, -15);
        assert_eq!(GaleStatus::IndexOutOfBounds as i32, -16);
        assert_eq!(GaleStatus::NoSuchField as i32, -17);
        assert_eq!(GaleStatus::Uninitialized as i32, -18);
        assert_eq!(GaleStatus::Unexpected as i32, -19);
        assert_eq!(GaleStatus::Unknown as i32, -20);
        assert_eq!(GaleStatus::InvalidHandle as i32, -21);
        assert_eq!(GaleStatus::InvalidArgument as i32, -22);
        assert_eq!(GaleStatus::InternalError as i32, -23);
    }

    #[test]
    fn panicked_status_is_negative_128() {
        assert_eq!(GaleStatus::Panicked as i32, -128);
    }

    #[test]
    fn every_error_code_maps_distinctly() {
        let codes = [
            ErrorCode::Capacity,
            ErrorCode::DepthExceeded,
            ErrorCode::TapeError,
            ErrorCode::StringError,
            ErrorCode::TAtomError,
            ErrorCode::FAtomError,
            ErrorCode::NAtomError,
            ErrorCode::NumberError,
            ErrorCode::Utf8Error,
            ErrorCode::Empty,
            ErrorCode::UnescapedChars,
            ErrorCode::UnclosedString,
            ErrorCode::TrailingContent,
            ErrorCode::IncorrectType,
            ErrorCode::NumberOutOfRange,
            ErrorCode::IndexOutOfBounds,
            ErrorCode::NoSuchField,
            ErrorCode::Uninitialized,
            ErrorCode::Unexpected,
            ErrorCode::Unknown,
        ];
        let mut seen = Vec::new();
        for code in codes {
            let status = GaleStatus::from(code) as i32;
            assert!(status < 0);
            assert!(!seen.contains(&status), "duplicate mapping for {code:?}");
            seen.push(status);
        }
    }
}
