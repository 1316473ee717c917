//! Number scanning and classification.
//!
//! A literal's lexical form decides its shape: a fraction or exponent makes
//! it a double, otherwise it is an integer classified as `i64` when it
//! fits and `u64` when only the unsigned range can hold it. Magnitudes no
//! 64-bit type can represent, and floats that overflow to infinity, are
//! `NumberError` — never silently truncated.

use gale_core::{ErrorCode, Result};

use crate::tape::Node;

/// A classified numeric literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub(crate) fn into_node(self) -> Node {
        match self {
            Self::I64(v) => Node::Int64(v),
            Self::U64(v) => Node::Uint64(v),
            Self::F64(v) => Node::Double(v),
        }
    }
}

/// True for the bytes allowed to terminate a number literal.
fn is_terminator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}')
}

/// Scan the literal starting at `start`, returning the classified value
/// and the position one past it.
pub(crate) fn scan_number(bytes: &[u8], start: usize) -> Result<(Number, usize)> {
    let len = bytes.len();
    let mut i = start;

    let negative = bytes[i] == b'-';
    if negative {
        i += 1;
    }
    let digits_start = i;

    match bytes.get(i) {
        // A leading zero must stand alone.
        Some(b'0') => {
            i += 1;
            if matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
                return Err(ErrorCode::NumberError);
            }
        }
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
                i += 1;
            }
        }
        _ => return Err(ErrorCode::NumberError),
    }
    let digits_end = i;

    let mut is_float = false;
    if bytes.get(i) == Some(&b'.') {
        is_float = true;
        i += 1;
        if !matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            return Err(ErrorCode::NumberError);
        }
        while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        is_float = true;
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        if !matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            return Err(ErrorCode::NumberError);
        }
        while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            i += 1;
        }
    }

    if i < len && !is_terminator(bytes[i]) {
        return Err(ErrorCode::NumberError);
    }

    if is_float {
        // The scanned range is ASCII by construction.
        let text =
            std::str::from_utf8(&bytes[start..i]).map_err(|_| ErrorCode::Unexpected)?;
        let value: f64 = text.parse().map_err(|_| ErrorCode::NumberError)?;
        if !value.is_finite() {
            return Err(ErrorCode::NumberError);
        }
        return Ok((Number::F64(value), i));
    }

    let mut magnitude: u64 = 0;
    for &d in &bytes[digits_start..digits_end] {
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(u64::from(d - b'0')))
            .ok_or(ErrorCode::NumberError)?;
    }

    let number = if negative {
        const MIN_MAGNITUDE: u64 = i64::MAX as u64 + 1;
        if magnitude > MIN_MAGNITUDE {
            return Err(ErrorCode::NumberError);
        } else if magnitude == MIN_MAGNITUDE {
            Number::I64(i64::MIN)
        } else {
            Number::I64(-(magnitude as i64))
        }
    } else if magnitude <= i64::MAX as u64 {
        Number::I64(magnitude as i64)
    } else {
        Number::U64(magnitude)
    };
    Ok((number, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(s: &str) -> Result<Number> {
        scan_number(s.as_bytes(), 0).map(|(n, _)| n)
    }

    #[test]
    fn integer_classification() {
        assert_eq!(scan("0"), Ok(Number::I64(0)));
        assert_eq!(scan("42"), Ok(Number::I64(42)));
        assert_eq!(scan("-7"), Ok(Number::I64(-7)));
        assert_eq!(
            scan("9223372036854775807"),
            Ok(Number::I64(i64::MAX))
        );
        assert_eq!(
            scan("9223372036854775808"),
            Ok(Number::U64(i64::MAX as u64 + 1))
        );
        assert_eq!(
            scan("18446744073709551615"),
            Ok(Number::U64(u64::MAX))
        );
    }

    #[test]
    fn signed_boundary() {
        assert_eq!(
            scan("-9223372036854775808"),
            Ok(Number::I64(i64::MIN))
        );
        assert_eq!(
            scan("-9223372036854775809"),
            Err(ErrorCode::NumberError)
        );
    }

    #[test]
    fn unsigned_overflow_is_an_error() {
        assert_eq!(
            scan("18446744073709551616"),
            Err(ErrorCode::NumberError)
        );
    }

    #[test]
    fn float_forms() {
        assert_eq!(scan("1.5"), Ok(Number::F64(1.5)));
        assert_eq!(scan("-0.25"), Ok(Number::F64(-0.25)));
        assert_eq!(scan("1e3"), Ok(Number::F64(1000.0)));
        assert_eq!(scan("2E-2"), Ok(Number::F64(0.02)));
        assert_eq!(scan("1e999"), Err(ErrorCode::NumberError));
    }

    #[test]
    fn malformed_literals() {
        assert_eq!(scan("-"), Err(ErrorCode::NumberError));
        assert_eq!(scan("01"), Err(ErrorCode::NumberError));
        assert_eq!(scan("1."), Err(ErrorCode::NumberError));
        assert_eq!(scan("1e"), Err(ErrorCode::NumberError));
        assert_eq!(scan("1e+"), Err(ErrorCode::NumberError));
        assert_eq!(scan("1.2.3"), Err(ErrorCode::NumberError));
        assert_eq!(scan("12abc"), Err(ErrorCode::NumberError));
    }

    #[test]
    fn terminators_end_the_literal() {
        let (n, next) = scan_number(b"12,", 0).unwrap();
        assert_eq!(n, Number::I64(12));
        assert_eq!(next, 2);
        let (n, next) = scan_number(b"3]", 0).unwrap();
        assert_eq!(n, Number::I64(3));
        assert_eq!(next, 1);
    }
}
