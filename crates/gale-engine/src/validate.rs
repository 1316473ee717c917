//! Structural validation without building a tape.
//!
//! Same grammar, same scanners, same error codes as the parser, but no
//! node or string output. Cheaper than a full parse when the caller only
//! wants a verdict.

use gale_core::{ErrorCode, Result};
use smallvec::SmallVec;

use crate::number::scan_number;
use crate::parse::skip_ws;
use crate::text::scan_string;
use crate::DEFAULT_MAX_DEPTH;

#[derive(Clone, Copy, Debug)]
enum Container {
    Array,
    Object,
}

/// Check that `src` is one complete, well-formed JSON document.
///
/// Returns the same error code a full parse of the same input would.
pub fn validate(src: &[u8]) -> Result<()> {
    let text = std::str::from_utf8(src).map_err(|_| ErrorCode::Utf8Error)?;
    let bytes = text.as_bytes();
    let mut stack: SmallVec<[Container; 64]> = SmallVec::new();

    let mut pos = skip_ws(bytes, 0);
    if pos == bytes.len() {
        return Err(ErrorCode::Empty);
    }

    'value: loop {
        match bytes[pos] {
            b'{' => {
                if stack.len() >= DEFAULT_MAX_DEPTH {
                    return Err(ErrorCode::DepthExceeded);
                }
                pos = skip_ws(bytes, pos + 1);
                match bytes.get(pos) {
                    Some(b'}') => pos += 1,
                    Some(b'"') => {
                        stack.push(Container::Object);
                        pos = check_key(text, pos)?;
                        continue 'value;
                    }
                    _ => return Err(ErrorCode::TapeError),
                }
            }
            b'[' => {
                if stack.len() >= DEFAULT_MAX_DEPTH {
                    return Err(ErrorCode::DepthExceeded);
                }
                pos = skip_ws(bytes, pos + 1);
                match bytes.get(pos) {
                    Some(b']') => pos += 1,
                    Some(_) => {
                        stack.push(Container::Array);
                        continue 'value;
                    }
                    None => return Err(ErrorCode::TapeError),
                }
            }
            b'"' => {
                let (_span, next) = scan_string(text, pos + 1, None)?;
                pos = next;
            }
            b't' | b'f' | b'n' => {
                pos = check_atom(bytes, pos)?;
            }
            b'-' | b'0'..=b'9' => {
                let (_number, next) = scan_number(bytes, pos)?;
                pos = next;
            }
            _ => return Err(ErrorCode::TapeError),
        }

        loop {
            pos = skip_ws(bytes, pos);
            let Some(container) = stack.last() else {
                if pos != bytes.len() {
                    return Err(ErrorCode::TrailingContent);
                }
                return Ok(());
            };
            match container {
                Container::Array => match bytes.get(pos) {
                    Some(b',') => {
                        pos = skip_ws(bytes, pos + 1);
                        if pos >= bytes.len() {
                            return Err(ErrorCode::TapeError);
                        }
                        continue 'value;
                    }
                    Some(b']') => {
                        stack.pop();
                        pos += 1;
                    }
                    _ => return Err(ErrorCode::TapeError),
                },
                Container::Object => match bytes.get(pos) {
                    Some(b',') => {
                        pos = skip_ws(bytes, pos + 1);
                        if bytes.get(pos) != Some(&b'"') {
                            return Err(ErrorCode::TapeError);
                        }
                        pos = check_key(text, pos)?;
                        continue 'value;
                    }
                    Some(b'}') => {
                        stack.pop();
                        pos += 1;
                    }
                    _ => return Err(ErrorCode::TapeError),
                },
            }
        }
    }
}

/// Scan a key and colon; `pos` is at the opening quote. Returns the
/// position of the value's first byte.
fn check_key(text: &str, pos: usize) -> Result<usize> {
    let bytes = text.as_bytes();
    let (_span, after_key) = scan_string(text, pos + 1, None)?;
    let colon = skip_ws(bytes, after_key);
    if bytes.get(colon) != Some(&b':') {
        return Err(ErrorCode::TapeError);
    }
    let value = skip_ws(bytes, colon + 1);
    if value >= bytes.len() {
        return Err(ErrorCode::TapeError);
    }
    Ok(value)
}

fn check_atom(bytes: &[u8], pos: usize) -> Result<usize> {
    let (literal, code): (&[u8], ErrorCode) = match bytes[pos] {
        b't' => (b"true", ErrorCode::TAtomError),
        b'f' => (b"false", ErrorCode::FAtomError),
        _ => (b"null", ErrorCode::NAtomError),
    };
    let end = pos + literal.len();
    let terminated = match bytes.get(end) {
        None => true,
        Some(b) => matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}'),
    };
    if !bytes[pos..].starts_with(literal) || !terminated {
        return Err(code);
    }
    Ok(end)
}
