//! String scanning and unescaping.
//!
//! The scanner copies plain segments wholesale and decodes escapes one at
//! a time into the destination arena. The validator passes `None` as the
//! destination and gets the same error behavior with no copying. Input is
//! already known to be valid UTF-8 (the parser validates the whole buffer
//! up front), so plain segments are sliced as `&str` directly.

use gale_core::{ErrorCode, Result};

use crate::tape::StrSpan;

/// Scan a string body starting just after the opening quote.
///
/// Returns the span of the unescaped contents within `dest` (zero span
/// when `dest` is `None`) and the position one past the closing quote.
pub(crate) fn scan_string(
    text: &str,
    start: usize,
    mut dest: Option<&mut String>,
) -> Result<(StrSpan, usize)> {
    let bytes = text.as_bytes();
    let base = dest.as_deref().map(String::len).unwrap_or(0);
    let mut i = start;
    let mut seg = start;

    loop {
        let Some(&b) = bytes.get(i) else {
            return Err(ErrorCode::UnclosedString);
        };
        match b {
            b'"' => {
                flush(text, seg, i, &mut dest);
                let len = dest.as_deref().map(String::len).unwrap_or(0) - base;
                let span = StrSpan {
                    off: base as u32,
                    len: len as u32,
                };
                return Ok((span, i + 1));
            }
            b'\\' => {
                flush(text, seg, i, &mut dest);
                let (ch, next) = scan_escape(bytes, i + 1)?;
                if let Some(d) = dest.as_deref_mut() {
                    d.push(ch);
                }
                i = next;
                seg = next;
            }
            0x00..=0x1F => return Err(ErrorCode::UnescapedChars),
            _ => i += 1,
        }
    }
}

/// Copy the plain segment `text[seg..i]` into the destination, if any.
fn flush(text: &str, seg: usize, i: usize, dest: &mut Option<&mut String>) {
    if i > seg {
        if let Some(d) = dest.as_deref_mut() {
            d.push_str(&text[seg..i]);
        }
    }
}

/// Decode one escape sequence; `pos` is the byte after the backslash.
/// Returns the decoded char and the position one past the sequence.
fn scan_escape(bytes: &[u8], pos: usize) -> Result<(char, usize)> {
    let Some(&e) = bytes.get(pos) else {
        return Err(ErrorCode::UnclosedString);
    };
    let ch = match e {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{0008}',
        b'f' => '\u{000C}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => return scan_unicode_escape(bytes, pos + 1),
        _ => return Err(ErrorCode::StringError),
    };
    Ok((ch, pos + 1))
}

/// Decode `XXXX` (and a paired low surrogate when required) starting at
/// `pos`. Lone surrogates are `StringError`.
fn scan_unicode_escape(bytes: &[u8], pos: usize) -> Result<(char, usize)> {
    let high = hex4(bytes, pos)?;
    let mut next = pos + 4;

    let code = if (0xD800..=0xDBFF).contains(&high) {
        if bytes.get(next) != Some(&b'\\') || bytes.get(next + 1) != Some(&b'u') {
            return Err(ErrorCode::StringError);
        }
        let low = hex4(bytes, next + 2)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(ErrorCode::StringError);
        }
        next += 6;
        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
    } else if (0xDC00..=0xDFFF).contains(&high) {
        return Err(ErrorCode::StringError);
    } else {
        high
    };

    match char::from_u32(code) {
        Some(ch) => Ok((ch, next)),
        None => Err(ErrorCode::StringError),
    }
}

/// Four hex digits at `pos` as a code unit.
fn hex4(bytes: &[u8], pos: usize) -> Result<u32> {
    let mut value = 0u32;
    for k in 0..4 {
        let Some(&b) = bytes.get(pos + k) else {
            return Err(ErrorCode::UnclosedString);
        };
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => return Err(ErrorCode::StringError),
        };
        value = (value << 4) | digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unescape(body: &str) -> Result<String> {
        let text = format!("{body}\"");
        let mut out = String::new();
        scan_string(&text, 0, Some(&mut out)).map(|_| out)
    }

    #[test]
    fn plain_and_simple_escapes() {
        assert_eq!(unescape("hello"), Ok("hello".to_string()));
        assert_eq!(unescape(r"a\nb\tc"), Ok("a\nb\tc".to_string()));
        assert_eq!(unescape(r#"q\"q"#), Ok("q\"q".to_string()));
        assert_eq!(unescape(r"back\\slash"), Ok("back\\slash".to_string()));
        assert_eq!(unescape(r"sol\/idus"), Ok("sol/idus".to_string()));
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(unescape("\\u0041"), Ok("A".to_string()));
        assert_eq!(unescape("\\u00e9"), Ok("é".to_string()));
        // Surrogate pair for U+1D11E (musical G clef).
        assert_eq!(unescape("\\uD834\\uDD1E"), Ok("\u{1D11E}".to_string()));
    }

    #[test]
    fn lone_surrogates_are_rejected() {
        assert_eq!(unescape(r"\uD834"), Err(ErrorCode::StringError));
        assert_eq!(unescape(r"\uDD1E"), Err(ErrorCode::StringError));
        assert_eq!(unescape(r"\uD834A"), Err(ErrorCode::StringError));
    }

    #[test]
    fn invalid_escapes() {
        assert_eq!(unescape(r"\x41"), Err(ErrorCode::StringError));
        assert_eq!(unescape(r"\uZZZZ"), Err(ErrorCode::StringError));
    }

    #[test]
    fn control_bytes_are_rejected() {
        assert_eq!(unescape("a\u{0001}b"), Err(ErrorCode::UnescapedChars));
        assert_eq!(unescape("line\nbreak"), Err(ErrorCode::UnescapedChars));
    }

    #[test]
    fn unterminated_input() {
        let mut out = String::new();
        assert_eq!(
            scan_string("abc", 0, Some(&mut out)).unwrap_err(),
            ErrorCode::UnclosedString
        );
        assert_eq!(
            scan_string("abc\\", 0, Some(&mut out)).unwrap_err(),
            ErrorCode::UnclosedString
        );
    }

    #[test]
    fn validator_mode_skips_copying() {
        let (span, next) = scan_string("ab\\nc\" rest", 0, None).unwrap();
        assert_eq!(span.len, 0);
        assert_eq!(next, 6);
    }

    #[test]
    fn multibyte_passthrough() {
        assert_eq!(unescape("日本語"), Ok("日本語".to_string()));
    }
}
