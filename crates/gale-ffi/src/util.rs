//! Utility FFI: padding, implementation name, messages, minify, validate.

use std::ffi::{c_char, CStr};

use crate::status::GaleStatus;

/// Bytes of trailing padding the padded parse entry point may assume.
///
/// The portable engine never reads the padding; the constant is kept so
/// callers allocating for the padded contract keep working.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_required_padding() -> usize {
    gale_engine::PADDING
}

/// Name of the engine code path selected for this build, as a static
/// NUL-terminated string.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_active_implementation() -> *const c_char {
    // Pinned by a test against the engine's name.
    c"portable".as_ptr()
}

/// Static NUL-terminated message for a status code.
///
/// Never returns null; an unrecognized code gets a fallback message.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_error_message(status: i32) -> *const c_char {
    message_for(status).as_ptr()
}

pub(crate) fn message_for(status: i32) -> &'static CStr {
    match status {
        s if s == GaleStatus::Ok as i32 => c"ok",
        s if s == GaleStatus::Capacity as i32 => c"document exceeds parser capacity",
        s if s == GaleStatus::DepthExceeded as i32 => c"document exceeds depth limit",
        s if s == GaleStatus::TapeError as i32 => c"malformed JSON structure",
        s if s == GaleStatus::StringError as i32 => c"invalid string contents",
        s if s == GaleStatus::TAtomError as i32 => c"invalid 'true' literal",
        s if s == GaleStatus::FAtomError as i32 => c"invalid 'false' literal",
        s if s == GaleStatus::NAtomError as i32 => c"invalid 'null' literal",
        s if s == GaleStatus::NumberError as i32 => c"invalid number",
        s if s == GaleStatus::Utf8Error as i32 => c"input is not valid UTF-8",
        s if s == GaleStatus::Empty as i32 => c"empty input",
        s if s == GaleStatus::UnescapedChars as i32 => {
            c"unescaped control character in string"
        }
        s if s == GaleStatus::UnclosedString as i32 => c"unclosed string",
        s if s == GaleStatus::TrailingContent as i32 => c"trailing content after document",
        s if s == GaleStatus::IncorrectType as i32 => c"incorrect type for operation",
        s if s == GaleStatus::NumberOutOfRange as i32 => {
            c"number out of range for requested type"
        }
        s if s == GaleStatus::IndexOutOfBounds as i32 => c"array index out of bounds",
        s if s == GaleStatus::NoSuchField as i32 => c"object field not found",
        s if s == GaleStatus::Uninitialized as i32 => c"uninitialized handle",
        s if s == GaleStatus::Unexpected as i32 => c"unexpected internal error",
        s if s == GaleStatus::Unknown as i32 => c"unknown error",
        s if s == GaleStatus::InvalidHandle as i32 => c"invalid or freed handle",
        s if s == GaleStatus::InvalidArgument as i32 => c"invalid argument",
        s if s == GaleStatus::InternalError as i32 => c"internal error",
        s if s == GaleStatus::Panicked as i32 => c"panic caught at FFI boundary",
        _ => c"unrecognized status code",
    }
}

/// Minify `len` bytes from `buf` into `dst`, writing the compacted
/// length to `dst_len`.
///
/// `dst` must hold at least `len` bytes; the output never exceeds the
/// input. `dst` may alias `buf` for in-place minification.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_minify(
    buf: *const u8,
    len: usize,
    dst: *mut u8,
    dst_len: *mut usize,
) -> i32 {
    ffi_guard!({
        if dst.is_null() || dst_len.is_null() || (buf.is_null() && len > 0) {
            return GaleStatus::InvalidArgument as i32;
        }
        let src: &[u8] = if len == 0 {
            &[]
        } else {
            // SAFETY: buf points to len readable bytes per caller
            // contract.
            unsafe { std::slice::from_raw_parts(buf, len) }
        };
        // Staged through a temporary so dst may alias buf.
        match gale_engine::minify(src) {
            Ok(out) => {
                // SAFETY: dst holds at least len bytes per caller
                // contract and out.len() <= len.
                unsafe {
                    std::ptr::copy_nonoverlapping(out.as_ptr(), dst, out.len());
                    *dst_len = out.len();
                }
                GaleStatus::Ok as i32
            }
            Err(code) => GaleStatus::from(code) as i32,
        }
    })
}

/// Structurally validate `len` bytes from `buf` without building a
/// document. Returns the same status a full parse would.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_validate(buf: *const u8, len: usize) -> i32 {
    ffi_guard!({
        if buf.is_null() && len > 0 {
            return GaleStatus::InvalidArgument as i32;
        }
        let src: &[u8] = if len == 0 {
            &[]
        } else {
            // SAFETY: buf points to len readable bytes per caller
            // contract.
            unsafe { std::slice::from_raw_parts(buf, len) }
        };
        match gale_engine::validate(src) {
            Ok(()) => GaleStatus::Ok as i32,
            Err(code) => GaleStatus::from(code) as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gale_core::ErrorCode;

    #[test]
    fn padding_matches_the_engine() {
        assert_eq!(gale_required_padding(), gale_engine::PADDING);
    }

    #[test]
    fn implementation_name_matches_the_engine() {
        // SAFETY: the returned pointer is a static NUL-terminated
        // string.
        #[allow(unsafe_code)]
        let name = unsafe { CStr::from_ptr(gale_active_implementation()) };
        assert_eq!(name.to_str().unwrap(), gale_engine::active_implementation());
    }

    #[test]
    fn mirrored_messages_match_the_error_codes() {
        let pairs = [
            (GaleStatus::Capacity, ErrorCode::Capacity),
            (GaleStatus::TapeError, ErrorCode::TapeError),
            (GaleStatus::NumberError, ErrorCode::NumberError),
            (GaleStatus::Empty, ErrorCode::Empty),
            (GaleStatus::NoSuchField, ErrorCode::NoSuchField),
            (GaleStatus::Unknown, ErrorCode::Unknown),
        ];
        for (status, code) in pairs {
            assert_eq!(
                message_for(status as i32).to_str().unwrap(),
                code.message()
            );
        }
    }

    #[test]
    fn unknown_status_has_a_fallback() {
        assert!(!message_for(12345).to_str().unwrap().is_empty());
        assert!(!message_for(GaleStatus::Panicked as i32)
            .to_str()
            .unwrap()
            .is_empty());
    }
}
