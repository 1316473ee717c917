//! Parser lifecycle FFI: create, parse, free.
//!
//! Parsers live in a global handle table; the table lock is held only for
//! handle resolution and the parse itself. A parser is single-threaded by
//! contract, but even a misbehaving caller only contends on the lock, it
//! cannot race the parse state.

use std::sync::Mutex;

use gale_dom::Parser;

use crate::document::{documents, DocumentState};
use crate::handle::HandleTable;
use crate::status::GaleStatus;

static PARSERS: Mutex<HandleTable<Parser>> = Mutex::new(HandleTable::new());

/// Create a parser accepting documents up to `max_capacity` bytes.
///
/// Passing 0 selects the default bound of 4 GiB. On success, writes the
/// parser handle to `parser_out` and returns `GALE_STATUS_OK`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_parser_new(max_capacity: u64, parser_out: *mut u64) -> i32 {
    ffi_guard!({
        if parser_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let handle = ffi_lock!(PARSERS).insert(Parser::new(max_capacity));
        // SAFETY: parser_out is non-null per the check above and valid
        // per caller contract.
        unsafe { *parser_out = handle };
        GaleStatus::Ok as i32
    })
}

/// Free a parser. Documents it produced stay valid.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_parser_free(parser: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(PARSERS).remove(parser) {
            Some(_) => GaleStatus::Ok as i32,
            None => GaleStatus::InvalidHandle as i32,
        }
    })
}

#[allow(unsafe_code)]
fn parse_common(parser: u64, buf: *const u8, len: usize, doc_out: *mut u64) -> i32 {
    if doc_out.is_null() || (buf.is_null() && len > 0) {
        return GaleStatus::InvalidArgument as i32;
    }
    let document = {
        let mut parsers = ffi_lock!(PARSERS);
        let Some(state) = parsers.get_mut(parser) else {
            return GaleStatus::InvalidHandle as i32;
        };
        let src: &[u8] = if len == 0 {
            &[]
        } else {
            // SAFETY: buf is non-null and points to len readable bytes
            // per caller contract.
            unsafe { std::slice::from_raw_parts(buf, len) }
        };
        state.parse(src)
    };

    let handle = ffi_lock!(documents()).insert(DocumentState::boxed(document));
    // SAFETY: doc_out is non-null per the check above.
    unsafe { *doc_out = handle };
    GaleStatus::Ok as i32
}

/// Parse `len` bytes from `buf` into a new document.
///
/// Always produces a document on `GALE_STATUS_OK`; whether the parse
/// itself succeeded is reported by `gale_document_error`. The input is
/// copied into engine-owned storage, so `buf` may be released as soon as
/// this returns.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_parser_parse(
    parser: u64,
    buf: *const u8,
    len: usize,
    doc_out: *mut u64,
) -> i32 {
    ffi_guard!({ parse_common(parser, buf, len, doc_out) })
}

/// Parse `len` bytes from a buffer with trailing padding.
///
/// Historically the engine was allowed to read up to
/// `gale_required_padding()` bytes past `buf + len`; the portable engine
/// never reads past `len`, so this is identical to `gale_parser_parse`
/// and the padding contents are ignored. Kept so callers written against
/// the padded contract keep working unchanged.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_parser_parse_padded(
    parser: u64,
    buf: *const u8,
    len: usize,
    doc_out: *mut u64,
) -> i32 {
    ffi_guard!({ parse_common(parser, buf, len, doc_out) })
}
