//! Value FFI: type queries, checked extraction, navigation.
//!
//! These functions take [`GaleValue`] by value and touch no global lock:
//! they resolve the value's cell, read the owning document's tape, and
//! (for navigation) claim a cell in the calling thread's pool for the
//! result. The single owner-thread contract from the crate docs applies
//! throughout.

use std::ffi::{c_char, CStr};

use gale_dom::Value;

use crate::document::DocumentState;
use crate::status::GaleStatus;
use crate::types::{self, make_value, GaleType, GaleValue};

/// Resolve a C value to a borrowed DOM value.
///
/// An invalid document reports its parse error; a node index the
/// document does not contain reports `Uninitialized`.
fn view<'a>(value: GaleValue) -> Result<(&'a DocumentState, Value<'a>), GaleStatus> {
    let (state, node) = types::resolve(value)?;
    if let Some(code) = state.document().error() {
        return Err(GaleStatus::from(code));
    }
    match state.document().value_at(node) {
        Some(v) => Ok((state, v)),
        None => Err(GaleStatus::Uninitialized),
    }
}

/// Write `out` behind a null-checked pointer.
///
/// Shared shape of every extraction entry point: resolve, extract, then
/// store through the out-parameter only on success.
#[allow(unsafe_code)]
fn extract<T, F>(value: GaleValue, out: *mut T, op: F) -> i32
where
    F: FnOnce(Value<'_>) -> Result<T, GaleStatus>,
{
    if out.is_null() {
        return GaleStatus::InvalidArgument as i32;
    }
    let v = match view(value) {
        Ok((_state, v)) => v,
        Err(status) => return status as i32,
    };
    match op(v) {
        Ok(result) => {
            // SAFETY: out is non-null per the check above and valid per
            // caller contract.
            unsafe { *out = result };
            GaleStatus::Ok as i32
        }
        Err(status) => status as i32,
    }
}

/// Shared shape of the type queries.
///
/// Queries are total: a null value handle writes `on_null` and reports
/// success. Only extraction and navigation treat a null handle as an
/// argument error.
#[allow(unsafe_code)]
fn classify<T, F>(value: GaleValue, out: *mut T, on_null: T, op: F) -> i32
where
    F: FnOnce(Value<'_>) -> T,
{
    if value.item.is_null() {
        if out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        // SAFETY: out is non-null per the check above.
        unsafe { *out = on_null };
        return GaleStatus::Ok as i32;
    }
    extract(value, out, |v| Ok(op(v)))
}

/// The value's shape tag. A null handle reports the null type.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_type(value: GaleValue, type_out: *mut GaleType) -> i32 {
    ffi_guard!({
        classify(value, type_out, GaleType::Null, |v| {
            GaleType::from(v.value_type())
        })
    })
}

/// Whether the value is `null`. Writes 1 or 0.
///
/// A null handle writes 0: only a real parsed `null` counts.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_null(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_null())) })
}

/// Whether the value is a boolean. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_bool(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_bool())) })
}

/// Whether the value is an integer stored as `i64`. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_int64(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_i64())) })
}

/// Whether the value is an integer stored as `u64`. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_uint64(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_u64())) })
}

/// Whether the value is a double. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_double(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_f64())) })
}

/// Whether the value has any numeric shape. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_number(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_number())) })
}

/// Whether the value is a string. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_string(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_string())) })
}

/// Whether the value is an array. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_array(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_array())) })
}

/// Whether the value is an object. Writes 1 or 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_is_object(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({ classify(value, out, 0, |v| u8::from(v.is_object())) })
}

/// The boolean payload as 1 or 0; `IncorrectType` on any other shape.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_bool(value: GaleValue, out: *mut u8) -> i32 {
    ffi_guard!({
        extract(value, out, |v| {
            v.get_bool().map(u8::from).map_err(GaleStatus::from)
        })
    })
}

/// The value as `int64_t`.
///
/// A `u64`-shaped integer that fits is widened; one that does not is
/// `NumberOutOfRange`. Doubles are `IncorrectType`, never truncated.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_int64(value: GaleValue, out: *mut i64) -> i32 {
    ffi_guard!({ extract(value, out, |v| v.get_i64().map_err(GaleStatus::from)) })
}

/// The value as `uint64_t`; a negative integer is `NumberOutOfRange`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_uint64(value: GaleValue, out: *mut u64) -> i32 {
    ffi_guard!({ extract(value, out, |v| v.get_u64().map_err(GaleStatus::from)) })
}

/// The value as `double`; any numeric shape converts.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_double(value: GaleValue, out: *mut f64) -> i32 {
    ffi_guard!({ extract(value, out, |v| v.get_f64().map_err(GaleStatus::from)) })
}

/// The unescaped string contents as a pointer and byte length.
///
/// The bytes are UTF-8, not NUL-terminated, owned by the document, and
/// valid until the document is freed. No copy is made.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_string(
    value: GaleValue,
    ptr_out: *mut *const u8,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if ptr_out.is_null() || len_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let v = match view(value) {
            Ok((_state, v)) => v,
            Err(status) => return status as i32,
        };
        match v.get_str() {
            Ok(s) => {
                // SAFETY: both out-pointers are non-null per the check
                // above.
                unsafe {
                    *ptr_out = s.as_ptr();
                    *len_out = s.len();
                }
                GaleStatus::Ok as i32
            }
            Err(code) => GaleStatus::from(code) as i32,
        }
    })
}

#[allow(unsafe_code)]
fn field_common(value: GaleValue, name: &str, value_out: *mut GaleValue) -> i32 {
    if value_out.is_null() {
        return GaleStatus::InvalidArgument as i32;
    }
    let (state, v) = match view(value) {
        Ok(pair) => pair,
        Err(status) => return status as i32,
    };
    match v.get_field(name) {
        Ok(field) => {
            // SAFETY: value_out is non-null per the check above.
            unsafe { *value_out = make_value(state, field.node_index()) };
            GaleStatus::Ok as i32
        }
        Err(code) => GaleStatus::from(code) as i32,
    }
}

/// The value of the field `name` (NUL-terminated UTF-8 key).
///
/// `IncorrectType` on a non-object, `NoSuchField` when absent. The
/// result occupies a thread-pool cell.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_field(
    value: GaleValue,
    name: *const c_char,
    value_out: *mut GaleValue,
) -> i32 {
    ffi_guard!({
        if name.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        // SAFETY: name is a non-null NUL-terminated string per caller
        // contract.
        let name = match unsafe { CStr::from_ptr(name) }.to_str() {
            Ok(s) => s,
            Err(_) => return GaleStatus::Utf8Error as i32,
        };
        field_common(value, name, value_out)
    })
}

/// `gale_value_get_field` with an explicit key length, for keys that are
/// not NUL-terminated (or contain interior NULs on the caller's side).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_field_len(
    value: GaleValue,
    name: *const u8,
    name_len: usize,
    value_out: *mut GaleValue,
) -> i32 {
    ffi_guard!({
        if name.is_null() && name_len > 0 {
            return GaleStatus::InvalidArgument as i32;
        }
        let bytes: &[u8] = if name_len == 0 {
            &[]
        } else {
            // SAFETY: name points to name_len readable bytes per caller
            // contract.
            unsafe { std::slice::from_raw_parts(name, name_len) }
        };
        let name = match std::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(_) => return GaleStatus::Utf8Error as i32,
        };
        field_common(value, name, value_out)
    })
}

/// Whether an object value has a field named `name`. Writes 1 or 0.
///
/// Total like the DOM call: a non-object simply writes 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_has_field(
    value: GaleValue,
    name: *const c_char,
    out: *mut u8,
) -> i32 {
    ffi_guard!({
        if name.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        // SAFETY: name is a non-null NUL-terminated string per caller
        // contract.
        let name = match unsafe { CStr::from_ptr(name) }.to_str() {
            Ok(s) => s,
            Err(_) => return GaleStatus::Utf8Error as i32,
        };
        extract(value, out, |v| Ok(u8::from(v.has_field(name))))
    })
}

/// Field count of an object; `IncorrectType` otherwise.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_object_size(value: GaleValue, out: *mut usize) -> i32 {
    ffi_guard!({
        extract(value, out, |v| {
            v.object_size().map(|n| n as usize).map_err(GaleStatus::from)
        })
    })
}

/// The element at `index`; `IndexOutOfBounds` past the end.
///
/// The result occupies a thread-pool cell.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_get_index(
    value: GaleValue,
    index: usize,
    value_out: *mut GaleValue,
) -> i32 {
    ffi_guard!({
        if value_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let (state, v) = match view(value) {
            Ok(pair) => pair,
            Err(status) => return status as i32,
        };
        match v.get_index(index) {
            Ok(element) => {
                // SAFETY: value_out is non-null per the check above.
                unsafe { *value_out = make_value(state, element.node_index()) };
                GaleStatus::Ok as i32
            }
            Err(code) => GaleStatus::from(code) as i32,
        }
    })
}

/// Element count of an array; `IncorrectType` otherwise.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_value_array_size(value: GaleValue, out: *mut usize) -> i32 {
    ffi_guard!({
        extract(value, out, |v| {
            v.array_size().map(|n| n as usize).map_err(GaleStatus::from)
        })
    })
}
