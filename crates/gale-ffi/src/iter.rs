//! Iterator FFI: forward iteration over arrays and objects.
//!
//! Iterators are handles like parsers and documents; the state behind a
//! handle is just a document pointer plus a by-value engine cursor, so
//! holding many live iterators is cheap. Each `next` call that yields a
//! value claims a cell in the calling thread's pool.

use std::sync::Mutex;

use gale_engine::{ArrayCursor, ObjectCursor};

use crate::document::DocumentState;
use crate::handle::HandleTable;
use crate::status::GaleStatus;
use crate::types::{self, make_value, GaleValue};

struct ArrayIterState {
    doc: *const DocumentState,
    cursor: ArrayCursor,
}

struct ObjectIterState {
    doc: *const DocumentState,
    cursor: ObjectCursor,
}

// SAFETY: the document pointer is only dereferenced on the thread that
// owns the document, per the single owner-thread contract; the table
// merely stores it.
#[allow(unsafe_code)]
unsafe impl Send for ArrayIterState {}
// SAFETY: as for ArrayIterState.
#[allow(unsafe_code)]
unsafe impl Send for ObjectIterState {}

static ARRAY_ITERS: Mutex<HandleTable<ArrayIterState>> = Mutex::new(HandleTable::new());
static OBJECT_ITERS: Mutex<HandleTable<ObjectIterState>> = Mutex::new(HandleTable::new());

/// Begin iterating an array value.
///
/// `IncorrectType` when the value is not an array. The iterator must be
/// freed with `gale_array_iter_free` and must not outlive the document.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_array_iter_new(value: GaleValue, iter_out: *mut u64) -> i32 {
    ffi_guard!({
        if iter_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let (state, node) = match types::resolve(value) {
            Ok(pair) => pair,
            Err(status) => return status as i32,
        };
        let Some(tape) = state.document().tape() else {
            return match state.document().error() {
                Some(code) => GaleStatus::from(code) as i32,
                None => GaleStatus::Unexpected as i32,
            };
        };
        let cursor = match ArrayCursor::over(tape, node) {
            Ok(c) => c,
            Err(code) => return GaleStatus::from(code) as i32,
        };
        let handle = ffi_lock!(ARRAY_ITERS).insert(ArrayIterState {
            doc: state as *const DocumentState,
            cursor,
        });
        // SAFETY: iter_out is non-null per the check above.
        unsafe { *iter_out = handle };
        GaleStatus::Ok as i32
    })
}

/// Advance an array iterator.
///
/// Writes 1 to `has_out` and the next element to `value_out`, or 0 to
/// `has_out` (and a null value) when the array is exhausted. Yielded
/// values occupy thread-pool cells.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_array_iter_next(
    iter: u64,
    value_out: *mut GaleValue,
    has_out: *mut u8,
) -> i32 {
    ffi_guard!({
        if value_out.is_null() || has_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let mut iters = ffi_lock!(ARRAY_ITERS);
        let Some(it) = iters.get_mut(iter) else {
            return GaleStatus::InvalidHandle as i32;
        };
        // SAFETY: the iterator's document is live per the caller
        // contract (iterators must not outlive their document).
        let state = unsafe { &*it.doc };
        let Some(tape) = state.document().tape() else {
            return GaleStatus::Unexpected as i32;
        };
        let (value, has) = match it.cursor.step(tape) {
            Some(node) => (make_value(state, node), 1u8),
            None => (GaleValue::null(), 0u8),
        };
        // SAFETY: both out-pointers are non-null per the check above.
        unsafe {
            *value_out = value;
            *has_out = has;
        }
        GaleStatus::Ok as i32
    })
}

/// Free an array iterator. The underlying document is unaffected.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_array_iter_free(iter: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARRAY_ITERS).remove(iter) {
            Some(_) => GaleStatus::Ok as i32,
            None => GaleStatus::InvalidHandle as i32,
        }
    })
}

/// Begin iterating an object value's fields in document order.
///
/// `IncorrectType` when the value is not an object.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_object_iter_new(value: GaleValue, iter_out: *mut u64) -> i32 {
    ffi_guard!({
        if iter_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let (state, node) = match types::resolve(value) {
            Ok(pair) => pair,
            Err(status) => return status as i32,
        };
        let Some(tape) = state.document().tape() else {
            return match state.document().error() {
                Some(code) => GaleStatus::from(code) as i32,
                None => GaleStatus::Unexpected as i32,
            };
        };
        let cursor = match ObjectCursor::over(tape, node) {
            Ok(c) => c,
            Err(code) => return GaleStatus::from(code) as i32,
        };
        let handle = ffi_lock!(OBJECT_ITERS).insert(ObjectIterState {
            doc: state as *const DocumentState,
            cursor,
        });
        // SAFETY: iter_out is non-null per the check above.
        unsafe { *iter_out = handle };
        GaleStatus::Ok as i32
    })
}

/// Advance an object iterator.
///
/// On a yielded field, writes the key (unescaped UTF-8 bytes owned by
/// the document, not NUL-terminated), the value, and 1 to `has_out`.
/// When exhausted, writes 0 to `has_out` and clears the other outputs.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_object_iter_next(
    iter: u64,
    key_ptr_out: *mut *const u8,
    key_len_out: *mut usize,
    value_out: *mut GaleValue,
    has_out: *mut u8,
) -> i32 {
    ffi_guard!({
        if key_ptr_out.is_null()
            || key_len_out.is_null()
            || value_out.is_null()
            || has_out.is_null()
        {
            return GaleStatus::InvalidArgument as i32;
        }
        let mut iters = ffi_lock!(OBJECT_ITERS);
        let Some(it) = iters.get_mut(iter) else {
            return GaleStatus::InvalidHandle as i32;
        };
        // SAFETY: the iterator's document is live per the caller
        // contract.
        let state = unsafe { &*it.doc };
        let Some(tape) = state.document().tape() else {
            return GaleStatus::Unexpected as i32;
        };
        match it.cursor.step(tape) {
            Some((key, node)) => {
                let key = tape.str_of(key);
                // SAFETY: all out-pointers are non-null per the check
                // above.
                unsafe {
                    *key_ptr_out = key.as_ptr();
                    *key_len_out = key.len();
                    *value_out = make_value(state, node);
                    *has_out = 1;
                }
            }
            None => {
                // SAFETY: as above.
                unsafe {
                    *key_ptr_out = std::ptr::null();
                    *key_len_out = 0;
                    *value_out = GaleValue::null();
                    *has_out = 0;
                }
            }
        }
        GaleStatus::Ok as i32
    })
}

/// Free an object iterator. The underlying document is unaffected.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_object_iter_free(iter: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(OBJECT_ITERS).remove(iter) {
            Some(_) => GaleStatus::Ok as i32,
            None => GaleStatus::InvalidHandle as i32,
        }
    })
}
