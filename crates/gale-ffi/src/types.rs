//! C-visible value types and the cell resolution helpers.

use std::ffi::c_void;

use gale_core::JsonType;

use crate::document::DocumentState;
use crate::pool::{self, NodeCell};
use crate::status::GaleStatus;

/// C-compatible value shape tag. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaleType {
    /// The `null` literal.
    Null = 0,
    /// A boolean.
    Bool = 1,
    /// An integer stored as a signed 64-bit value.
    Int64 = 2,
    /// An integer above `INT64_MAX`, stored unsigned.
    Uint64 = 3,
    /// A double-precision number.
    Double = 4,
    /// A string.
    String = 5,
    /// An array.
    Array = 6,
    /// An object.
    Object = 7,
}

impl From<JsonType> for GaleType {
    fn from(t: JsonType) -> Self {
        match t {
            JsonType::Null => GaleType::Null,
            JsonType::Bool => GaleType::Bool,
            JsonType::Int64 => GaleType::Int64,
            JsonType::Uint64 => GaleType::Uint64,
            JsonType::Double => GaleType::Double,
            JsonType::String => GaleType::String,
            JsonType::Array => GaleType::Array,
            JsonType::Object => GaleType::Object,
        }
    }
}

/// One JSON value, passed across the boundary by value.
///
/// `item` points at a cell owned either by the value's document (the
/// root) or by the calling thread's cell pool (everything else); pooled
/// cells are recycled after 256 further value-producing calls. `doc` is
/// a back-reference to the owning document that is carried for the
/// caller's benefit and never dereferenced by this library; it does not
/// extend the document's lifetime, and reading any value after its
/// document is freed is undefined behavior.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct GaleValue {
    /// Pointer to the value's cell.
    pub item: *const c_void,
    /// The owning document, informational only.
    pub doc: *const c_void,
}

impl GaleValue {
    pub(crate) const fn null() -> Self {
        Self {
            item: std::ptr::null(),
            doc: std::ptr::null(),
        }
    }
}

/// Claim a pool cell for `node` and wrap it as a C value.
pub(crate) fn make_value(state: &DocumentState, node: u32) -> GaleValue {
    let cell = pool::claim(NodeCell {
        doc: state as *const DocumentState,
        node,
    });
    GaleValue {
        item: cell.cast(),
        doc: (state as *const DocumentState).cast(),
    }
}

/// Resolve a C value back to its document state and node index.
///
/// Rejects null pointers; cannot detect a freed document (single
/// owner-thread contract).
#[allow(unsafe_code)]
pub(crate) fn resolve<'a>(value: GaleValue) -> Result<(&'a DocumentState, u32), GaleStatus> {
    if value.item.is_null() {
        return Err(GaleStatus::InvalidArgument);
    }
    // SAFETY: `item` was produced by make_value or a document root and
    // points into a live pool cell or document state per the caller
    // contract.
    let cell = unsafe { &*value.item.cast::<NodeCell>() };
    if cell.doc.is_null() {
        return Err(GaleStatus::InvalidArgument);
    }
    // SAFETY: the cell's document pointer was set when the cell was
    // claimed and the document has not been freed per the contract.
    let state = unsafe { &*cell.doc };
    Ok((state, cell.node))
}
