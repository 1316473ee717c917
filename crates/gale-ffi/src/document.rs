//! Document lifecycle FFI: error query, root access, free.

use std::sync::Mutex;

use gale_dom::Document;

use crate::handle::HandleTable;
use crate::pool::NodeCell;
use crate::status::GaleStatus;
use crate::types::GaleValue;

/// One document behind a handle: the parse result plus the embedded cell
/// backing the root value.
///
/// Boxed so its address is stable for the lifetime of the handle; root
/// values and pool cells point straight at it.
pub(crate) struct DocumentState {
    doc: Document,
    root_cell: NodeCell,
}

// SAFETY: the raw pointer in root_cell only ever points at the owning
// DocumentState itself, which moves with the Box as a unit.
#[allow(unsafe_code)]
unsafe impl Send for DocumentState {}

impl DocumentState {
    /// Box a parse result and point its root cell back at itself.
    pub(crate) fn boxed(doc: Document) -> Box<Self> {
        let mut state = Box::new(Self {
            doc,
            root_cell: NodeCell::empty(),
        });
        let ptr: *const DocumentState = &*state;
        state.root_cell.doc = ptr;
        state
    }

    pub(crate) fn document(&self) -> &Document {
        &self.doc
    }
}

static DOCS: Mutex<HandleTable<Box<DocumentState>>> = Mutex::new(HandleTable::new());

pub(crate) fn documents() -> &'static Mutex<HandleTable<Box<DocumentState>>> {
    &DOCS
}

/// Free a document, releasing its engine memory.
///
/// Every value read from the document becomes invalid immediately;
/// freeing twice returns `GALE_STATUS_INVALID_HANDLE` safely.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_document_free(doc: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(DOCS).remove(doc) {
            Some(_) => GaleStatus::Ok as i32,
            None => GaleStatus::InvalidHandle as i32,
        }
    })
}

/// The parse outcome for a document: `GALE_STATUS_OK` when the parse
/// succeeded, otherwise the parse-time error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_document_error(doc: u64) -> i32 {
    ffi_guard!({
        let docs = ffi_lock!(DOCS);
        let Some(state) = docs.get(doc) else {
            return GaleStatus::InvalidHandle as i32;
        };
        match state.document().error() {
            None => GaleStatus::Ok as i32,
            Some(code) => GaleStatus::from(code) as i32,
        }
    })
}

/// The root value of a valid document.
///
/// On an invalid document, returns its parse-time error and leaves
/// `value_out` untouched. The returned value's cell is embedded in the
/// document itself, so unlike navigation results it is never recycled by
/// the thread pool.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn gale_document_root(doc: u64, value_out: *mut GaleValue) -> i32 {
    ffi_guard!({
        if value_out.is_null() {
            return GaleStatus::InvalidArgument as i32;
        }
        let docs = ffi_lock!(DOCS);
        let Some(state) = docs.get(doc) else {
            return GaleStatus::InvalidHandle as i32;
        };
        if let Some(code) = state.document().error() {
            return GaleStatus::from(code) as i32;
        }
        let value = GaleValue {
            item: (&state.root_cell as *const NodeCell).cast(),
            doc: (&**state as *const DocumentState).cast(),
        };
        // SAFETY: value_out is non-null per the check above.
        unsafe { *value_out = value };
        GaleStatus::Ok as i32
    })
}
