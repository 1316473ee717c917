//! The per-thread value cell pool.
//!
//! Navigation and iteration results are handed to C as pointers into a
//! fixed ring of 256 cells owned by the calling thread. Claiming always
//! takes the slot after the previously claimed one and overwrites it
//! unconditionally, so a value stays readable only until 256 further
//! value-producing calls on the same thread; after that its cell silently
//! holds a newer value. Callers that need more than 256 live values at
//! once must copy the payloads out as they go.
//!
//! The pool is created lazily per thread and never shared, which is why
//! claiming needs no locking.

use std::cell::{Cell, RefCell};

use crate::document::DocumentState;

/// Number of cells in each thread's ring.
pub(crate) const POOL_SLOTS: usize = 256;

/// One pooled value: the owning document and a node index into its tape.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeCell {
    /// The document the node index is valid for.
    pub doc: *const DocumentState,
    /// Node index into that document's tape.
    pub node: u32,
}

impl NodeCell {
    pub(crate) const fn empty() -> Self {
        Self {
            doc: std::ptr::null(),
            node: 0,
        }
    }
}

struct Pool {
    cells: RefCell<Box<[NodeCell; POOL_SLOTS]>>,
    last: Cell<usize>,
}

thread_local! {
    static POOL: Pool = Pool {
        cells: RefCell::new(Box::new([NodeCell::empty(); POOL_SLOTS])),
        last: Cell::new(0),
    };
}

/// Claim the next ring slot for `cell`, returning its stable address.
///
/// The returned pointer is valid for reads until this thread's pool wraps
/// back around to the slot or the thread exits.
pub(crate) fn claim(cell: NodeCell) -> *const NodeCell {
    POOL.with(|pool| {
        let slot = (pool.last.get() + 1) % POOL_SLOTS;
        pool.last.set(slot);
        let mut cells = pool.cells.borrow_mut();
        cells[slot] = cell;
        &cells[slot] as *const NodeCell
    })
}
