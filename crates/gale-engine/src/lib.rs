//! Embedded JSON parsing engine for the Gale binding layer.
//!
//! The engine turns a byte buffer into a [`Tape`]: a flat, depth-first node
//! sequence plus an unescaped-string arena, both owned by the document that
//! wraps them. Navigation works on plain node indices, so borrowed views
//! and boundary-stable handles can both be built on top without pointers
//! into engine internals.
//!
//! Only the portable scalar code path is provided; there are no SIMD
//! kernels and no overreads past the nominal input end. The padding
//! constant and implementation name exist so the outer ABI stays stable
//! if a vectorized tier is ever added.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod minify;
mod number;
pub mod parse;
pub mod tape;
mod text;
pub mod validate;

pub use minify::minify;
pub use parse::Core;
pub use tape::{ArrayCursor, Node, ObjectCursor, StrSpan, Tape};
pub use validate::validate;

/// Trailing padding, in bytes, that a vectorized tier would be allowed to
/// read past the nominal input end. The portable tier never does.
pub const PADDING: usize = 64;

/// Depth limit for nested arrays/objects.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Default parser capacity bound when a caller passes 0: 4 GiB.
pub const DEFAULT_MAX_CAPACITY: u64 = 4 << 30;

/// Name of the code path the engine selected for this build.
///
/// A vectorized build would report a CPU feature tier here; this build
/// always reports the scalar fallback.
pub fn active_implementation() -> &'static str {
    "portable"
}
