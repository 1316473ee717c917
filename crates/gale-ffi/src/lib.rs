//! C ABI for the Gale JSON binding layer.
//!
//! Exposes the parser, document, value, and iterator surface to foreign
//! language bindings. Parsers, documents, and iterators are opaque `u64`
//! handles backed by slot+generation tables, so a stale or double-freed
//! handle is detected and reported instead of corrupting memory. Values
//! are passed by value as [`GaleValue`] and resolve through per-thread
//! pool cells with a documented recycling contract: a value stays
//! readable only until 256 further value-producing calls on the same
//! thread.
//!
//! Every entry point is panic-guarded: a caught Rust panic reports
//! `GaleStatus::Panicked` rather than unwinding into C.
//!
//! This is the only crate in the workspace permitted to contain `unsafe`
//! code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

mod document;
mod handle;
mod iter;
mod parser;
mod pool;
mod status;
mod types;
mod util;
mod value;

pub use status::GaleStatus;
pub use types::{GaleType, GaleValue};

pub use document::{gale_document_error, gale_document_free, gale_document_root};
pub use iter::{
    gale_array_iter_free, gale_array_iter_new, gale_array_iter_next, gale_object_iter_free,
    gale_object_iter_new, gale_object_iter_next,
};
pub use parser::{gale_parser_free, gale_parser_new, gale_parser_parse, gale_parser_parse_padded};
pub use util::{
    gale_active_implementation, gale_error_message, gale_minify, gale_required_padding,
    gale_validate,
};
pub use value::{
    gale_value_array_size, gale_value_get_bool, gale_value_get_double, gale_value_get_field,
    gale_value_get_field_len, gale_value_get_index, gale_value_get_int64, gale_value_get_string,
    gale_value_get_uint64, gale_value_has_field, gale_value_is_array, gale_value_is_bool,
    gale_value_is_double, gale_value_is_int64, gale_value_is_null, gale_value_is_number,
    gale_value_is_object, gale_value_is_string, gale_value_is_uint64, gale_value_object_size,
    gale_value_type,
};
