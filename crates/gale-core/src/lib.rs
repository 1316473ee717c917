//! Core types for the Gale JSON binding layer.
//!
//! This crate holds the pure-data vocabulary shared by the engine, the DOM
//! layer, and the C ABI: the closed [`ErrorCode`] taxonomy and the
//! [`JsonType`] shape enum. It has no dependencies and performs no I/O.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{ErrorCode, Result};
pub use types::JsonType;
