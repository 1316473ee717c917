//! Gale: zero-copy JSON document parsing and value binding.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Gale sub-crates. For most users, adding `gale` as a single
//! dependency is sufficient; language bindings link against `gale-ffi`
//! instead.
//!
//! # Quick start
//!
//! ```rust
//! use gale::{ErrorCode, Parser};
//!
//! let mut parser = Parser::new(0);
//! let doc = parser.parse(br#"{"name": "gale", "cells": [1, 2, 3]}"#);
//!
//! let root = doc.root()?;
//! assert_eq!(root.get_field("name")?.get_str()?, "gale");
//!
//! let cells = root.get_field("cells")?;
//! let total: i64 = cells.iter_array()?.map(|v| v.i64_or(0)).sum();
//! assert_eq!(total, 6);
//!
//! // Extraction is checked, never coerced.
//! assert_eq!(root.get_field("name")?.get_i64(), Err(ErrorCode::IncorrectType));
//! # Ok::<(), gale::ErrorCode>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gale-core` | Error codes and the value type taxonomy |
//! | [`engine`] | `gale-engine` | The embedded tape engine, validator, minifier |
//! | [`dom`] | `gale-dom` | `Parser`, `Document`, borrowed `Value` views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Error codes and the value type taxonomy (`gale-core`).
pub use gale_core as types;

/// The embedded parsing engine (`gale-engine`).
///
/// Most users never touch this directly; [`dom::Parser`] drives it. The
/// standalone [`engine::validate`] and [`engine::minify`] utilities live
/// here.
pub use gale_engine as engine;

/// Document model: parser, documents, borrowed values (`gale-dom`).
pub use gale_dom as dom;

pub use gale_core::{ErrorCode, JsonType, Result};
pub use gale_dom::{ArrayIter, Document, ObjectIter, Parser, Value};
