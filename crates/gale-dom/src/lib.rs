//! Document model for Gale: parse bytes once, read values many times.
//!
//! [`Parser`] owns reusable engine state, [`Document`] owns one parse
//! result, and [`Value`] is a two-word borrowed view into a document.
//! The borrow checker enforces the one rule the C surface can only
//! document: a value never outlives the document it came from.
//!
//! ```
//! use gale_dom::Parser;
//!
//! let mut parser = Parser::new(0);
//! let doc = parser.parse(br#"{"answer": 42}"#);
//! let root = doc.root()?;
//! assert_eq!(root.get_field("answer")?.get_i64()?, 42);
//! # Ok::<(), gale_core::ErrorCode>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod document;
mod iter;
mod parser;
mod value;

pub use document::Document;
pub use iter::{ArrayIter, ObjectIter};
pub use parser::Parser;
pub use value::Value;
