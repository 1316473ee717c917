//! The reusable parser front end.

use gale_core::ErrorCode;
use gale_engine::{Core, Tape, DEFAULT_MAX_CAPACITY};

use crate::document::Document;

/// A reusable JSON parser with a fixed capacity bound.
///
/// One `Parser` serves any number of sequential parses; its internal frame
/// stack is reused across calls. `&mut self` on the parse methods makes
/// concurrent use from several threads a compile error rather than a
/// documented prohibition.
#[derive(Debug)]
pub struct Parser {
    core: Core,
    max_capacity: u64,
}

impl Parser {
    /// Create a parser that accepts documents up to `max_capacity` bytes.
    ///
    /// Passing 0 selects the default bound of 4 GiB.
    pub fn new(max_capacity: u64) -> Self {
        let max_capacity = if max_capacity == 0 {
            DEFAULT_MAX_CAPACITY
        } else {
            max_capacity
        };
        Self {
            core: Core::new(),
            max_capacity,
        }
    }

    /// The configured capacity bound in bytes.
    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Parse `src` into a new document.
    ///
    /// Never panics on malformed input; the outcome, success or failure,
    /// is carried by the returned [`Document`]. Empty input (including
    /// whitespace-only input) yields `Empty`; input longer than the
    /// capacity bound yields `Capacity` without touching the bytes.
    pub fn parse(&mut self, src: &[u8]) -> Document {
        if src.is_empty() {
            return Document::failed(ErrorCode::Empty);
        }
        if src.len() as u64 > self.max_capacity {
            return Document::failed(ErrorCode::Capacity);
        }
        let mut tape = Tape::new();
        match self.core.parse_into(src, &mut tape) {
            Ok(()) => Document::parsed(tape),
            Err(code) => Document::failed(code),
        }
    }

    /// Parse the first `len` bytes of a padded buffer.
    ///
    /// The engine's portable tier never reads past the nominal end, so
    /// this is exactly `parse` on the logical prefix; the padding bytes
    /// are ignored. Callers written against a vectorized engine can keep
    /// providing [`gale_engine::PADDING`] bytes of slack unchanged.
    pub fn parse_padded(&mut self, padded: &[u8], len: usize) -> Document {
        if len > padded.len() {
            return Document::failed(ErrorCode::Unexpected);
        }
        self.parse(&padded[..len])
    }
}
