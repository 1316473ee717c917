//! One parse result, valid or not.

use gale_core::{ErrorCode, Result};
use gale_engine::Tape;

use crate::value::Value;

/// The outcome of one parse: a tape or a terminal error.
///
/// A `Document` owns the engine memory behind every [`Value`] read from
/// it. It is move-only; dropping it releases that memory exactly once,
/// and the borrow checker rejects any value that would outlive it.
#[derive(Debug)]
pub struct Document {
    state: std::result::Result<Tape, ErrorCode>,
}

impl Document {
    pub(crate) fn parsed(tape: Tape) -> Self {
        Self { state: Ok(tape) }
    }

    pub(crate) fn failed(code: ErrorCode) -> Self {
        Self { state: Err(code) }
    }

    /// True when the parse succeeded.
    pub fn valid(&self) -> bool {
        self.state.is_ok()
    }

    /// The terminal error, if the parse failed.
    pub fn error(&self) -> Option<ErrorCode> {
        self.state.as_ref().err().copied()
    }

    /// Human-readable outcome; `"ok"` for a valid document.
    pub fn error_message(&self) -> &'static str {
        match &self.state {
            Ok(_) => "ok",
            Err(code) => code.message(),
        }
    }

    /// The root value.
    ///
    /// Fails with the parse's error code on an invalid document.
    pub fn root(&self) -> Result<Value<'_>> {
        match &self.state {
            Ok(tape) => Ok(Value::new(tape, 0)),
            Err(code) => Err(*code),
        }
    }

    /// Rebuild a borrowed value from a plain node index.
    ///
    /// `None` when the document is invalid or the index is out of range.
    /// This exists for binding layers that carry indices across a
    /// boundary that cannot carry borrows.
    pub fn value_at(&self, node: u32) -> Option<Value<'_>> {
        let tape = self.state.as_ref().ok()?;
        if (node as usize) < tape.node_count() {
            Some(Value::new(tape, node))
        } else {
            None
        }
    }

    /// The underlying tape of a valid document.
    pub fn tape(&self) -> Option<&Tape> {
        self.state.as_ref().ok()
    }
}
