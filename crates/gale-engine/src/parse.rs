//! The tape builder.
//!
//! A single iterative pass over the input: values are emitted in document
//! order, containers are tracked on an explicit frame stack (no recursion)
//! and patched with their child count and subtree end when they close.
//! The frame stack is owned by [`Core`] and reused across parses; only the
//! tape itself is produced fresh per document.

use gale_core::{ErrorCode, Result};
use smallvec::SmallVec;

use crate::number::scan_number;
use crate::tape::{Node, Tape};
use crate::text::scan_string;
use crate::DEFAULT_MAX_DEPTH;

/// One open container during parsing.
#[derive(Clone, Copy, Debug)]
enum Frame {
    Array { node: u32, count: u32 },
    Object { node: u32, count: u32 },
}

/// Reusable engine state: the container frame stack and the depth limit.
///
/// A `Core` is cheap to create and usable for repeated sequential parses
/// from one thread; `&mut self` makes concurrent use a compile error.
#[derive(Debug)]
pub struct Core {
    stack: SmallVec<[Frame; 64]>,
    max_depth: usize,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// Create a core with the default depth limit.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a core with an explicit depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            stack: SmallVec::new(),
            max_depth,
        }
    }

    /// Parse `src` into `tape`, replacing any previous contents.
    ///
    /// On error the tape contents are unspecified and must be discarded.
    pub fn parse_into(&mut self, src: &[u8], tape: &mut Tape) -> Result<()> {
        let text = std::str::from_utf8(src).map_err(|_| ErrorCode::Utf8Error)?;
        let bytes = text.as_bytes();
        tape.clear();
        self.stack.clear();

        let mut pos = skip_ws(bytes, 0);
        if pos == bytes.len() {
            return Err(ErrorCode::Empty);
        }

        'value: loop {
            // `pos` is at the first byte of a value; bounds were checked by
            // whichever branch routed here.
            match bytes[pos] {
                b'{' => {
                    // Depth counts every open container, empty or not.
                    if self.stack.len() >= self.max_depth {
                        return Err(ErrorCode::DepthExceeded);
                    }
                    let node = tape.push(Node::Object { len: 0, end: 0 });
                    pos = skip_ws(bytes, pos + 1);
                    match bytes.get(pos) {
                        Some(b'}') => {
                            tape.close(node, 0);
                            pos += 1;
                        }
                        Some(b'"') => {
                            self.stack.push(Frame::Object { node, count: 0 });
                            pos = scan_key(text, pos, tape)?;
                            continue 'value;
                        }
                        _ => return Err(ErrorCode::TapeError),
                    }
                }
                b'[' => {
                    if self.stack.len() >= self.max_depth {
                        return Err(ErrorCode::DepthExceeded);
                    }
                    let node = tape.push(Node::Array { len: 0, end: 0 });
                    pos = skip_ws(bytes, pos + 1);
                    match bytes.get(pos) {
                        Some(b']') => {
                            tape.close(node, 0);
                            pos += 1;
                        }
                        Some(_) => {
                            self.stack.push(Frame::Array { node, count: 0 });
                            continue 'value;
                        }
                        None => return Err(ErrorCode::TapeError),
                    }
                }
                b'"' => {
                    let (span, next) = scan_string(text, pos + 1, Some(tape.strings_mut()))?;
                    tape.push(Node::String(span));
                    pos = next;
                }
                b't' | b'f' | b'n' => {
                    pos = scan_atom(bytes, pos, tape)?;
                }
                b'-' | b'0'..=b'9' => {
                    let (number, next) = scan_number(bytes, pos)?;
                    tape.push(number.into_node());
                    pos = next;
                }
                _ => return Err(ErrorCode::TapeError),
            }

            // A complete value ended at `pos`; close containers upward.
            loop {
                pos = skip_ws(bytes, pos);
                let Some(frame) = self.stack.last_mut() else {
                    if pos != bytes.len() {
                        return Err(ErrorCode::TrailingContent);
                    }
                    return Ok(());
                };
                match frame {
                    Frame::Array { node, count } => {
                        *count += 1;
                        match bytes.get(pos) {
                            Some(b',') => {
                                pos = skip_ws(bytes, pos + 1);
                                if pos >= bytes.len() {
                                    return Err(ErrorCode::TapeError);
                                }
                                continue 'value;
                            }
                            Some(b']') => {
                                let (node, count) = (*node, *count);
                                self.stack.pop();
                                tape.close(node, count);
                                pos += 1;
                            }
                            _ => return Err(ErrorCode::TapeError),
                        }
                    }
                    Frame::Object { node, count } => {
                        *count += 1;
                        match bytes.get(pos) {
                            Some(b',') => {
                                pos = skip_ws(bytes, pos + 1);
                                if bytes.get(pos) != Some(&b'"') {
                                    return Err(ErrorCode::TapeError);
                                }
                                pos = scan_key(text, pos, tape)?;
                                continue 'value;
                            }
                            Some(b'}') => {
                                let (node, count) = (*node, *count);
                                self.stack.pop();
                                tape.close(node, count);
                                pos += 1;
                            }
                            _ => return Err(ErrorCode::TapeError),
                        }
                    }
                }
            }
        }
    }
}

/// Advance past insignificant whitespace.
pub(crate) fn skip_ws(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        pos += 1;
    }
    pos
}

/// Scan a key string at `pos` (which is at the opening quote) plus the
/// following colon. Returns the position of the value's first byte.
fn scan_key(text: &str, pos: usize, tape: &mut Tape) -> Result<usize> {
    let bytes = text.as_bytes();
    let (span, after_key) = scan_string(text, pos + 1, Some(tape.strings_mut()))?;
    tape.push(Node::String(span));
    let colon = skip_ws(bytes, after_key);
    if bytes.get(colon) != Some(&b':') {
        return Err(ErrorCode::TapeError);
    }
    let value = skip_ws(bytes, colon + 1);
    if value >= bytes.len() {
        return Err(ErrorCode::TapeError);
    }
    Ok(value)
}

/// True for the bytes allowed to follow a literal.
fn atom_terminated(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos) {
        None => true,
        Some(b) => matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}'),
    }
}

/// Scan `true`, `false`, or `null`; `pos` is at the first byte.
fn scan_atom(bytes: &[u8], pos: usize, tape: &mut Tape) -> Result<usize> {
    let (literal, node, code): (&[u8], Node, ErrorCode) = match bytes[pos] {
        b't' => (b"true", Node::Bool(true), ErrorCode::TAtomError),
        b'f' => (b"false", Node::Bool(false), ErrorCode::FAtomError),
        _ => (b"null", Node::Null, ErrorCode::NAtomError),
    };
    let end = pos + literal.len();
    if !bytes[pos..].starts_with(literal) || !atom_terminated(bytes, end) {
        return Err(code);
    }
    tape.push(node);
    Ok(end)
}
