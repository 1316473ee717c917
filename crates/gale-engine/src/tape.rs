//! The tape: a flat, depth-first encoding of one parsed document.
//!
//! Nodes are stored in document order. A container node records its child
//! count and the index one past its subtree, so skipping a sibling is O(1)
//! and forward iteration never rescans input bytes. Object children
//! alternate key (a [`Node::String`]) and value subtree.
//!
//! All strings — keys included — are unescaped exactly once into the
//! tape-owned arena during parsing; reads return borrowed `&str` views
//! into that arena with no per-call copy.

use gale_core::{ErrorCode, JsonType, Result};

/// Byte range of one unescaped string inside the tape's string arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrSpan {
    /// Byte offset into the arena.
    pub off: u32,
    /// Length in bytes.
    pub len: u32,
}

/// One parsed value.
///
/// The tagged sum is the engine's whole type system; every consumer
/// matches it exhaustively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    /// The `null` literal.
    Null,
    /// A boolean literal.
    Bool(bool),
    /// An integer that fits `i64`.
    Int64(i64),
    /// A positive integer above `i64::MAX`.
    Uint64(u64),
    /// A number with a fraction or exponent.
    Double(f64),
    /// A string; the span indexes the tape's string arena.
    String(StrSpan),
    /// An array with `len` elements; `end` is one past its subtree.
    Array {
        /// Element count.
        len: u32,
        /// Node index one past the last element's subtree.
        end: u32,
    },
    /// An object with `len` fields; `end` is one past its subtree.
    Object {
        /// Field count.
        len: u32,
        /// Node index one past the last value's subtree.
        end: u32,
    },
}

/// One parsed document: node sequence plus string arena.
#[derive(Debug, Default)]
pub struct Tape {
    nodes: Vec<Node>,
    strings: String,
}

impl Tape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all nodes and strings, keeping allocations.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.strings.clear();
    }

    /// Append a node, returning its index.
    pub(crate) fn push(&mut self, node: Node) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(node);
        idx
    }

    /// Patch a container node with its final child count and subtree end.
    ///
    /// Invariant: `at` was pushed as an `Array` or `Object` placeholder.
    pub(crate) fn close(&mut self, at: u32, count: u32) {
        let end = self.nodes.len() as u32;
        match &mut self.nodes[at as usize] {
            Node::Array { len, end: e } | Node::Object { len, end: e } => {
                *len = count;
                *e = end;
            }
            _ => debug_assert!(false, "close() on a scalar node"),
        }
    }

    /// Mutable access to the string arena for the in-crate scanners.
    pub(crate) fn strings_mut(&mut self) -> &mut String {
        &mut self.strings
    }

    /// Number of nodes on the tape.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at `idx`, if in bounds.
    pub fn node(&self, idx: u32) -> Option<&Node> {
        self.nodes.get(idx as usize)
    }

    /// The unescaped text for a span.
    ///
    /// Invariant: spans are only produced by this tape's own parse.
    pub fn str_of(&self, span: StrSpan) -> &str {
        let start = span.off as usize;
        &self.strings[start..start + span.len as usize]
    }

    /// Shape of the node at `idx`; `None` when out of bounds.
    pub fn json_type(&self, idx: u32) -> Option<JsonType> {
        self.node(idx).map(|n| match n {
            Node::Null => JsonType::Null,
            Node::Bool(_) => JsonType::Bool,
            Node::Int64(_) => JsonType::Int64,
            Node::Uint64(_) => JsonType::Uint64,
            Node::Double(_) => JsonType::Double,
            Node::String(_) => JsonType::String,
            Node::Array { .. } => JsonType::Array,
            Node::Object { .. } => JsonType::Object,
        })
    }

    /// Index one past the subtree rooted at `idx`.
    pub fn subtree_end(&self, idx: u32) -> u32 {
        match self.node(idx) {
            Some(Node::Array { end, .. }) | Some(Node::Object { end, .. }) => *end,
            _ => idx + 1,
        }
    }
}

/// Forward cursor over the elements of one array node.
///
/// Plain indices, `Copy`, no borrow of the tape — so the same cursor type
/// serves the lifetime-checked iterators and the boxed FFI iterators.
#[derive(Clone, Copy, Debug)]
pub struct ArrayCursor {
    next: u32,
    remaining: u32,
}

impl ArrayCursor {
    /// Start a cursor over the array node at `idx`.
    ///
    /// Fails with `IncorrectType` when the node is not an array, and
    /// `Uninitialized` when `idx` is out of bounds.
    pub fn over(tape: &Tape, idx: u32) -> Result<Self> {
        match tape.node(idx) {
            Some(Node::Array { len, .. }) => Ok(Self {
                next: idx + 1,
                remaining: *len,
            }),
            Some(_) => Err(ErrorCode::IncorrectType),
            None => Err(ErrorCode::Uninitialized),
        }
    }

    /// Node index of the next element, advancing the cursor.
    pub fn step(&mut self, tape: &Tape) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.next;
        self.next = tape.subtree_end(node);
        self.remaining -= 1;
        Some(node)
    }

    /// Elements not yet emitted.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Forward cursor over the fields of one object node.
#[derive(Clone, Copy, Debug)]
pub struct ObjectCursor {
    next: u32,
    remaining: u32,
}

impl ObjectCursor {
    /// Start a cursor over the object node at `idx`.
    pub fn over(tape: &Tape, idx: u32) -> Result<Self> {
        match tape.node(idx) {
            Some(Node::Object { len, .. }) => Ok(Self {
                next: idx + 1,
                remaining: *len,
            }),
            Some(_) => Err(ErrorCode::IncorrectType),
            None => Err(ErrorCode::Uninitialized),
        }
    }

    /// Key span and value node index of the next field, advancing.
    pub fn step(&mut self, tape: &Tape) -> Option<(StrSpan, u32)> {
        if self.remaining == 0 {
            return None;
        }
        // Invariant: object children alternate key string / value subtree.
        let key = match tape.node(self.next) {
            Some(Node::String(span)) => *span,
            _ => return None,
        };
        let value = self.next + 1;
        self.next = tape.subtree_end(value);
        self.remaining -= 1;
        Some((key, value))
    }

    /// Fields not yet emitted.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Core;

    fn parse(src: &str) -> Tape {
        let mut tape = Tape::new();
        Core::new().parse_into(src.as_bytes(), &mut tape).unwrap();
        tape
    }

    #[test]
    fn scalar_tape_has_one_node() {
        let tape = parse("42");
        assert_eq!(tape.node_count(), 1);
        assert_eq!(tape.node(0), Some(&Node::Int64(42)));
        assert_eq!(tape.subtree_end(0), 1);
    }

    #[test]
    fn nested_subtree_ends() {
        // [ {"a": 1}, 2 ]  →  Array, Object, "a", 1, 2
        let tape = parse(r#"[{"a":1},2]"#);
        assert_eq!(tape.node_count(), 5);
        assert_eq!(tape.subtree_end(0), 5);
        assert_eq!(tape.subtree_end(1), 4);
        match tape.node(0) {
            Some(Node::Array { len, end }) => {
                assert_eq!(*len, 2);
                assert_eq!(*end, 5);
            }
            other => panic!("unexpected root {other:?}"),
        }
    }

    #[test]
    fn array_cursor_walks_elements() {
        let tape = parse("[1,[2,3],4]");
        let mut cur = ArrayCursor::over(&tape, 0).unwrap();
        assert_eq!(cur.remaining(), 3);
        assert_eq!(tape.node(cur.step(&tape).unwrap()), Some(&Node::Int64(1)));
        let middle = cur.step(&tape).unwrap();
        assert_eq!(tape.json_type(middle), Some(gale_core::JsonType::Array));
        assert_eq!(tape.node(cur.step(&tape).unwrap()), Some(&Node::Int64(4)));
        assert_eq!(cur.step(&tape), None);
    }

    #[test]
    fn object_cursor_yields_keys_in_order() {
        let tape = parse(r#"{"x":1,"y":[true],"z":null}"#);
        let mut cur = ObjectCursor::over(&tape, 0).unwrap();
        let mut keys = Vec::new();
        while let Some((span, _value)) = cur.step(&tape) {
            keys.push(tape.str_of(span).to_string());
        }
        assert_eq!(keys, ["x", "y", "z"]);
    }

    #[test]
    fn cursor_type_mismatch() {
        let tape = parse("true");
        assert_eq!(
            ArrayCursor::over(&tape, 0).unwrap_err(),
            ErrorCode::IncorrectType
        );
        assert_eq!(
            ObjectCursor::over(&tape, 0).unwrap_err(),
            ErrorCode::IncorrectType
        );
        assert_eq!(
            ArrayCursor::over(&tape, 99).unwrap_err(),
            ErrorCode::Uninitialized
        );
    }
}
