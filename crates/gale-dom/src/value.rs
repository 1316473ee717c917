//! Borrowed views into a parsed document.

use std::fmt;

use gale_core::{ErrorCode, JsonType, Result};
use gale_engine::{ArrayCursor, Node, ObjectCursor, Tape};

use crate::iter::{ArrayIter, ObjectIter};

/// One value inside a [`Document`](crate::Document): a tape borrow plus a
/// node index.
///
/// Two words, `Copy`, free to pass around. The lifetime ties every value
/// to its document, so a dangling read is a compile error, not a runtime
/// hazard. Extraction is checked: asking a string for an integer is
/// `IncorrectType`, never a reinterpreted payload.
#[derive(Clone, Copy, Debug)]
pub struct Value<'doc> {
    tape: &'doc Tape,
    node: u32,
}

impl<'doc> Value<'doc> {
    pub(crate) fn new(tape: &'doc Tape, node: u32) -> Self {
        Self { tape, node }
    }

    fn node(&self) -> &'doc Node {
        // Invariant: `node` was produced by this tape's parse or checked
        // by Document::value_at, so it is always in bounds.
        match self.tape.node(self.node) {
            Some(n) => n,
            None => &Node::Null,
        }
    }

    /// The node index, for binding layers that cannot carry borrows.
    pub fn node_index(&self) -> u32 {
        self.node
    }

    /// The value's shape.
    pub fn value_type(&self) -> JsonType {
        match self.node() {
            Node::Null => JsonType::Null,
            Node::Bool(_) => JsonType::Bool,
            Node::Int64(_) => JsonType::Int64,
            Node::Uint64(_) => JsonType::Uint64,
            Node::Double(_) => JsonType::Double,
            Node::String(_) => JsonType::String,
            Node::Array { .. } => JsonType::Array,
            Node::Object { .. } => JsonType::Object,
        }
    }

    /// True for the `null` literal.
    pub fn is_null(&self) -> bool {
        self.value_type() == JsonType::Null
    }

    /// True for a boolean.
    pub fn is_bool(&self) -> bool {
        self.value_type() == JsonType::Bool
    }

    /// True for an integer stored as `i64`.
    pub fn is_i64(&self) -> bool {
        self.value_type() == JsonType::Int64
    }

    /// True for an integer stored as `u64` (above `i64::MAX`).
    pub fn is_u64(&self) -> bool {
        self.value_type() == JsonType::Uint64
    }

    /// True for a double.
    pub fn is_f64(&self) -> bool {
        self.value_type() == JsonType::Double
    }

    /// True for any numeric shape.
    pub fn is_number(&self) -> bool {
        self.value_type().is_number()
    }

    /// True for a string.
    pub fn is_string(&self) -> bool {
        self.value_type() == JsonType::String
    }

    /// True for an array.
    pub fn is_array(&self) -> bool {
        self.value_type() == JsonType::Array
    }

    /// True for an object.
    pub fn is_object(&self) -> bool {
        self.value_type() == JsonType::Object
    }

    /// The boolean payload.
    pub fn get_bool(&self) -> Result<bool> {
        match self.node() {
            Node::Bool(b) => Ok(*b),
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// The value as `i64`.
    ///
    /// A `u64`-shaped integer that fits is widened; one that does not is
    /// `NumberOutOfRange`. Doubles are never silently truncated.
    pub fn get_i64(&self) -> Result<i64> {
        match self.node() {
            Node::Int64(v) => Ok(*v),
            Node::Uint64(v) => {
                i64::try_from(*v).map_err(|_| ErrorCode::NumberOutOfRange)
            }
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// The value as `u64`.
    ///
    /// A non-negative `i64`-shaped integer is accepted; a negative one is
    /// `NumberOutOfRange`.
    pub fn get_u64(&self) -> Result<u64> {
        match self.node() {
            Node::Uint64(v) => Ok(*v),
            Node::Int64(v) => {
                u64::try_from(*v).map_err(|_| ErrorCode::NumberOutOfRange)
            }
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// The value as `f64`; any numeric shape converts.
    pub fn get_f64(&self) -> Result<f64> {
        match self.node() {
            Node::Double(v) => Ok(*v),
            Node::Int64(v) => Ok(*v as f64),
            Node::Uint64(v) => Ok(*v as f64),
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// The unescaped string contents, borrowed from the document.
    pub fn get_str(&self) -> Result<&'doc str> {
        match self.node() {
            Node::String(span) => Ok(self.tape.str_of(*span)),
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// `get_bool` or the given default.
    pub fn bool_or(&self, default: bool) -> bool {
        self.get_bool().unwrap_or(default)
    }

    /// `get_i64` or the given default.
    pub fn i64_or(&self, default: i64) -> i64 {
        self.get_i64().unwrap_or(default)
    }

    /// `get_u64` or the given default.
    pub fn u64_or(&self, default: u64) -> u64 {
        self.get_u64().unwrap_or(default)
    }

    /// `get_f64` or the given default.
    pub fn f64_or(&self, default: f64) -> f64 {
        self.get_f64().unwrap_or(default)
    }

    /// `get_str` or the given default.
    pub fn str_or(&self, default: &'doc str) -> &'doc str {
        self.get_str().unwrap_or(default)
    }

    /// The value of the first field named `name`.
    ///
    /// `IncorrectType` on a non-object; `NoSuchField` when absent.
    /// Lookup is a linear scan in document order, matching the unordered
    /// field model: duplicate keys resolve to the first occurrence.
    pub fn get_field(&self, name: &str) -> Result<Value<'doc>> {
        let mut cursor = ObjectCursor::over(self.tape, self.node)?;
        while let Some((key, value)) = cursor.step(self.tape) {
            if self.tape.str_of(key) == name {
                return Ok(Value::new(self.tape, value));
            }
        }
        Err(ErrorCode::NoSuchField)
    }

    /// True when this is an object with a field named `name`.
    ///
    /// Total: a non-object simply has no fields.
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_ok()
    }

    /// The element at `index`.
    ///
    /// `IncorrectType` on a non-array; `IndexOutOfBounds` past the end.
    pub fn get_index(&self, index: usize) -> Result<Value<'doc>> {
        let mut cursor = ArrayCursor::over(self.tape, self.node)?;
        let mut remaining = index;
        while let Some(node) = cursor.step(self.tape) {
            if remaining == 0 {
                return Ok(Value::new(self.tape, node));
            }
            remaining -= 1;
        }
        Err(ErrorCode::IndexOutOfBounds)
    }

    /// Element count of an array; `IncorrectType` otherwise.
    pub fn array_size(&self) -> Result<u32> {
        match self.node() {
            Node::Array { len, .. } => Ok(*len),
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// Field count of an object; `IncorrectType` otherwise.
    pub fn object_size(&self) -> Result<u32> {
        match self.node() {
            Node::Object { len, .. } => Ok(*len),
            _ => Err(ErrorCode::IncorrectType),
        }
    }

    /// Child count of either container shape; 0 for every scalar.
    pub fn len(&self) -> usize {
        match self.node() {
            Node::Array { len, .. } | Node::Object { len, .. } => *len as usize,
            _ => 0,
        }
    }

    /// True when `len()` is 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the elements of an array.
    pub fn iter_array(&self) -> Result<ArrayIter<'doc>> {
        let cursor = ArrayCursor::over(self.tape, self.node)?;
        Ok(ArrayIter::new(self.tape, cursor))
    }

    /// Iterate the fields of an object in document order.
    pub fn iter_object(&self) -> Result<ObjectIter<'doc>> {
        let cursor = ObjectCursor::over(self.tape, self.node)?;
        Ok(ObjectIter::new(self.tape, cursor))
    }
}

impl fmt::Display for Value<'_> {
    /// Serialize as compact JSON text.
    ///
    /// Intended for debugging and logging; numbers print in Rust's
    /// shortest round-trip form, which may differ lexically from the
    /// source document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Null => f.write_str("null"),
            Node::Bool(true) => f.write_str("true"),
            Node::Bool(false) => f.write_str("false"),
            Node::Int64(v) => write!(f, "{v}"),
            Node::Uint64(v) => write!(f, "{v}"),
            Node::Double(v) => write!(f, "{v:?}"),
            Node::String(span) => write_escaped(f, self.tape.str_of(*span)),
            Node::Array { .. } => {
                f.write_str("[")?;
                let mut first = true;
                let mut cursor = match ArrayCursor::over(self.tape, self.node) {
                    Ok(c) => c,
                    Err(_) => return Err(fmt::Error),
                };
                while let Some(node) = cursor.step(self.tape) {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{}", Value::new(self.tape, node))?;
                }
                f.write_str("]")
            }
            Node::Object { .. } => {
                f.write_str("{")?;
                let mut first = true;
                let mut cursor = match ObjectCursor::over(self.tape, self.node) {
                    Ok(c) => c,
                    Err(_) => return Err(fmt::Error),
                };
                while let Some((key, value)) = cursor.step(self.tape) {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write_escaped(f, self.tape.str_of(key))?;
                    f.write_str(":")?;
                    write!(f, "{}", Value::new(self.tape, value))?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use gale_core::{ErrorCode, JsonType};

    fn with_doc<F: FnOnce(crate::Document)>(src: &str, check: F) {
        let mut parser = Parser::new(0);
        check(parser.parse(src.as_bytes()));
    }

    #[test]
    fn predicates_are_total_and_exclusive() {
        with_doc(r#"[null, true, 1, 9223372036854775808, 1.5, "s", [], {}]"#, |doc| {
            let root = doc.root().unwrap();
            let types: Vec<JsonType> = root
                .iter_array()
                .unwrap()
                .map(|v| v.value_type())
                .collect();
            assert_eq!(
                types,
                [
                    JsonType::Null,
                    JsonType::Bool,
                    JsonType::Int64,
                    JsonType::Uint64,
                    JsonType::Double,
                    JsonType::String,
                    JsonType::Array,
                    JsonType::Object,
                ]
            );
        });
    }

    #[test]
    fn numeric_widening() {
        with_doc("[1, 9223372036854775808, -1, 2.5]", |doc| {
            let root = doc.root().unwrap();
            let small = root.get_index(0).unwrap();
            let big = root.get_index(1).unwrap();
            let negative = root.get_index(2).unwrap();
            let double = root.get_index(3).unwrap();

            assert_eq!(small.get_u64(), Ok(1));
            assert_eq!(big.get_i64(), Err(ErrorCode::NumberOutOfRange));
            assert_eq!(big.get_u64(), Ok(i64::MAX as u64 + 1));
            assert_eq!(negative.get_u64(), Err(ErrorCode::NumberOutOfRange));
            assert_eq!(negative.get_i64(), Ok(-1));
            assert_eq!(small.get_f64(), Ok(1.0));
            assert_eq!(double.get_f64(), Ok(2.5));
            assert_eq!(double.get_i64(), Err(ErrorCode::IncorrectType));
        });
    }

    #[test]
    fn mismatched_extraction_is_incorrect_type() {
        with_doc(r#""text""#, |doc| {
            let root = doc.root().unwrap();
            assert_eq!(root.get_bool(), Err(ErrorCode::IncorrectType));
            assert_eq!(root.get_i64(), Err(ErrorCode::IncorrectType));
            assert_eq!(root.get_str(), Ok("text"));
        });
    }

    #[test]
    fn defaulting_extraction() {
        with_doc(r#"{"flag": true}"#, |doc| {
            let root = doc.root().unwrap();
            let flag = root.get_field("flag").unwrap();
            assert!(flag.bool_or(false));
            assert_eq!(flag.i64_or(7), 7);
            assert_eq!(flag.str_or("fallback"), "fallback");
            assert_eq!(flag.f64_or(0.5), 0.5);
            assert_eq!(flag.u64_or(9), 9);
        });
    }

    #[test]
    fn field_navigation() {
        with_doc(r#"{"a": 1, "b": {"c": 2}, "a": 3}"#, |doc| {
            let root = doc.root().unwrap();
            // Duplicate keys resolve to the first occurrence.
            assert_eq!(root.get_field("a").unwrap().get_i64(), Ok(1));
            assert_eq!(
                root.get_field("b").unwrap().get_field("c").unwrap().get_i64(),
                Ok(2)
            );
            assert_eq!(root.get_field("missing").unwrap_err(), ErrorCode::NoSuchField);
            assert!(root.has_field("b"));
            assert!(!root.has_field("missing"));
        });
        with_doc("[1]", |doc| {
            let root = doc.root().unwrap();
            assert_eq!(root.get_field("a").unwrap_err(), ErrorCode::IncorrectType);
            assert!(!root.has_field("a"));
        });
    }

    #[test]
    fn index_navigation() {
        with_doc("[10, [20, 21], 30]", |doc| {
            let root = doc.root().unwrap();
            assert_eq!(root.get_index(0).unwrap().get_i64(), Ok(10));
            assert_eq!(
                root.get_index(1).unwrap().get_index(1).unwrap().get_i64(),
                Ok(21)
            );
            assert_eq!(root.get_index(2).unwrap().get_i64(), Ok(30));
            assert_eq!(root.get_index(3).unwrap_err(), ErrorCode::IndexOutOfBounds);
            assert_eq!(root.array_size(), Ok(3));
            assert_eq!(root.object_size().unwrap_err(), ErrorCode::IncorrectType);
        });
    }

    #[test]
    fn len_is_total() {
        with_doc(r#"[{"a":1,"b":2}, [1], 5]"#, |doc| {
            let root = doc.root().unwrap();
            assert_eq!(root.len(), 3);
            assert_eq!(root.get_index(0).unwrap().len(), 2);
            assert_eq!(root.get_index(1).unwrap().len(), 1);
            assert_eq!(root.get_index(2).unwrap().len(), 0);
            assert!(!root.is_empty());
        });
    }

    #[test]
    fn display_round_trips_through_the_parser() {
        let src = r#"{"a":[1,-2,3.5],"b":"line\nbreak","c":null,"d":18446744073709551615}"#;
        let mut parser = Parser::new(0);
        let doc = parser.parse(src.as_bytes());
        let printed = doc.root().unwrap().to_string();
        assert_eq!(printed, src);

        let reparsed = parser.parse(printed.as_bytes());
        assert!(reparsed.valid());
    }
}
