//! Lifetime-checked iterators over containers.

use gale_engine::{ArrayCursor, ObjectCursor, Tape};

use crate::value::Value;

/// Iterator over the elements of one array, in document order.
#[derive(Clone, Copy, Debug)]
pub struct ArrayIter<'doc> {
    tape: &'doc Tape,
    cursor: ArrayCursor,
}

impl<'doc> ArrayIter<'doc> {
    pub(crate) fn new(tape: &'doc Tape, cursor: ArrayCursor) -> Self {
        Self { tape, cursor }
    }
}

impl<'doc> Iterator for ArrayIter<'doc> {
    type Item = Value<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor.step(self.tape)?;
        Some(Value::new(self.tape, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}

/// Iterator over the fields of one object, in document order.
///
/// Keys borrow the document's string arena, so they are plain `&str`
/// with the document's lifetime and no per-step allocation.
#[derive(Clone, Copy, Debug)]
pub struct ObjectIter<'doc> {
    tape: &'doc Tape,
    cursor: ObjectCursor,
}

impl<'doc> ObjectIter<'doc> {
    pub(crate) fn new(tape: &'doc Tape, cursor: ObjectCursor) -> Self {
        Self { tape, cursor }
    }
}

impl<'doc> Iterator for ObjectIter<'doc> {
    type Item = (&'doc str, Value<'doc>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.cursor.step(self.tape)?;
        Some((self.tape.str_of(key), Value::new(self.tape, value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ObjectIter<'_> {}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;

    #[test]
    fn array_iteration_sums_every_element() {
        let src = {
            let parts: Vec<String> = (0..500).map(|n| n.to_string()).collect();
            format!("[{}]", parts.join(","))
        };
        let mut parser = Parser::new(0);
        let doc = parser.parse(src.as_bytes());
        let root = doc.root().unwrap();

        let iter = root.iter_array().unwrap();
        assert_eq!(iter.len(), 500);
        let sum: i64 = iter.map(|v| v.get_i64().unwrap()).sum();
        assert_eq!(sum, (0..500).sum::<i64>());
    }

    #[test]
    fn nested_elements_are_skipped_whole() {
        let mut parser = Parser::new(0);
        let doc = parser.parse(br#"[[1,2,3], "x", {"k": [4]}, 9]"#);
        let root = doc.root().unwrap();
        let last = root.iter_array().unwrap().last().unwrap();
        assert_eq!(last.get_i64(), Ok(9));
    }

    #[test]
    fn object_iteration_preserves_order() {
        let mut parser = Parser::new(0);
        let doc = parser.parse(br#"{"one": 1, "two": [2, 2], "three": 3}"#);
        let root = doc.root().unwrap();

        let mut iter = root.iter_object().unwrap();
        assert_eq!(iter.len(), 3);
        let keys: Vec<&str> = iter.by_ref().map(|(k, _)| k).collect();
        assert_eq!(keys, ["one", "two", "three"]);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn empty_containers_iterate_zero_times() {
        let mut parser = Parser::new(0);
        let doc = parser.parse(b"[[], {}]");
        let root = doc.root().unwrap();
        assert_eq!(root.get_index(0).unwrap().iter_array().unwrap().count(), 0);
        assert_eq!(root.get_index(1).unwrap().iter_object().unwrap().count(), 0);
    }
}
