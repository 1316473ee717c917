//! End-to-end parse and navigation coverage through the public API.

use gale_core::ErrorCode;
use gale_dom::Parser;
use proptest::prelude::*;

#[test]
fn scalar_boundaries() {
    let mut parser = Parser::new(0);

    let doc = parser.parse(b"9223372036854775807");
    assert_eq!(doc.root().unwrap().get_i64(), Ok(i64::MAX));

    let doc = parser.parse(b"-9223372036854775808");
    assert_eq!(doc.root().unwrap().get_i64(), Ok(i64::MIN));

    let doc = parser.parse(b"18446744073709551615");
    let root = doc.root().unwrap();
    assert!(root.is_u64());
    assert_eq!(root.get_u64(), Ok(u64::MAX));
    assert_eq!(root.get_i64(), Err(ErrorCode::NumberOutOfRange));
}

#[test]
fn malformed_input_catalogue() {
    let cases: &[(&[u8], ErrorCode)] = &[
        (b"", ErrorCode::Empty),
        (b"   ", ErrorCode::Empty),
        (b"{invalid}", ErrorCode::TapeError),
        (b"[1,", ErrorCode::TapeError),
        (b"\"unterminated", ErrorCode::UnclosedString),
        (b"\"bad\\q\"", ErrorCode::StringError),
        (b"truth", ErrorCode::TAtomError),
        (b"falsy", ErrorCode::FAtomError),
        (b"nil", ErrorCode::NAtomError),
        (b"18446744073709551616", ErrorCode::NumberError),
        (b"-9223372036854775809", ErrorCode::NumberError),
        (b"1 1", ErrorCode::TrailingContent),
        (b"\xC3\x28", ErrorCode::Utf8Error),
    ];
    let mut parser = Parser::new(0);
    for (src, expected) in cases {
        let doc = parser.parse(src);
        assert_eq!(
            doc.error(),
            Some(*expected),
            "input {:?}",
            String::from_utf8_lossy(src)
        );
        assert_eq!(doc.root().unwrap_err(), *expected);
    }
}

#[test]
fn a_failed_parse_does_not_poison_the_parser() {
    let mut parser = Parser::new(0);
    assert!(!parser.parse(b"{broken").valid());
    let doc = parser.parse(br#"{"fine": true}"#);
    assert!(doc.root().unwrap().get_field("fine").unwrap().get_bool().unwrap());
}

#[test]
fn nested_navigation_round_trip() {
    let mut parser = Parser::new(0);
    let doc = parser.parse(br#"{"a": {"b": [1, 2, 3]}}"#);
    let root = doc.root().unwrap();

    let b = root.get_field("a").unwrap().get_field("b").unwrap();
    assert_eq!(b.array_size(), Ok(3));
    for (i, expected) in [1, 2, 3].into_iter().enumerate() {
        assert_eq!(b.get_index(i).unwrap().get_i64(), Ok(expected));
    }
    assert_eq!(b.get_index(3).unwrap_err(), ErrorCode::IndexOutOfBounds);

    // The same value read twice gives the same answer.
    let again = root.get_field("a").unwrap().get_field("b").unwrap();
    assert_eq!(again.get_index(2).unwrap().get_i64(), Ok(3));
}

#[test]
fn values_survive_heavy_interleaved_reads() {
    let src = {
        let fields: Vec<String> = (0..300).map(|n| format!("\"k{n}\": {n}")).collect();
        format!("{{{}}}", fields.join(","))
    };
    let mut parser = Parser::new(0);
    let doc = parser.parse(src.as_bytes());
    let root = doc.root().unwrap();

    // Values are plain borrows; no amount of further navigation can
    // invalidate one that is still held.
    let first = root.get_field("k0").unwrap();
    for n in 0..300 {
        let v = root.get_field(&format!("k{n}")).unwrap();
        assert_eq!(v.get_i64(), Ok(n));
    }
    assert_eq!(first.get_i64(), Ok(0));
}

#[test]
fn utility_surface() {
    assert_eq!(gale_engine::PADDING, 64);
    assert_eq!(gale_engine::active_implementation(), "portable");
    assert_eq!(gale_engine::validate(br#"{"k": [1]}"#), Ok(()));
    assert_eq!(
        gale_engine::validate(b"{bad"),
        Err(ErrorCode::TapeError)
    );
    let out = gale_engine::minify(b" [ 1 , 2 ] ").unwrap();
    assert_eq!(out, b"[1,2]");
}

proptest! {
    #[test]
    fn i64_values_round_trip(v in any::<i64>()) {
        let mut parser = Parser::new(0);
        let doc = parser.parse(v.to_string().as_bytes());
        prop_assert_eq!(doc.root().unwrap().get_i64(), Ok(v));
    }

    #[test]
    fn string_values_round_trip(s in "[a-zA-Z0-9 _.\u{e9}\u{4e16}]{0,40}") {
        let literal = format!("\"{s}\"");
        let mut parser = Parser::new(0);
        let doc = parser.parse(literal.as_bytes());
        prop_assert_eq!(doc.root().unwrap().get_str(), Ok(s.as_str()));
    }

    #[test]
    fn display_output_reparses_identically(
        ints in prop::collection::vec(any::<i64>(), 0..8),
    ) {
        let src = format!(
            "[{}]",
            ints.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
        );
        let mut parser = Parser::new(0);
        let doc = parser.parse(src.as_bytes());
        let printed = doc.root().unwrap().to_string();
        let doc2 = parser.parse(printed.as_bytes());
        let root2 = doc2.root().unwrap();
        prop_assert_eq!(root2.array_size().unwrap() as usize, ints.len());
        for (i, v) in ints.iter().enumerate() {
            prop_assert_eq!(root2.get_index(i).unwrap().get_i64(), Ok(*v));
        }
    }
}
