//! Lexical minification.
//!
//! Strips insignificant whitespace without parsing: string literals are
//! copied verbatim (escapes included), everything between them loses its
//! spaces, tabs, and newlines. The output is never longer than the input,
//! so a caller-owned buffer of the input's size always fits. The only
//! structural fact the pass depends on is string delimiting, so the one
//! error it can report is an unterminated string.

use gale_core::{ErrorCode, Result};

/// Minify `src`, returning the compacted bytes.
pub fn minify(src: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;

    while i < src.len() {
        match src[i] {
            b' ' | b'\t' | b'\n' | b'\r' => i += 1,
            b'"' => {
                let start = i;
                i += 1;
                loop {
                    match src.get(i) {
                        Some(b'"') => {
                            i += 1;
                            break;
                        }
                        Some(b'\\') => {
                            // Keep the escape pair together so an escaped
                            // quote does not end the literal.
                            if i + 1 >= src.len() {
                                return Err(ErrorCode::UnclosedString);
                            }
                            i += 2;
                        }
                        Some(_) => i += 1,
                        None => return Err(ErrorCode::UnclosedString),
                    }
                }
                out.extend_from_slice(&src[start..i]);
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Core;
    use crate::tape::Tape;
    use proptest::prelude::*;

    fn mini(src: &str) -> Result<String> {
        minify(src.as_bytes()).map(|v| String::from_utf8(v).unwrap())
    }

    #[test]
    fn strips_whitespace_outside_strings() {
        assert_eq!(
            mini(" { \"a\" : [ 1 , 2 ] } "),
            Ok(r#"{"a":[1,2]}"#.to_string())
        );
        assert_eq!(mini("\n\t42\r\n"), Ok("42".to_string()));
    }

    #[test]
    fn preserves_string_contents() {
        assert_eq!(
            mini(r#"{"key with  spaces": "a \" b \\ c"}"#),
            Ok(r#"{"key with  spaces":"a \" b \\ c"}"#.to_string())
        );
        assert_eq!(mini(r#""tab\there""#), Ok(r#""tab\there""#.to_string()));
    }

    #[test]
    fn unterminated_strings_are_rejected() {
        assert_eq!(mini("\"open"), Err(ErrorCode::UnclosedString));
        assert_eq!(mini("\"trailing\\"), Err(ErrorCode::UnclosedString));
    }

    #[test]
    fn output_never_grows() {
        let src = br#"  { "a": [1, 2, 3],  "b": "x y"  }  "#;
        let out = minify(src).unwrap();
        assert!(out.len() <= src.len());
    }

    proptest! {
        // Minifying a well-formed document must not change its value.
        #[test]
        fn preserves_parse_results(
            src in "\\[( *(0|-?[1-9][0-9]{0,4}) *,)* *(0|-?[1-9][0-9]{0,4}) *\\]",
        ) {
            let compact = minify(src.as_bytes()).unwrap();
            prop_assert!(compact.len() <= src.len());

            let mut core = Core::new();
            let mut before = Tape::new();
            let mut after = Tape::new();
            core.parse_into(src.as_bytes(), &mut before).unwrap();
            core.parse_into(&compact, &mut after).unwrap();
            prop_assert_eq!(before.node_count(), after.node_count());
            for idx in 0..before.node_count() as u32 {
                prop_assert_eq!(before.node(idx), after.node(idx));
            }
        }
    }
}
