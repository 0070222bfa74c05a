//! Round-trip properties of the exact lexical forms.
//!
//! Escaping and unescaping must be exact inverses for all byte values, and
//! reals must re-parse to the value that was written.

use pdf_redact::syntax::{
    escape_name, escape_string_literal, unescape_name, unescape_string_literal,
};
use pdf_redact::Object;
use proptest::prelude::*;

proptest! {
    #[test]
    fn name_escaping_roundtrips(raw in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(unescape_name(&escape_name(&raw)), raw);
    }

    #[test]
    fn string_escaping_roundtrips(raw in proptest::collection::vec(any::<u8>(), 0..256)) {
        let escaped = escape_string_literal(&raw);
        prop_assert_eq!(unescape_string_literal(&escaped), raw);
    }

    #[test]
    fn escaped_strings_have_balanced_parens(raw in proptest::collection::vec(any::<u8>(), 0..256)) {
        // every paren in the escaped form is preceded by a backslash
        let escaped = escape_string_literal(&raw);
        for (i, &b) in escaped.iter().enumerate() {
            if b == b'(' || b == b')' {
                prop_assert!(i > 0 && escaped[i - 1] == b'\\');
            }
        }
    }

    #[test]
    fn real_syntax_reparses(value in -1.0e9f64..1.0e9) {
        let written = Object::Real(value).syntax_string();
        let parsed: f64 = written.parse().unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn integer_syntax_reparses(value in any::<i64>()) {
        let written = Object::Integer(value).syntax_string();
        let parsed: i64 = written.parse().unwrap();
        prop_assert_eq!(parsed, value);
    }
}

#[test]
fn test_every_byte_roundtrips_in_names() {
    let raw: Vec<u8> = (0u8..=255).collect();
    assert_eq!(unescape_name(&escape_name(&raw)), raw);
}

#[test]
fn test_every_byte_roundtrips_in_strings() {
    let raw: Vec<u8> = (0u8..=255).collect();
    assert_eq!(unescape_string_literal(&escape_string_literal(&raw)), raw);
}

#[test]
fn test_hex_strings_bypass_escaping() {
    let obj = Object::hex_string(vec![b'(', b'\\', 0x00]);
    assert_eq!(obj.syntax_string(), "<285c00>");
}
