//! PDF lexical helpers.
//!
//! Byte classification per the PDF character set tables, plus the escape and
//! unescape transforms for name and literal-string syntax. The exact-form
//! writers in [`crate::object`] use the escape direction; a byte-stream
//! reader uses the unescape direction. For every byte value 0x00-0xFF the two
//! directions are exact inverses.

use std::fmt::Write as _;

/// Check if the given byte is PDF whitespace.
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, 0x00 | 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}

/// Check if the given byte is a PDF delimiter character.
pub fn is_delimiter(c: u8) -> bool {
    matches!(
        c,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Check if the given byte is printable ASCII (excluding space).
pub fn is_printable(c: u8) -> bool {
    (0x21..=0x7E).contains(&c)
}

/// Check if the given byte is a decimal digit.
pub fn is_decimal_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Encode raw name bytes into name syntax (without the leading `/`).
///
/// Non-printable bytes, the `#` byte itself, and delimiter characters are
/// written as a two-digit lowercase hex escape prefixed with `#`; everything
/// else passes through unchanged.
pub fn escape_name(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    for &b in raw {
        if !is_printable(b) || b == b'#' || is_delimiter(b) {
            // write! into a String cannot fail
            let _ = write!(out, "#{:02x}", b);
        } else {
            out.push(b as char);
        }
    }
    out
}

/// Decode name syntax (without the leading `/`) back into raw bytes.
///
/// A `#` followed by two hex digits becomes the encoded byte; a `#` not
/// followed by two hex digits passes through literally, matching the lenient
/// behavior readers need for real-world files.
pub fn unescape_name(encoded: &str) -> Vec<u8> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

/// Escape raw string bytes for literal string syntax (without parens).
///
/// Fixed single-character escape table: `\n \r \t \b \f \( \) \\`. All other
/// bytes pass through unchanged.
pub fn escape_string_literal(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        match b {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            _ => out.push(b),
        }
    }
    out
}

/// Undo [`escape_string_literal`]: decode escape sequences back to raw bytes.
///
/// An unknown escape drops the backslash and keeps the following byte, the
/// standard reader behavior for literal strings.
pub fn unescape_string_literal(escaped: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(escaped.len());
    let mut i = 0;
    while i < escaped.len() {
        if escaped[i] == b'\\' && i + 1 < escaped.len() {
            let next = escaped[i + 1];
            match next {
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0C),
                b'(' | b')' | b'\\' => out.push(next),
                _ => out.push(next),
            }
            i += 2;
        } else {
            out.push(escaped[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_set() {
        for b in [0x00u8, 0x09, 0x0A, 0x0C, 0x0D, 0x20] {
            assert!(is_whitespace(b));
        }
        assert!(!is_whitespace(b'a'));
        assert!(!is_whitespace(0x0B));
    }

    #[test]
    fn test_delimiter_set() {
        for b in b"()<>[]{}/%" {
            assert!(is_delimiter(*b));
        }
        assert!(!is_delimiter(b'#'));
        assert!(!is_delimiter(b'a'));
    }

    #[test]
    fn test_printable_range() {
        assert!(is_printable(b'!'));
        assert!(is_printable(b'~'));
        assert!(!is_printable(b' '));
        assert!(!is_printable(0x7F));
    }

    #[test]
    fn test_escape_name_passthrough() {
        assert_eq!(escape_name(b"Type"), "Type");
        assert_eq!(escape_name(b"Fm0"), "Fm0");
    }

    #[test]
    fn test_escape_name_special() {
        assert_eq!(escape_name(b"A B"), "A#20B");
        assert_eq!(escape_name(b"a#b"), "a#23b");
        assert_eq!(escape_name(b"paren("), "paren#28");
    }

    #[test]
    fn test_unescape_name_inverse() {
        for b in 0u8..=255 {
            let raw = vec![b, b'X', b];
            assert_eq!(unescape_name(&escape_name(&raw)), raw, "byte {:#x}", b);
        }
    }

    #[test]
    fn test_unescape_name_literal_hash() {
        // '#' not followed by two hex digits passes through
        assert_eq!(unescape_name("a#zq"), b"a#zq".to_vec());
        assert_eq!(unescape_name("tail#"), b"tail#".to_vec());
    }

    #[test]
    fn test_escape_string_table() {
        assert_eq!(escape_string_literal(b"a(b)c"), b"a\\(b\\)c".to_vec());
        assert_eq!(escape_string_literal(b"\n"), b"\\n".to_vec());
        assert_eq!(escape_string_literal(b"\\"), b"\\\\".to_vec());
    }

    #[test]
    fn test_unescape_string_inverse() {
        for b in 0u8..=255 {
            let raw = vec![b'(', b, b'\\', b];
            let escaped = escape_string_literal(&raw);
            assert_eq!(unescape_string_literal(&escaped), raw, "byte {:#x}", b);
        }
    }
}
