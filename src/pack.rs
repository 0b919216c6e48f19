//! Whole-program packing into one byte per code page glyph.
//!
//! A printable ASCII program is read as a bijective base-95 numeral (first character
//! most significant, digit = code - 0x1F) and rewritten in base 256. The most
//! significant byte carries the packed marker in its top bit; when that bit is already
//! taken by data, a separate `0x80` marker byte leads instead. Bytes are rendered
//! through the [code page](crate::code_page).
//!
//! Before encoding, the lengths of the leading and trailing space runs are swapped.
//! Programs padded at the end thus have the padding in the most significant
//! positions, where a space costs the least. Swapping is its own inverse, so unpacking
//! applies it again.
//!
//! ```rust
//! use stax_codec::{is_packed, pack, unpack};
//!
//! let packed = pack("Hello, World!")?;
//! assert_eq!(packed, "Æ¿┴♠?¥╒½Öà╢");
//! assert!(is_packed(&packed));
//! assert_eq!(unpack(&packed)?, "Hello, World!");
//! # Ok::<(), stax_codec::Error>(())
//! ```

use crate::code_page;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

const PACKED_MARKER: u8 = 0x80;
const RADIX: u32 = 95;

/// Exchanges the lengths of the leading and trailing space runs.
fn swap_padding(text: &str) -> String {
    let body = text.trim_matches(' ');
    if body.is_empty() {
        return text.to_string();
    }
    let leading = text.len() - text.trim_start_matches(' ').len();
    let trailing = text.len() - text.trim_end_matches(' ').len();
    format!("{}{}{}", " ".repeat(trailing), body, " ".repeat(leading))
}

/// Packs printable ASCII source into raw bytes, marker byte first.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCharacter`] for any character outside `0x20..=0x7E`.
pub fn pack_bytes(text: &str) -> Result<Vec<u8>> {
    if let Some((offset, ch)) = text.char_indices().find(|(_, ch)| !matches!(ch, ' '..='~')) {
        return Err(Error::unsupported(ch, offset, "packed form"));
    }

    let n = swap_padding(text)
        .bytes()
        .fold(BigUint::zero(), |acc, code| acc * RADIX + u32::from(code - 0x1f));
    if n.is_zero() {
        return Ok(vec![PACKED_MARKER]);
    }

    let mut bytes = n.to_bytes_le();
    match bytes.last_mut() {
        Some(top) if *top & PACKED_MARKER == 0 => *top |= PACKED_MARKER,
        _ => bytes.push(PACKED_MARKER),
    }
    bytes.reverse();
    Ok(bytes)
}

/// Packs printable ASCII source into code page glyphs.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCharacter`] for any character outside `0x20..=0x7E`.
pub fn pack(text: &str) -> Result<String> {
    Ok(pack_bytes(text)?.into_iter().map(code_page::glyph).collect())
}

/// Restores source from packed bytes.
///
/// # Errors
///
/// Returns [`Error::NotPacked`] if the input is empty or its first byte lacks the marker.
pub fn unpack_bytes(bytes: &[u8]) -> Result<String> {
    let (&first, rest) = bytes.split_first().ok_or(Error::NotPacked)?;
    if first & PACKED_MARKER == 0 {
        return Err(Error::NotPacked);
    }

    let mut numeral = Vec::with_capacity(bytes.len());
    numeral.push(first & !PACKED_MARKER);
    numeral.extend_from_slice(rest);
    let mut n = BigUint::from_bytes_be(&numeral);

    let mut codes = Vec::new();
    while !n.is_zero() {
        n -= 1u32;
        let digit = (&n % RADIX).to_u8().unwrap_or(0);
        codes.push(char::from(digit + 0x20));
        n /= RADIX;
    }
    let text: String = codes.into_iter().rev().collect();
    Ok(swap_padding(&text))
}

/// Restores source from code page glyphs.
///
/// # Errors
///
/// Returns [`Error::NotPacked`] if a character is off the code page or the first
/// glyph lacks the marker.
pub fn unpack(packed: &str) -> Result<String> {
    let bytes = packed
        .chars()
        .map(code_page::byte)
        .collect::<Option<Vec<u8>>>()
        .ok_or(Error::NotPacked)?;
    unpack_bytes(&bytes)
}

/// Returns `true` if `text` starts with a glyph whose byte has the packed marker.
#[must_use]
pub fn is_packed(text: &str) -> bool {
    text.chars()
        .next()
        .and_then(code_page::byte)
        .map_or(false, |byte| byte & PACKED_MARKER != 0)
}

/// Returns `true` if the first byte has the packed marker.
#[inline]
#[must_use]
pub fn is_packed_bytes(bytes: &[u8]) -> bool {
    bytes.first().map_or(false, |byte| byte & PACKED_MARKER != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_packings() {
        let cases: [(&str, &[u8], &str); 7] = [
            ("a", &[194], "┬"),
            ("abc", &[137, 47, 227], "ë/π"),
            ("ab  ", &[141, 81, 33], "ìQ!"),
            ("  ab", &[131, 104, 172, 97], "âh¼a"),
            (" ", &[129], "ü"),
            ("~~~", &[141, 56, 191], "ì8┐"),
            ("}", &[222], "▐"),
        ];
        for (text, bytes, glyphs) in cases {
            assert_eq!(pack_bytes(text).unwrap(), bytes, "{text:?}");
            assert_eq!(pack(text).unwrap(), glyphs);
            assert_eq!(unpack(glyphs).unwrap(), text);
            assert_eq!(unpack_bytes(bytes).unwrap(), text);
        }
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(pack_bytes("").unwrap(), [0x80]);
        assert_eq!(unpack_bytes(&[0x80]).unwrap(), "");
    }

    #[test]
    fn test_swap_padding_is_involution() {
        for text in ["", "   ", "ab", " ab", "ab   ", "  a b ", "a  b"] {
            assert_eq!(swap_padding(&swap_padding(text)), text);
        }
        assert_eq!(swap_padding("ab  "), "  ab");
        assert_eq!(swap_padding(" a  "), "  a ");
    }

    #[test]
    fn test_rejects_non_printable() {
        let err = pack("a\nb").unwrap_err();
        assert_eq!(err, Error::unsupported('\n', 1, "packed form"));
        assert!(pack("caf\u{e9}").is_err());
    }

    #[test]
    fn test_unpack_requires_marker() {
        assert_eq!(unpack("abc"), Err(Error::NotPacked));
        assert_eq!(unpack(""), Err(Error::NotPacked));
        assert_eq!(unpack_bytes(&[0x7f, 0x01]), Err(Error::NotPacked));
    }

    #[test]
    fn test_unpack_rejects_glyphs_off_the_code_page() {
        assert_eq!(unpack("ü€"), Err(Error::NotPacked));
        let mut packed = pack("\"Fizz\"").unwrap();
        packed.push('\u{2603}');
        assert_eq!(unpack(&packed), Err(Error::NotPacked));
    }

    #[test]
    fn test_is_packed() {
        assert!(is_packed("┬"));
        assert!(!is_packed("a"));
        assert!(!is_packed(""));
        assert!(!is_packed("€"));
        assert!(is_packed_bytes(&[0x80]));
        assert!(!is_packed_bytes(&[0x7f]));
        assert!(!is_packed_bytes(&[]));
    }
}
