//! Symbol alphabets used as digits by the numeral codecs.
//!
//! Two independent alphabets exist and must never be interchanged:
//!
//! - [`CRAM`]: digits of crammed integers and arrays. It leaves out `"`, `` ` ``, `%`
//!   and `!` so a crammed body can never close or escape its own string literal.
//! - [`HUFFMAN`]: digits of compressed string literals. Only the backtick, which
//!   delimits those literals, is left out.

/// An ordered, duplicate-free set of printable ASCII characters.
///
/// A character's position is its digit value. Lookups go through a table precomputed
/// at compile time.
#[derive(Debug)]
pub struct Alphabet {
    symbols: &'static str,
    index: [u8; 128],
}

const ABSENT: u8 = u8::MAX;

impl Alphabet {
    const fn new(symbols: &'static str) -> Self {
        let bytes = symbols.as_bytes();
        let mut index = [ABSENT; 128];
        let mut i = 0;
        while i < bytes.len() {
            // Non-ASCII or repeated symbols fail const evaluation.
            assert!(bytes[i] < 128 && index[bytes[i] as usize] == ABSENT);
            index[bytes[i] as usize] = i as u8;
            i += 1;
        }
        Alphabet { symbols, index }
    }

    /// Number of symbols, i.e. the radix of the numerals written in this alphabet.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; alphabets are fixed non-empty tables.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol for `digit`.
    ///
    /// # Panics
    ///
    /// Panics if `digit >= self.len()`.
    #[inline]
    #[must_use]
    pub fn symbol(&self, digit: usize) -> char {
        char::from(self.symbols.as_bytes()[digit])
    }

    /// Returns the digit value of `ch`, or `None` if it is not in the alphabet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stax_codec::alphabet::CRAM;
    ///
    /// assert_eq!(CRAM.digit('0'), Some(0));
    /// assert_eq!(CRAM.digit('a'), Some(10));
    /// assert_eq!(CRAM.digit('"'), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn digit(&self, ch: char) -> Option<usize> {
        let code = ch as usize;
        if code >= 128 || self.index[code] == ABSENT {
            None
        } else {
            Some(usize::from(self.index[code]))
        }
    }

    /// Returns `true` if `ch` is one of the symbols.
    #[inline]
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.digit(ch).is_some()
    }

    /// The symbols in digit order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.symbols
    }
}

/// Digits of crammed integer and array literals (91 symbols).
pub static CRAM: Alphabet = Alphabet::new(
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ \
     #$&'()*+,-./:;<=>?@[\\]^_{|}~",
);

/// Digits of compressed string literals (94 symbols, ASCII order).
pub static HUFFMAN: Alphabet = Alphabet::new(
    " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_\
     abcdefghijklmnopqrstuvwxyz{|}~",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(CRAM.len(), 91);
        assert_eq!(HUFFMAN.len(), 94);
    }

    #[test]
    fn test_cram_excludes_string_delimiters() {
        for ch in ['"', '`', '%', '!'] {
            assert!(!CRAM.contains(ch), "{ch:?} must not be a cram digit");
        }
        assert!(CRAM.contains(' '));
        assert!(CRAM.contains('~'));
    }

    #[test]
    fn test_huffman_excludes_backtick_only() {
        assert!(!HUFFMAN.contains('`'));
        for code in 0x20u8..0x7f {
            let ch = char::from(code);
            if ch != '`' {
                assert!(HUFFMAN.contains(ch));
            }
        }
    }

    #[test]
    fn test_symbol_digit_inverse() {
        for alphabet in [&CRAM, &HUFFMAN] {
            for digit in 0..alphabet.len() {
                assert_eq!(alphabet.digit(alphabet.symbol(digit)), Some(digit));
            }
        }
        assert_eq!(CRAM.digit('é'), None);
    }
}
