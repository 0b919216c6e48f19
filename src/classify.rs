//! Classification of program text by encoding and literal opportunities.
//!
//! [`classify`] reports how a program is currently encoded ([`CodeType`]) and which
//! literal rewrites apply to it ([`LiteralFlags`]). It is the cheap check callers run
//! before choosing between packing, literal compression and plain display.
//!
//! ```rust
//! use stax_codec::{classify, CodeType, LiteralFlags};
//!
//! let report = classify("\"hello world\" 1234567")?;
//! assert_eq!(report.code_type, CodeType::TightAscii);
//! let expected = LiteralFlags::COMPRESSIBLE_STRING | LiteralFlags::COMPRESSIBLE_INT;
//! assert!(report.literals.contains(expected));
//! # Ok::<(), stax_codec::Error>(())
//! ```

use crate::block::parse;
use crate::huffman::HuffmanTable;
use crate::literals::{compress_integer, compress_string, cram_sequence};
use crate::pack::is_packed;
use crate::syntax::{LexKind, StringEnd};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Encoding state of a program, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeType {
    /// Packed into code page glyphs
    Packed,
    /// Non-ASCII characters and loose formatting
    LooseUnicode,
    /// Non-ASCII characters, tight formatting
    TightUnicode,
    /// ASCII with loose formatting (comments, extra whitespace)
    LooseAscii,
    /// ASCII with control characters, tight formatting
    LowAscii,
    /// Tight printable ASCII, ready to pack
    TightAscii,
}

bitflags::bitflags! {
    /// Literal kinds present in a program.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LiteralFlags: u16 {
        /// A backtick-compressed string
        const COMPRESSED_STRING = 0b0000_0001;
        /// A string literal that compresses shorter
        const COMPRESSIBLE_STRING = 0b0000_0010;
        /// A string literal that does not
        const UNCOMPRESSIBLE_STRING = 0b0000_0100;
        /// A quoted crammed integer `"...%`
        const COMPRESSED_INT = 0b0000_1000;
        /// A decimal literal that crams shorter
        const COMPRESSIBLE_INT = 0b0001_0000;
        /// A decimal literal that does not
        const UNCOMPRESSIBLE_INT = 0b0010_0000;
        /// A crammed array `"...!`
        const CRAMMED_ARRAY = 0b0100_0000;
        /// A `z` integer sequence that crams shorter
        const CRAMMABLE_SEQUENCE = 0b1000_0000;
    }
}

/// Result of [`classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub code_type: CodeType,
    pub literals: LiteralFlags,
}

/// Classifies a program using the embedded English Huffman table.
///
/// # Errors
///
/// Fails only if the embedded table cannot be loaded.
pub fn classify(source: &str) -> Result<Classification> {
    Ok(classify_with(source, HuffmanTable::english()?))
}

/// Classifies a program, judging string compressibility with `table`.
///
/// A program whose first character renders a byte with the high bit set is reported as
/// [`CodeType::Packed`] without further inspection.
#[must_use]
pub fn classify_with(source: &str, table: &HuffmanTable) -> Classification {
    if is_packed(source) {
        return Classification {
            code_type: CodeType::Packed,
            literals: LiteralFlags::empty(),
        };
    }

    let program = parse(source);
    let lexemes = program.tokens_flat();
    let non_ascii = source.chars().any(|ch| u32::from(ch) >= 0x7f);
    let mut loose = false;
    let mut low = false;
    let mut literals = LiteralFlags::empty();
    let mut i = 0;

    while i < lexemes.len() {
        if let Some((end, _)) = cram_sequence(&lexemes, i) {
            literals |= LiteralFlags::CRAMMABLE_SEQUENCE;
            i = end;
            continue;
        }

        let lexeme = lexemes[i];
        match lexeme.kind {
            LexKind::Whitespace => {
                loose |= lexeme.text.len() > 1
                    || lexeme.text.contains('\n')
                    || lexeme.offset == 0
                    || lexeme.end() == source.len();
            }
            LexKind::Comment => loose = true,
            LexKind::Number => {
                literals |= match compress_integer(lexeme.text) {
                    Some(_) => LiteralFlags::COMPRESSIBLE_INT,
                    None => LiteralFlags::UNCOMPRESSIBLE_INT,
                };
            }
            LexKind::SuffixedNumber => literals |= LiteralFlags::UNCOMPRESSIBLE_INT,
            LexKind::String(StringEnd::CrammedInt) => literals |= LiteralFlags::COMPRESSED_INT,
            LexKind::String(StringEnd::CrammedArray) => literals |= LiteralFlags::CRAMMED_ARRAY,
            LexKind::String(end) => {
                literals |= match compress_string(table, lexeme.text, end) {
                    Some(_) => LiteralFlags::COMPRESSIBLE_STRING,
                    None => LiteralFlags::UNCOMPRESSIBLE_STRING,
                };
            }
            LexKind::Compressed { .. } => literals |= LiteralFlags::COMPRESSED_STRING,
            _ => {}
        }
        if !lexeme.kind.is_trivia() && lexeme.text.chars().any(|ch| u32::from(ch) < 0x20) {
            low = true;
        }
        i += 1;
    }

    let code_type = match (non_ascii, loose) {
        (true, true) => CodeType::LooseUnicode,
        (true, false) => CodeType::TightUnicode,
        (false, true) => CodeType::LooseAscii,
        (false, false) if low => CodeType::LowAscii,
        (false, false) => CodeType::TightAscii,
    };
    trace!(?code_type, literals = literals.bits(), "classified program");

    Classification {
        code_type,
        literals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_type(source: &str) -> CodeType {
        classify(source).unwrap().code_type
    }

    fn literals(source: &str) -> LiteralFlags {
        classify(source).unwrap().literals
    }

    #[test]
    fn test_code_types() {
        assert_eq!(code_type(""), CodeType::TightAscii);
        assert_eq!(code_type("1 2+"), CodeType::TightAscii);
        assert_eq!(code_type("1  2+"), CodeType::LooseAscii);
        assert_eq!(code_type(" 1"), CodeType::LooseAscii);
        assert_eq!(code_type("1 "), CodeType::LooseAscii);
        assert_eq!(code_type("1\n2"), CodeType::LooseAscii);
        assert_eq!(code_type("1\tnote\n2"), CodeType::LooseAscii);
        assert_eq!(code_type("'\u{1}"), CodeType::LowAscii);
        assert_eq!(code_type("1\u{7f}"), CodeType::TightUnicode);
        assert_eq!(code_type("1'\u{e9} 2"), CodeType::TightUnicode);
        assert_eq!(code_type("1'\u{e9}\n2"), CodeType::LooseUnicode);
        assert_eq!(code_type("┬"), CodeType::Packed);
    }

    #[test]
    fn test_packed_wins_over_everything() {
        let packed = crate::pack("Hello, World!").unwrap();
        assert_eq!(
            classify(&packed).unwrap(),
            Classification {
                code_type: CodeType::Packed,
                literals: LiteralFlags::empty(),
            }
        );
    }

    #[test]
    fn test_literal_flags() {
        assert_eq!(literals("1234567"), LiteralFlags::COMPRESSIBLE_INT);
        assert_eq!(literals("123"), LiteralFlags::UNCOMPRESSIBLE_INT);
        assert_eq!(literals("1!5"), LiteralFlags::UNCOMPRESSIBLE_INT);
        assert_eq!(literals("\"hello world\""), LiteralFlags::COMPRESSIBLE_STRING);
        assert_eq!(literals("\"a\""), LiteralFlags::UNCOMPRESSIBLE_STRING);
        assert_eq!(literals("`abc`"), LiteralFlags::COMPRESSED_STRING);
        assert_eq!(literals("\"0V6Y%"), LiteralFlags::COMPRESSED_INT);
        assert_eq!(literals("\"48c!"), LiteralFlags::CRAMMED_ARRAY);
        assert_eq!(literals("z1+2+3+"), LiteralFlags::CRAMMABLE_SEQUENCE);
        assert_eq!(literals("+-*"), LiteralFlags::empty());
    }

    #[test]
    fn test_flags_accumulate_inside_blocks() {
        let flags = literals("{\"a\"1234567}F`x`");
        assert_eq!(
            flags,
            LiteralFlags::UNCOMPRESSIBLE_STRING
                | LiteralFlags::COMPRESSIBLE_INT
                | LiteralFlags::COMPRESSED_STRING
        );
    }

    #[test]
    fn test_code_type_serde() {
        let json = serde_json::to_string(&CodeType::LooseAscii).unwrap();
        assert_eq!(json, "\"LooseAscii\"");
        let back: CodeType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CodeType::LooseAscii);
    }
}
