//! Rewriting literals of a program into their compressed forms and back.
//!
//! Three literal kinds have shorter spellings:
//!
//! | Readable | Compressed | Condition |
//! |----------|------------|-----------|
//! | `1234567` | `"0V6Y%` | canonical decimal, strictly shorter |
//! | `"hello world"` | `` `f}$Fb8jM!$` `` | canonical escapes, Huffman-codable, strictly shorter |
//! | `zA+20+30+40+` | `"EEEF!` | at least two canonical terms, strictly shorter |
//!
//! Everything else is copied through unchanged, so compressing and then decompressing
//! reproduces the program. Decompression expands every compressed literal it finds.
//!
//! Both directions reject packed programs with [`Error::AlreadyPacked`].
//!
//! ```rust
//! use stax_codec::{compress_literals, decompress_literals};
//!
//! let source = "\"hello world\"zA+20+30+40+";
//! let compressed = compress_literals(source)?;
//! assert_eq!(compressed, "`f}$Fb8jM!$`\"EEEF!");
//! assert_eq!(decompress_literals(&compressed)?, source);
//! # Ok::<(), stax_codec::Error>(())
//! ```

use crate::block::{parse, Lexeme};
use crate::cram::{bijective, cram, uncram, uncram_single};
use crate::huffman::{DecompressCache, HuffmanTable};
use crate::pack::is_packed;
use crate::syntax::{
    compressed_body, escape_string, string_body, unescape_string, LexKind, StringEnd,
};
use crate::{Error, LiteralOptions, Result};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::{debug, trace};

/// Decimal literals without a redundant leading zero.
fn is_canonical_decimal(text: &str) -> bool {
    !text.is_empty() && (text == "0" || !text.starts_with('0'))
}

/// Quoted crammed form of a decimal literal, when canonical and strictly shorter.
pub(crate) fn compress_integer(text: &str) -> Option<String> {
    if !is_canonical_decimal(text) {
        return None;
    }
    let n: BigInt = text.parse().ok()?;
    let crammed = format!("\"{}%", bijective(n.magnitude()));
    (crammed.len() < text.len()).then_some(crammed)
}

/// Compressed form of a string literal token, when its escapes are canonical and the
/// result is strictly shorter.
pub(crate) fn compress_string(table: &HuffmanTable, text: &str, end: StringEnd) -> Option<String> {
    let body = string_body(text, end);
    let plain = unescape_string(body);
    if escape_string(&plain) != body {
        return None;
    }
    let code = table.compress(&plain)?;
    let compressed = match end {
        StringEnd::EndOfInput => format!("`{}", code),
        _ => format!("`{}`", code),
    };
    (compressed.chars().count() < text.chars().count()).then_some(compressed)
}

/// A `z` sequence `z(n N? +)+` found in a lexeme stream.
#[derive(Debug, PartialEq)]
pub(crate) struct Sequence {
    /// Index just past the last lexeme of the sequence
    pub end: usize,
    pub values: Vec<BigInt>,
}

fn term_value(lexeme: &Lexeme<'_>) -> Option<BigInt> {
    match lexeme.kind {
        LexKind::Number if is_canonical_decimal(lexeme.text) => lexeme.text.parse().ok(),
        LexKind::Operator if lexeme.text == "A" => Some(BigInt::from(10)),
        _ => None,
    }
}

/// Matches a sequence of at least two terms starting at `start`.
pub(crate) fn sequence_at(lexemes: &[Lexeme<'_>], start: usize) -> Option<Sequence> {
    if lexemes.get(start)?.text != "z" {
        return None;
    }
    let text_at = |i: usize| lexemes.get(i).map(|lexeme| lexeme.text);

    let mut values = Vec::new();
    let mut pos = start + 1;
    while let Some(value) = lexemes.get(pos).and_then(term_value) {
        let mut next = pos + 1;
        let value = if text_at(next) == Some("N") {
            if value.is_zero() {
                break;
            }
            next += 1;
            -value
        } else {
            value
        };
        if text_at(next) != Some("+") {
            break;
        }
        values.push(value);
        pos = next + 1;
    }

    (values.len() >= 2).then_some(Sequence { end: pos, values })
}

/// Crammed array replacing the sequence at `start`, when strictly shorter.
pub(crate) fn cram_sequence(lexemes: &[Lexeme<'_>], start: usize) -> Option<(usize, String)> {
    let sequence = sequence_at(lexemes, start)?;
    let original = lexemes[sequence.end - 1].end() - lexemes[start].offset;
    let crammed = format!("\"{}!", cram(&sequence.values));
    (crammed.len() < original).then_some((sequence.end, crammed))
}

/// Compresses literals with the embedded English table and every rewrite enabled.
///
/// # Errors
///
/// Returns [`Error::AlreadyPacked`] for a packed program.
pub fn compress_literals(source: &str) -> Result<String> {
    compress_literals_with(source, HuffmanTable::english()?, LiteralOptions::default())
}

/// Compresses the literals selected by `options`, coding strings with `table`.
///
/// # Errors
///
/// Returns [`Error::AlreadyPacked`] for a packed program.
pub fn compress_literals_with(
    source: &str,
    table: &HuffmanTable,
    options: LiteralOptions,
) -> Result<String> {
    if is_packed(source) {
        return Err(Error::AlreadyPacked);
    }

    let program = parse(source);
    let lexemes = program.tokens_flat();
    let mut out = String::with_capacity(source.len());
    let mut rewritten = 0usize;
    let mut i = 0;

    while i < lexemes.len() {
        if options.cram_sequences {
            if let Some((end, crammed)) = cram_sequence(&lexemes, i) {
                trace!(offset = lexemes[i].offset, literal = %crammed, "crammed sequence");
                out.push_str(&crammed);
                rewritten += 1;
                i = end;
                continue;
            }
        }

        let lexeme = lexemes[i];
        let replacement = match lexeme.kind {
            LexKind::Number if options.compress_integers => compress_integer(lexeme.text),
            LexKind::String(end @ (StringEnd::Quote | StringEnd::EndOfInput))
                if options.compress_strings =>
            {
                compress_string(table, lexeme.text, end)
            }
            _ => None,
        };
        match replacement {
            Some(literal) => {
                trace!(offset = lexeme.offset, literal = %literal, "compressed literal");
                out.push_str(&literal);
                rewritten += 1;
            }
            None => out.push_str(lexeme.text),
        }
        i += 1;
    }

    debug!(
        rewritten,
        before = source.len(),
        after = out.len(),
        "compressed literals"
    );
    Ok(out)
}

/// Expands compressed literals using the embedded English table.
///
/// # Errors
///
/// Returns [`Error::AlreadyPacked`] for a packed program, and the decoding error of
/// the first compressed literal that is invalid.
pub fn decompress_literals(source: &str) -> Result<String> {
    decompress_literals_with(source, HuffmanTable::english()?, None)
}

/// Expands compressed literals, decoding strings with `table` and memoizing them in
/// `cache` when one is given.
///
/// # Errors
///
/// Returns [`Error::AlreadyPacked`] for a packed program, and the decoding error of
/// the first compressed literal that is invalid.
pub fn decompress_literals_with(
    source: &str,
    table: &HuffmanTable,
    cache: Option<&DecompressCache>,
) -> Result<String> {
    if is_packed(source) {
        return Err(Error::AlreadyPacked);
    }

    let program = parse(source);
    let lexemes = program.tokens_flat();
    let mut out = String::with_capacity(source.len() * 2);

    let mut tail = Tail::Other;

    for (i, lexeme) in lexemes.iter().enumerate() {
        if tail == Tail::Expanded && merges_with_expanded(lexeme, lexemes.get(i + 1)) {
            out.push(' ');
        }

        tail = match lexeme.kind {
            LexKind::String(StringEnd::CrammedInt) => {
                let n = uncram_single(string_body(lexeme.text, StringEnd::CrammedInt))?;
                let spelled = spell_integer(&n);
                let numeric = spelled.starts_with(|c: char| c.is_ascii_digit());
                if numeric && tail != Tail::Other {
                    out.push(' ');
                }
                out.push_str(&spelled);
                if numeric {
                    Tail::Expanded
                } else {
                    Tail::Other
                }
            }
            LexKind::String(StringEnd::CrammedArray) => {
                let values = uncram(string_body(lexeme.text, StringEnd::CrammedArray))?;
                out.push('z');
                for n in &values {
                    out.push_str(&spell_integer(&n.abs()));
                    if n.is_negative() {
                        out.push('N');
                    }
                    out.push('+');
                }
                Tail::Other
            }
            LexKind::Compressed { terminated } => {
                let body = compressed_body(lexeme.text, terminated);
                let text = match cache {
                    Some(cache) => cache.decompress(table, body)?,
                    None => table.decompress(body)?,
                };
                out.push('"');
                out.push_str(&escape_string(&text));
                if terminated {
                    out.push('"');
                }
                Tail::Other
            }
            LexKind::Number | LexKind::SuffixedNumber => {
                out.push_str(lexeme.text);
                Tail::Number
            }
            _ => {
                out.push_str(lexeme.text);
                Tail::Other
            }
        };
    }

    debug!(before = source.len(), after = out.len(), "decompressed literals");
    Ok(out)
}

fn spell_integer(n: &BigInt) -> String {
    if *n == BigInt::from(10) {
        "A".to_string()
    } else {
        n.to_string()
    }
}

/// How the output written so far ends, as far as a following decimal can merge with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tail {
    Other,
    /// A decimal literal copied from the source
    Number,
    /// A decimal spelled out from a crammed integer
    Expanded,
}

/// Whether `lexeme`, written right after an expanded decimal, would lex as part of it.
///
/// Digits continue the number, and `!` followed by a number turns it into a suffixed
/// number. Crammed integers count as numbers because they expand to one.
fn merges_with_expanded(lexeme: &Lexeme<'_>, next: Option<&Lexeme<'_>>) -> bool {
    let numeric = |lexeme: &Lexeme<'_>| {
        matches!(
            lexeme.kind,
            LexKind::Number | LexKind::SuffixedNumber | LexKind::String(StringEnd::CrammedInt)
        )
    };
    match lexeme.kind {
        LexKind::Number | LexKind::SuffixedNumber => true,
        LexKind::Operator if lexeme.text == "!" => next.map_or(false, numeric),
        _ => false,
    }
}
