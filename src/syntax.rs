//! Stax Source Syntax
//!
//! This module documents the lexical grammar of Stax program text as recognized by the
//! tokenizer and the literal classifier, and holds the scanning rules both share.
//!
//! # Overview
//!
//! Stax is a stack-based golfing language. Almost every printable character is an
//! operator on its own, so the only structure a scanner has to find is where literals
//! and blocks begin and end. The grammar is positional rather than context-free: the
//! same character can start a literal, finish a block, or be an operator depending on
//! what precedes it.
//!
//! # Tokens
//!
//! At each position the first matching rule wins:
//!
//! | Rule | Syntax | Example |
//! |------|--------|---------|
//! | Two-character operator | `\|`, `:` or `V` plus any character | `\|E`, `:s`, `Vk` |
//! | Character literal | `'` plus one code point | `'a` |
//! | Pair literal | `.` plus two code points | `.hi` |
//! | Whitespace | maximal run of spaces and newlines | `  ` |
//! | Comment | tab through the next newline | `\t note\n` |
//! | Number | `digits!digits`, else greedy digits | `1!5`, `42` |
//! | String | `"` to the first unescaped `"`, `%` or `!` | `"hi"` |
//! | Compressed string | backtick to backtick | `` `f}$Fb8jM!$` `` |
//! | Block | `{` to the matching `}` or a shortcut terminator | `{1+}` |
//! | Operator | any other single character | `+` |
//!
//! A character consumed by a literal is always a whole code point, so astral-plane
//! characters never split.
//!
//! ## Numbers
//!
//! The two-character spelling `10` is never a single literal: ten has the dedicated
//! constant `A`, so `10` scans as `1` followed by `0`.
//!
//! ## Strings
//!
//! A backtick inside a string escapes the following code point. The character that
//! ends a string decides what it denotes:
//!
//! ```text
//! "plain text"     string (array of code points)
//! "0V6Y%           crammed integer (1234567)
//! "EEEF!           crammed integer array ([10 20 30 40])
//! "no end          string running to end of input
//! ```
//!
//! ## Blocks
//!
//! Inside a block, `}` closes it. The shortcut terminators `F`, `f` and `m` close it
//! too without being consumed, so they are then read as the operator applied to the
//! block. After a closed block, `g` plus one character or one of the block suffix
//! operators `F K W f k m o w` is taken as a single token.
//!
//! At program level, `}` instead starts a goto target:
//!
//! ```text
//! 1}2}3      root program; targets "2}" (depth 1) and "3" (depth 2 and deeper)
//! ```
//!
//! # Literal Forms Emitted by the Codecs
//!
//! | Spelling | Value |
//! |----------|-------|
//! | `A` | 10 |
//! | `U` | -1 |
//! | `VB`, `Vk`, `VM` | 256, 1000, 1000000 |
//! | `xJ` | x squared |
//! | `xN` | -x |
//! | `x]` | `[x]` |
//! | `a n*` | `a` repeated `n` times |
//! | `a b+` | concatenation |
//! | `x y\` | `[x y]` |
//! | `n b\|E` | base-`b` digits of `n` |
//! | `z` | `[]` |

/// Characters that combine with the following character into one operator.
pub const TWO_CHAR_PREFIXES: [char; 3] = ['|', ':', 'V'];

/// Operators taken as part of a block when they directly follow it.
pub const BLOCK_SUFFIXES: [char; 8] = ['F', 'K', 'W', 'f', 'k', 'm', 'o', 'w'];

/// Characters that implicitly close a block. Each is also a block suffix, so the
/// enclosing scan consumes it right after the block it closed.
pub const SHORTCUT_TERMINATORS: [char; 3] = ['F', 'f', 'm'];

/// Escape character inside string literals.
pub const STRING_ESCAPE: char = '`';

/// Characters that must be escaped inside a string literal.
const ESCAPED: [char; 4] = ['"', '`', '%', '!'];

/// How a double-quoted literal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringEnd {
    /// Closed by `"`
    Quote,
    /// Closed by `%`: the body is a crammed integer
    CrammedInt,
    /// Closed by `!`: the body is a crammed integer array
    CrammedArray,
    /// Ran to end of input
    EndOfInput,
}

/// Lexical category of a raw token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexKind {
    /// Single-character or two-character operator
    Operator,
    /// `'` plus one character
    CharLiteral,
    /// `.` plus two characters
    PairLiteral,
    /// Run of spaces and newlines
    Whitespace,
    /// Tab through end of line
    Comment,
    /// Plain decimal digits
    Number,
    /// `digits!digits`
    SuffixedNumber,
    /// Double-quoted literal
    String(StringEnd),
    /// Backtick-delimited compressed string
    Compressed { terminated: bool },
    /// Operator consumed right after a block
    BlockSuffix,
    /// Program-level `}` that starts a goto target
    GotoMarker,
}

impl LexKind {
    /// Returns `true` for whitespace and comments.
    #[inline]
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, LexKind::Whitespace | LexKind::Comment)
    }
}

/// Byte offset reached after consuming `count` code points from `start`, clamped to the
/// end of `source`.
pub(crate) fn advance(source: &str, start: usize, count: usize) -> usize {
    source[start..]
        .char_indices()
        .nth(count)
        .map_or(source.len(), |(i, _)| start + i)
}

fn digit_run(text: &str) -> usize {
    text.find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len())
}

/// Scans the token at `start`, returning its kind and end offset.
///
/// Blocks and `}` are the tokenizer's business; here `{` and `}` scan as plain
/// operators.
///
/// # Panics
///
/// Panics if `start` is not a char boundary of `source` or is past its end.
pub(crate) fn lex_at(source: &str, start: usize) -> (LexKind, usize) {
    let rest = &source[start..];
    let Some(first) = rest.chars().next() else {
        return (LexKind::Operator, start);
    };

    match first {
        c if TWO_CHAR_PREFIXES.contains(&c) => (LexKind::Operator, advance(source, start, 2)),
        '\'' => (LexKind::CharLiteral, advance(source, start, 2)),
        '.' => (LexKind::PairLiteral, advance(source, start, 3)),
        ' ' | '\n' => {
            let run = rest
                .find(|c: char| c != ' ' && c != '\n')
                .unwrap_or(rest.len());
            (LexKind::Whitespace, start + run)
        }
        '\t' => {
            let end = rest.find('\n').map_or(source.len(), |i| start + i + 1);
            (LexKind::Comment, end)
        }
        '0'..='9' => lex_number(rest, start),
        '"' => lex_string(rest, start),
        '`' => {
            let end = rest[1..].find('`').map(|i| start + i + 2);
            match end {
                Some(end) => (LexKind::Compressed { terminated: true }, end),
                None => (LexKind::Compressed { terminated: false }, source.len()),
            }
        }
        _ => (LexKind::Operator, start + first.len_utf8()),
    }
}

fn lex_number(rest: &str, start: usize) -> (LexKind, usize) {
    let digits = digit_run(rest);
    if let Some(fraction) = rest[digits..].strip_prefix('!') {
        let fraction_digits = digit_run(fraction);
        if fraction_digits > 0 {
            return (LexKind::SuffixedNumber, start + digits + 1 + fraction_digits);
        }
    }
    if &rest[..digits] == "10" {
        return (LexKind::Number, start + 1);
    }
    (LexKind::Number, start + digits)
}

fn lex_string(rest: &str, start: usize) -> (LexKind, usize) {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, ch)) = chars.next() {
        let end = match ch {
            STRING_ESCAPE => {
                chars.next();
                continue;
            }
            '"' => StringEnd::Quote,
            '%' => StringEnd::CrammedInt,
            '!' => StringEnd::CrammedArray,
            _ => continue,
        };
        return (LexKind::String(end), start + i + 1);
    }
    (LexKind::String(StringEnd::EndOfInput), start + rest.len())
}

/// Text between the delimiters of a double-quoted literal.
pub(crate) fn string_body(text: &str, end: StringEnd) -> &str {
    let inner = text.strip_prefix('"').unwrap_or(text);
    match end {
        StringEnd::EndOfInput => inner,
        _ => &inner[..inner.len() - 1],
    }
}

/// Text between the backticks of a compressed string literal.
pub(crate) fn compressed_body(text: &str, terminated: bool) -> &str {
    let inner = text.strip_prefix(STRING_ESCAPE).unwrap_or(text);
    if terminated {
        inner.strip_suffix(STRING_ESCAPE).unwrap_or(inner)
    } else {
        inner
    }
}

/// Escapes the characters that would end or escape a string literal.
///
/// ```rust
/// use stax_codec::syntax::escape_string;
///
/// assert_eq!(escape_string("100%!"), "100`%`!");
/// ```
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED.contains(&ch) {
            out.push(STRING_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Removes string escapes. A dangling escape at the end is dropped.
#[must_use]
pub fn unescape_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch == STRING_ESCAPE {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Concatenates two literal spellings, separating them when the digits would merge.
#[must_use]
pub fn join_literals(left: &str, right: &str) -> String {
    let merges = left.ends_with(|c: char| c.is_ascii_digit())
        && right.starts_with(|c: char| c.is_ascii_digit());
    if merges {
        format!("{} {}", left, right)
    } else {
        format!("{}{}", left, right)
    }
}
