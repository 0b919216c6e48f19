//! Tokenizer producing the block and goto-target structure of a program.
//!
//! [`parse`] scans a whole program once. Literal boundaries follow the rules in
//! [`syntax`](crate::syntax); this module adds the two structural productions:
//!
//! - `{` opens a nested block, scanned in [`ScanMode::Block`] until its `}` or a
//!   shortcut terminator
//! - a program-level `}` starts a new goto target
//!
//! Tokens borrow from the source. Every token records its byte offset, and the texts of
//! [`Program::tokens_flat`] concatenate back to the source exactly.
//!
//! ```rust
//! use stax_codec::block::parse;
//!
//! let program = parse("1{2+}F}3");
//! assert_eq!(program.root().tokens().len(), 5);
//! assert_eq!(program.goto_targets().len(), 1);
//! assert_eq!(program.get_goto_target(1).contents(), "3");
//! ```

use crate::syntax::{self, LexKind, BLOCK_SUFFIXES, SHORTCUT_TERMINATORS};

/// Which production a `}` belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    /// Whole program: `}` starts a goto target
    Program,
    /// Inside `{`: `}` closes the block, shortcut terminators close it implicitly
    Block,
}

/// How a block's extent ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockClose {
    /// A matching `}` (included in the block's contents)
    Brace,
    /// A shortcut terminator (left for the enclosing scan)
    Shortcut,
    /// End of input
    EndOfInput,
}

/// A raw token: one literal, operator, whitespace run or comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub text: &'a str,
    pub offset: usize,
    pub kind: LexKind,
}

impl<'a> Lexeme<'a> {
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// A token of a block: either a raw lexeme or a nested block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Raw(Lexeme<'a>),
    Block(Block<'a>),
}

impl<'a> Token<'a> {
    /// Source text covered by the token. For a nested block this includes its braces.
    #[must_use]
    pub fn contents(&self) -> &'a str {
        match self {
            Token::Raw(lexeme) => lexeme.text,
            Token::Block(block) => block.contents,
        }
    }

    /// Byte offset of the token in the program source.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Token::Raw(lexeme) => lexeme.offset,
            Token::Block(block) => block.offset,
        }
    }

    #[must_use]
    pub fn as_block(&self) -> Option<&Block<'a>> {
        match self {
            Token::Block(block) => Some(block),
            Token::Raw(_) => None,
        }
    }

    fn push_flat(&self, out: &mut Vec<Lexeme<'a>>) {
        match self {
            Token::Raw(lexeme) => out.push(*lexeme),
            Token::Block(block) => {
                out.push(Lexeme {
                    text: &block.contents[..1],
                    offset: block.offset,
                    kind: LexKind::Operator,
                });
                for token in &block.tokens {
                    token.push_flat(out);
                }
                if block.close == BlockClose::Brace {
                    let end = block.contents.len();
                    out.push(Lexeme {
                        text: &block.contents[end - 1..],
                        offset: block.offset + end - 1,
                        kind: LexKind::Operator,
                    });
                }
            }
        }
    }
}

/// A contiguous region of program source and its tokens.
///
/// For a nested block the tokens exclude the braces, while [`contents`](Block::contents)
/// spans them. For the root and for goto targets the tokens cover the contents exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block<'a> {
    contents: &'a str,
    offset: usize,
    tokens: Vec<Token<'a>>,
    close: BlockClose,
}

impl<'a> Block<'a> {
    #[must_use]
    pub fn contents(&self) -> &'a str {
        self.contents
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    #[must_use]
    pub fn close(&self) -> BlockClose {
        self.close
    }

    /// Returns `true` when the block ended at a `}` it owns.
    #[must_use]
    pub fn is_explicitly_closed(&self) -> bool {
        self.close == BlockClose::Brace
    }

    /// Returns `true` when the block does nothing: ignoring whitespace and comments, it
    /// has no tokens or its first token is `}`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stax_codec::block::parse;
    ///
    /// let program = parse("{ \t note\n}");
    /// let block = program.root().tokens()[0].as_block().unwrap();
    /// assert!(block.is_empty());
    /// assert!(!parse("{1}").root().is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let first = self.tokens.iter().find(|token| match token {
            Token::Raw(lexeme) => !lexeme.kind.is_trivia(),
            Token::Block(_) => true,
        });
        match first {
            None => true,
            Some(token) => token.contents() == "}",
        }
    }
}

/// A parsed program: the root block and its goto targets in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program<'a> {
    root: Block<'a>,
    goto_targets: Vec<Block<'a>>,
}

impl<'a> Program<'a> {
    #[must_use]
    pub fn root(&self) -> &Block<'a> {
        &self.root
    }

    #[must_use]
    pub fn goto_targets(&self) -> &[Block<'a>] {
        &self.goto_targets
    }

    /// Resolves the goto target for a call depth (1-based).
    ///
    /// Depths past the last target repeat the last target. A program without targets
    /// resolves every depth to its root.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is 0.
    #[must_use]
    pub fn get_goto_target(&self, depth: usize) -> &Block<'a> {
        assert!(depth > 0, "goto depth is 1-based");
        match self.goto_targets.last() {
            None => &self.root,
            Some(last) => self.goto_targets.get(depth - 1).unwrap_or(last),
        }
    }

    /// All lexemes in source order with blocks expanded, braces included.
    #[must_use]
    pub fn tokens_flat(&self) -> Vec<Lexeme<'a>> {
        let mut out = Vec::with_capacity(self.root.tokens.len());
        for token in &self.root.tokens {
            token.push_flat(&mut out);
        }
        out
    }
}

/// Tokenizes a whole program.
///
/// Never fails: unterminated literals and blocks extend to the end of input.
#[must_use]
pub fn parse(source: &str) -> Program<'_> {
    let (tokens, _, _) = scan(source, 0, ScanMode::Program);
    let goto_targets = split_goto_targets(source, &tokens);
    Program {
        root: Block {
            contents: source,
            offset: 0,
            tokens,
            close: BlockClose::EndOfInput,
        },
        goto_targets,
    }
}

/// Scans tokens from `start` until the mode's terminator, returning them with the end
/// offset and how the scan ended.
fn scan(source: &str, start: usize, mode: ScanMode) -> (Vec<Token<'_>>, usize, BlockClose) {
    let mut tokens = Vec::new();
    let mut pos = start;

    while let Some(ch) = source[pos..].chars().next() {
        if mode == ScanMode::Block && SHORTCUT_TERMINATORS.contains(&ch) {
            return (tokens, pos, BlockClose::Shortcut);
        }

        match ch {
            '}' => match mode {
                ScanMode::Block => return (tokens, pos + 1, BlockClose::Brace),
                ScanMode::Program => {
                    tokens.push(raw(source, pos, pos + 1, LexKind::GotoMarker));
                    pos += 1;
                }
            },
            '{' => {
                let (inner, end, close) = scan(source, pos + 1, ScanMode::Block);
                tokens.push(Token::Block(Block {
                    contents: &source[pos..end],
                    offset: pos,
                    tokens: inner,
                    close,
                }));
                pos = end;
                if let Some(suffix_end) = block_suffix(source, pos) {
                    tokens.push(raw(source, pos, suffix_end, LexKind::BlockSuffix));
                    pos = suffix_end;
                }
            }
            _ => {
                let (kind, end) = syntax::lex_at(source, pos);
                tokens.push(raw(source, pos, end, kind));
                pos = end;
            }
        }
    }

    (tokens, pos, BlockClose::EndOfInput)
}

fn raw(source: &str, start: usize, end: usize, kind: LexKind) -> Token<'_> {
    Token::Raw(Lexeme {
        text: &source[start..end],
        offset: start,
        kind,
    })
}

fn block_suffix(source: &str, pos: usize) -> Option<usize> {
    match source[pos..].chars().next()? {
        'g' => Some(syntax::advance(source, pos, 2)),
        ch if BLOCK_SUFFIXES.contains(&ch) => Some(pos + 1),
        _ => None,
    }
}

fn is_goto_marker(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Raw(Lexeme {
            kind: LexKind::GotoMarker,
            ..
        })
    )
}

/// Each program-level `}` starts a target running through the next program-level `}`
/// (inclusive) or to the end of the program.
fn split_goto_targets<'a>(source: &'a str, tokens: &[Token<'a>]) -> Vec<Block<'a>> {
    let mut targets = Vec::new();
    for (i, marker) in tokens.iter().enumerate().filter(|(_, t)| is_goto_marker(t)) {
        let body = &tokens[i + 1..];
        let (owned, close) = match body.iter().position(is_goto_marker) {
            Some(next) => (&body[..=next], BlockClose::Brace),
            None => (body, BlockClose::EndOfInput),
        };
        let start = marker.offset() + 1;
        let end = owned
            .last()
            .map_or(start, |last| last.offset() + last.contents().len());
        targets.push(Block {
            contents: &source[start..end],
            offset: start,
            tokens: owned.to_vec(),
            close,
        });
    }
    targets
}
