//! Context-sensitive Huffman coding of English-like strings.
//!
//! Each character is coded with a canonical Huffman tree selected by the two characters
//! before it. Text is implicitly preceded by `". "`, so the first character is coded as
//! if it started a sentence. When no tree exists for the exact pair, the tree for the
//! single preceding character is used.
//!
//! The concatenated bit paths are read as one binary number with an implicit leading
//! `1` and written little-endian over the [`HUFFMAN`] alphabet. The final character may
//! drop trailing zero bits from its path because the decoder pads with zeros.
//!
//! ## Table Format
//!
//! A table is text with one tree per line:
//!
//! ```text
//! <context>\t<char><run><char><run>...
//! ```
//!
//! `<context>` is one or two characters. Each `<run>` is a base-27 digit (`0-9a-q`).
//! Leaves are listed in canonical order: the first sits `run` zero bits below the root,
//! and each later one is found by backing up to the deepest `0` branch whose `1`
//! sibling is free, taking that `1` branch, then descending `run` more zero bits.
//!
//! ## Examples
//!
//! ```rust
//! use stax_codec::huffman::HuffmanTable;
//!
//! let table = HuffmanTable::english()?;
//! let code = table.compress("Hello, World!").unwrap();
//! assert_eq!(code, "di^^o?7'U<o-!");
//! assert_eq!(table.decompress(&code)?, "Hello, World!");
//! # Ok::<(), stax_codec::Error>(())
//! ```

use crate::alphabet::HUFFMAN;
use crate::{Error, Result};
use indexmap::IndexMap;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::{debug, trace};

const ENCODING: &str = "compressed string";

/// Trained English table embedded in the crate.
const ENGLISH: &str = include_str!("../data/huffman_trees.txt");

/// Context of the first character of every text.
const START: [char; 2] = ['.', ' '];

/// Radix of the run digits in a tree specification.
const RUN_RADIX: u32 = 27;

#[derive(Clone, Copy, Debug)]
enum Node {
    Branch([Option<usize>; 2]),
    Leaf(char),
}

/// One canonical tree: node arena rooted at index 0 plus the path of every leaf.
#[derive(Clone, Debug)]
struct Tree {
    nodes: Vec<Node>,
    paths: HashMap<char, Vec<bool>>,
}

impl Tree {
    fn from_spec(spec: &str, line: usize) -> Result<Self> {
        let symbols: Vec<char> = spec.chars().collect();
        if symbols.len() % 2 != 0 {
            return Err(Error::malformed_table(line, "odd spec length"));
        }

        let mut tree = Tree {
            nodes: vec![Node::Branch([None, None])],
            paths: HashMap::new(),
        };
        let mut code: Option<Vec<bool>> = None;

        for pair in symbols.chunks(2) {
            let (ch, run) = (pair[0], pair[1]);
            let run = run
                .to_digit(RUN_RADIX)
                .ok_or_else(|| Error::malformed_table(line, "invalid run digit"))?
                as usize;

            let mut next = match code.take() {
                None => Vec::new(),
                Some(mut previous) => {
                    while previous.last() == Some(&true) {
                        previous.pop();
                    }
                    match previous.last_mut() {
                        Some(bit) => *bit = true,
                        None => return Err(Error::malformed_table(line, "tree is overfull")),
                    }
                    previous
                }
            };
            next.resize(next.len() + run, false);

            if next.is_empty() {
                return Err(Error::malformed_table(line, "leaf at tree root"));
            }
            tree.insert(ch, &next, line)?;
            code = Some(next);
        }

        Ok(tree)
    }

    fn insert(&mut self, ch: char, path: &[bool], line: usize) -> Result<()> {
        if self.paths.contains_key(&ch) {
            return Err(Error::malformed_table(line, "duplicate leaf"));
        }

        let mut node = 0;
        let (last, prefix) = path
            .split_last()
            .ok_or_else(|| Error::malformed_table(line, "leaf at tree root"))?;
        for &bit in prefix {
            node = match self.child(node, bit) {
                Some(child) => child,
                None => self.attach(node, bit, Node::Branch([None, None]), line)?,
            };
        }
        if self.child(node, *last).is_some() {
            return Err(Error::malformed_table(line, "conflicting leaf"));
        }
        self.attach(node, *last, Node::Leaf(ch), line)?;
        self.paths.insert(ch, path.to_vec());
        Ok(())
    }

    fn attach(&mut self, parent: usize, bit: bool, node: Node, line: usize) -> Result<usize> {
        let index = self.nodes.len();
        match &mut self.nodes[parent] {
            Node::Branch(children) => children[usize::from(bit)] = Some(index),
            Node::Leaf(_) => {
                return Err(Error::malformed_table(line, "path passes through a leaf"));
            }
        }
        self.nodes.push(node);
        Ok(index)
    }

    fn child(&self, node: usize, bit: bool) -> Option<usize> {
        match self.nodes[node] {
            Node::Branch(children) => children[usize::from(bit)],
            Node::Leaf(_) => None,
        }
    }
}

/// A set of per-context trees.
///
/// Build one with [`from_spec`](HuffmanTable::from_spec), or use the trained table
/// shipped with the crate through [`english`](HuffmanTable::english).
#[derive(Clone, Debug)]
pub struct HuffmanTable {
    bigrams: IndexMap<[char; 2], Tree>,
    unigrams: IndexMap<char, Tree>,
}

impl HuffmanTable {
    /// Parses a table in the line format described in the [module docs](self).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTable`] for a line without a tab, a context of the wrong
    /// length, a repeated context, or a tree specification that does not describe a
    /// valid prefix code.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let mut bigrams = IndexMap::new();
        let mut unigrams = IndexMap::new();

        for (index, text) in spec.lines().enumerate() {
            let line = index + 1;
            if text.is_empty() {
                continue;
            }
            let (context, tree) = text
                .split_once('\t')
                .ok_or_else(|| Error::malformed_table(line, "missing tab after context"))?;
            let tree = Tree::from_spec(tree, line)?;

            let mut chars = context.chars();
            let duplicate = match (chars.next(), chars.next(), chars.next()) {
                (Some(a), None, None) => unigrams.insert(a, tree).is_some(),
                (Some(a), Some(b), None) => bigrams.insert([a, b], tree).is_some(),
                _ => {
                    return Err(Error::malformed_table(
                        line,
                        "context must be 1 or 2 characters",
                    ));
                }
            };
            if duplicate {
                return Err(Error::malformed_table(line, "duplicate context"));
            }
        }

        Ok(HuffmanTable { bigrams, unigrams })
    }

    /// The trained English table, parsed on first use.
    ///
    /// # Errors
    ///
    /// Returns the load error if the embedded table is malformed. The result is cached,
    /// so every call returns the same outcome.
    pub fn english() -> Result<&'static HuffmanTable> {
        static TABLE: OnceLock<Result<HuffmanTable>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                let table = HuffmanTable::from_spec(ENGLISH);
                if let Ok(table) = &table {
                    debug!(
                        bigrams = table.bigrams.len(),
                        unigrams = table.unigrams.len(),
                        "loaded Huffman table"
                    );
                }
                table
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn tree(&self, context: [char; 2]) -> Option<&Tree> {
        self.bigrams
            .get(&context)
            .or_else(|| self.unigrams.get(&context[1]))
    }

    /// Returns `true` if `ch` has a code in at least one tree.
    #[must_use]
    pub fn supports(&self, ch: char) -> bool {
        self.unigrams
            .values()
            .chain(self.bigrams.values())
            .any(|tree| tree.paths.contains_key(&ch))
    }

    /// Contexts that have their own tree, two-character contexts first, in table order.
    pub fn contexts(&self) -> impl Iterator<Item = String> + '_ {
        let pairs = self.bigrams.keys().map(|pair| pair.iter().collect::<String>());
        let singles = self.unigrams.keys().map(|ch| ch.to_string());
        pairs.chain(singles)
    }

    /// Compresses `text`, or returns `None` if some character has no code in its context.
    ///
    /// The result never contains a backtick, so it can be wrapped in one.
    #[must_use]
    pub fn compress(&self, text: &str) -> Option<String> {
        let mut bits: Vec<bool> = Vec::new();
        let mut context = START;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            let path = self.tree(context)?.paths.get(&ch)?;
            if chars.peek().is_some() {
                bits.extend_from_slice(path);
            } else {
                let keep = path.iter().rposition(|&bit| bit).map_or(1, |i| i + 1);
                bits.extend_from_slice(&path[..keep]);
            }
            context = [context[1], ch];
        }

        let radix = BigUint::from(HUFFMAN.len());
        let mut n = bits.iter().fold(BigUint::from(1u32), |acc, &bit| {
            (acc << 1u32) + u32::from(bit)
        });
        let mut out = String::new();
        while !n.is_zero() {
            let digit = (&n % &radix).to_usize().unwrap_or(0);
            out.push(HUFFMAN.symbol(digit));
            n /= &radix;
        }

        trace!(bits = bits.len(), len = out.len(), "compressed string");
        Some(out)
    }

    /// Decompresses the output of [`compress`](HuffmanTable::compress).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] for a symbol outside the [`HUFFMAN`] alphabet
    /// and [`Error::TruncatedCode`] when the bits lead off a tree.
    pub fn decompress(&self, code: &str) -> Result<String> {
        let radix = BigUint::from(HUFFMAN.len());
        let mut n = BigUint::zero();
        for (offset, ch) in code.char_indices().rev() {
            let digit = HUFFMAN
                .digit(ch)
                .ok_or_else(|| Error::invalid_symbol(ch, offset, ENCODING))?;
            n = n * &radix + digit;
        }
        if n.is_zero() {
            return Ok(String::new());
        }

        let digits = n.to_radix_be(2);
        let mut bits = digits[1..].iter().map(|&bit| bit == 1);
        let mut remaining = digits.len() - 1;
        let mut out = String::new();
        let mut context = START;

        while remaining > 0 {
            let tree = self.tree(context).ok_or_else(|| Error::MissingContext {
                context: context.iter().collect(),
            })?;
            let mut node = 0;
            let ch = loop {
                let bit = match bits.next() {
                    Some(bit) => {
                        remaining -= 1;
                        bit
                    }
                    None => false,
                };
                node = tree.child(node, bit).ok_or(Error::TruncatedCode)?;
                if let Node::Leaf(ch) = tree.nodes[node] {
                    break ch;
                }
            };
            out.push(ch);
            context = [context[1], ch];
        }

        Ok(out)
    }
}

/// Memo of decompressed strings, keyed by the compressed form.
///
/// Decompression is a pure function of its input, so concurrent writers racing on one
/// key store the same value.
#[derive(Debug, Default)]
pub struct DecompressCache {
    entries: RwLock<HashMap<String, String>>,
}

impl DecompressCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompresses `code` with `table`, reusing an earlier result when present.
    ///
    /// A cache must only be used with one table.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`HuffmanTable::decompress`]; failures are not cached.
    pub fn decompress(&self, table: &HuffmanTable, code: &str) -> Result<String> {
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned();
        if let Some(text) = cached {
            return Ok(text);
        }

        let text = table.decompress(code)?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(code.to_string(), text.clone());
        Ok(text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
