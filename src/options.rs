//! Configuration options for literal rewriting.
//!
//! [`LiteralOptions`] selects which literal kinds
//! [`compress_literals_with`](crate::literals::compress_literals_with) rewrites. Every kind
//! is enabled by default.
//!
//! ## Examples
//!
//! ```rust
//! use stax_codec::{compress_literals_with, HuffmanTable, LiteralOptions};
//!
//! let table = HuffmanTable::english()?;
//!
//! // Leave strings readable, only shorten numbers
//! let options = LiteralOptions::new().with_strings(false);
//! let out = compress_literals_with("\"hello world\"1234567", table, options)?;
//! assert_eq!(out, "\"hello world\"\"0V6Y%");
//! # Ok::<(), stax_codec::Error>(())
//! ```

/// Selects the literal rewrites applied by
/// [`compress_literals_with`](crate::literals::compress_literals_with).
///
/// # Examples
///
/// ```rust
/// use stax_codec::LiteralOptions;
///
/// let options = LiteralOptions::new();
/// assert!(options.compress_strings && options.compress_integers && options.cram_sequences);
///
/// let options = LiteralOptions::none().with_sequences(true);
/// assert!(!options.compress_strings);
/// assert!(options.cram_sequences);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiteralOptions {
    /// Rewrite string literals as Huffman-compressed strings
    pub compress_strings: bool,
    /// Rewrite long decimal literals as quoted crammed integers
    pub compress_integers: bool,
    /// Rewrite `z` integer sequences as crammed arrays
    pub cram_sequences: bool,
}

impl Default for LiteralOptions {
    fn default() -> Self {
        LiteralOptions {
            compress_strings: true,
            compress_integers: true,
            cram_sequences: true,
        }
    }
}

impl LiteralOptions {
    /// Creates options with every rewrite enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with every rewrite disabled.
    #[must_use]
    pub fn none() -> Self {
        LiteralOptions {
            compress_strings: false,
            compress_integers: false,
            cram_sequences: false,
        }
    }

    #[must_use]
    pub fn with_strings(mut self, enabled: bool) -> Self {
        self.compress_strings = enabled;
        self
    }

    #[must_use]
    pub fn with_integers(mut self, enabled: bool) -> Self {
        self.compress_integers = enabled;
        self
    }

    /// Enables or disables crammed-array rewriting of `z` sequences such as `z1+2+3+`.
    #[must_use]
    pub fn with_sequences(mut self, enabled: bool) -> Self {
        self.cram_sequences = enabled;
        self
    }
}
