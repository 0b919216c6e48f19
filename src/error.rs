//! Error types for the Stax source codecs.
//!
//! This module provides the single error type shared by every codec in the crate.
//!
//! ## Error Categories
//!
//! - **Unsupported characters**: Input contains a character the target encoding cannot
//!   represent (for example a newline handed to the byte packer)
//! - **Invalid encodings**: A decoder met a symbol outside its alphabet, a bit stream
//!   that stops mid-code, or a context its table has no tree for
//! - **Precondition violations**: Unpacking text that is not packed, or rewriting literals
//!   of a program that already is
//! - **Malformed tables**: The Huffman context table failed to load
//! - **I/O failures**: Reading or writing a program stream failed
//!
//! Outcomes that are expected control flow, such as "this string has no Huffman encoding",
//! are reported as `None` by the codec in question rather than as an [`Error`].
//!
//! ## Examples
//!
//! ```rust
//! use stax_codec::{unpack, Error};
//!
//! let result = unpack("plain ascii");
//! assert!(matches!(result, Err(Error::NotPacked)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the tokenizer-adjacent codecs.
///
/// Each variant carries enough context to locate the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A character cannot be represented by the requested encoding
    #[error("Unsupported character {ch:?} at offset {offset} for {encoding}")]
    UnsupportedCharacter {
        ch: char,
        offset: usize,
        encoding: &'static str,
    },

    /// An encoded string contains a symbol outside the decoder's alphabet
    #[error("Invalid {encoding} input: symbol {ch:?} at offset {offset}")]
    InvalidEncoding {
        ch: char,
        offset: usize,
        encoding: &'static str,
    },

    /// An encoded bit stream walked off the Huffman tree
    #[error("Invalid compressed string: bit stream does not end on a leaf")]
    TruncatedCode,

    /// A compressed string needs a tree for a context the table does not have
    #[error("No Huffman tree for context {context:?}")]
    MissingContext { context: String },

    /// Unpacking was attempted on text whose leading unit lacks the packed marker
    #[error("Input is not a packed program")]
    NotPacked,

    /// A literal rewrite was attempted on a packed program
    #[error("Literals of a packed program cannot be rewritten; unpack it first")]
    AlreadyPacked,

    /// The Huffman context table is malformed
    #[error("Malformed Huffman table at line {line}: {msg}")]
    MalformedTable { line: usize, msg: String },

    /// IO error while reading or writing a program
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported character error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stax_codec::Error;
    ///
    /// let err = Error::unsupported('\n', 4, "packed form");
    /// assert!(err.to_string().contains("offset 4"));
    /// ```
    pub fn unsupported(ch: char, offset: usize, encoding: &'static str) -> Self {
        Error::UnsupportedCharacter {
            ch,
            offset,
            encoding,
        }
    }

    /// Creates an invalid encoding error for a symbol outside an alphabet.
    pub fn invalid_symbol(ch: char, offset: usize, encoding: &'static str) -> Self {
        Error::InvalidEncoding {
            ch,
            offset,
            encoding,
        }
    }

    /// Creates a malformed table error (line numbers are 1-based).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stax_codec::Error;
    ///
    /// let err = Error::malformed_table(3, "odd spec length");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed_table(line: usize, msg: &str) -> Self {
        Error::MalformedTable {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates an I/O error for program reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
