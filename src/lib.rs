//! # stax_codec
//!
//! Source-level encodings of the Stax golfing language: tokenizing, literal compression
//! and whole-program packing.
//!
//! ## What is Stax?
//!
//! Stax is a stack-based golfing language in which almost every printable character is
//! an operator. Programs are scored by size, so the language has several interchangeable
//! spellings of the same program:
//!
//! - **Readable source**: printable ASCII, possibly with comments and whitespace
//! - **Compressed literals**: strings, long integers and integer arrays swapped for
//!   shorter encoded forms that the interpreter expands
//! - **Packed form**: the whole program rewritten with one code page glyph per byte,
//!   saving about 18% on tight ASCII programs
//!
//! ## Key Features
//!
//! - **Tokenizer**: Block and goto-target structure without a grammar engine, with
//!   tokens borrowed from the source ([`parse`])
//! - **Classifier**: Encoding state and literal opportunities in one pass ([`classify`])
//! - **Cram**: Numeral codec for integers and integer arrays ([`cram`](mod@cram))
//! - **Huffman**: Context-sensitive string compression with a trained table
//!   ([`HuffmanTable`])
//! - **Packer**: Bijective ASCII to byte packing ([`pack`], [`unpack`])
//! - **Exact arithmetic**: Every numeral is a big integer, so long programs never
//!   overflow
//!
//! ## Quick Start
//!
//! ### Packing a Program
//!
//! ```rust
//! use stax_codec::{is_packed, pack, unpack};
//!
//! let packed = pack("Hello, World!")?;
//! assert!(is_packed(&packed));
//! assert_eq!(packed.chars().count(), 11);
//! assert_eq!(unpack(&packed)?, "Hello, World!");
//! # Ok::<(), stax_codec::Error>(())
//! ```
//!
//! ### Compressing Literals
//!
//! ```rust
//! use stax_codec::{compress_literals, decompress_literals};
//!
//! let compressed = compress_literals("\"hello world\"")?;
//! assert_eq!(compressed, "`f}$Fb8jM!$`");
//! assert_eq!(decompress_literals(&compressed)?, "\"hello world\"");
//! # Ok::<(), stax_codec::Error>(())
//! ```
//!
//! ### Tokenizing
//!
//! ```rust
//! use stax_codec::parse;
//!
//! let program = parse("{1+}m}2");
//! let block = program.root().tokens()[0].as_block().unwrap();
//! assert_eq!(block.contents(), "{1+}");
//! assert_eq!(program.get_goto_target(1).contents(), "2");
//! ```
//!
//! ### Shortest Literal for a Value
//!
//! ```rust
//! use stax_codec::{compress_value, stax};
//!
//! assert_eq!(compress_value(&stax!([5, 5, 5, 5, 5])).as_deref(), Some("5]5*"));
//! assert_eq!(compress_value(&stax!(1000)).as_deref(), Some("Vk"));
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Tokenizing**: O(n), single pass, no copies of the source
//! - **Packing**: O(n²) big-integer radix conversion
//! - **Huffman table**: Parsed once on first use
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Decoders reject foreign symbols instead of producing wrong text
//! - No panics in the public API, except [`Program::get_goto_target`] with depth 0

pub mod alphabet;
pub mod block;
pub mod classify;
pub mod code_page;
pub mod cram;
pub mod error;
pub mod huffman;
pub mod literals;
pub mod macros;
pub mod options;
pub mod pack;
pub mod syntax;
pub mod value;

pub use block::{parse, Block, BlockClose, Lexeme, Program, ScanMode, Token};
pub use classify::{classify, classify_with, Classification, CodeType, LiteralFlags};
pub use cram::{compress_int_array, compress_value, cram, cram_single, uncram, uncram_single};
pub use error::{Error, Result};
pub use huffman::{DecompressCache, HuffmanTable};
pub use literals::{
    compress_literals, compress_literals_with, decompress_literals, decompress_literals_with,
};
pub use options::LiteralOptions;
pub use pack::{is_packed, is_packed_bytes, pack, pack_bytes, unpack, unpack_bytes};
pub use value::{type_signature, Value};

use std::io;

/// Reads a program from a byte stream, unpacking it if it is packed.
///
/// Packed programs are stored as raw bytes; anything else must be UTF-8 source.
///
/// # Examples
///
/// ```rust
/// use stax_codec::{pack_bytes, read_program};
/// use std::io::Cursor;
///
/// let bytes = pack_bytes("1 2+")?;
/// assert_eq!(read_program(Cursor::new(bytes))?, "1 2+");
/// assert_eq!(read_program(Cursor::new("3*"))?, "3*");
/// # Ok::<(), stax_codec::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, or the input is neither packed nor valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_program<R>(mut reader: R) -> Result<String>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    if is_packed_bytes(&bytes) {
        return unpack_bytes(&bytes);
    }
    String::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))
}

/// Packs a program and writes the raw bytes to a writer.
///
/// # Errors
///
/// Returns an error if the source cannot be packed or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_packed<W>(mut writer: W, source: &str) -> Result<()>
where
    W: io::Write,
{
    let bytes = pack_bytes(source)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
