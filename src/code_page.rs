//! The 256-entry code page that renders packed bytes as displayable characters.
//!
//! The layout follows code page 437: pictograms stand in for the 32 control codes,
//! printable ASCII maps to itself, and the upper half holds accented letters and
//! box-drawing glyphs. Two entries are substituted so that every byte has a visible
//! glyph that survives copy and paste:
//!
//! - byte `0x00` renders as `∅` (decoding also accepts a literal NUL)
//! - byte `0xFF` renders as `□` (decoding also accepts U+00A0, the no-break space
//!   that code page 437 places there)

use std::collections::HashMap;
use std::sync::OnceLock;

const GLYPHS: &str = concat!(
    "∅☺☻♥♦♣♠•◘○◙♂♀♪♫☼►◄↕‼¶§▬↨↑↓→←∟↔▲▼",
    " !\"#$%&'()*+,-./0123456789:;<=>?",
    "@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_",
    "`abcdefghijklmnopqrstuvwxyz{|}~⌂",
    "ÇüéâäàåçêëèïîìÄÅÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩≡±≥≤⌠⌡÷≈°∙·√ⁿ²■□",
);

struct CodePage {
    glyphs: [char; 256],
    bytes: HashMap<char, u8>,
}

fn code_page() -> &'static CodePage {
    static PAGE: OnceLock<CodePage> = OnceLock::new();
    PAGE.get_or_init(|| {
        let mut glyphs = ['\0'; 256];
        let mut bytes = HashMap::with_capacity(258);
        for (byte, glyph) in (0..=u8::MAX).zip(GLYPHS.chars()) {
            glyphs[usize::from(byte)] = glyph;
            bytes.insert(glyph, byte);
        }
        bytes.insert('\0', 0x00);
        bytes.insert('\u{a0}', 0xff);
        CodePage { glyphs, bytes }
    })
}

/// Returns the glyph that renders `byte`.
///
/// # Examples
///
/// ```rust
/// use stax_codec::code_page;
///
/// assert_eq!(code_page::glyph(b'A'), 'A');
/// assert_eq!(code_page::glyph(0x00), '∅');
/// assert_eq!(code_page::glyph(0xff), '□');
/// ```
#[must_use]
pub fn glyph(byte: u8) -> char {
    code_page().glyphs[usize::from(byte)]
}

/// Returns the byte rendered by `glyph`, or `None` for characters off the page.
#[must_use]
pub fn byte(glyph: char) -> Option<u8> {
    code_page().bytes.get(&glyph).copied()
}
