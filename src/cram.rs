//! Crammed integer literals.
//!
//! This module implements the numeral codec that squeezes integers and integer arrays
//! into short printable strings over the [`CRAM`] alphabet.
//!
//! ## Array Encoding
//!
//! Every integer is written most significant digit first. Two metadata bits ride on
//! the digits:
//!
//! - **continuation** (bit 0 of every symbol): another digit of this number follows
//! - **sign** (bit 1 of the leading symbol): the number is negative
//!
//! The leading digit therefore carries `len / 4` values and every following digit
//! `len / 2` values, where `len` is the alphabet size. An array is the concatenation of
//! its encoded numbers.
//!
//! Two variants compete and the shorter one wins:
//!
//! - **flat**: each integer encoded on its own
//! - **offset**: each integer after the first replaced by its delta from the previous
//!   one; the final number keeps its continuation bit set, which is how the decoder
//!   tells the variants apart
//!
//! ```rust
//! use num_bigint::BigInt;
//! use stax_codec::cram::{cram, uncram};
//!
//! let ints: Vec<BigInt> = [10, 20, 30, 40].into_iter().map(BigInt::from).collect();
//! let crammed = cram(&ints);
//! assert_eq!(crammed, "EEEF");
//! assert_eq!(uncram(&crammed).unwrap(), ints);
//! ```
//!
//! ## Scalar Encoding
//!
//! [`cram_single`] picks the shortest spelling of one integer among its decimal form, a
//! few named constants, a squared shorter form, and a quoted bijective numeral `"...%`.
//!
//! ## Whole Arrays
//!
//! [`compress_int_array`] tries the crammed literal `"...!` against base packing,
//! run-length, pair and plain-string spellings and keeps the shortest.

use crate::alphabet::CRAM;
use crate::syntax::{escape_string, join_literals};
use crate::{Error, Result, Value};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use tracing::{debug, trace};

const ENCODING: &str = "crammed integer";

/// Radix of the leading digit of a number (sign and continuation bits reserved).
#[inline]
fn lead_radix() -> usize {
    CRAM.len() / 4
}

/// Radix of every following digit (continuation bit reserved).
#[inline]
fn tail_radix() -> usize {
    CRAM.len() / 2
}

/// Low digit of a value known to fit in a machine word.
#[inline]
fn small(n: &BigUint) -> usize {
    n.iter_u32_digits().next().unwrap_or(0) as usize
}

fn encode_number(n: &BigInt, keep_continuation: bool, out: &mut String) {
    let lead = BigUint::from(lead_radix());
    let tail = BigUint::from(tail_radix());

    let mut magnitude = n.magnitude().clone();
    let mut low_digits = Vec::new();
    while magnitude >= lead {
        let (quotient, remainder) = magnitude.div_rem(&tail);
        low_digits.push(small(&remainder));
        magnitude = quotient;
    }

    let sign_bit = if n.is_negative() { 2 } else { 0 };
    let continues = |is_last: bool| usize::from(!is_last || keep_continuation);

    let head = small(&magnitude);
    out.push(CRAM.symbol(head * 4 + sign_bit + continues(low_digits.is_empty())));
    for (i, digit) in low_digits.iter().rev().enumerate() {
        out.push(CRAM.symbol(digit * 2 + continues(i + 1 == low_digits.len())));
    }
}

fn cram_flat(ints: &[BigInt]) -> String {
    let mut out = String::new();
    for n in ints {
        encode_number(n, false, &mut out);
    }
    out
}

fn cram_offset(ints: &[BigInt]) -> Option<String> {
    let (first, rest) = ints.split_first()?;
    let mut out = String::new();
    encode_number(first, rest.is_empty(), &mut out);
    for (i, pair) in ints.windows(2).enumerate() {
        let delta = &pair[1] - &pair[0];
        encode_number(&delta, i + 2 == ints.len(), &mut out);
    }
    Some(out)
}

/// Crams an integer sequence into a string over the cram alphabet.
///
/// The offset variant is used only when it is strictly shorter than the flat one.
#[must_use]
pub fn cram(ints: &[BigInt]) -> String {
    let flat = cram_flat(ints);
    match cram_offset(ints) {
        Some(offset) if offset.len() < flat.len() => offset,
        _ => flat,
    }
}

/// Inverse of [`cram`].
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if `crammed` contains a symbol outside the cram
/// alphabet.
pub fn uncram(crammed: &str) -> Result<Vec<BigInt>> {
    let tail = BigInt::from(tail_radix());
    let digit = |offset: usize, ch: char| {
        CRAM.digit(ch)
            .ok_or_else(|| Error::invalid_symbol(ch, offset, ENCODING))
    };

    let mut values = Vec::new();
    let mut offset_mode = false;
    let mut symbols = crammed.char_indices();

    while let Some((offset, ch)) = symbols.next() {
        let lead = digit(offset, ch)?;
        let negative = lead & 2 != 0;
        let mut value = BigInt::from(lead >> 2);
        let mut continues = lead & 1 != 0;

        while continues {
            match symbols.next() {
                Some((offset, ch)) => {
                    let next = digit(offset, ch)?;
                    value = value * &tail + (next >> 1);
                    continues = next & 1 != 0;
                }
                None => {
                    offset_mode = true;
                    break;
                }
            }
        }

        values.push(if negative { -value } else { value });
    }

    if offset_mode {
        for i in 1..values.len() {
            let previous = values[i - 1].clone();
            values[i] += previous;
        }
    }

    Ok(values)
}

/// Decimal spelling; negative numbers get the negate operator appended.
fn decimal(n: &BigInt) -> String {
    if n.is_negative() {
        format!("{}N", n.magnitude())
    } else {
        n.to_string()
    }
}

fn named_constant(n: &BigInt) -> Option<&'static str> {
    match n.to_i64()? {
        -1 => Some("U"),
        10 => Some("A"),
        256 => Some("VB"),
        1000 => Some("Vk"),
        1_000_000 => Some("VM"),
        _ => None,
    }
}

/// Writes `n` as a bijective numeral over the cram alphabet (digits 1 through `len`).
pub(crate) fn bijective(n: &BigUint) -> String {
    let radix = BigUint::from(CRAM.len());
    let mut rest = n.clone();
    let mut digits = Vec::new();
    while !rest.is_zero() {
        rest -= 1u32;
        let (quotient, remainder) = rest.div_rem(&radix);
        digits.push(CRAM.symbol(small(&remainder)));
        rest = quotient;
    }
    digits.iter().rev().collect()
}

/// Chooses the shortest literal spelling of a single integer.
///
/// Candidates are the decimal form, the named constants (-1, 10, 256, 1000 and
/// 1000000), a squared shorter form for perfect squares from 100 up, and the quoted
/// bijective numeral `"...%` for numbers with seven or more decimal digits. Ties go to
/// the decimal form, so the result is never longer than it.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigInt;
/// use stax_codec::cram::cram_single;
///
/// assert_eq!(cram_single(&BigInt::from(10)), "A");
/// assert_eq!(cram_single(&BigInt::from(10000)), "AJJ");
/// assert_eq!(cram_single(&BigInt::from(1234567)), "\"0V6Y%");
/// assert_eq!(cram_single(&BigInt::from(-5)), "5N");
/// ```
#[must_use]
pub fn cram_single(n: &BigInt) -> String {
    if n.is_negative() {
        if let Some(constant) = named_constant(n) {
            return constant.to_string();
        }
        return format!("{}N", cram_single(&-n));
    }

    let spelled = decimal(n);
    let mut candidates = vec![spelled.clone()];

    if let Some(constant) = named_constant(n) {
        candidates.push(constant.to_string());
    }

    if *n >= BigInt::from(100) {
        let root = n.sqrt();
        if &root * &root == *n {
            candidates.push(format!("{}J", cram_single(&root)));
        }
    }

    if spelled.len() >= 7 {
        candidates.push(format!("\"{}%", bijective(n.magnitude())));
    }

    candidates
        .into_iter()
        .min_by_key(String::len)
        .unwrap_or(spelled)
}

/// Decodes the body of a quoted crammed integer (the text between `"` and `%`).
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for symbols outside the cram alphabet.
pub fn uncram_single(body: &str) -> Result<BigInt> {
    let radix = BigUint::from(CRAM.len());
    let mut value = BigUint::zero();
    for (offset, ch) in body.char_indices() {
        let digit = CRAM
            .digit(ch)
            .ok_or_else(|| Error::invalid_symbol(ch, offset, ENCODING))?;
        value = value * &radix + (digit + 1);
    }
    Ok(BigInt::from_biguint(Sign::Plus, value))
}

/// Crammed array literal `"...!`.
fn crammed_literal(ints: &[BigInt]) -> Option<String> {
    Some(format!("\"{}!", cram(ints)))
}

/// Digits of one big integer in base `max + 1`, expanded with `|E`.
fn base_packed(ints: &[BigInt]) -> Option<String> {
    if ints.is_empty() || ints.iter().any(Signed::is_negative) {
        return None;
    }
    if let [only] = ints {
        return Some(format!("{}]", cram_single(only)));
    }
    if ints.iter().all(Zero::is_zero) {
        return Some(format!("0]{}*", cram_single(&BigInt::from(ints.len()))));
    }
    if ints[0].is_zero() {
        // Base digits cannot start with zero; peel it off and prepend it afterwards.
        return base_packed(&ints[1..]).map(|rest| format!("0]{}+", rest));
    }

    let base: BigInt = ints.iter().max().cloned().unwrap_or_default() + 1;
    let packed = ints
        .iter()
        .fold(BigInt::zero(), |acc, digit| acc * &base + digit);
    Some(format!(
        "{}|E",
        join_literals(&cram_single(&packed), &cram_single(&base))
    ))
}

fn repeated(ints: &[BigInt]) -> Option<String> {
    let (first, rest) = ints.split_first()?;
    if rest.is_empty() || rest.iter().any(|n| n != first) {
        return None;
    }
    Some(format!(
        "{}]{}*",
        cram_single(first),
        cram_single(&BigInt::from(ints.len()))
    ))
}

fn pair(ints: &[BigInt]) -> Option<String> {
    match ints {
        [a, b] => Some(format!(
            "{}\\",
            join_literals(&cram_single(a), &cram_single(b))
        )),
        _ => None,
    }
}

/// A plain string literal, whose value is the array of its code points.
fn direct_ascii(ints: &[BigInt]) -> Option<String> {
    let text = ints
        .iter()
        .map(|n| match n.to_u8() {
            Some(code @ 0x20..=0x7e) => Some(char::from(code)),
            _ => None,
        })
        .collect::<Option<String>>()?;
    Some(format!("\"{}\"", escape_string(&text)))
}

/// Returns the shortest literal that produces `ints`.
///
/// Every strategy declines when its preconditions fail, and the crammed literal always
/// applies, so a result is always available.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigInt;
/// use stax_codec::cram::compress_int_array;
///
/// let hello: Vec<BigInt> = "Hello".bytes().map(BigInt::from).collect();
/// assert_eq!(compress_int_array(&hello), "\"Hello\"");
///
/// let fives = vec![BigInt::from(5); 5];
/// assert_eq!(compress_int_array(&fives), "5]5*");
/// ```
#[must_use]
pub fn compress_int_array(ints: &[BigInt]) -> String {
    if ints.is_empty() {
        return "z".to_string();
    }

    let strategies: [(&str, fn(&[BigInt]) -> Option<String>); 5] = [
        ("crammed", crammed_literal),
        ("base-packed", base_packed),
        ("repeated", repeated),
        ("pair", pair),
        ("ascii", direct_ascii),
    ];

    let mut best: Option<(&str, String)> = None;
    for (name, strategy) in strategies {
        let Some(candidate) = strategy(ints) else {
            continue;
        };
        trace!(strategy = name, len = candidate.len(), "array candidate");
        if best
            .as_ref()
            .map_or(true, |(_, current)| candidate.len() < current.len())
        {
            best = Some((name, candidate));
        }
    }

    match best {
        Some((name, literal)) => {
            debug!(
                strategy = name,
                elements = ints.len(),
                len = literal.len(),
                "compressed integer array"
            );
            literal
        }
        None => format!("\"{}!", cram(ints)),
    }
}

/// Shortest literal for a value, when one exists.
///
/// Integers and flat integer arrays have literal forms; reals, fractions, blocks and
/// nested arrays do not.
#[must_use]
pub fn compress_value(value: &Value) -> Option<String> {
    match value {
        Value::Int(n) => Some(cram_single(n)),
        Value::Array(_) => value.as_int_array().map(|ints| compress_int_array(&ints)),
        Value::Real(_) | Value::Fraction(_) | Value::Block(_) => None,
    }
}
