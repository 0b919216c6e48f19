//! Tagged representation of the values that literals denote.
//!
//! This module provides the [`Value`] enum: the closed set of operand kinds a Stax
//! program manipulates. The codecs only ever produce or consume integers and arrays of
//! integers, but every boundary matches on the full enum so the remaining kinds are
//! rejected explicitly rather than by a runtime type test.
//!
//! ## Type Signatures
//!
//! Each kind has a one-letter symbol. Operator macro tables are keyed by the operator
//! character plus the concatenated symbols of its operands, so the symbols below are a
//! stable external contract:
//!
//! | Kind | Symbol |
//! |------|--------|
//! | Array | `a` |
//! | Block | `b` |
//! | Fraction | `f` |
//! | Integer | `i` |
//! | Real | `r` |
//!
//! ```rust
//! use stax_codec::{stax, type_signature, Value};
//!
//! let operands = [stax!([1, 2]), Value::from(3)];
//! assert_eq!(type_signature(&operands), "ai");
//! ```

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single Stax operand.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigInt;
/// use stax_codec::Value;
///
/// let n = Value::from(42);
/// assert_eq!(n.as_int(), Some(&BigInt::from(42)));
/// assert_eq!(n.type_symbol(), 'i');
///
/// let array = Value::from_ints([1, 2, 3]);
/// assert_eq!(array.as_int_array().map(|v| v.len()), Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(BigInt),
    Real(f64),
    Fraction(BigRational),
    Array(Vec<Value>),
    /// Source text of a code block, braces included.
    Block(String),
}

impl Value {
    /// Builds an array of integers.
    pub fn from_ints<I, T>(ints: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BigInt>,
    {
        Value::Array(ints.into_iter().map(|n| Value::Int(n.into())).collect())
    }

    /// Returns the integer if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the elements if this is an `Array`.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the elements as integers if this is an array made only of `Int`s.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stax_codec::{stax, Value};
    ///
    /// assert!(stax!([1, 2]).as_int_array().is_some());
    /// assert!(stax!([1, [2]]).as_int_array().is_none());
    /// assert!(Value::from(7).as_int_array().is_none());
    /// ```
    #[must_use]
    pub fn as_int_array(&self) -> Option<Vec<BigInt>> {
        self.as_array()?
            .iter()
            .map(|item| item.as_int().cloned())
            .collect()
    }

    /// The one-letter operand-type symbol of this value.
    #[must_use]
    pub const fn type_symbol(&self) -> char {
        match self {
            Value::Array(_) => 'a',
            Value::Block(_) => 'b',
            Value::Fraction(_) => 'f',
            Value::Int(_) => 'i',
            Value::Real(_) => 'r',
        }
    }
}

/// Concatenates the type symbols of `operands`, deepest stack entry first.
#[must_use]
pub fn type_signature(operands: &[Value]) -> String {
    operands.iter().map(Value::type_symbol).collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Real(r) => write!(f, "{}", r),
            Value::Fraction(q) => write!(f, "{}/{}", q.numer(), q.denom()),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Block(source) => write!(f, "{}", source),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<BigRational> for Value {
    fn from(value: BigRational) -> Self {
        Value::Fraction(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl TryFrom<Value> for BigInt {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(n) => Ok(n),
            other => Err(crate::Error::custom(format!(
                "expected integer, found type '{}'",
                other.type_symbol()
            ))),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let n = BigInt::try_from(value)?;
        n.to_i64()
            .ok_or_else(|| crate::Error::custom(format!("integer {} does not fit in i64", n)))
    }
}
