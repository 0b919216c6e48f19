/// Builds a [`Value`](crate::Value) from array-literal syntax.
///
/// Nested brackets become nested arrays; numeric literals (optionally negated) become
/// integers or reals. A bare expression is converted with `Value::from`.
///
/// ```rust
/// use stax_codec::stax;
///
/// let value = stax!([1, [2, 3], -4]);
/// assert_eq!(value.to_string(), "[1 [2 3] -4]");
/// ```
#[macro_export]
macro_rules! stax {
    ([ $($items:tt)* ]) => {
        $crate::Value::Array($crate::__stax_items!([] $($items)*))
    };

    (- $n:literal) => {
        $crate::Value::from(-$n)
    };

    ($e:expr) => {
        $crate::Value::from($e)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __stax_items {
    ([ $($out:expr),* ] $(,)?) => {
        vec![$($out),*]
    };

    ([ $($out:expr),* ] [ $($inner:tt)* ] $(, $($rest:tt)*)?) => {
        $crate::__stax_items!([ $($out,)* $crate::stax!([ $($inner)* ]) ] $($($rest)*)?)
    };

    ([ $($out:expr),* ] - $n:literal $(, $($rest:tt)*)?) => {
        $crate::__stax_items!([ $($out,)* $crate::stax!(- $n) ] $($($rest)*)?)
    };

    ([ $($out:expr),* ] $n:literal $(, $($rest:tt)*)?) => {
        $crate::__stax_items!([ $($out,)* $crate::stax!($n) ] $($($rest)*)?)
    };
}
