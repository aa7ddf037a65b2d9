//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{ops::Pow, Assign, Float, Integer, Rational};

/// The default number of bits of precision to use when computing floating-point values.
pub const PRECISION: u32 = 1 << 9;

/// The largest magnitude of a decimal exponent accepted in a number literal, such as the `20` in
/// `1.5E20`.
pub const MAX_LITERAL_EXPONENT: u32 = 100_000;

/// Clamps a float precision, in bits, to the range MPFR accepts.
pub fn clamp_precision(precision: u32) -> u32 {
    precision.clamp(rug::float::prec_min(), rug::float::prec_max())
}

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value, using the default precision.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] with the given value and precision.
pub fn float_with<T>(precision: u32, n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(precision, n)
}

/// Returns `10^exp` as an [`Integer`].
fn pow10(exp: u32) -> Integer {
    int(10).pow(exp)
}

/// Converts the text of a number literal into an exact [`Rational`].
///
/// Accepts integers (`12`), decimals (`1.5`, `.5`, `3.`), and numbers in `E` notation
/// (`1.5E20`, `2E-3`). Returns [`None`] if the text is not a number, or if its exponent is larger
/// than [`MAX_LITERAL_EXPONENT`].
pub fn rational_from_str(s: &str) -> Option<Rational> {
    let (mantissa, exponent) = match s.split_once('E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (s, 0),
    };
    if exponent.unsigned_abs() > MAX_LITERAL_EXPONENT as u64 {
        return None;
    }

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{}{}", whole, fraction);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let numer = Integer::from_str_radix(&digits, 10).ok()?;
    let mut value = Rational::from((numer, pow10(fraction.len() as u32)));

    let shift = pow10(exponent.unsigned_abs() as u32);
    if exponent >= 0 {
        value *= shift;
    } else {
        value /= shift;
    }

    Some(value)
}

/// Returns the exact `k`-th root of a non-negative integer, if there is one.
pub fn exact_root(n: &Integer, k: u32) -> Option<Integer> {
    if *n < 0 || k == 0 {
        return None;
    }

    let root = n.clone().root(k);
    if int((&root).pow(k)) == *n {
        Some(root)
    } else {
        None
    }
}

/// Returns the exact `k`-th root of a non-negative rational, if both its numerator and
/// denominator are perfect `k`-th powers.
pub fn exact_rational_root(n: &Rational, k: u32) -> Option<Rational> {
    let numer = exact_root(n.numer(), k)?;
    let denom = exact_root(n.denom(), k)?;
    Some(rational((numer, denom)))
}
