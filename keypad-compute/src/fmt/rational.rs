//! Utility functions to format exact rational numbers.

use crate::primitive::{float_with, PRECISION};
use rug::{Integer, Rational};
use std::fmt::Formatter;
use super::{float, FormatOptions, NumberFormat};

/// Returns true if the integer is small enough to be written out in full by
/// [`NumberFormat::Auto`].
fn fits_auto(n: &Integer) -> bool {
    *n.as_abs() < 1_000_000_000_000u64
}

/// Formats a rational number with the given options.
pub fn fmt(f: &mut Formatter<'_>, n: &Rational, options: FormatOptions) -> std::fmt::Result {
    let is_integer = *n.denom() == 1;
    match options.number {
        NumberFormat::Fraction => {
            if is_integer {
                write!(f, "{}", n.numer())
            } else {
                write!(f, "{}/{}", n.numer(), n.denom())
            }
        },
        NumberFormat::Auto if is_integer && fits_auto(n.numer()) => write!(f, "{}", n.numer()),
        NumberFormat::Decimal if is_integer => write!(f, "{}", n.numer()),
        _ => {
            // at least enough bits for the requested digits
            let bits = PRECISION.max((options.digits as u32).saturating_mul(4));
            let approx = float_with(bits, n);
            float::fmt(f, &approx, options)
        },
    }
}
