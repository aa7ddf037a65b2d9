//! Utility functions to format floating-point numbers.

use rug::{float::Round, Float};
use std::{cmp::Ordering, fmt::Formatter};
use super::{FormatOptions, NumberFormat};

/// Returns true if the given float is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: &Float) -> bool {
    if n.is_zero() {
        return false;
    }

    let abs = n.as_abs();
    *abs < 1e-6 || *abs >= 1e+12
}

/// Trims trailing zeros from the fractional part of a string assumed to represent a single number
/// in decimal notation, along with the decimal point if nothing is left after it.
fn trim_trailing(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a float that is not normal: zero, infinity, or NaN.
fn fmt_abnormal(f: &mut Formatter<'_>, n: &Float) -> std::fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}∞", if n.is_sign_negative() { "-" } else { "" })
    } else {
        write!(f, "0")
    }
}

/// Formats a float as a standard number, rounded to the given number of significant digits.
fn fmt_decimal(f: &mut Formatter<'_>, n: &Float, digits: usize) -> std::fmt::Result {
    if !n.is_normal() {
        return fmt_abnormal(f, n);
    }

    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let Some(exponent) = exponent else {
        return fmt_abnormal(f, n);
    };

    // the string holds the digits of `0.ddd * 10^exponent`
    match exponent.cmp(&0) {
        Ordering::Less => s.insert_str(0, &format!("0.{}", "0".repeat(exponent.unsigned_abs() as usize))),
        Ordering::Equal => s.insert_str(0, "0."),
        Ordering::Greater => {
            let exponent = exponent as usize;
            match s.len().cmp(&exponent) {
                Ordering::Less => s.push_str(&"0".repeat(exponent - s.len())),
                Ordering::Greater => s.insert(exponent, '.'),
                Ordering::Equal => {},
            }
        },
    }

    write!(f, "{}{}", if sign { "-" } else { "" }, trim_trailing(&s))
}

/// Formats a float in scientific notation, using `E` to denote the exponent.
fn fmt_scientific(f: &mut Formatter<'_>, n: &Float, digits: usize) -> std::fmt::Result {
    if !n.is_normal() {
        return fmt_abnormal(f, n);
    }

    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let Some(exponent) = exponent else {
        return fmt_abnormal(f, n);
    };

    // one digit stays before the decimal point
    s.insert(1, '.');

    write!(f, "{}{}E{}", if sign { "-" } else { "" }, trim_trailing(&s), exponent - 1)
}

/// Formats a float with the given options.
pub fn fmt(f: &mut Formatter<'_>, n: &Float, options: FormatOptions) -> std::fmt::Result {
    match options.number {
        NumberFormat::Auto | NumberFormat::Fraction => {
            if should_use_scientific(n) {
                fmt_scientific(f, n, options.digits)
            } else {
                fmt_decimal(f, n, options.digits)
            }
        },
        NumberFormat::Decimal => fmt_decimal(f, n, options.digits),
        NumberFormat::Scientific => fmt_scientific(f, n, options.digits),
    }
}
