use crate::primitive::float_with;
use rug::{Float, Rational};
use std::fmt::{Display, Formatter};
use super::fmt::{FormatOptions, ValueFormatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// An exact rational value, such as `3/10`.
    Exact(Rational),

    /// An approximate value, produced once evaluation leaves the rationals, such as `sqrt(2)`.
    Approx(Float),
}

impl Value {
    /// Returns true if the value is exact.
    pub fn is_exact(&self) -> bool {
        matches!(self, Value::Exact(_))
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Exact(n) => n.cmp0().is_eq(),
            Value::Approx(n) => n.is_zero(),
        }
    }

    /// Returns true if the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Value::Exact(n) => n.cmp0().is_lt(),
            Value::Approx(n) => n.cmp0().map_or(false, |ord| ord.is_lt()),
        }
    }

    /// Returns true if the value is an integer.
    pub fn is_integer(&self) -> bool {
        match self {
            Value::Exact(n) => *n.denom() == 1,
            Value::Approx(n) => n.is_integer(),
        }
    }

    /// Returns the exact rational value, if this value is exact.
    pub fn as_exact(&self) -> Option<&Rational> {
        match self {
            Value::Exact(n) => Some(n),
            Value::Approx(_) => None,
        }
    }

    /// Converts the value to a [`Float`] with the given precision.
    pub fn to_float(&self, precision: u32) -> Float {
        match self {
            Value::Exact(n) => float_with(precision, n),
            Value::Approx(n) => float_with(precision, n),
        }
    }

    /// Consumes the value and converts it to a [`Float`] with the given precision.
    pub fn into_float(self, precision: u32) -> Float {
        match self {
            Value::Exact(n) => float_with(precision, &n),
            Value::Approx(mut n) => {
                n.set_prec(precision);
                n
            },
        }
    }

    /// Returns a formatter for the value with the given options.
    pub fn formatted(&self, options: FormatOptions) -> ValueFormatter {
        ValueFormatter { value: self, options }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Exact(Rational::from(n))
    }
}

impl From<Rational> for Value {
    fn from(n: Rational) -> Self {
        Value::Exact(n)
    }
}

impl From<Float> for Value {
    fn from(n: Float) -> Self {
        Value::Approx(n)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        ValueFormatter { value: self, options: FormatOptions::default() }.fmt(f)
    }
}
