mod float;
mod rational;

use std::fmt::{Display, Formatter};
use super::value::Value;

pub use float::should_use_scientific;

/// The number of significant digits shown by default.
pub const DEFAULT_DIGITS: usize = 15;

/// Formatting options for values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// How to format a number.
    pub number: NumberFormat,

    /// The number of significant digits to show for values that are not shown exactly.
    ///
    /// This option **does not** control the precision of the number during calculation, only the
    /// number of digits to display during formatting. Rounding to fewer digits than the float
    /// precision hides the small errors floating-point arithmetic introduces.
    pub digits: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            number: NumberFormat::default(),
            digits: DEFAULT_DIGITS,
        }
    }
}

/// The different ways to format a number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Chooses between decimal and scientific notation based on the magnitude of the number.
    ///
    /// Non-zero numbers whose magnitude is below `1e-6`, or at least `1e12`, are represented in
    /// scientific notation, while all other numbers are formatted in decimal notation. Exact
    /// integers below `1e12` are written out in full.
    ///
    /// This is the default option.
    #[default]
    Auto,

    /// Formats the number as a decimal, with no regard to its magnitude.
    Decimal,

    /// Formats the number in scientific notation, using `E` to denote the exponent, such as
    /// `1.5E20`. `E` notation is understood by the tokenizer, so the output can be parsed again.
    Scientific,

    /// Formats an exact number as a fraction, such as `3/10`. Approximate numbers are formatted as
    /// if [`NumberFormat::Auto`] was used.
    Fraction,
}

impl NumberFormat {
    /// Utility function to create a new [`FormatOptions`] with the same formating options as the
    /// given [`FormatOptions`], but with the number format set to this value.
    pub fn inside(self, options: FormatOptions) -> FormatOptions {
        FormatOptions {
            number: self,
            ..options
        }
    }
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number format. See [`NumberFormat`] for more information.
    pub fn number(mut self, number: NumberFormat) -> Self {
        self.0.number = number;
        self
    }

    /// Sets the number of significant digits to show. Values below 1 are treated as 1. See
    /// [`FormatOptions::digits`] for more information.
    pub fn digits(mut self, digits: usize) -> Self {
        self.0.digits = digits.max(1);
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Formatter for a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueFormatter<'a> {
    /// The value to format.
    pub value: &'a Value,

    /// The options to use when formatting.
    pub options: FormatOptions,
}

impl Display for ValueFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Value::Exact(n) => rational::fmt(f, n, self.options),
            Value::Approx(n) => float::fmt(f, n, self.options),
        }
    }
}
