use keypad_error::Error;
use keypad_parser::{
    parser::{ast::Expr, Parser},
    preprocess,
};
use super::{
    ctxt::Ctxt,
    eval::Eval,
    fmt::{FormatOptions, FormatOptionsBuilder, NumberFormat},
    value::Value,
};

/// Turns rendered expression text into a value and its textual renderings.
///
/// The three steps are exposed separately so that callers can cache or report each one:
///
/// 1. [`Simplifier::preprocess`] normalizes the rendered text.
/// 2. [`Simplifier::simplify`] parses and evaluates the normalized text, exactly where possible.
/// 3. [`Simplifier::decimal_value`] renders the value as a trimmed decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Simplifier {
    /// The context used for evaluation.
    pub ctxt: Ctxt,

    /// The options used when rendering values as decimals.
    pub format: FormatOptions,
}

impl Simplifier {
    /// Creates a simplifier with the given float precision (in bits) that shows the given number
    /// of significant digits.
    pub fn new(precision: u32, digits: usize) -> Self {
        Self {
            ctxt: Ctxt::with_precision(precision),
            format: FormatOptionsBuilder::new().digits(digits).build(),
        }
    }

    /// Normalizes rendered expression text so that it can be parsed.
    pub fn preprocess(&self, text: &str) -> String {
        preprocess::preprocess(text)
    }

    /// Parses normalized text into an expression.
    pub fn parse(&self, normalized: &str) -> Result<Expr, Error> {
        Parser::new(normalized).try_parse_full::<Expr>()
    }

    /// Parses and evaluates normalized text.
    pub fn simplify(&self, normalized: &str) -> Result<Value, Error> {
        self.parse(normalized)?.eval(&self.ctxt)
    }

    /// Parses and evaluates normalized text, returning its decimal rendering.
    pub fn decimal_value(&self, normalized: &str) -> Result<String, Error> {
        self.simplify(normalized).map(|value| self.decimal(&value))
    }

    /// Renders a value symbolically: exact values as an integer or a fraction `n/d`, approximate
    /// values as a decimal.
    pub fn symbolic(&self, value: &Value) -> String {
        value.formatted(NumberFormat::Fraction.inside(self.format)).to_string()
    }

    /// Renders a value as a decimal, with trailing zeros and any trailing decimal point removed.
    /// Very small or large magnitudes use `E` notation.
    pub fn decimal(&self, value: &Value) -> String {
        value.formatted(NumberFormat::Auto.inside(self.format)).to_string()
    }
}
