//! The contract with the simplification service, and the preview built from it.

use keypad_compute::Simplifier;
use keypad_error::Error;
use tracing::trace;

/// The symbolic and decimal renderings of an evaluated expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    /// The exact rendering, such as `1/3`, or a decimal if no exact value is known.
    pub symbolic: String,

    /// The decimal rendering, such as `0.333333333333333`.
    pub decimal: String,
}

/// Evaluates rendered expression text.
pub trait SimplificationService {
    /// Normalizes rendered expression text so that it can be evaluated.
    fn preprocess(&self, text: &str) -> String;

    /// Parses and evaluates normalized text.
    fn simplify(&self, normalized: &str) -> Result<Simplified, Error>;

    /// Parses and evaluates normalized text, returning only its decimal rendering.
    fn decimal_value(&self, normalized: &str) -> Result<String, Error> {
        self.simplify(normalized).map(|simplified| simplified.decimal)
    }
}

impl SimplificationService for Simplifier {
    fn preprocess(&self, text: &str) -> String {
        Simplifier::preprocess(self, text)
    }

    fn simplify(&self, normalized: &str) -> Result<Simplified, Error> {
        let value = Simplifier::simplify(self, normalized)?;
        Ok(Simplified {
            symbolic: self.symbolic(&value),
            decimal: self.decimal(&value),
        })
    }

    fn decimal_value(&self, normalized: &str) -> Result<String, Error> {
        Simplifier::decimal_value(self, normalized)
    }
}

/// Removes trailing zeros from the fractional part of a decimal, along with the decimal point if
/// nothing is left after it. Numbers in `E` notation are left unchanged.
pub fn trim_decimal(text: &str) -> &str {
    if text.contains('.') && !text.contains('E') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// What is shown for the current expression: its text and a best-effort evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    /// The rendered expression.
    pub expression: String,

    /// The symbolic rendering of the value, if the expression could be evaluated.
    pub symbolic: Option<String>,

    /// The decimal rendering of the value, if the expression could be evaluated.
    pub decimal: Option<String>,
}

impl Preview {
    /// Builds the preview of the given rendered expression. Evaluation failures give an empty
    /// preview.
    pub fn build(service: &dyn SimplificationService, expression: &str) -> Self {
        if expression.is_empty() {
            return Self::default();
        }

        let normalized = service.preprocess(expression);
        match service.simplify(&normalized) {
            Ok(Simplified { symbolic, decimal }) => {
                trace!(expression, %symbolic, %decimal, "preview computed");
                Self {
                    expression: expression.to_owned(),
                    symbolic: Some(symbolic),
                    decimal: Some(trim_decimal(&decimal).to_owned()),
                }
            },
            Err(_) => {
                trace!(expression, %normalized, "no preview available");
                Self {
                    expression: expression.to_owned(),
                    symbolic: None,
                    decimal: None,
                }
            },
        }
    }

    /// Returns true if the expression could be evaluated.
    pub fn is_available(&self) -> bool {
        self.decimal.is_some()
    }
}
