use keypad_compute::{fmt::DEFAULT_DIGITS, primitive::{clamp_precision, PRECISION}};

/// Options controlling an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// The maximum number of digits the ten-key accepts for one number. Further digits are
    /// ignored.
    pub max_digits: usize,

    /// The number of significant digits shown in decimal previews and results.
    pub decimal_digits: usize,

    /// The number of states kept for undo. The oldest state is dropped when the limit is reached.
    pub history_limit: usize,

    /// The number of bits of precision used for floating-point evaluation.
    pub precision: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_digits: 15,
            decimal_digits: DEFAULT_DIGITS,
            history_limit: 256,
            precision: PRECISION,
        }
    }
}

/// Helper struct to build an [`EngineOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptionsBuilder(EngineOptions);

impl EngineOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of digits per number. Values below 1 are treated as 1.
    pub fn max_digits(mut self, max_digits: usize) -> Self {
        self.0.max_digits = max_digits.max(1);
        self
    }

    /// Sets the number of significant digits shown. Values below 1 are treated as 1.
    pub fn decimal_digits(mut self, decimal_digits: usize) -> Self {
        self.0.decimal_digits = decimal_digits.max(1);
        self
    }

    /// Sets the number of states kept for undo.
    pub fn history_limit(mut self, history_limit: usize) -> Self {
        self.0.history_limit = history_limit;
        self
    }

    /// Sets the float precision, in bits. Values outside the range MPFR accepts are clamped.
    pub fn precision(mut self, precision: u32) -> Self {
        self.0.precision = clamp_precision(precision);
        self
    }

    /// Builds the [`EngineOptions`] struct.
    pub fn build(self) -> EngineOptions {
        self.0
    }
}
