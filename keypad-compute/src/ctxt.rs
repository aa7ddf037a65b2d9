use crate::{funcs::{Builtin, BUILTINS}, primitive::{clamp_precision, PRECISION}};
use levenshtein::levenshtein;

/// A context to use when evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctxt {
    /// The number of bits of precision used for floating-point values.
    pub precision: u32,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self { precision: PRECISION }
    }
}

impl Ctxt {
    /// Creates a context that evaluates floats with the given precision, in bits. The precision
    /// is clamped to the range MPFR accepts.
    pub fn with_precision(precision: u32) -> Self {
        Self { precision: clamp_precision(precision) }
    }

    /// Returns the builtin function with the given name, if it exists.
    pub fn get_builtin(&self, name: &str) -> Option<&'static dyn Builtin> {
        BUILTINS.get(name).map(|builtin| &**builtin)
    }

    /// Returns the names of the builtin functions that are similar to the given name, sorted by
    /// name.
    pub fn suggestions(&self, name: &str) -> Vec<String> {
        let mut names = BUILTINS
            .keys()
            .filter(|candidate| levenshtein(name, candidate) < 2)
            .map(|candidate| candidate.to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}
