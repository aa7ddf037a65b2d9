//! All built-in functions that can be called from an expression.
//!
//! Each function is implemented as a unit `struct` implementing the [`Builtin`] trait. Functions
//! return an exact result whenever the argument allows one (such as `sqrt(9)` or `cos(0)`), and
//! fall back to floating-point evaluation otherwise.

pub mod power;
pub mod trigonometry;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use super::{ctxt::Ctxt, value::Value};

/// Represents an error that can occur while evaluating a builtin function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinError {
    /// The argument is outside the domain of the function. Contains the reason.
    Domain(&'static str),
}

/// A trait implemented by all builtin functions.
pub trait Builtin: std::fmt::Debug + Send + Sync {
    /// Returns the name of the function.
    fn name(&self) -> &'static str;

    /// Evaluates the function with the given argument.
    fn eval(&self, ctxt: &Ctxt, arg: Value) -> Result<Value, BuiltinError>;
}

/// Returns a map of all builtin functions, keyed by name.
pub fn all() -> HashMap<&'static str, Box<dyn Builtin>> {
    use power::*;
    use trigonometry::*;

    macro_rules! build {
        ($($name:literal $upname:ident),* $(,)?) => {
            [
                $(
                    ($name, Box::new($upname) as Box<dyn Builtin>),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        "sqrt" Sqrt,
        "abs" Abs,
        "exp" Exp,
        "ln" Ln,
        "sin" Sin,
        "cos" Cos,
        "tan" Tan,
    }
}

/// The table of builtin functions, built once on first use.
pub static BUILTINS: Lazy<HashMap<&'static str, Box<dyn Builtin>>> = Lazy::new(all);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_keys() {
        for (key, builtin) in all() {
            assert_eq!(key, builtin.name());
        }
    }
}
