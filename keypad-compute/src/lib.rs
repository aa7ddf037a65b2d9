//! Evaluation of parsed keypad expressions.
//!
//! Expressions are evaluated exactly over rationals whenever every step allows it (the four basic
//! operations, integer powers, and roots of perfect powers). As soon as a step produces an
//! irrational value, evaluation continues with MPFR floats at the configured precision.
//!
//! The [`Simplifier`] ties this together with the preprocessing and parsing done by
//! [`keypad_parser`], producing the symbolic and decimal renderings shown as a live preview.
//!
//! [`Simplifier`]: simplify::Simplifier

pub mod ctxt;
pub mod error;
pub mod eval;
pub mod fmt;
pub mod funcs;
pub mod primitive;
pub mod simplify;
pub mod value;

pub use ctxt::Ctxt;
pub use simplify::Simplifier;
pub use value::Value;
