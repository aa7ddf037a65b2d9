//! The kinds of errors that can occur while evaluating an expression.

use ariadne::Fmt;
use keypad_attrs::ErrorKind;
use keypad_error::EXPR;

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this operator", "this operand evaluates to zero"],
    help = "division by zero is undefined",
)]
pub struct DivisionByZero;

/// A function was called with an argument outside of its domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined for this value", function),
    labels = ["this argument"],
    help = *reason,
)]
pub struct DomainError {
    /// The name of the function or operator.
    pub function: String,

    /// Why the argument is outside of the domain.
    pub reason: &'static str,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "available functions are: sqrt, abs, ln, exp, sin, cos, tan".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// Similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A negative number was raised to a non-integer power, which has no real result.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot raise a negative number to a non-integer power",
    labels = ["this base is negative", "this exponent is not an integer"],
    help = "the result would not be a real number",
)]
pub struct NonIntegerExponentOfNegative;

/// The result of an operation is too large to represent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "overflow",
    labels = ["this expression is too large to represent"],
)]
pub struct Overflow;
