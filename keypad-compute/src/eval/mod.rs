mod binary;
mod call;
mod literal;
mod unary;

use keypad_error::Error;
use keypad_parser::parser::ast::{Expr, Paren};
use super::{ctxt::Ctxt, error::{DomainError, Overflow}, value::Value};
use std::ops::Range;

/// Any type that can be evaluated to produce a value.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error>;

    /// Evaluate the expression to produce a value, using the default context.
    fn eval_default(&self) -> Result<Value, Error> {
        self.eval(&Ctxt::default())
    }
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        match self {
            Expr::Literal(literal) => literal.eval(ctxt),
            Expr::Paren(paren) => paren.eval(ctxt),
            Expr::Call(call) => call.eval(ctxt),
            Expr::Unary(unary) => unary.eval(ctxt),
            Expr::Binary(binary) => binary.eval(ctxt),
        }
    }
}

impl Eval for Paren {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        self.expr.eval(ctxt)
    }
}

/// Rejects approximate results that are no longer finite numbers.
fn check_finite(value: Value, function: &str, span: Range<usize>) -> Result<Value, Error> {
    match &value {
        Value::Approx(n) if n.is_nan() => Err(Error::new(vec![span], DomainError {
            function: function.to_owned(),
            reason: "the result is not a real number",
        })),
        Value::Approx(n) if n.is_infinite() => Err(Error::new(vec![span], Overflow)),
        _ => Ok(value),
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use crate::{
        error::{DivisionByZero, NonIntegerExponentOfNegative, UndefinedFunction},
        primitive::rational,
    };
    use keypad_parser::parser::{error::InvalidNumber, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval(source: &str) -> Result<Value, Error> {
        let expr = Parser::new(source).try_parse_full::<Expr>().unwrap();
        expr.eval_default()
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(eval("1+2*3").unwrap(), Value::from(7));
        assert_eq!(eval("0.1+0.2").unwrap(), Value::Exact(rational((3, 10))));
        assert_eq!(eval("((1+9)/5)*3").unwrap(), Value::from(6));
        assert_eq!(eval("1/3").unwrap(), Value::Exact(rational((1, 3))));
    }

    #[test]
    fn negation_and_powers() {
        assert_eq!(eval("-2^2").unwrap(), Value::from(-4));
        assert_eq!(eval("(-2)^2").unwrap(), Value::from(4));
        assert_eq!(eval("2^3^2").unwrap(), Value::from(512));
        assert_eq!(eval("2^-2").unwrap(), Value::Exact(rational((1, 4))));
        assert_eq!(eval("4^0.5").unwrap(), Value::from(2));
        assert_eq!(eval("8^(2/3)").unwrap(), Value::from(4));
    }

    #[test]
    fn irrational_results() {
        assert!(!eval("2^0.5").unwrap().is_exact());
        assert!(!eval("sqrt(2)").unwrap().is_exact());
        assert_eq!(eval("sqrt(9)").unwrap(), Value::from(3));
    }

    #[test]
    fn division_by_zero() {
        let err = eval("1/(2-2)").unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![1..2, 2..7]);

        assert!(eval("0^-1").unwrap_err().is::<DivisionByZero>());
    }

    #[test]
    fn domain_errors() {
        assert!(eval("sqrt(-1)").unwrap_err().is::<DomainError>());
        assert!(eval("ln(0)").unwrap_err().is::<DomainError>());
        assert!(eval("(-8)^0.5").unwrap_err().is::<NonIntegerExponentOfNegative>());
    }

    #[test]
    fn overflow() {
        assert!(eval("10^10^10^10").unwrap_err().is::<Overflow>());
    }

    #[test]
    fn undefined_function() {
        let err = eval("sqr(4)").unwrap_err();
        let kind = err.downcast_ref::<UndefinedFunction>().unwrap();
        assert_eq!(kind.name, "sqr");
        assert_eq!(kind.suggestions, vec!["sqrt".to_string()]);
        assert_eq!(err.spans, vec![0..3]);
    }

    #[test]
    fn invalid_number() {
        assert!(eval("1E999999").unwrap_err().is::<InvalidNumber>());
    }
}
