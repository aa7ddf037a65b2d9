//! Functions related to powers, exponentiation, and roots.

use crate::{ctxt::Ctxt, primitive::{exact_rational_root, rational}, value::Value};
use super::{Builtin, BuiltinError};

/// The square root function, `sqrt(x)`.
///
/// Perfect squares, such as `sqrt(9/4)`, produce an exact result.
#[derive(Debug)]
pub struct Sqrt;

impl Builtin for Sqrt {
    fn name(&self) -> &'static str {
        "sqrt"
    }

    fn eval(&self, ctxt: &Ctxt, arg: Value) -> Result<Value, BuiltinError> {
        if arg.is_negative() {
            return Err(BuiltinError::Domain("the square root of a negative number is not a real number"));
        }

        if let Some(root) = arg.as_exact().and_then(|n| exact_rational_root(n, 2)) {
            return Ok(Value::Exact(root));
        }

        Ok(Value::Approx(arg.into_float(ctxt.precision).sqrt()))
    }
}

/// The absolute value function, `abs(x)`.
#[derive(Debug)]
pub struct Abs;

impl Builtin for Abs {
    fn name(&self) -> &'static str {
        "abs"
    }

    fn eval(&self, _: &Ctxt, arg: Value) -> Result<Value, BuiltinError> {
        Ok(match arg {
            Value::Exact(n) => Value::Exact(n.abs()),
            Value::Approx(n) => Value::Approx(n.abs()),
        })
    }
}

/// The exponential function, `exp(x)`.
#[derive(Debug)]
pub struct Exp;

impl Builtin for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn eval(&self, ctxt: &Ctxt, arg: Value) -> Result<Value, BuiltinError> {
        if arg.is_exact() && arg.is_zero() {
            return Ok(Value::from(1));
        }

        Ok(Value::Approx(arg.into_float(ctxt.precision).exp()))
    }
}

/// The natural logarithm function, `ln(x)`.
#[derive(Debug)]
pub struct Ln;

impl Builtin for Ln {
    fn name(&self) -> &'static str {
        "ln"
    }

    fn eval(&self, ctxt: &Ctxt, arg: Value) -> Result<Value, BuiltinError> {
        if arg.is_negative() || arg.is_zero() {
            return Err(BuiltinError::Domain("the logarithm is only defined for positive numbers"));
        }

        if arg.as_exact() == Some(&rational(1)) {
            return Ok(Value::from(0));
        }

        Ok(Value::Approx(arg.into_float(ctxt.precision).ln()))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn approx(value: Value) -> f64 {
        match value {
            Value::Approx(n) => n.to_f64(),
            Value::Exact(n) => panic!("expected an approximate value, found {}", n),
        }
    }

    #[test]
    fn sqrt_exact() {
        let ctxt = Ctxt::default();
        assert_eq!(Sqrt.eval(&ctxt, Value::from(9)), Ok(Value::from(3)));
        assert_eq!(
            Sqrt.eval(&ctxt, Value::Exact(rational((9, 4)))),
            Ok(Value::Exact(rational((3, 2)))),
        );
    }

    #[test]
    fn sqrt_approx() {
        let ctxt = Ctxt::default();
        let root = approx(Sqrt.eval(&ctxt, Value::from(2)).unwrap());
        assert_float_absolute_eq!(root, std::f64::consts::SQRT_2, 1e-15);
    }

    #[test]
    fn sqrt_negative() {
        let ctxt = Ctxt::default();
        assert!(matches!(Sqrt.eval(&ctxt, Value::from(-4)), Err(BuiltinError::Domain(_))));
    }

    #[test]
    fn ln_and_exp() {
        let ctxt = Ctxt::default();
        assert_eq!(Ln.eval(&ctxt, Value::from(1)), Ok(Value::from(0)));
        assert_eq!(Exp.eval(&ctxt, Value::from(0)), Ok(Value::from(1)));
        assert!(Ln.eval(&ctxt, Value::from(0)).is_err());

        let e = approx(Exp.eval(&ctxt, Value::from(1)).unwrap());
        assert_float_absolute_eq!(e, std::f64::consts::E, 1e-15);
    }

    #[test]
    fn abs() {
        let ctxt = Ctxt::default();
        assert_eq!(Abs.eval(&ctxt, Value::from(-7)), Ok(Value::from(7)));
    }
}
