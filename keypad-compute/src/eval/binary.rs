use keypad_error::Error;
use keypad_parser::parser::{ast::Binary, token::op::BinOpKind};
use crate::{
    ctxt::Ctxt,
    error::{DivisionByZero, NonIntegerExponentOfNegative},
    eval::{check_finite, Eval},
    primitive::{exact_rational_root, rational},
    value::Value,
};
use rug::{ops::Pow, Float, Rational};

/// The largest exponent magnitude evaluated exactly. Larger exponents fall back to floats.
const MAX_EXACT_EXPONENT: u32 = 1 << 12;

/// The largest number of bits an exact power may need before it falls back to floats.
const MAX_EXACT_BITS: u64 = 1 << 20;

/// The largest root degree tried when raising to a fractional power, such as the `3` in
/// `8^(2/3)`.
const MAX_EXACT_ROOT: u32 = 64;

/// Applies an operation exactly if both operands are exact, or with floats otherwise.
fn combine(
    ctxt: &Ctxt,
    lhs: Value,
    rhs: Value,
    exact: impl FnOnce(Rational, Rational) -> Rational,
    approx: impl FnOnce(Float, Float) -> Float,
) -> Value {
    match (lhs, rhs) {
        (Value::Exact(a), Value::Exact(b)) => Value::Exact(exact(a, b)),
        (a, b) => Value::Approx(approx(a.into_float(ctxt.precision), b.into_float(ctxt.precision))),
    }
}

/// Raises `base` to an integer power exactly, if the result is not unreasonably large.
fn exact_int_pow(base: &Rational, exp: &Rational) -> Option<Rational> {
    let exp = exp.numer().to_i32()?;
    if exp.unsigned_abs() > MAX_EXACT_EXPONENT {
        return None;
    }

    let bits = u64::from(base.numer().significant_bits().max(base.denom().significant_bits()));
    if bits * u64::from(exp.unsigned_abs()) > MAX_EXACT_BITS {
        return None;
    }

    Some(base.clone().pow(exp))
}

/// Raises a non-negative `base` to a fractional power `p/q` exactly, if `base` is a perfect
/// `q`-th power.
fn exact_frac_pow(base: &Rational, exp: &Rational) -> Option<Rational> {
    let degree = exp.denom().to_u32().filter(|degree| *degree <= MAX_EXACT_ROOT)?;
    let root = exact_rational_root(base, degree)?;
    exact_int_pow(&root, &rational(exp.numer()))
}

/// Evaluates `lhs / rhs`, reporting a division by zero.
fn eval_div(binary: &Binary, ctxt: &Ctxt, lhs: Value, rhs: Value) -> Result<Value, Error> {
    if rhs.is_zero() {
        return Err(division_by_zero(binary));
    }

    Ok(combine(ctxt, lhs, rhs, |a, b| a / b, |a, b| a / b))
}

/// Evaluates `base ^ exp`, exactly where possible.
fn eval_exp(binary: &Binary, ctxt: &Ctxt, base: Value, exp: Value) -> Result<Value, Error> {
    if base.is_zero() && exp.is_negative() {
        return Err(division_by_zero(binary));
    }

    if base.is_negative() && !exp.is_integer() {
        return Err(Error::new(
            vec![binary.lhs.span(), binary.rhs.span()],
            NonIntegerExponentOfNegative,
        ));
    }

    if let (Value::Exact(b), Value::Exact(e)) = (&base, &exp) {
        let exact = if *e.denom() == 1 {
            exact_int_pow(b, e)
        } else {
            exact_frac_pow(b, e)
        };
        if let Some(value) = exact {
            return Ok(Value::Exact(value));
        }
    }

    let base = base.into_float(ctxt.precision);
    let exp = exp.into_float(ctxt.precision);
    Ok(Value::Approx(base.pow(&exp)))
}

fn division_by_zero(binary: &Binary) -> Error {
    Error::new(vec![binary.op.span.clone(), binary.rhs.span()], DivisionByZero)
}

impl Eval for Binary {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        let lhs = self.lhs.eval(ctxt)?;
        let rhs = self.rhs.eval(ctxt)?;

        let value = match self.op.kind {
            BinOpKind::Add => combine(ctxt, lhs, rhs, |a, b| a + b, |a, b| a + b),
            BinOpKind::Sub => combine(ctxt, lhs, rhs, |a, b| a - b, |a, b| a - b),
            BinOpKind::Mul => combine(ctxt, lhs, rhs, |a, b| a * b, |a, b| a * b),
            BinOpKind::Div => eval_div(self, ctxt, lhs, rhs)?,
            BinOpKind::Exp => eval_exp(self, ctxt, lhs, rhs)?,
        };

        check_finite(value, self.op.kind.symbol(), self.span())
    }
}
