//! Trigonometric functions. Arguments are in radians.

use crate::{ctxt::Ctxt, value::Value};
use super::{Builtin, BuiltinError};

/// Builds a trigonometric function whose `rug` implementation has the same name as the given
/// function. The function has a known exact value at zero.
macro_rules! simple {
    ($($name:ident $upname:ident $at_zero:literal; $doc:literal),* $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug)]
            pub struct $upname;

            impl Builtin for $upname {
                fn name(&self) -> &'static str {
                    stringify!($name)
                }

                fn eval(&self, ctxt: &Ctxt, arg: Value) -> Result<Value, BuiltinError> {
                    if arg.is_exact() && arg.is_zero() {
                        return Ok(Value::from($at_zero));
                    }

                    Ok(Value::Approx(arg.into_float(ctxt.precision).$name()))
                }
            }
        )*
    };
}

simple! {
    sin Sin 0; "The sine function, `sin(x)`.",
    cos Cos 1; "The cosine function, `cos(x)`.",
    tan Tan 0; "The tangent function, `tan(x)`.",
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_at_zero() {
        let ctxt = Ctxt::default();
        assert_eq!(Sin.eval(&ctxt, Value::from(0)), Ok(Value::from(0)));
        assert_eq!(Cos.eval(&ctxt, Value::from(0)), Ok(Value::from(1)));
        assert_eq!(Tan.eval(&ctxt, Value::from(0)), Ok(Value::from(0)));
    }

    #[test]
    fn radians() {
        let ctxt = Ctxt::default();
        let Ok(Value::Approx(n)) = Sin.eval(&ctxt, Value::from(1)) else {
            panic!("expected an approximate value");
        };
        assert_float_absolute_eq!(n.to_f64(), 1f64.sin(), 1e-15);
    }
}
