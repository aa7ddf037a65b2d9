use keypad_error::Error;
use keypad_parser::parser::{ast::Unary, token::op::UnaryOpKind};
use crate::{ctxt::Ctxt, eval::Eval, value::Value};

impl Eval for Unary {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        let operand = self.operand.eval(ctxt)?;
        match self.op {
            UnaryOpKind::Neg => Ok(match operand {
                Value::Exact(n) => Value::Exact(-n),
                Value::Approx(n) => Value::Approx(-n),
            }),
        }
    }
}
