use keypad_error::Error;
use keypad_parser::parser::{ast::LitNum, error::InvalidNumber};
use crate::{ctxt::Ctxt, eval::Eval, primitive::rational_from_str, value::Value};

impl Eval for LitNum {
    fn eval(&self, _: &Ctxt) -> Result<Value, Error> {
        rational_from_str(&self.value)
            .map(Value::Exact)
            .ok_or_else(|| Error::new(vec![self.span.clone()], InvalidNumber {
                literal: self.value.clone(),
            }))
    }
}
