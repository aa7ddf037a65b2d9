use keypad_error::Error;
use keypad_parser::parser::ast::Call;
use crate::{
    ctxt::Ctxt,
    error::{DomainError, UndefinedFunction},
    eval::{check_finite, Eval},
    funcs::{Builtin, BuiltinError},
    value::Value,
};

impl Eval for Call {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        let Some(builtin) = ctxt.get_builtin(&self.name) else {
            return Err(Error::new(vec![self.name_span.clone()], UndefinedFunction {
                name: self.name.clone(),
                suggestions: ctxt.suggestions(&self.name),
            }));
        };

        let arg = self.arg.eval(ctxt)?;
        let value = builtin.eval(ctxt, arg).map_err(|err| match err {
            BuiltinError::Domain(reason) => Error::new(vec![self.arg.span()], DomainError {
                function: self.name.clone(),
                reason,
            }),
        })?;

        check_finite(value, &self.name, self.span())
    }
}
