use keypad_error::Error;
use crate::{
    parser::{ast::expr::Expr, parse_parenthesized, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A call to a single-argument function, such as `sqrt(9)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function.
    pub name: String,

    /// The region of the source code that the function name was parsed from.
    pub name_span: Range<usize>,

    /// The argument passed to the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.expect(TokenKind::Name, &[TokenKind::Name])?;
        let (arg, paren_span) = parse_parenthesized(input)?;
        Ok(Self {
            name: name.lexeme.to_owned(),
            name_span: name.span.clone(),
            arg: Box::new(arg),
            span: name.span.start..paren_span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arg)
    }
}
