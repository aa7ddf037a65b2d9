use keypad_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr},
        token::op::UnaryOpKind,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-2`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOpKind,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    ///
    /// The operand of a negation includes any exponentiation that follows it, so `-2^2` is parsed
    /// as `-(2^2)`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.peek_token() {
            Some(token) if token.kind == TokenKind::Sub => {
                let op_token = input.next_token()?;
                let operand = Self::parse_or_lower(input)?;
                let operand = Binary::parse_expr(input, operand, UnaryOpKind::Neg.precedence().next())?;
                let span = op_token.span.start..operand.span().end;
                Ok(Expr::Unary(Self {
                    operand: Box::new(operand),
                    op: UnaryOpKind::Neg,
                    span,
                }))
            },
            _ => Expr::parse_primary(input),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            UnaryOpKind::Neg => write!(f, "-{}", self.operand),
        }
    }
}
