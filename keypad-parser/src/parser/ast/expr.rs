use keypad_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::LitNum, paren::Paren, unary::Unary},
        error::{UnexpectedEof, UnexpectedToken},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number literal, such as `2.5`.
    Literal(LitNum),

    /// A parenthesized expression, such as `(1+2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(9)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1+2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses a primary expression: a number literal, a function call, or a parenthesized
    /// expression.
    pub fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_token().map(|token| token.kind) {
            Some(kind) if kind.is_number() => input.try_parse::<LitNum>().map(Self::Literal),
            Some(TokenKind::Name) => input.try_parse::<Call>().map(Self::Call),
            Some(TokenKind::OpenParen) => input.try_parse::<Paren>().map(Self::Paren),
            Some(found) => {
                let token = input.next_token()?;
                Err(Error::new(vec![token.span], UnexpectedToken {
                    expected: &[
                        TokenKind::Int,
                        TokenKind::Float,
                        TokenKind::Name,
                        TokenKind::OpenParen,
                        TokenKind::Sub,
                    ],
                    found,
                }))
            },
            None => Err(input.error(UnexpectedEof)),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Paren(paren) => write!(f, "{}", paren),
            Expr::Call(call) => write!(f, "{}", call),
            Expr::Unary(unary) => write!(f, "{}", unary),
            Expr::Binary(binary) => write!(f, "{}", binary),
        }
    }
}
