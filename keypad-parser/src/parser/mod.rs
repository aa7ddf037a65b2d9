pub mod ast;
pub mod error;
pub mod token;

use ast::Expr;
use error::{EmptyParenthesis, ExpectedEof, UnclosedParenthesis, UnexpectedEof, UnexpectedToken};
use keypad_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for preprocessed expression text. This is the type to use to parse an
/// arbitrary expression into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next token that is not whitespace, without advancing the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // only the span is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(UnexpectedEof))
    }

    /// Consumes the next token if it is of the given kind, returning an error pointing at it
    /// otherwise.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        self.try_parse_with_fn(|input| {
            let token = input.next_token()?;
            if token.kind == kind {
                Ok(token)
            } else {
                Err(Error::new(vec![token.span], UnexpectedToken { expected, found: token.kind }))
            }
        })
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    ///
    /// A stray closing parenthesis left over at the end is reported as an unclosed parenthesis
    /// instead of a generic error.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.peek_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(Error::new(vec![token.span.clone()], UnclosedParenthesis { opening: false }))
            },
            Some(token) => Err(Error::new(vec![token.span.clone()], ExpectedEof)),
        }
    }
}

/// Parses the body of a pair of parentheses, starting at the opening parenthesis. Returns the
/// inner expression and the span covering both parentheses.
pub(crate) fn parse_parenthesized(input: &mut Parser) -> Result<(Expr, Range<usize>), Error> {
    let open = input.expect(TokenKind::OpenParen, &[TokenKind::OpenParen])?;

    if let Some(token) = input.peek_token() {
        if token.kind == TokenKind::CloseParen {
            return Err(Error::new(vec![open.span.start..token.span.end], EmptyParenthesis));
        }
    }

    let expr = Expr::parse(input)?;
    match input.peek_token() {
        Some(token) if token.kind == TokenKind::CloseParen => {
            let close = input.next_token()?;
            Ok((expr, open.span.start..close.span.end))
        },
        _ => Err(Error::new(vec![open.span], UnclosedParenthesis { opening: true })),
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl Precedence {
    /// Returns the next highest precedence. [`Precedence::Exp`] is the highest precedence and
    /// returns itself.
    pub fn next(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg | Self::Exp => Self::Exp,
        }
    }
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Call, LitNum, Paren, Unary};
    use token::op::{BinOp, BinOpKind, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(LitNum { value: value.to_string(), span })
    }

    fn parse_full(source: &str) -> Result<Expr, Error> {
        Parser::new(source).try_parse_full::<Expr>()
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse_full("16").unwrap(), num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse_full("3.14").unwrap(), num("3.14", 0..4));
    }

    #[test]
    fn literal_scientific() {
        assert_eq!(parse_full("1.5E20").unwrap(), num("1.5E20", 0..6));
    }

    #[test]
    fn left_associative() {
        let expr = parse_full("1-2-3").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("1", 0..1)),
                op: BinOp { kind: BinOpKind::Sub, span: 1..2 },
                rhs: Box::new(num("2", 2..3)),
                span: 0..3,
            })),
            op: BinOp { kind: BinOpKind::Sub, span: 3..4 },
            rhs: Box::new(num("3", 4..5)),
            span: 0..5,
        }));
    }

    #[test]
    fn right_associative_exp() {
        let expr = parse_full("2^3^2").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(num("2", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("3", 2..3)),
                op: BinOp { kind: BinOpKind::Exp, span: 3..4 },
                rhs: Box::new(num("2", 4..5)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn factor_binds_tighter_than_term() {
        let expr = parse_full("1+2*3").unwrap();
        assert_eq!(expr.to_string(), "1+2*3");
        let Expr::Binary(Binary { op, rhs, .. }) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(op.kind, BinOpKind::Add);
        assert!(matches!(*rhs, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Mul, .. }, .. })));
    }

    #[test]
    fn neg_binds_looser_than_exp() {
        let expr = parse_full("-2^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("2", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, span: 2..3 },
                rhs: Box::new(num("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOpKind::Neg,
            span: 0..4,
        }));
    }

    #[test]
    fn neg_after_operator() {
        let expr = parse_full("3*-2").unwrap();
        assert_eq!(expr.to_string(), "3*-2");
    }

    #[test]
    fn call_and_paren() {
        let expr = parse_full("sqrt((9))").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: "sqrt".to_string(),
            name_span: 0..4,
            arg: Box::new(Expr::Paren(Paren {
                expr: Box::new(num("9", 6..7)),
                span: 5..8,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn whitespace_is_skipped() {
        let expr = parse_full(" 1 + 2 ").unwrap();
        assert_eq!(expr.to_string(), "1+2");
    }

    #[test]
    fn dangling_operator() {
        let err = parse_full("2+").unwrap_err();
        assert!(err.is::<UnexpectedEof>());
    }

    #[test]
    fn empty_parenthesis() {
        let err = parse_full("2*()").unwrap_err();
        assert!(err.is::<EmptyParenthesis>());
        assert_eq!(err.spans, vec![2..4]);

        let err = parse_full("sqrt()").unwrap_err();
        assert!(err.is::<EmptyParenthesis>());
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = parse_full("(1+2").unwrap_err();
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: true }));

        let err = parse_full("1+2)").unwrap_err();
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: false }));
    }

    #[test]
    fn adjacent_operands() {
        let err = parse_full("2 3").unwrap_err();
        assert!(err.is::<ExpectedEof>());
    }

    #[test]
    fn unknown_symbol() {
        let err = parse_full("2+$").unwrap_err();
        assert_eq!(err.downcast_ref::<UnexpectedToken>().map(|e| e.found), Some(TokenKind::Symbol));
    }

    #[test]
    fn parse_rendered_text() {
        let (source, result) = parse("2(4+1){3}");
        assert_eq!(source, "2*(4+1)*3");
        assert_eq!(result.unwrap().to_string(), "2*(4+1)*3");
    }
}
