use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// Opens a spliced-in result, such as a recalled memory value.
    #[token("{")]
    OpenMarker,

    /// Closes a spliced-in result.
    #[token("}")]
    CloseMarker,

    #[regex(r"[a-zA-Z_]+")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Float,

    /// A number in `E` notation, such as `1.5E20`, produced when large results are recalled.
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)E[+-]?[0-9]+")]
    Scientific,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if the token is a number literal.
    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Scientific)
    }

    /// Returns true if the token can begin an operand.
    pub fn starts_atom(self) -> bool {
        self.is_number()
            || matches!(self, TokenKind::OpenParen | TokenKind::OpenMarker | TokenKind::Name)
    }

    /// Returns true if the token can end an operand.
    pub fn ends_atom(self) -> bool {
        self.is_number() || matches!(self, TokenKind::CloseParen | TokenKind::CloseMarker)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
