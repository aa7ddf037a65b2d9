//! Tokenizer, preprocessor, and parser for the text rendered from a keypad expression tree.
//!
//! The expression tree built by the keypad engine renders to plain text such as `2(4+1)sqrt(9)`.
//! Before that text can be evaluated, it is [`preprocess`]ed to make implicit multiplication
//! explicit and to strip result markers, then parsed into an [`Expr`] by the [`Parser`].
//!
//! [`preprocess`]: preprocess::preprocess
//! [`Expr`]: parser::ast::Expr
//! [`Parser`]: parser::Parser

pub mod parser;
pub mod preprocess;
pub mod tokenizer;
