//! Normalizes rendered expression text before it is parsed.

use crate::tokenizer::{tokenize_complete, TokenKind};

/// Normalizes the text rendered from an expression tree so that it can be parsed.
///
/// - Implicit multiplication between adjacent operands is made explicit: `2(3)`, `(1)(2)`,
///   `(1)2`, `2sqrt(9)`, and `2{5}` become `2*(3)`, `(1)*(2)`, `(1)*2`, `2*sqrt(9)`, and `2*5`.
/// - The result markers `{` and `}` around spliced-in values are removed. The marked value still
///   counts as a single operand for implicit multiplication.
/// - A number with a trailing decimal separator, such as the `3.` in `3.+1`, loses the separator.
/// - Whitespace is dropped.
///
/// The exponent operator `^` is never preceded by an implicit multiplication, so `2^(3)` is left
/// untouched.
pub fn preprocess(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev_ends_atom = false;

    for token in tokenize_complete(text).iter() {
        if token.is_whitespace() {
            continue;
        }

        if prev_ends_atom && token.kind.starts_atom() {
            out.push('*');
        }

        match token.kind {
            TokenKind::OpenMarker | TokenKind::CloseMarker => {},
            TokenKind::Float => out.push_str(trim_trailing_separator(token.lexeme)),
            _ => out.push_str(token.lexeme),
        }

        prev_ends_atom = token.kind.ends_atom();
    }

    out
}

/// Removes a trailing decimal separator from a number literal.
fn trim_trailing_separator(lexeme: &str) -> &str {
    match lexeme.strip_suffix('.') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => lexeme,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn untouched() {
        assert_eq!(preprocess("2+3"), "2+3");
        assert_eq!(preprocess("sqrt(9)"), "sqrt(9)");
        assert_eq!(preprocess("2^(3)"), "2^(3)");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(preprocess("2(3)"), "2*(3)");
        assert_eq!(preprocess("(4+1)2"), "(4+1)*2");
        assert_eq!(preprocess("(1)(2)"), "(1)*(2)");
        assert_eq!(preprocess("2sqrt(9)"), "2*sqrt(9)");
        assert_eq!(preprocess("sqrt(4)sqrt(9)"), "sqrt(4)*sqrt(9)");
    }

    #[test]
    fn result_markers() {
        assert_eq!(preprocess("{5}"), "5");
        assert_eq!(preprocess("2{5}"), "2*5");
        assert_eq!(preprocess("{5}2"), "5*2");
        assert_eq!(preprocess("1+{(2+3)}"), "1+(2+3)");
        assert_eq!(preprocess("{(-4)}{2}"), "(-4)*2");
    }

    #[test]
    fn trailing_separator() {
        assert_eq!(preprocess("3.+1"), "3+1");
        assert_eq!(preprocess("3."), "3");
        assert_eq!(preprocess("3.5"), "3.5");
        assert_eq!(preprocess("(2.)(3.)"), "(2)*(3)");
    }
}
