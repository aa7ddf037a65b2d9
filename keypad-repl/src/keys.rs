//! Maps typed text to calculator keys.

use ariadne::Fmt;
use keypad_attrs::ErrorKind;
use keypad_engine::{FunctionTag, Input, MathOp};
use keypad_error::{Error, EXPR};

/// A word that is not the name of any key.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown key `{}`", key),
    labels = [format!("this is not a {}", "key".fg(EXPR))],
    help = "keys are digits, `. + - * / ^ ( ) = <`, function names like `sqrt`, or commands like `c`, `ce`, `mr`, `undo`",
)]
pub struct UnknownKey {
    /// The word that was typed.
    pub key: String,
}

/// One action typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A key press fed to the engine.
    Key(Input),

    /// Explain why the current expression has no preview.
    Why,
}

/// Returns the key for a symbol typed on its own.
fn symbol(c: char) -> Option<Input> {
    let input = match c {
        '0'..='9' => Input::digit(c as u8 - b'0')?,
        '.' => Input::DecimalSeparator,
        '(' => Input::ParenOpen,
        ')' => Input::ParenClose,
        '^' => Input::Function(FunctionTag::Power),
        '=' => Input::Return,
        '<' => Input::Back,
        _ => Input::MathOp(MathOp::from_symbol(c)?),
    };
    Some(input)
}

/// Returns the command for a word.
fn word(word: &str) -> Option<Command> {
    let input = match word {
        ":why" => return Some(Command::Why),
        "sqrt" => Input::Function(FunctionTag::Sqrt),
        "pow" => Input::Function(FunctionTag::Power),
        "abs" => Input::Function(FunctionTag::Abs),
        "ln" => Input::Function(FunctionTag::Ln),
        "exp" => Input::Function(FunctionTag::Exp),
        "sin" => Input::Function(FunctionTag::Sin),
        "cos" => Input::Function(FunctionTag::Cos),
        "tan" => Input::Function(FunctionTag::Tan),
        "c" => Input::Clear,
        "ce" => Input::ClearEntry,
        "back" => Input::Back,
        "mr" => Input::MemoryRecall,
        "ms" => Input::MemoryStore,
        "mc" => Input::MemoryClear,
        "undo" | "u" => Input::Undo,
        "redo" | "r" => Input::Redo,
        _ => return None,
    };
    Some(Command::Key(input))
}

/// Splits a line into commands. Symbols are one key each, so `2+3` is three keys. Runs of letters
/// (optionally starting with `:`) are words. Whitespace separates keys and is otherwise ignored.
pub fn parse_line(line: &str) -> Result<Vec<Command>, Error> {
    let mut commands = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c.is_ascii_alphabetic() || c == ':' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if !next.is_ascii_alphabetic() {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }

            let text = &line[start..end];
            match word(text) {
                Some(command) => commands.push(command),
                None => return Err(Error::new(vec![start..end], UnknownKey { key: text.to_owned() })),
            }
        } else {
            let end = start + c.len_utf8();
            match symbol(c) {
                Some(input) => commands.push(Command::Key(input)),
                None => return Err(Error::new(vec![start..end], UnknownKey { key: c.to_string() })),
            }
        }
    }

    Ok(commands)
}
