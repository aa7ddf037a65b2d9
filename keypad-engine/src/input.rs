use crate::expr::{FunctionTag, MathOp};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single key press consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Input {
    Zero,

    /// A digit from 1 to 9.
    Digit(u8),

    DecimalSeparator,
    MathOp(MathOp),
    ParenOpen,
    ParenClose,
    Function(FunctionTag),

    /// Splices the stored memory into the expression.
    MemoryRecall,

    /// Stores the current result, or the number being typed, in memory.
    MemoryStore,

    /// Empties the memory.
    MemoryClear,

    /// Evaluates the whole expression.
    Return,

    /// Discards the expression.
    Clear,

    /// Discards the number being typed.
    ClearEntry,

    /// Removes the last character or node.
    Back,

    Undo,
    Redo,
}

impl Input {
    /// Returns the input for the given decimal digit, or [`None`] if `digit` is greater than 9.
    pub fn digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::Zero),
            1..=9 => Some(Self::Digit(digit)),
            _ => None,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "0"),
            Self::Digit(digit) => write!(f, "{}", digit),
            Self::DecimalSeparator => write!(f, "."),
            Self::MathOp(op) => write!(f, "{}", op.symbol()),
            Self::ParenOpen => write!(f, "("),
            Self::ParenClose => write!(f, ")"),
            Self::Function(function) => write!(f, "{}(", function.prefix()),
            Self::MemoryRecall => write!(f, "MR"),
            Self::MemoryStore => write!(f, "MS"),
            Self::MemoryClear => write!(f, "MC"),
            Self::Return => write!(f, "="),
            Self::Clear => write!(f, "C"),
            Self::ClearEntry => write!(f, "CE"),
            Self::Back => write!(f, "Back"),
            Self::Undo => write!(f, "Undo"),
            Self::Redo => write!(f, "Redo"),
        }
    }
}
