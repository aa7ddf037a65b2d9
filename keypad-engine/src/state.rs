//! The states of the calculator.

use crate::{
    expr::{Compound, Expression, MathOp},
    nav::NavigationStack,
};
use keypad_compute::error::{DivisionByZero, DomainError, NonIntegerExponentOfNegative, Overflow};
use keypad_error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The name of a [`CalculatorState`] variant, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StateTag {
    Start,
    NumberInput,
    OperatorInput,
    ParenthesisOpen,
    FunctionInput,
    Result,
    Error,
}

/// The mathematical failures that end an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MathError {
    DivideByZero,
    Domain,
    Overflow,
}

impl MathError {
    /// Classifies an evaluation error. Returns [`None`] if the error is not a mathematical
    /// failure, such as an incomplete expression.
    pub fn classify(err: &Error) -> Option<Self> {
        if err.is::<DivisionByZero>() {
            Some(Self::DivideByZero)
        } else if err.is::<DomainError>() || err.is::<NonIntegerExponentOfNegative>() {
            Some(Self::Domain)
        } else if err.is::<Overflow>() {
            Some(Self::Overflow)
        } else {
            None
        }
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivideByZero => write!(f, "Error: Divide by Zero Error"),
            Self::Domain => write!(f, "Error: Math Domain Error"),
            Self::Overflow => write!(f, "Error: Overflow Error"),
        }
    }
}

/// The state of the calculator. Each transition produces a new state and leaves the previous one
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalculatorState {
    /// Nothing has been typed.
    Start {
        memory: Option<String>,
    },

    /// The last thing typed is an operand: a number, a recalled value, or a closed group.
    NumberInput {
        /// The number being typed, or empty if the operand is not an editable number.
        current_digits: String,
        tree: Compound,
        memory: Option<String>,
        stack: NavigationStack,
    },

    /// The last thing typed is an operator.
    OperatorInput {
        /// The rendered operand before the operator.
        previous_value: String,
        operator: MathOp,
        current_digits: String,
        tree: Compound,
        memory: Option<String>,
        stack: NavigationStack,
    },

    /// A parenthesized group is open.
    ParenthesisOpen {
        /// The rendered contents of the open group so far.
        inner_expression: String,
        tree: Compound,
        memory: Option<String>,
        stack: NavigationStack,
    },

    /// A function argument is open.
    FunctionInput {
        current_digits: String,
        tree: Compound,
        memory: Option<String>,
        stack: NavigationStack,
    },

    /// The expression was evaluated.
    Result {
        /// The rendered expression that was evaluated.
        expression: String,

        /// The decimal rendering of the result.
        result: String,
        memory: Option<String>,
    },

    /// Evaluation failed. Only [`Input::Clear`](crate::Input::Clear) leaves this state.
    Error {
        kind: MathError,
        memory: Option<String>,
    },
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::Start { memory: None }
    }
}

impl CalculatorState {
    /// Returns the tag of this state.
    pub fn tag(&self) -> StateTag {
        match self {
            Self::Start { .. } => StateTag::Start,
            Self::NumberInput { .. } => StateTag::NumberInput,
            Self::OperatorInput { .. } => StateTag::OperatorInput,
            Self::ParenthesisOpen { .. } => StateTag::ParenthesisOpen,
            Self::FunctionInput { .. } => StateTag::FunctionInput,
            Self::Result { .. } => StateTag::Result,
            Self::Error { .. } => StateTag::Error,
        }
    }

    /// Returns the stored memory.
    pub fn memory(&self) -> Option<&str> {
        match self {
            Self::Start { memory }
            | Self::NumberInput { memory, .. }
            | Self::OperatorInput { memory, .. }
            | Self::ParenthesisOpen { memory, .. }
            | Self::FunctionInput { memory, .. }
            | Self::Result { memory, .. }
            | Self::Error { memory, .. } => memory.as_deref(),
        }
    }

    /// Returns the stored memory for replacement.
    pub(crate) fn memory_mut(&mut self) -> &mut Option<String> {
        match self {
            Self::Start { memory }
            | Self::NumberInput { memory, .. }
            | Self::OperatorInput { memory, .. }
            | Self::ParenthesisOpen { memory, .. }
            | Self::FunctionInput { memory, .. }
            | Self::Result { memory, .. }
            | Self::Error { memory, .. } => memory,
        }
    }

    /// Returns the expression tree being edited, if any.
    pub fn tree(&self) -> Option<&Compound> {
        match self {
            Self::NumberInput { tree, .. }
            | Self::OperatorInput { tree, .. }
            | Self::ParenthesisOpen { tree, .. }
            | Self::FunctionInput { tree, .. } => Some(tree),
            Self::Start { .. } | Self::Result { .. } | Self::Error { .. } => None,
        }
    }

    /// Returns the navigation stack, if an expression is being edited.
    pub fn stack(&self) -> Option<&NavigationStack> {
        match self {
            Self::NumberInput { stack, .. }
            | Self::OperatorInput { stack, .. }
            | Self::ParenthesisOpen { stack, .. }
            | Self::FunctionInput { stack, .. } => Some(stack),
            Self::Start { .. } | Self::Result { .. } | Self::Error { .. } => None,
        }
    }

    /// Returns the compound that input is currently appended to, if an expression is being
    /// edited.
    pub fn active(&self) -> Option<&Compound> {
        Some(self.stack()?.active(self.tree()?))
    }

    /// Returns true if the state is typing an editable number, so that the next digit continues
    /// that number instead of starting a new one.
    pub fn is_continuing_number(&self) -> bool {
        self.editable_number().is_some()
    }

    /// Returns the text of the editable number being typed, if any.
    pub fn editable_number(&self) -> Option<&str> {
        if self.tag() != StateTag::NumberInput {
            return None;
        }

        match self.active()?.last()? {
            Expression::Value { text, computed: false } => Some(text),
            _ => None,
        }
    }

    /// Renders the expression shown for this state: the tree being edited, or the expression that
    /// produced the result.
    pub fn expression_text(&self) -> String {
        match self {
            Self::Result { expression, .. } => expression.clone(),
            _ => self.tree().map(Compound::render).unwrap_or_default(),
        }
    }

    /// Returns the main display text: the result, the error message, or the expression.
    pub fn display_text(&self) -> String {
        match self {
            Self::Result { result, .. } => result.clone(),
            Self::Error { kind, .. } => kind.to_string(),
            _ => self.expression_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::nav::{Frame, FrameKind};
    use keypad_error::Error;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn accessors() {
        let mut stack = NavigationStack::new();
        stack.push(Frame { captured: StateTag::NumberInput, index: 1, kind: FrameKind::Group });
        let state = CalculatorState::NumberInput {
            current_digits: "4".to_string(),
            tree: Compound::with_children([
                Expression::number("2"),
                Expression::Group(Compound::with_children([Expression::number("4")])),
            ]),
            memory: Some("7".to_string()),
            stack,
        };

        assert_eq!(state.tag(), StateTag::NumberInput);
        assert_eq!(state.memory(), Some("7"));
        assert_eq!(state.expression_text(), "2(4)");
        assert_eq!(state.active().map(Compound::render), Some("4".to_string()));
        assert_eq!(state.editable_number(), Some("4"));
    }

    #[test]
    fn computed_values_are_not_continued() {
        let state = CalculatorState::NumberInput {
            current_digits: String::new(),
            tree: Compound::with_children([Expression::computed("5")]),
            memory: None,
            stack: NavigationStack::new(),
        };
        assert!(!state.is_continuing_number());
    }

    #[test]
    fn error_display() {
        let state = CalculatorState::Error { kind: MathError::DivideByZero, memory: None };
        assert_eq!(state.display_text(), "Error: Divide by Zero Error");
        assert_eq!(MathError::Domain.to_string(), "Error: Math Domain Error");
    }

    #[test]
    fn classify() {
        let err = Error::new(vec![0..1], DivisionByZero);
        assert_eq!(MathError::classify(&err), Some(MathError::DivideByZero));

        let err = Error::new(vec![0..1], keypad_parser::parser::error::UnexpectedEof);
        assert_eq!(MathError::classify(&err), None);
    }
}
