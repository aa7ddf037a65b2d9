//! The transition function of the calculator.
//!
//! [`try_transition`] takes the current state and one input, and either returns the next state or
//! the reason the input was rejected. The current state is borrowed and never modified; the next
//! state shares every subtree of the expression that the input did not touch.

use crate::{
    expr::{Compound, Expression, FunctionTag, MathOp},
    input::Input,
    nav::{Frame, FrameKind, NavigationStack},
    preview::{trim_decimal, SimplificationService},
    state::{CalculatorState, MathError, StateTag},
    tenkey::DigitDisplay,
};
use std::fmt;
use tracing::debug;

/// The reason an input was rejected. A rejected input leaves the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The calculator is in the error state, which only [`Input::Clear`] leaves.
    Terminal,

    /// There is no expression to edit.
    NothingToEdit,

    /// A digit key outside 1 to 9.
    InvalidDigit,

    /// The digit display is empty, so there is no number to splice in.
    EmptyNumber,

    /// An operator was typed before any operand.
    EmptyOperand,

    /// An operator was typed directly after an empty group, such as `()+`.
    EmptyGroup,

    /// A power was typed without a base before it.
    MissingBase,

    /// A parenthesis was closed, but no group is open.
    NoOpenGroup,

    /// A parenthesis was closed directly after an operator, such as `(4+)`.
    DanglingOperator,

    /// The memory is empty.
    EmptyMemory,

    /// There is no result or number to store in memory.
    NothingToStore,

    /// No number is being typed.
    NoEntry,

    /// The expression is incomplete and cannot be evaluated.
    Incomplete,

    /// Undo and redo are handled by the [`Engine`](crate::Engine).
    History,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Terminal => "only clear is accepted after an error",
            Self::NothingToEdit => "there is no expression to edit",
            Self::InvalidDigit => "a digit key must be between 1 and 9",
            Self::EmptyNumber => "no number was typed",
            Self::EmptyOperand => "an operator needs an operand before it",
            Self::EmptyGroup => "an operator cannot follow an empty group",
            Self::MissingBase => "a power needs a base before it",
            Self::NoOpenGroup => "no group is open",
            Self::DanglingOperator => "a group cannot end with an operator",
            Self::EmptyMemory => "the memory is empty",
            Self::NothingToStore => "there is nothing to store",
            Self::NoEntry => "no number is being typed",
            Self::Incomplete => "the expression is incomplete",
            Self::History => "undo and redo are handled by the engine",
        };
        f.write_str(reason)
    }
}

/// Wraps text spliced in from memory or a result in parentheses if it contains an operator, so
/// that a negative value such as `-3` stays a single operand.
pub fn splice_text(text: &str) -> String {
    if text.chars().any(|c| MathOp::from_symbol(c).is_some()) {
        format!("({})", text)
    } else {
        text.to_owned()
    }
}

/// Returns the text of the last child if it is an editable number, or an empty string.
fn editable_text(active: &Compound) -> String {
    match active.last() {
        Some(Expression::Value { text, computed: false }) => text.clone(),
        _ => String::new(),
    }
}

/// Returns the trailing operator of the compound, along with the rendered operand before it.
fn pending_operator(active: &Compound) -> Option<(MathOp, String)> {
    let (last, rest) = active.children.split_last()?;
    match **last {
        Expression::Operator(op) => Some((op, rest.iter().map(|child| child.render()).collect())),
        _ => None,
    }
}

/// A working copy of the expression being edited.
struct Editor {
    tree: Compound,
    stack: NavigationStack,
    memory: Option<String>,

    /// The tag of the state the copy was taken from, captured by any group opened next.
    tag: StateTag,
}

impl Editor {
    /// Creates an editor with an empty tree.
    fn fresh(memory: Option<String>) -> Self {
        Self {
            tree: Compound::new(),
            stack: NavigationStack::new(),
            memory,
            tag: StateTag::Start,
        }
    }

    /// Creates an editor whose tree starts with the given result, spliced in as a computed value.
    fn seeded(result: &str, memory: Option<String>) -> Self {
        let mut editor = Self::fresh(memory);
        editor.tree.push(Expression::computed(splice_text(result)));
        editor
    }

    /// Continues editing the expression of the given state.
    fn edit(state: &CalculatorState) -> Result<Self, Rejection> {
        match state {
            CalculatorState::NumberInput { tree, memory, stack, .. }
            | CalculatorState::OperatorInput { tree, memory, stack, .. }
            | CalculatorState::ParenthesisOpen { tree, memory, stack, .. }
            | CalculatorState::FunctionInput { tree, memory, stack, .. } => Ok(Self {
                tree: tree.clone(),
                stack: stack.clone(),
                memory: memory.clone(),
                tag: state.tag(),
            }),
            CalculatorState::Error { .. } => Err(Rejection::Terminal),
            CalculatorState::Start { .. } | CalculatorState::Result { .. } => Err(Rejection::NothingToEdit),
        }
    }

    /// Like [`Editor::edit`], but starts a fresh tree from [`CalculatorState::Start`] and
    /// [`CalculatorState::Result`].
    fn resume(state: &CalculatorState) -> Result<Self, Rejection> {
        match state {
            CalculatorState::Start { memory } | CalculatorState::Result { memory, .. } => {
                Ok(Self::fresh(memory.clone()))
            },
            _ => Self::edit(state),
        }
    }

    fn active(&self) -> &Compound {
        self.stack.active(&self.tree)
    }

    fn active_mut(&mut self) -> &mut Compound {
        self.stack.active_mut(&mut self.tree)
    }

    /// Appends a group or function application to the active compound and descends into it.
    fn open(mut self, node: Expression, kind: FrameKind) -> CalculatorState {
        let captured = self.tag;
        let active = self.active_mut();
        let index = active.len();
        active.push(node);
        self.stack.push(Frame { captured, index, kind });

        match kind {
            FrameKind::Group => self.into_state(StateTag::ParenthesisOpen),
            FrameKind::Apply => self.into_state(StateTag::FunctionInput),
        }
    }

    /// Derives the state tag from the shape of the tree.
    fn derived_tag(&self) -> StateTag {
        match self.active().last() {
            None => match self.stack.top() {
                Some(Frame { kind: FrameKind::Group, .. }) => StateTag::ParenthesisOpen,
                Some(Frame { kind: FrameKind::Apply, .. }) => StateTag::FunctionInput,
                None => StateTag::Start,
            },
            Some(Expression::Operator(_)) => StateTag::OperatorInput,
            Some(_) => StateTag::NumberInput,
        }
    }

    /// Builds the state with the tag derived from the tree.
    fn settle(self) -> CalculatorState {
        let tag = self.derived_tag();
        self.into_state(tag)
    }

    /// Builds a state with the given tag, filling in the data that tag carries. A tag that does
    /// not fit the tree is replaced by the derived one.
    fn into_state(self, tag: StateTag) -> CalculatorState {
        let empty = self.tree.is_empty() && self.stack.is_empty();
        let tag = match tag {
            StateTag::Start if !empty => self.derived_tag(),
            StateTag::Result | StateTag::Error => self.derived_tag(),
            tag => tag,
        };

        let active = self.active();
        let current_digits = editable_text(active);
        let pending = pending_operator(active);
        let inner_expression = active.render();

        let Self { tree, stack, memory, .. } = self;
        match (tag, pending) {
            (StateTag::Start, _) => CalculatorState::Start { memory },
            (StateTag::OperatorInput, Some((operator, previous_value))) => CalculatorState::OperatorInput {
                previous_value,
                operator,
                current_digits: String::new(),
                tree,
                memory,
                stack,
            },
            (StateTag::ParenthesisOpen, _) => CalculatorState::ParenthesisOpen {
                inner_expression,
                tree,
                memory,
                stack,
            },
            (StateTag::FunctionInput, _) => CalculatorState::FunctionInput {
                current_digits,
                tree,
                memory,
                stack,
            },
            _ => CalculatorState::NumberInput {
                current_digits,
                tree,
                memory,
                stack,
            },
        }
    }
}

/// Derives the state for an expression from its shape:
///
/// - an empty tree with no open group is [`CalculatorState::Start`];
/// - an empty open group is [`CalculatorState::ParenthesisOpen`] or
///   [`CalculatorState::FunctionInput`], by the kind of group;
/// - a trailing operator is [`CalculatorState::OperatorInput`];
/// - anything else is [`CalculatorState::NumberInput`].
pub fn settle(tree: Compound, stack: NavigationStack, memory: Option<String>) -> CalculatorState {
    Editor { tree, stack, memory, tag: StateTag::Start }.settle()
}

/// Splices the number in the digit display into the expression.
fn number(state: &CalculatorState, digits: &dyn DigitDisplay) -> Result<CalculatorState, Rejection> {
    let mut editor = Editor::resume(state)?;
    let text = digits.digit_display();
    if text.is_empty() {
        return Err(Rejection::EmptyNumber);
    }

    let active = editor.active_mut();
    if state.is_continuing_number() {
        active.replace_last(Expression::number(text));
    } else {
        active.push(Expression::number(text));
    }
    Ok(editor.into_state(StateTag::NumberInput))
}

fn math_op(state: &CalculatorState, op: MathOp) -> Result<CalculatorState, Rejection> {
    let mut editor = match state {
        CalculatorState::Start { memory } => {
            let mut editor = Editor::fresh(memory.clone());
            editor.tree.push(Expression::number("0"));
            editor
        },
        CalculatorState::Result { result, memory, .. } => Editor::seeded(result, memory.clone()),
        _ => Editor::edit(state)?,
    };

    let active = editor.active_mut();
    let (empty_group, pending) = match active.last() {
        Some(last) => (last.is_empty_group(), last.is_operator()),
        None => return Err(Rejection::EmptyOperand),
    };

    if empty_group {
        return Err(Rejection::EmptyGroup);
    } else if pending {
        active.replace_last(Expression::Operator(op));
    } else {
        active.push(Expression::Operator(op));
    }
    Ok(editor.into_state(StateTag::OperatorInput))
}

fn apply(state: &CalculatorState, function: FunctionTag) -> Result<CalculatorState, Rejection> {
    let node = Expression::Apply { function, inner: Compound::new() };
    if !function.needs_base() {
        return Editor::resume(state).map(|editor| editor.open(node, FrameKind::Apply));
    }

    let editor = match state {
        CalculatorState::Result { result, memory, .. } => Editor::seeded(result, memory.clone()),
        _ => Editor::resume(state)?,
    };
    let has_base = editor
        .active()
        .last()
        .map_or(false, |base| !base.is_operator() && !base.is_empty_group());
    if !has_base {
        return Err(Rejection::MissingBase);
    }
    Ok(editor.open(node, FrameKind::Apply))
}

fn paren_close(state: &CalculatorState) -> Result<CalculatorState, Rejection> {
    let mut editor = Editor::edit(state)?;
    if editor.stack.is_empty() {
        return Err(Rejection::NoOpenGroup);
    }
    if editor.active().last().map_or(false, Expression::is_operator) {
        return Err(Rejection::DanglingOperator);
    }

    editor.stack.pop();
    let tag = match editor.stack.top() {
        Some(Frame { kind: FrameKind::Group, .. }) => StateTag::ParenthesisOpen,
        Some(Frame { kind: FrameKind::Apply, .. }) => StateTag::FunctionInput,
        None => StateTag::NumberInput,
    };
    Ok(editor.into_state(tag))
}

fn memory_recall(state: &CalculatorState) -> Result<CalculatorState, Rejection> {
    let mut editor = Editor::resume(state)?;
    let text = editor.memory.as_deref().map(splice_text).ok_or(Rejection::EmptyMemory)?;
    editor.active_mut().push(Expression::computed(text));
    Ok(editor.into_state(StateTag::NumberInput))
}

fn memory_store(state: &CalculatorState) -> Result<CalculatorState, Rejection> {
    let stored = match state {
        CalculatorState::Error { .. } => return Err(Rejection::Terminal),
        CalculatorState::Result { result, .. } => result.clone(),
        _ => state.editable_number().ok_or(Rejection::NothingToStore)?.to_owned(),
    };

    let mut next = state.clone();
    *next.memory_mut() = Some(stored);
    Ok(next)
}

fn memory_clear(state: &CalculatorState) -> Result<CalculatorState, Rejection> {
    match state {
        CalculatorState::Error { .. } => Err(Rejection::Terminal),
        _ if state.memory().is_none() => Err(Rejection::EmptyMemory),
        _ => {
            let mut next = state.clone();
            *next.memory_mut() = None;
            Ok(next)
        },
    }
}

/// Evaluates the whole expression, closing every open group.
fn evaluate(state: &CalculatorState, service: &dyn SimplificationService) -> Result<CalculatorState, Rejection> {
    let editor = Editor::edit(state)?;
    let expression = editor.tree.render();
    let normalized = service.preprocess(&expression);

    match service.decimal_value(&normalized) {
        Ok(decimal) => {
            let result = trim_decimal(&decimal).to_owned();
            Ok(CalculatorState::Result {
                expression,
                memory: Some(result.clone()),
                result,
            })
        },
        Err(err) => match MathError::classify(&err) {
            Some(kind) => Ok(CalculatorState::Error { kind, memory: editor.memory }),
            None => Err(Rejection::Incomplete),
        },
    }
}

fn clear(state: &CalculatorState) -> CalculatorState {
    match state {
        CalculatorState::Error { .. } => CalculatorState::Start { memory: None },
        _ => CalculatorState::Start { memory: state.memory().map(str::to_owned) },
    }
}

fn clear_entry(state: &CalculatorState) -> Result<CalculatorState, Rejection> {
    let mut editor = Editor::edit(state)?;
    if !state.is_continuing_number() {
        return Err(Rejection::NoEntry);
    }

    editor.active_mut().pop();
    Ok(editor.settle())
}

/// Removes the last character of the number being typed, or else the last node of the active
/// compound. The digit display must already have dropped its last character.
fn back(state: &CalculatorState, digits: &dyn DigitDisplay) -> Result<CalculatorState, Rejection> {
    let mut editor = Editor::edit(state)?;

    if state.is_continuing_number() {
        let text = digits.digit_display();
        let active = editor.active_mut();
        if text.is_empty() {
            active.pop();
        } else {
            active.replace_last(Expression::number(text));
        }
        return Ok(editor.settle());
    }

    if editor.active().is_empty() {
        let frame = editor.stack.pop().ok_or(Rejection::NothingToEdit)?;
        editor.active_mut().pop();
        return Ok(editor.into_state(frame.captured));
    }

    editor.active_mut().pop();
    Ok(editor.settle())
}

/// Computes the state that follows `state` after the given input, or the reason the input is
/// rejected.
///
/// `digits` supplies the number being typed. The caller is responsible for accumulating
/// keystrokes into it before calling this function, including removing a character on
/// [`Input::Back`]. `service` evaluates the expression on [`Input::Return`].
pub fn try_transition(
    state: &CalculatorState,
    input: Input,
    digits: &dyn DigitDisplay,
    service: &dyn SimplificationService,
) -> Result<CalculatorState, Rejection> {
    let next = match input {
        Input::Digit(digit) if !(1..=9).contains(&digit) => Err(Rejection::InvalidDigit),
        Input::Zero | Input::Digit(_) | Input::DecimalSeparator => number(state, digits),
        Input::MathOp(op) => math_op(state, op),
        Input::ParenOpen => Editor::resume(state)
            .map(|editor| editor.open(Expression::Group(Compound::new()), FrameKind::Group)),
        Input::ParenClose => paren_close(state),
        Input::Function(function) => apply(state, function),
        Input::MemoryRecall => memory_recall(state),
        Input::MemoryStore => memory_store(state),
        Input::MemoryClear => memory_clear(state),
        Input::Return => evaluate(state, service),
        Input::Clear => Ok(clear(state)),
        Input::ClearEntry => clear_entry(state),
        Input::Back => back(state, digits),
        Input::Undo | Input::Redo => Err(Rejection::History),
    };

    match &next {
        Ok(next) => debug!(%input, from = ?state.tag(), to = ?next.tag(), "transition"),
        Err(reason) => debug!(%input, from = ?state.tag(), %reason, "input rejected"),
    }
    next
}

/// Computes the state that follows `state` after the given input. A rejected input returns a copy
/// of `state`.
pub fn transition(
    state: &CalculatorState,
    input: Input,
    digits: &dyn DigitDisplay,
    service: &dyn SimplificationService,
) -> CalculatorState {
    try_transition(state, input, digits, service).unwrap_or_else(|_| state.clone())
}

#[cfg(test)]
mod tests {
    use keypad_compute::Simplifier;
    use pretty_assertions::assert_eq;
    use super::*;

    fn step(state: &CalculatorState, input: Input, digits: &str) -> Result<CalculatorState, Rejection> {
        try_transition(state, input, &digits.to_string(), &Simplifier::default())
    }

    /// Applies inputs that must all be accepted. Each pair is an input and the digit display at
    /// the time it is typed.
    fn run(inputs: &[(Input, &str)]) -> CalculatorState {
        inputs.iter().fold(CalculatorState::default(), |state, &(input, digits)| {
            step(&state, input, digits).unwrap_or_else(|reason| panic!("{} rejected: {}", input, reason))
        })
    }

    const ADD: Input = Input::MathOp(MathOp::Add);

    #[test]
    fn digits_replace_the_number_being_typed() {
        let state = run(&[(Input::Digit(1), "1"), (Input::Digit(2), "12"), (Input::DecimalSeparator, "12.")]);
        assert_eq!(state.tree(), Some(&Compound::with_children([Expression::number("12.")])));
        assert_eq!(state.editable_number(), Some("12."));
    }

    #[test]
    fn digit_after_operator_appends() {
        let state = run(&[(Input::Digit(1), "1"), (ADD, ""), (Input::Digit(2), "2")]);
        assert_eq!(state.expression_text(), "1+2");
        assert_eq!(state.active().map(Compound::len), Some(3));
    }

    #[test]
    fn empty_digit_display_is_rejected() {
        assert_eq!(step(&CalculatorState::default(), Input::Digit(1), ""), Err(Rejection::EmptyNumber));
    }

    #[test]
    fn operator_input_data() {
        let state = run(&[(Input::Digit(8), "8"), (Input::MathOp(MathOp::Divide), "")]);
        match state {
            CalculatorState::OperatorInput { previous_value, operator, current_digits, .. } => {
                assert_eq!(previous_value, "8");
                assert_eq!(operator, MathOp::Divide);
                assert_eq!(current_digits, "");
            },
            other => panic!("expected OperatorInput, got {:?}", other),
        }
    }

    #[test]
    fn operator_replaces_pending_operator() {
        let state = run(&[(Input::Digit(2), "2"), (ADD, ""), (Input::MathOp(MathOp::Subtract), "")]);
        assert_eq!(state.expression_text(), "2-");
    }

    #[test]
    fn operator_from_start_seeds_zero() {
        let state = run(&[(ADD, "")]);
        assert_eq!(state.expression_text(), "0+");
        assert_eq!(state.tag(), StateTag::OperatorInput);
    }

    #[test]
    fn operator_rejections() {
        let open = run(&[(Input::ParenOpen, "")]);
        assert_eq!(step(&open, ADD, ""), Err(Rejection::EmptyOperand));

        let closed = run(&[(Input::ParenOpen, ""), (Input::ParenClose, "")]);
        assert_eq!(step(&closed, ADD, ""), Err(Rejection::EmptyGroup));
    }

    #[test]
    fn paren_open_captures_state() {
        let state = run(&[(Input::Digit(2), "2"), (Input::ParenOpen, "")]);
        assert_eq!(state.tag(), StateTag::ParenthesisOpen);
        assert_eq!(state.stack().unwrap().frames(), &[Frame {
            captured: StateTag::NumberInput,
            index: 1,
            kind: FrameKind::Group,
        }]);
        assert_eq!(state.expression_text(), "2()");
    }

    #[test]
    fn paren_close_returns_to_enclosing_group() {
        let state = run(&[
            (Input::ParenOpen, ""),
            (Input::Digit(1), "1"),
            (Input::Function(FunctionTag::Sqrt), ""),
            (Input::Digit(4), "4"),
            (Input::ParenClose, ""),
        ]);
        match &state {
            CalculatorState::ParenthesisOpen { inner_expression, .. } => assert_eq!(inner_expression, "1sqrt(4)"),
            other => panic!("expected ParenthesisOpen, got {:?}", other),
        }

        let state = step(&state, Input::ParenClose, "").unwrap();
        assert_eq!(state.tag(), StateTag::NumberInput);
        assert!(state.stack().unwrap().is_empty());
        assert_eq!(state.expression_text(), "(1sqrt(4))");
    }

    #[test]
    fn paren_close_into_function_argument() {
        let state = run(&[
            (Input::Function(FunctionTag::Ln), ""),
            (Input::ParenOpen, ""),
            (Input::Digit(3), "3"),
            (Input::ParenClose, ""),
        ]);
        assert_eq!(state.tag(), StateTag::FunctionInput);
        assert_eq!(state.expression_text(), "ln((3))");
    }

    #[test]
    fn paren_close_rejections() {
        let state = run(&[(Input::Digit(4), "4")]);
        assert_eq!(step(&state, Input::ParenClose, ""), Err(Rejection::NoOpenGroup));

        let state = run(&[(Input::ParenOpen, ""), (Input::Digit(4), "4"), (ADD, "")]);
        assert_eq!(step(&state, Input::ParenClose, ""), Err(Rejection::DanglingOperator));

        assert_eq!(step(&CalculatorState::default(), Input::ParenClose, ""), Err(Rejection::NothingToEdit));
    }

    #[test]
    fn power_needs_base() {
        let power = Input::Function(FunctionTag::Power);
        assert_eq!(step(&CalculatorState::default(), power, ""), Err(Rejection::MissingBase));

        let state = run(&[(Input::Digit(2), "2"), (ADD, "")]);
        assert_eq!(step(&state, power, ""), Err(Rejection::MissingBase));

        let state = run(&[(Input::Digit(2), "2"), (power, ""), (Input::Digit(3), "3"), (Input::ParenClose, "")]);
        assert_eq!(state.expression_text(), "2^(3)");
    }

    #[test]
    fn return_evaluates_whole_tree() {
        let state = run(&[
            (Input::ParenOpen, ""),
            (Input::Digit(1), "1"),
            (Input::MathOp(MathOp::Divide), ""),
            (Input::Digit(4), "4"),
            (Input::Return, ""),
        ]);
        assert_eq!(state, CalculatorState::Result {
            expression: "(1/4)".to_string(),
            result: "0.25".to_string(),
            memory: Some("0.25".to_string()),
        });
    }

    #[test]
    fn return_rejects_incomplete() {
        let state = run(&[(Input::Digit(1), "1"), (ADD, "")]);
        assert_eq!(step(&state, Input::Return, ""), Err(Rejection::Incomplete));
        assert_eq!(step(&CalculatorState::default(), Input::Return, ""), Err(Rejection::NothingToEdit));
    }

    #[test]
    fn return_math_errors() {
        let cases = [
            ("1/0", MathError::DivideByZero),
            ("sqrt(0-4)", MathError::Domain),
            ("ln(0)", MathError::Domain),
            ("10^(10^(10^(10)))", MathError::Overflow),
        ];
        for (text, kind) in cases {
            let tree = Compound::with_children([Expression::computed(text)]);
            let state = settle(tree, NavigationStack::new(), Some("2".to_string()));
            assert_eq!(step(&state, Input::Return, ""), Ok(CalculatorState::Error {
                kind,
                memory: Some("2".to_string()),
            }), "{}", text);
        }
    }

    #[test]
    fn error_accepts_only_clear() {
        let state = CalculatorState::Error { kind: MathError::DivideByZero, memory: Some("5".to_string()) };
        for input in [Input::Digit(1), ADD, Input::ParenOpen, Input::MemoryRecall, Input::Return, Input::Back] {
            assert_eq!(step(&state, input, "1"), Err(Rejection::Terminal));
        }
        assert_eq!(step(&state, Input::Clear, ""), Ok(CalculatorState::Start { memory: None }));
    }

    #[test]
    fn clear_keeps_memory() {
        let state = run(&[(Input::Digit(5), "5"), (Input::MemoryStore, ""), (ADD, ""), (Input::Clear, "")]);
        assert_eq!(state, CalculatorState::Start { memory: Some("5".to_string()) });
    }

    #[test]
    fn memory_recall_splices_protected_value() {
        let state = CalculatorState::Start { memory: Some("-3".to_string()) };
        let state = step(&state, Input::MemoryRecall, "").unwrap();
        assert_eq!(state.expression_text(), "{(-3)}");
        assert!(!state.is_continuing_number());

        let state = step(&state, Input::Digit(4), "4").unwrap();
        assert_eq!(state.expression_text(), "{(-3)}4");
    }

    #[test]
    fn memory_recall_from_result_starts_fresh() {
        let state = run(&[(Input::Digit(2), "2"), (ADD, ""), (Input::Digit(3), "3"), (Input::Return, "")]);
        assert_eq!(state.memory(), Some("5"));

        let state = step(&state, Input::MemoryRecall, "").unwrap();
        assert_eq!(state.tree(), Some(&Compound::with_children([Expression::computed("5")])));
        assert_eq!(state.tag(), StateTag::NumberInput);
        assert!(!state.is_continuing_number());
        assert_eq!(state.memory(), Some("5"));
    }

    #[test]
    fn memory_recall_after_number() {
        let state = CalculatorState::Start { memory: Some("5".to_string()) };
        let state = step(&state, Input::Digit(1), "1").unwrap();
        let state = step(&state, Input::Digit(2), "12").unwrap();
        assert!(state.is_continuing_number());

        let state = step(&state, Input::MemoryRecall, "12").unwrap();
        assert_eq!(state.tree(), Some(&Compound::with_children([
            Expression::number("12"),
            Expression::computed("5"),
        ])));
        assert!(!state.is_continuing_number());
    }

    #[test]
    fn memory_recall_inside_group() {
        let state = CalculatorState::Start { memory: Some("1+2".to_string()) };
        let state = step(&state, Input::ParenOpen, "").unwrap();
        let state = step(&state, Input::Digit(1), "1").unwrap();
        let state = step(&state, Input::Digit(2), "12").unwrap();

        let state = step(&state, Input::MemoryRecall, "12").unwrap();
        let inner = Compound::with_children([Expression::number("12"), Expression::computed("(1+2)")]);
        assert_eq!(state.active(), Some(&inner));
        assert_eq!(state.tree(), Some(&Compound::with_children([Expression::Group(inner.clone())])));
        assert_eq!(state.stack().map(NavigationStack::len), Some(1));
        assert!(!state.is_continuing_number());
    }

    #[test]
    fn memory_store_from_result() {
        let state = run(&[(Input::Digit(8), "8"), (Input::MathOp(MathOp::Divide), ""), (Input::Digit(4), "4"), (Input::Return, "")]);
        let state = step(&state, Input::MemoryClear, "").unwrap();
        assert_eq!(state.memory(), None);

        let state = step(&state, Input::MemoryStore, "").unwrap();
        assert_eq!(state, CalculatorState::Result {
            expression: "8/4".to_string(),
            result: "2".to_string(),
            memory: Some("2".to_string()),
        });
    }

    #[test]
    fn out_of_range_digit_is_rejected() {
        for digit in [0, 10, 12, 250] {
            assert_eq!(step(&CalculatorState::default(), Input::Digit(digit), "1"), Err(Rejection::InvalidDigit));
        }
        let state = run(&[(Input::Digit(7), "7")]);
        assert_eq!(step(&state, Input::Digit(12), "7"), Err(Rejection::InvalidDigit));
    }

    #[test]
    fn memory_rejections() {
        assert_eq!(step(&CalculatorState::default(), Input::MemoryRecall, ""), Err(Rejection::EmptyMemory));
        assert_eq!(step(&CalculatorState::default(), Input::MemoryClear, ""), Err(Rejection::EmptyMemory));

        let state = run(&[(Input::Digit(1), "1"), (ADD, "")]);
        assert_eq!(step(&state, Input::MemoryStore, ""), Err(Rejection::NothingToStore));
    }

    #[test]
    fn memory_store_and_clear() {
        let state = run(&[(Input::Digit(4), "4"), (Input::Digit(2), "42"), (Input::MemoryStore, "42")]);
        assert_eq!(state.memory(), Some("42"));
        assert_eq!(state.tag(), StateTag::NumberInput);

        let state = step(&state, Input::MemoryClear, "42").unwrap();
        assert_eq!(state.memory(), None);
        assert_eq!(state.expression_text(), "42");
    }

    #[test]
    fn clear_entry() {
        let state = run(&[(Input::Digit(2), "2"), (ADD, ""), (Input::Digit(3), "3"), (Input::ClearEntry, "")]);
        assert_eq!(state.tag(), StateTag::OperatorInput);
        assert_eq!(state.expression_text(), "2+");

        assert_eq!(step(&state, Input::ClearEntry, ""), Err(Rejection::NoEntry));
    }

    #[test]
    fn back_shortens_number() {
        let state = run(&[(Input::Digit(1), "1"), (Input::Digit(2), "12"), (Input::Back, "1")]);
        assert_eq!(state.expression_text(), "1");
        assert!(state.is_continuing_number());

        let state = step(&state, Input::Back, "").unwrap();
        assert_eq!(state, CalculatorState::Start { memory: None });
        assert_eq!(step(&state, Input::Back, ""), Err(Rejection::NothingToEdit));
    }

    #[test]
    fn back_removes_operator() {
        let state = run(&[(Input::Digit(7), "7"), (ADD, ""), (Input::Back, "")]);
        assert_eq!(state.tag(), StateTag::NumberInput);
        assert_eq!(state.editable_number(), Some("7"));
    }

    #[test]
    fn back_removes_empty_group_and_restores_captured_state() {
        let state = run(&[(Input::Digit(7), "7"), (ADD, ""), (Input::ParenOpen, ""), (Input::Back, "")]);
        assert_eq!(state.tag(), StateTag::OperatorInput);
        assert_eq!(state.expression_text(), "7+");
        assert!(state.stack().unwrap().is_empty());

        let state = run(&[(Input::Function(FunctionTag::Sqrt), ""), (Input::Back, "")]);
        assert_eq!(state, CalculatorState::Start { memory: None });
    }

    #[test]
    fn back_removes_closed_group() {
        let state = run(&[
            (Input::Digit(2), "2"),
            (Input::ParenOpen, ""),
            (Input::Digit(3), "3"),
            (Input::ParenClose, ""),
            (Input::Back, ""),
        ]);
        assert_eq!(state.expression_text(), "2");
        assert!(state.is_continuing_number());
    }

    #[test]
    fn settle_derives_tags() {
        assert_eq!(settle(Compound::new(), NavigationStack::new(), None).tag(), StateTag::Start);

        let tree = Compound::with_children([Expression::number("1"), Expression::Operator(MathOp::Multiply)]);
        assert_eq!(settle(tree, NavigationStack::new(), None).tag(), StateTag::OperatorInput);

        let tree = Compound::with_children([Expression::Apply { function: FunctionTag::Cos, inner: Compound::new() }]);
        let mut stack = NavigationStack::new();
        stack.push(Frame { captured: StateTag::Start, index: 0, kind: FrameKind::Apply });
        assert_eq!(settle(tree.clone(), stack, None).tag(), StateTag::FunctionInput);
        assert_eq!(settle(tree, NavigationStack::new(), None).tag(), StateTag::NumberInput);
    }

    #[test]
    fn result_starts_fresh_tree() {
        let result = CalculatorState::Result {
            expression: "2+3".to_string(),
            result: "5".to_string(),
            memory: Some("5".to_string()),
        };

        let state = step(&result, Input::Digit(7), "7").unwrap();
        assert_eq!(state.tree(), Some(&Compound::with_children([Expression::number("7")])));
        assert_eq!(state.memory(), Some("5"));

        let state = step(&result, Input::MathOp(MathOp::Multiply), "").unwrap();
        assert_eq!(state.expression_text(), "{5}*");

        let state = step(&result, Input::Function(FunctionTag::Power), "").unwrap();
        assert_eq!(state.expression_text(), "{5}^()");

        let state = step(&result, Input::ParenOpen, "").unwrap();
        assert_eq!(state.expression_text(), "()");
    }

    #[test]
    fn earlier_states_are_unchanged() {
        let first = run(&[(Input::ParenOpen, ""), (Input::Digit(1), "1")]);
        let snapshot = first.clone();

        let second = step(&first, ADD, "").unwrap();
        let third = step(&second, Input::Digit(2), "2").unwrap();
        let fourth = step(&third, Input::Digit(2), "23").unwrap();

        assert_eq!(first, snapshot);
        assert_eq!(first.expression_text(), "(1)");
        assert_eq!(second.expression_text(), "(1+)");
        assert_eq!(third.expression_text(), "(1+2)");
        assert_eq!(fourth.expression_text(), "(1+23)");
    }

    #[test]
    fn transition_returns_copy_on_rejection() {
        let state = run(&[(Input::Digit(1), "1")]);
        let service = Simplifier::default();
        assert_eq!(transition(&state, Input::ParenClose, &String::new(), &service), state);
        assert_eq!(transition(&state, Input::Undo, &String::new(), &service), state);
    }

    #[test]
    fn splice_text_parenthesizes_operators() {
        assert_eq!(splice_text("5"), "5");
        assert_eq!(splice_text("-3"), "(-3)");
        assert_eq!(splice_text("1.5E-7"), "(1.5E-7)");
    }
}
