//! The [`Engine`], which owns the calculator state, the ten-key and the undo history.

use crate::{
    input::Input,
    machine::try_transition,
    options::EngineOptions,
    preview::{Preview, SimplificationService},
    state::CalculatorState,
    tenkey::{DigitDisplay, TenKey},
};
use keypad_compute::Simplifier;
use keypad_error::Error;
use std::collections::VecDeque;
use tracing::warn;

/// A state together with the ten-key contents that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    state: CalculatorState,
    tenkey: TenKey,
}

/// One calculator session: the current state, the ten-key accumulator, the undo history and the
/// simplification service used for previews and results.
#[derive(Debug)]
pub struct Engine<S = Simplifier> {
    options: EngineOptions,
    state: CalculatorState,
    tenkey: TenKey,
    service: S,

    /// Earlier snapshots, oldest first.
    undo: VecDeque<Snapshot>,

    /// Undone snapshots, most recently undone last.
    redo: Vec<Snapshot>,

    /// The preview of the last rendered expression.
    preview: Preview,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Engine {
    /// Creates an engine that evaluates expressions with a [`Simplifier`] configured from the
    /// given options.
    pub fn new(options: EngineOptions) -> Self {
        Self::with_service(options, Simplifier::new(options.precision, options.decimal_digits))
    }
}

impl<S: SimplificationService> Engine<S> {
    /// Creates an engine that evaluates expressions with the given service.
    pub fn with_service(options: EngineOptions, service: S) -> Self {
        Self {
            options,
            state: CalculatorState::default(),
            tenkey: TenKey::new(options.max_digits),
            service,
            undo: VecDeque::new(),
            redo: Vec::new(),
            preview: Preview::default(),
        }
    }

    /// Returns the options of this engine.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns the current state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the simplification service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Returns the text of the number being typed.
    pub fn digit_display(&self) -> String {
        self.tenkey.digit_display()
    }

    /// Returns true if there is a state to undo to.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns true if there is an undone state to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Feeds one input to the calculator. Returns true if the input changed the state.
    pub fn press(&mut self, input: Input) -> bool {
        match input {
            Input::Undo => return self.step_back(),
            Input::Redo => return self.step_forward(),
            _ => {},
        }

        let saved = self.tenkey.clone();
        match input {
            Input::Zero => self.tenkey.push_digit(0),
            Input::Digit(digit) => self.tenkey.push_digit(digit),
            Input::DecimalSeparator => self.tenkey.push_separator(),
            Input::Back if self.state.is_continuing_number() => self.tenkey.back(),
            _ => {},
        }

        match try_transition(&self.state, input, &self.tenkey, &self.service) {
            Ok(next) if next != self.state => {
                let previous = std::mem::replace(&mut self.state, next);
                self.record(Snapshot { state: previous, tenkey: saved });
                self.sync_tenkey();
                true
            },
            _ => {
                self.tenkey = saved;
                false
            },
        }
    }

    /// Feeds each input in order. Returns the number of inputs that changed the state.
    pub fn press_all(&mut self, inputs: impl IntoIterator<Item = Input>) -> usize {
        inputs.into_iter().filter(|&input| self.press(input)).count()
    }

    /// Pushes a snapshot onto the undo history and forgets every undone state.
    fn record(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        if self.undo.len() > self.options.history_limit {
            self.undo.pop_front();
            warn!(limit = self.options.history_limit, "undo history truncated");
        }
        self.redo.clear();
    }

    /// Makes the ten-key hold the number being typed, or nothing if no number is being typed.
    fn sync_tenkey(&mut self) {
        match self.state.editable_number() {
            Some(text) => self.tenkey.load(text),
            None => self.tenkey.clear(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { state: self.state.clone(), tenkey: self.tenkey.clone() }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.state = snapshot.state;
        self.tenkey = snapshot.tenkey;
    }

    /// Restores the previous state.
    fn step_back(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(self.snapshot());
        self.restore(previous);
        true
    }

    /// Re-applies the most recently undone state.
    fn step_forward(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(self.snapshot());
        self.restore(next);
        true
    }

    /// Returns the preview of the current expression. The service is only invoked when the
    /// rendered expression differs from the one of the last preview.
    pub fn preview(&mut self) -> &Preview {
        let expression = self.state.expression_text();
        if expression != self.preview.expression {
            self.preview = Preview::build(&self.service, &expression);
        }
        &self.preview
    }

    /// Explains why the current expression has no preview. Returns the normalized text the error
    /// spans refer to, along with the error, or [`None`] if there is nothing to explain.
    pub fn explain(&self) -> Option<(String, Error)> {
        let expression = self.state.expression_text();
        if expression.is_empty() {
            return None;
        }

        let normalized = self.service.preprocess(&expression);
        let err = self.service.simplify(&normalized).err()?;
        Some((normalized, err))
    }
}
