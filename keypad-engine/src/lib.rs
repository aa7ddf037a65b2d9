//! An incremental expression-editing engine for keypad calculators.
//!
//! The calculator consumes one [`Input`] at a time. Each input is fed to [`try_transition`]
//! together with the current [`CalculatorState`], which returns the next state. Editing states
//! carry an expression tree ([`Compound`]) and a [`NavigationStack`] recording the groups and
//! function arguments that are still open. Every state renders to expression text, which the
//! [`SimplificationService`] evaluates for a live preview.
//!
//! States are persistent: a transition never modifies the state it is given, and the new state
//! shares every subtree the input did not touch. This makes undo a matter of keeping old states.
//!
//! Most callers want an [`Engine`], which owns the current state, the ten-key accumulator, the
//! undo history, and a cached preview:
//!
//! ```
//! use keypad_engine::{Engine, Input, MathOp};
//!
//! let mut engine = Engine::default();
//! engine.press_all([Input::Digit(2), Input::MathOp(MathOp::Add), Input::Digit(3)]);
//! assert_eq!(engine.state().expression_text(), "2+3");
//! assert_eq!(engine.preview().decimal.as_deref(), Some("5"));
//!
//! engine.press(Input::Return);
//! assert_eq!(engine.state().display_text(), "5");
//! ```

pub mod engine;
pub mod expr;
pub mod input;
pub mod machine;
pub mod nav;
pub mod options;
pub mod preview;
pub mod state;
pub mod tenkey;

pub use engine::Engine;
pub use expr::{Compound, Expression, FunctionTag, MathOp};
pub use input::Input;
pub use machine::{settle, transition, try_transition, Rejection};
pub use nav::{Frame, FrameKind, NavigationStack};
pub use options::{EngineOptions, EngineOptionsBuilder};
pub use preview::{Preview, SimplificationService, Simplified};
pub use state::{CalculatorState, MathError, StateTag};
pub use tenkey::{DigitDisplay, TenKey};
