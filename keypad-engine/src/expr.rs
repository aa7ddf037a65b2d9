//! The expression tree built by the state machine.
//!
//! Children are stored behind [`Rc`], so cloning a tree is cheap and clones share every subtree
//! they have not modified. All mutation goes through [`Rc::make_mut`], which copies a node only if
//! another tree still refers to it. A state produced by an earlier transition therefore never
//! observes the edits of a later one.

use std::{fmt, rc::Rc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four basic arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl MathOp {
    /// Returns the symbol used to render the operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Returns the operator with the given symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// A function that can be applied to a sub-expression.
///
/// The tag is resolved to behavior by name when the rendered text is evaluated; the tree itself
/// only stores the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionTag {
    Sqrt,

    /// Raises the atom before the function to the power of its argument.
    Power,

    Abs,
    Ln,
    Exp,
    Sin,
    Cos,
    Tan,
}

impl FunctionTag {
    /// Returns the prefix written before the opening parenthesis of the argument.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Power => "^",
            Self::Abs => "abs",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Returns true if the function needs an operand before it, like the base of a power.
    pub fn needs_base(self) -> bool {
        matches!(self, Self::Power)
    }

    /// Renders the function applied to the given argument text.
    pub fn render(self, inner: &str) -> String {
        format!("{}({})", self.prefix(), inner)
    }
}

/// The only container node: an ordered sequence of child expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compound {
    /// The children of this compound, in order.
    pub children: Vec<Rc<Expression>>,
}

impl Compound {
    /// Creates an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compound with the given children.
    pub fn with_children(children: impl IntoIterator<Item = Expression>) -> Self {
        Self {
            children: children.into_iter().map(Rc::new).collect(),
        }
    }

    /// Returns true if the compound has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns the last child, if any.
    pub fn last(&self) -> Option<&Expression> {
        self.children.last().map(|child| &**child)
    }

    /// Appends a child.
    pub fn push(&mut self, child: Expression) {
        self.children.push(Rc::new(child));
    }

    /// Removes and returns the last child, if any.
    pub fn pop(&mut self) -> Option<Expression> {
        self.children.pop().map(|child| Rc::try_unwrap(child).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Replaces the last child with the given expression, or appends it if the compound is empty.
    pub fn replace_last(&mut self, child: Expression) {
        match self.children.last_mut() {
            Some(last) => *last = Rc::new(child),
            None => self.push(child),
        }
    }

    /// Returns the inner compound of the [`Expression::Group`] or [`Expression::Apply`] at the
    /// given index.
    pub fn group(&self, index: usize) -> Option<&Compound> {
        self.children.get(index).and_then(|child| child.inner())
    }

    /// Returns the inner compound of the [`Expression::Group`] or [`Expression::Apply`] at the
    /// given index for mutation. The child is copied first if another tree shares it.
    pub fn group_mut(&mut self, index: usize) -> Option<&mut Compound> {
        self.children.get_mut(index).and_then(|child| Rc::make_mut(child).inner_mut())
    }

    /// Renders the compound as the concatenation of its rendered children.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.children.iter().try_for_each(|child| write!(f, "{}", child))
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expression {
    /// A number, either as typed so far or spliced in from a computed result.
    Value {
        /// The text of the number.
        text: String,

        /// Whether the value is a computed result. Computed values are rendered inside `{ }`
        /// markers and are never edited digit by digit.
        computed: bool,
    },

    /// An arithmetic operator.
    Operator(MathOp),

    /// A parenthesized sub-expression.
    Group(Compound),

    /// A function applied to a sub-expression.
    Apply {
        /// The function that is applied.
        function: FunctionTag,

        /// The argument of the function.
        inner: Compound,
    },

    /// A nested sequence of expressions.
    Compound(Compound),
}

impl Expression {
    /// Creates a number being typed.
    pub fn number(text: impl Into<String>) -> Self {
        Self::Value { text: text.into(), computed: false }
    }

    /// Creates a number spliced in from a computed result.
    pub fn computed(text: impl Into<String>) -> Self {
        Self::Value { text: text.into(), computed: true }
    }

    /// Returns true if this is a number that can still be edited digit by digit.
    pub fn is_editable_value(&self) -> bool {
        matches!(self, Self::Value { computed: false, .. })
    }

    /// Returns true if this is an operator.
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this is a [`Expression::Group`] or [`Expression::Apply`] with no children.
    pub fn is_empty_group(&self) -> bool {
        self.inner().map_or(false, Compound::is_empty)
    }

    /// Returns the inner compound of a [`Expression::Group`] or [`Expression::Apply`].
    pub fn inner(&self) -> Option<&Compound> {
        match self {
            Self::Group(inner) | Self::Apply { inner, .. } => Some(inner),
            _ => None,
        }
    }

    /// Returns the inner compound of a [`Expression::Group`] or [`Expression::Apply`] for
    /// mutation.
    pub fn inner_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Group(inner) | Self::Apply { inner, .. } => Some(inner),
            _ => None,
        }
    }

    /// Renders the expression as text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { text, computed: false } => f.write_str(text),
            Self::Value { text, computed: true } => write!(f, "{{{}}}", text),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::Group(inner) => write!(f, "({})", inner),
            Self::Apply { function, inner } => f.write_str(&function.render(&inner.render())),
            Self::Compound(inner) => write!(f, "{}", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn render_values_and_operators() {
        let tree = Compound::with_children([
            Expression::number("2"),
            Expression::Operator(MathOp::Add),
            Expression::computed("3.5"),
        ]);
        assert_eq!(tree.render(), "2+{3.5}");
    }

    #[test]
    fn render_nested() {
        let tree = Compound::with_children([
            Expression::number("2"),
            Expression::Group(Compound::with_children([
                Expression::number("4"),
                Expression::Operator(MathOp::Subtract),
                Expression::Apply {
                    function: FunctionTag::Sqrt,
                    inner: Compound::with_children([Expression::number("9")]),
                },
            ])),
            Expression::Apply {
                function: FunctionTag::Power,
                inner: Compound::with_children([Expression::number("2")]),
            },
            Expression::Compound(Compound::with_children([Expression::Operator(MathOp::Divide)])),
        ]);
        assert_eq!(tree.render(), "2(4-sqrt(9))^(2)/");
    }

    #[test]
    fn empty_groups() {
        assert!(Expression::Group(Compound::new()).is_empty_group());
        assert!(!Expression::Group(Compound::with_children([Expression::number("1")])).is_empty_group());
        assert!(Expression::Apply { function: FunctionTag::Ln, inner: Compound::new() }.is_empty_group());
        assert!(!Expression::number("1").is_empty_group());
    }

    #[test]
    fn clones_do_not_observe_edits() {
        let mut original = Compound::with_children([Expression::Group(Compound::new())]);
        let snapshot = original.clone();

        original.group_mut(0).unwrap().push(Expression::number("7"));

        assert_eq!(original.render(), "(7)");
        assert_eq!(snapshot.render(), "()");
    }

    #[test]
    fn replace_last() {
        let mut tree = Compound::with_children([Expression::number("1")]);
        tree.replace_last(Expression::number("12"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.render(), "12");
    }
}
