//! The navigation stack, which records the groups and function arguments that are still open.

use crate::{expr::Compound, state::StateTag};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of node a frame was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameKind {
    /// A parenthesized group.
    Group,

    /// The argument of a function.
    Apply,
}

/// A saved position in the tree, pushed when a group or function argument is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// The state that was current when the group was opened.
    pub captured: StateTag,

    /// The index of the opened node in its parent compound.
    pub index: usize,

    /// The kind of node that was opened.
    pub kind: FrameKind,
}

/// The stack of open groups, outermost first.
///
/// Frames hold positions, not references: the active compound is found by walking from the root
/// through the child at each frame's index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationStack {
    frames: Vec<Frame>,
}

impl NavigationStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open groups.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no group is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the frames, outermost first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the innermost open frame.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Pushes a frame for a newly opened group.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pops the innermost frame. Popping an empty stack is a no-op that returns [`None`].
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Returns the active compound: the inner compound of the innermost open group, or the root
    /// if no group is open.
    pub fn active<'a>(&self, root: &'a Compound) -> &'a Compound {
        self.frames.iter().fold(root, |current, frame| {
            current
                .group(frame.index)
                .unwrap_or_else(|| unreachable!("frame at index {} does not point at a group", frame.index))
        })
    }

    /// Returns the active compound for mutation. Every node on the path from the root is copied
    /// first if another tree shares it.
    pub fn active_mut<'a>(&self, root: &'a mut Compound) -> &'a mut Compound {
        let mut current = root;
        for frame in &self.frames {
            current = current
                .group_mut(frame.index)
                .unwrap_or_else(|| unreachable!("frame at index {} does not point at a group", frame.index));
        }
        current
    }

    /// Returns the compound that contains the innermost open group, or [`None`] if no group is
    /// open.
    pub fn parent_mut<'a>(&self, root: &'a mut Compound) -> Option<&'a mut Compound> {
        let (_, outer) = self.frames.split_last()?;
        let mut current = root;
        for frame in outer {
            current = current
                .group_mut(frame.index)
                .unwrap_or_else(|| unreachable!("frame at index {} does not point at a group", frame.index));
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Expression;
    use pretty_assertions::assert_eq;
    use super::*;

    fn frame(index: usize) -> Frame {
        Frame { captured: StateTag::NumberInput, index, kind: FrameKind::Group }
    }

    #[test]
    fn walk_to_active() {
        // 1((2
        let mut root = Compound::with_children([
            Expression::number("1"),
            Expression::Group(Compound::with_children([
                Expression::Group(Compound::with_children([Expression::number("2")])),
            ])),
        ]);
        let mut stack = NavigationStack::new();
        stack.push(frame(1));
        stack.push(frame(0));

        assert_eq!(stack.active(&root).render(), "2");

        stack.active_mut(&mut root).push(Expression::number("3"));
        assert_eq!(root.render(), "1((23))");

        stack.parent_mut(&mut root).unwrap().push(Expression::number("4"));
        assert_eq!(root.render(), "1((23)4)");
    }

    #[test]
    fn pop_empty_is_noop() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
        assert_eq!(stack.active(&Compound::new()), &Compound::new());
    }
}
