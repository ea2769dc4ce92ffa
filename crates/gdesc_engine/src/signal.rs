//! Non-local control flow.
//!
//! Statements report how they finished as a [`Flow`]. Expressions can also
//! raise a flow (a built-in such as `quip` ends the turn from inside an
//! expression), so expression evaluation returns [`Eval`], whose error side
//! is either a raised flow or a runtime fault.

use gdesc_foundation::{Error, SourceLocation};
use gdesc_world::JumpTarget;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Ran to completion.
    Normal,
    /// A `break` looking for its target.
    Break(JumpTarget),
    /// A `continue` looking for its target.
    Continue(JumpTarget),
    /// A `return` carrying its value.
    Return(i32),
}

/// What a loop does with the flow its body produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoopStep {
    /// Run the next iteration.
    Next,
    /// Leave the loop normally.
    Exit,
    /// Leave the loop and hand this flow to the enclosing construct.
    Propagate(Flow),
}

impl Flow {
    /// Returns true for [`Flow::Normal`].
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Returns true for a `break repeat` or `continue repeat`.
    #[must_use]
    pub const fn targets_repeat(&self) -> bool {
        matches!(
            self,
            Self::Break(JumpTarget::Repeat) | Self::Continue(JumpTarget::Repeat)
        )
    }

    /// Decides what a loop carrying `label` does with this flow.
    ///
    /// Unlabelled jumps and jumps naming this loop's label are caught;
    /// everything else passes through.
    pub(crate) fn at_loop(self, label: Option<&str>) -> LoopStep {
        match self {
            Self::Normal => LoopStep::Next,
            Self::Break(target) if Self::matches(&target, label) => LoopStep::Exit,
            Self::Continue(target) if Self::matches(&target, label) => LoopStep::Next,
            other => LoopStep::Propagate(other),
        }
    }

    fn matches(target: &JumpTarget, label: Option<&str>) -> bool {
        match target {
            JumpTarget::Innermost => true,
            JumpTarget::Label(wanted) => label.is_some_and(|l| l.eq_ignore_ascii_case(wanted)),
            JumpTarget::Proc | JumpTarget::Repeat => false,
        }
    }
}

/// Why expression evaluation stopped early.
#[derive(Debug)]
pub enum Unwind {
    /// A control flow raised from inside the expression.
    Signal(Flow),
    /// A runtime fault.
    Fault(Error),
}

impl Unwind {
    /// Attaches a source location to a fault, keeping any inner one.
    #[must_use]
    pub fn at(self, location: &SourceLocation) -> Self {
        match self {
            Self::Fault(err) => Self::Fault(err.at(location)),
            signal @ Self::Signal(_) => signal,
        }
    }

    /// Adds a call-stack frame to a fault.
    #[must_use]
    pub fn in_frame(self, frame: impl Into<String>) -> Self {
        match self {
            Self::Fault(err) => Self::Fault(err.in_frame(frame)),
            signal @ Self::Signal(_) => signal,
        }
    }
}

impl From<Error> for Unwind {
    fn from(err: Error) -> Self {
        Self::Fault(err)
    }
}

/// Result of evaluating an expression.
pub type Eval<T> = std::result::Result<T, Unwind>;

/// Publicly visible result of evaluating an expression or calling a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The expression produced a value.
    Value(i32),
    /// The expression raised a control flow that nothing absorbed.
    Signal(Flow),
}

impl Outcome {
    /// The produced value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<i32> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Signal(_) => None,
        }
    }
}
