//! Error types for the gdesc system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::location::SourceLocation;

/// The main error type for gdesc operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the source location of the fault, keeping the innermost one
    /// if a location is already present.
    #[must_use]
    pub fn at(mut self, location: &SourceLocation) -> Self {
        let context = self.context.get_or_insert_with(ErrorContext::new);
        if context.location.is_none() {
            context.location = Some(location.clone());
        }
        self
    }

    /// Appends a call-stack frame as the error propagates outward.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(ErrorContext::new)
            .stack
            .push(frame.into());
        self
    }

    /// Returns the source location attached to this error, if any.
    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        self.context.as_ref().and_then(|c| c.location.as_ref())
    }

    /// Returns the individual errors of a [`ErrorKind::LoadFailed`] error.
    #[must_use]
    pub fn load_errors(&self) -> &[Error] {
        match &self.kind {
            ErrorKind::LoadFailed(errors) => errors,
            _ => &[],
        }
    }

    /// Creates a duplicate identifier error.
    #[must_use]
    pub fn duplicate_identifier(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateIdentifier(name.into()))
    }

    /// Creates an undefined identifier error.
    #[must_use]
    pub fn undefined_identifier(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedIdentifier(name.into()))
    }

    /// Creates an invalid refno error.
    #[must_use]
    pub fn invalid_refno(refno: i32) -> Self {
        Self::new(ErrorKind::InvalidRefno(refno))
    }

    /// Creates an arity mismatch error for a built-in.
    #[must_use]
    pub fn arity_mismatch(name: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            name: name.into(),
            expected: expected.into(),
            actual,
        })
    }

    /// Creates a malformed template error.
    #[must_use]
    pub fn malformed_template(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedTemplate(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    // -------------------------------------------------------------------------
    // Load-time errors
    // -------------------------------------------------------------------------
    /// The same identifier was declared more than once.
    #[error("duplicate identifier \"{0}\"")]
    DuplicateIdentifier(String),

    /// The built-in table and the grammar's built-in names disagree.
    #[error("built-in table mismatch: missing {missing:?}, not in grammar {unknown:?}")]
    BuiltinMismatch {
        /// Names the grammar declares but the engine does not implement.
        missing: Vec<String>,
        /// Names the engine implements but the grammar does not declare.
        unknown: Vec<String>,
    },

    /// A declaration refers to something that does not exist.
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// One or more load-time errors prevented the world from starting.
    #[error("load failed with {} error(s)", .0.len())]
    LoadFailed(Vec<Error>),

    // -------------------------------------------------------------------------
    // Runtime faults
    // -------------------------------------------------------------------------
    /// A refno outside every category range was used.
    #[error("refno {0} is not valid")]
    InvalidRefno(i32),

    /// A dereference pointed outside the variable range.
    #[error("refno {0} is not a variable refno")]
    NotAVariable(i32),

    /// Identifier is not declared locally or globally.
    #[error("undefined identifier: {0}")]
    UndefinedIdentifier(String),

    /// Array is not declared.
    #[error("undefined array: {0}")]
    UndefinedArray(String),

    /// Array index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: i32,
        /// The declared length of the array.
        length: usize,
    },

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Expression cannot be assigned to.
    #[error("cannot assign to {0}")]
    InvalidAssignment(String),

    /// Local variable holds a value of the wrong kind for the operation.
    #[error("invalid type for local variable {0}")]
    LocalType(String),

    /// Name does not resolve to anything callable.
    #[error("{0} does not contain a valid function reference")]
    NotCallable(String),

    /// Wrong number of arguments to a built-in.
    #[error("arity mismatch in {name}: expected {expected}, got {actual}")]
    ArityMismatch {
        /// The built-in name.
        name: String,
        /// Description of expected arity.
        expected: String,
        /// Actual number of arguments.
        actual: usize,
    },

    /// Text template could not be expanded.
    #[error("malformed text template: {0}")]
    MalformedTemplate(String),

    /// Text expansion or call nesting exceeded the configured limit.
    #[error("nesting limit exceeded: {0}")]
    LimitExceeded(String),

    /// A local variable was declared with no open block scope.
    #[error("no block scope defined")]
    NoBlockScope,

    // -------------------------------------------------------------------------
    // Host errors
    // -------------------------------------------------------------------------
    /// Console or file I/O failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// World model could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source location of the faulting node.
    pub location: Option<SourceLocation>,
    /// Call frames the fault propagated through, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "at {location}")?;
        }
        for frame in &self.stack {
            write!(f, "\n  in {frame}")?;
        }
        Ok(())
    }
}

/// Result type alias using the gdesc error.
pub type Result<T> = std::result::Result<T, Error>;
