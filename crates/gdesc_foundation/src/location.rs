//! Source location tracking.
//!
//! `SourceLocation` records where a declaration or AST node came from so
//! runtime faults can point back at game source.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in game source.
///
/// Nodes synthesized by the engine itself (the default world elements, for
/// instance) carry a location with no file and line 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceLocation {
    /// Source file name, if known.
    pub file: Option<Arc<str>>,
    /// 1-based line number (0 when synthesized).
    pub line: u32,
    /// 1-based column number (0 when synthesized).
    pub column: u32,
}

impl SourceLocation {
    /// Creates a location in the given file.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    /// Creates a location with a line and column but no file.
    #[must_use]
    pub const fn at(line: u32, column: u32) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Location used for engine-synthesized nodes.
    #[must_use]
    pub const fn builtin() -> Self {
        Self::at(0, 0)
    }

    /// Returns true if this location was synthesized rather than parsed.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        self.file.is_none() && self.line == 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            return write!(f, "<builtin>");
        }
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_file() {
        let loc = SourceLocation::new("main.gdesc", 12, 4);
        assert_eq!(loc.to_string(), "main.gdesc:12:4");
    }

    #[test]
    fn display_without_file() {
        assert_eq!(SourceLocation::at(3, 9).to_string(), "3:9");
    }

    #[test]
    fn builtin_location() {
        let loc = SourceLocation::builtin();
        assert!(loc.is_builtin());
        assert_eq!(loc.to_string(), "<builtin>");
        assert!(!SourceLocation::at(1, 1).is_builtin());
    }
}
