//! World model declarations.
//!
//! This is what a front end produces from game source: ordered collections
//! of declarations plus the code blocks attached to them. Declaration order
//! is preserved per collection because refno assignment, state resolution,
//! and init/repeat execution all depend on it.

use gdesc_foundation::SourceLocation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::{Block, Expr};

/// Name, version, author, and date shown when a game starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameInfo {
    /// Game title.
    pub name: String,
    /// Version string.
    pub version: String,
    /// Author credit.
    pub author: String,
    /// Creation date.
    pub date: String,
}

/// A verb-specific block attached to a place or object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Canonical verb word this command answers to.
    pub verb: String,
    /// Code run when the player uses that verb.
    pub body: Block,
}

/// A portable object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectDecl {
    /// Identifier.
    pub name: String,
    /// Extra words the player may use for this object.
    pub words: Vec<String>,
    /// Whether the name and words are player vocabulary.
    pub in_vocabulary: bool,
    /// Text shown when the object is carried.
    pub inventory: String,
    /// Text shown once the object has been seen.
    pub brief: String,
    /// Text shown the first time, or when a long description is requested.
    pub long: Option<String>,
    /// Per-verb command table.
    pub commands: Vec<Command>,
    /// Declaration site.
    pub location: SourceLocation,
}

/// A location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceDecl {
    /// Identifier, also a vocabulary word.
    pub name: String,
    /// Extra vocabulary words that name this place.
    pub words: Vec<String>,
    /// Text shown on later visits.
    pub brief: String,
    /// Text shown on the first visit, or when requested.
    pub long: Option<String>,
    /// Per-verb command table.
    pub commands: Vec<Command>,
    /// Declaration site.
    pub location: SourceLocation,
}

/// A global integer variable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDecl {
    /// Identifier.
    pub name: String,
    /// Declaration site.
    pub location: SourceLocation,
}

/// A fixed-size integer array.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayDecl {
    /// Identifier.
    pub name: String,
    /// Number of cells.
    pub size: usize,
    /// Declaration site.
    pub location: SourceLocation,
}

/// How a text with several alternatives picks one on repeated access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextMethod {
    /// Advance each time, staying on the last alternative.
    Increment,
    /// Advance each time, wrapping to the first.
    Cycle,
    /// Pick pseudo-randomly.
    Random,
    /// Use the index supplied by the caller.
    Assigned,
}

/// A text template, named or anonymous.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextDecl {
    /// Identifier; `None` for texts created from literals in code.
    pub name: Option<String>,
    /// Alternatives, in declaration order. Never empty.
    pub alternatives: Vec<String>,
    /// Selection method when there is more than one alternative.
    pub method: Option<TextMethod>,
    /// Declaration site.
    pub location: SourceLocation,
}

impl TextDecl {
    /// Creates an anonymous single-alternative text.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            name: None,
            alternatives: vec![text.into()],
            method: None,
            location: SourceLocation::builtin(),
        }
    }
}

/// A verb and its synonyms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerbDecl {
    /// Canonical word first, then synonyms.
    pub words: Vec<String>,
    /// Declaration site.
    pub location: SourceLocation,
}

impl VerbDecl {
    /// The canonical word.
    #[must_use]
    pub fn name(&self) -> &str {
        self.words.first().map_or("", String::as_str)
    }
}

/// Which entities a flag declaration applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlagCategory {
    /// Object flags.
    Object,
    /// Place flags.
    Place,
    /// Variable flags.
    Variable,
}

/// Named flag bits for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagDecl {
    /// Category the bits belong to.
    pub category: FlagCategory,
    /// Flag names; bit positions follow order within the category.
    pub names: Vec<String>,
    /// Declaration site.
    pub location: SourceLocation,
}

/// One block of an action, with its optional second-word constraint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionCode {
    /// Identifier whose value must equal `arg2` for this block to run.
    pub arg2: Option<String>,
    /// Code to run.
    pub body: Block,
}

/// All blocks triggered by one verb.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionDecl {
    /// Canonical verb word.
    pub verb: String,
    /// Blocks in declaration order.
    pub codes: Vec<ActionCode>,
    /// Declaration site of the first block.
    pub location: SourceLocation,
}

/// A user procedure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcDecl {
    /// Identifier.
    pub name: String,
    /// Formal parameter names.
    pub params: Vec<String>,
    /// Procedure body.
    pub body: Block,
    /// Declaration site.
    pub location: SourceLocation,
}

/// A named integer constant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateDecl {
    /// Identifier.
    pub name: String,
    /// Explicit value; without one the state takes the previous value plus one.
    pub value: Option<Expr>,
    /// Declaration site.
    pub location: SourceLocation,
}

/// Everything a game declares.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldModel {
    /// Title banner data.
    pub info: GameInfo,
    /// Words dropped from player input.
    pub noise: Vec<String>,
    /// Objects in declaration order.
    pub objects: Vec<ObjectDecl>,
    /// Places in declaration order.
    pub places: Vec<PlaceDecl>,
    /// Variables in declaration order.
    pub variables: Vec<VariableDecl>,
    /// Arrays.
    pub arrays: Vec<ArrayDecl>,
    /// Named texts in declaration order.
    pub texts: Vec<TextDecl>,
    /// Verbs in declaration order.
    pub verbs: Vec<VerbDecl>,
    /// Flag declarations.
    pub flags: Vec<FlagDecl>,
    /// Actions, one per verb.
    pub actions: Vec<ActionDecl>,
    /// Procedures.
    pub procs: Vec<ProcDecl>,
    /// One-time blocks in declaration order.
    pub inits: Vec<Block>,
    /// Per-turn blocks in declaration order.
    pub repeats: Vec<Block>,
    /// States in declaration order.
    pub states: Vec<StateDecl>,
}
