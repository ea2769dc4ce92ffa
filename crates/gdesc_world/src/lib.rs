//! World model and runtime state for gdesc.
//!
//! This crate provides:
//! - [`ast`] - Statement and expression nodes for game code
//! - [`WorldModel`] and [`WorldBuilder`] - Declarations as a front end produces them
//! - [`RefnoSpace`] - The single integer handle space for declared entities
//! - [`BoundWorld`] - Refnos assigned, identifiers resolved, duplicates rejected
//! - [`WorldState`] - Variable cells, object locations, arrays, flags, and states

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod bind;
pub mod builder;
pub mod flags;
pub mod grammar;
pub mod model;
pub mod refno;
pub mod state;
pub mod visitor;

pub use ast::{AssignOp, BinaryOp, Block, Declarator, Expr, ExprKind, JumpTarget, Stmt, StmtKind, UnaryOp};
pub use bind::{BoundWorld, DefaultRefnos, Identifier, Node};
pub use builder::WorldBuilder;
pub use flags::FlagStore;
pub use grammar::GRAMMAR_BUILTINS;
pub use model::{
    ActionCode, ActionDecl, ArrayDecl, Command, FlagCategory, FlagDecl, GameInfo, ObjectDecl,
    PlaceDecl, ProcDecl, StateDecl, TextDecl, TextMethod, VariableDecl, VerbDecl, WorldModel,
};
pub use refno::{Category, Refno, RefnoSpace};
pub use state::WorldState;
