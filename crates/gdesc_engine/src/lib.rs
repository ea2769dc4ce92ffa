//! Execution engine for gdesc.
//!
//! This crate provides:
//! - [`Engine`] - Owns a bound world and its runtime state, and runs game code
//! - [`Flow`] and [`Outcome`] - How statements and calls finish
//! - [`BuiltinTable`] - The built-in function library
//! - [`Console`] - Line I/O, with [`ScriptedConsole`] for tests and batch runs
//! - [`EngineConfig`] - Seed, prompt, and nesting limits
//!
//! # Example
//!
//! ```
//! use gdesc_engine::{Engine, EngineConfig, ScriptedConsole};
//! use gdesc_world::{Block, Expr, Stmt, WorldBuilder};
//!
//! let model = WorldBuilder::new()
//!     .text("hello", "Hello, [world/there]!")
//!     .init(Block::new(vec![Stmt::expr(Expr::call(
//!         "say",
//!         vec![Expr::ident("hello"), Expr::int(1)],
//!     ))]))
//!     .build();
//!
//! let mut engine = Engine::new(model, ScriptedConsole::default(), EngineConfig::default())?;
//! engine.run_inits()?;
//! assert_eq!(engine.console().output(), ["Hello, there!"]);
//! # Ok::<(), gdesc_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtins;
pub mod config;
pub mod console;
mod dispatch;
pub mod driver;
pub mod engine;
mod eval;
mod exec;
pub mod input;
pub mod scope;
pub mod signal;
pub mod text;

pub use builtins::{Builtin, BuiltinTable};
pub use config::EngineConfig;
pub use console::{Console, ReadResult, ScriptedConsole};
pub use driver::PassOutcome;
pub use engine::Engine;
pub use eval::apply_binary;
pub use input::tokenize;
pub use scope::{LocalValue, ScopeStack};
pub use signal::{Eval, Flow, Outcome, Unwind};
pub use text::Detail;
