//! gdesc - Text adventure runtime
//!
//! This crate re-exports all layers of the gdesc system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: gdesc_runtime    - Terminal console, world loading, CLI
//! Layer 2: gdesc_engine     - Evaluator, dispatch, text expansion, turn driver
//! Layer 1: gdesc_world      - AST, world model, refnos, binding, state
//! Layer 0: gdesc_foundation - Errors and source locations
//! ```

pub use gdesc_engine as engine;
pub use gdesc_foundation as foundation;
pub use gdesc_runtime as runtime;
pub use gdesc_world as world;
