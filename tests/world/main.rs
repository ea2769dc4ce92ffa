//! Integration tests for Layer 1: World
//!
//! Tests for refno assignment, binding, flags, and mutable world state.

mod binding;
mod refnos;
mod state;
