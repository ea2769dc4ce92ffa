//! Lexical scopes for local variables.
//!
//! A stack of function scopes, each a stack of block scopes. Lookups only
//! search the current function scope, innermost block first, so a callee
//! never sees its caller's locals.

use std::collections::HashMap;

use gdesc_foundation::{Error, ErrorKind, Result};
use gdesc_world::Refno;

/// The value held by a local variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalValue {
    /// A plain integer.
    Int(i32),
    /// A text passed by literal; reads as its refno.
    Text(Refno),
}

impl LocalValue {
    /// The integer a read of this local produces.
    #[must_use]
    pub const fn as_int(self) -> i32 {
        match self {
            Self::Int(v) => v,
            Self::Text(refno) => refno.get(),
        }
    }
}

type BlockScope = HashMap<String, LocalValue>;

/// Nested function and block scopes.
#[derive(Clone, Debug, Default)]
pub struct ScopeStack {
    functions: Vec<Vec<BlockScope>>,
}

impl ScopeStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open function scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.functions.len()
    }

    /// Enters a function call with one empty block scope.
    pub fn push_function(&mut self) {
        self.functions.push(vec![BlockScope::new()]);
    }

    /// Leaves the current function call.
    pub fn pop_function(&mut self) {
        self.functions.pop();
    }

    /// Opens a block scope in the current function.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NoBlockScope`] if no function scope is open.
    pub fn push_block(&mut self) -> Result<()> {
        self.functions
            .last_mut()
            .ok_or_else(|| Error::new(ErrorKind::NoBlockScope))?
            .push(BlockScope::new());
        Ok(())
    }

    /// Closes the innermost block scope of the current function.
    pub fn pop_block(&mut self) {
        if let Some(blocks) = self.functions.last_mut() {
            blocks.pop();
        }
    }

    /// Declares a local in the innermost block scope, shadowing outer ones.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NoBlockScope`] if no block scope is open.
    pub fn declare(&mut self, name: &str, value: LocalValue) -> Result<()> {
        let block = self
            .functions
            .last_mut()
            .and_then(|blocks| blocks.last_mut())
            .ok_or_else(|| Error::new(ErrorKind::NoBlockScope))?;
        block.insert(name.to_lowercase(), value);
        Ok(())
    }

    /// Looks a local up in the current function scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<LocalValue> {
        let key = name.to_lowercase();
        self.functions
            .last()?
            .iter()
            .rev()
            .find_map(|block| block.get(&key).copied())
    }

    /// Stores into an existing local. Returns false if no such local is visible.
    pub fn set(&mut self, name: &str, value: i32) -> bool {
        let key = name.to_lowercase();
        let Some(blocks) = self.functions.last_mut() else {
            return false;
        };
        match blocks.iter_mut().rev().find_map(|block| block.get_mut(&key)) {
            Some(slot) => {
                *slot = LocalValue::Int(value);
                true
            }
            None => false,
        }
    }
}
