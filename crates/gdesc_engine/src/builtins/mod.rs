//! Built-in functions.
//!
//! The table is built explicitly at startup and checked once against
//! [`GRAMMAR_BUILTINS`]. Built-ins receive their arguments unevaluated so
//! that those which treat identifiers or text literals specially can do so.

#![allow(clippy::unnecessary_wraps)]

mod flags;
mod inventory;
mod movement;
mod output;
mod random;
mod stubs;
mod words;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use gdesc_foundation::{Error, ErrorKind, Result, SourceLocation};
use gdesc_world::{Expr, GRAMMAR_BUILTINS, JumpTarget};

use crate::console::Console;
use crate::engine::Engine;
use crate::signal::{Eval, Flow, Unwind};

/// Signature of a built-in function.
pub type Builtin<C> = fn(&mut Engine<C>, &[Expr], &SourceLocation) -> Eval<i32>;

/// Name-to-function table of built-ins.
pub struct BuiltinTable<C: Console> {
    functions: HashMap<String, Builtin<C>>,
}

impl<C: Console> BuiltinTable<C> {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// The full built-in library.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();

        // Input and randomness
        table.insert("input", words::input);
        table.insert("in", random::in_range);
        table.insert("chance", random::chance);
        table.insert("getrandom", random::get_random);

        // Location tests
        table.insert("have", inventory::have);
        table.insert("ishere", inventory::is_here);
        table.insert("isnear", inventory::is_near);
        table.insert("isat", movement::is_at);
        table.insert("atplace", movement::at_place);

        // Flags
        table.insert("isflag", flags::is_flag);
        table.insert("setflag", flags::set_flag);
        table.insert("clearflag", flags::clear_flag);

        // Word matching
        table.insert("varis", words::var_is);
        table.insert("key", words::key);
        table.insert("anyof", words::any_of);
        table.insert("isverb", words::is_verb);

        // Movement and inventory
        table.insert("apport", movement::apport);
        table.insert("get", inventory::get);
        table.insert("drop", inventory::drop);
        table.insert("goto", movement::goto);
        table.insert("move", movement::move_to);

        // Output and control
        table.insert("say", output::say);
        table.insert("quip", output::quip);
        table.insert("respond", output::respond);
        table.insert("describe", output::describe);
        table.insert("stop", output::stop);

        // No observable effect
        for name in stubs::NAMES {
            table.insert(name, stubs::no_op);
        }

        table
    }

    /// Adds or replaces a built-in.
    pub fn insert(&mut self, name: &str, function: Builtin<C>) {
        self.functions.insert(name.to_lowercase(), function);
    }

    /// Removes a built-in, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Builtin<C>> {
        self.functions.remove(&name.to_lowercase())
    }

    /// Looks a built-in up, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Builtin<C>> {
        self.functions.get(&name.to_lowercase()).copied()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Checks the table against the grammar's built-in names.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BuiltinMismatch`] listing names the grammar
    /// declares that are missing here, and names registered here that the
    /// grammar does not know.
    pub fn validate(&self) -> Result<()> {
        let grammar: BTreeSet<&str> = GRAMMAR_BUILTINS.iter().copied().collect();
        let registered: BTreeSet<&str> = self.functions.keys().map(String::as_str).collect();
        let missing: Vec<String> = grammar
            .difference(&registered)
            .map(|s| (*s).to_string())
            .collect();
        let unknown: Vec<String> = registered
            .difference(&grammar)
            .map(|s| (*s).to_string())
            .collect();
        if missing.is_empty() && unknown.is_empty() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::BuiltinMismatch { missing, unknown }))
        }
    }
}

impl<C: Console> Default for BuiltinTable<C> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<C: Console> Clone for BuiltinTable<C> {
    fn clone(&self) -> Self {
        Self {
            functions: self.functions.clone(),
        }
    }
}

impl<C: Console> fmt::Debug for BuiltinTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Faults unless at least `min` arguments were passed.
pub(crate) fn require(name: &str, args: &[Expr], min: usize) -> Eval<()> {
    if args.len() < min {
        return Err(Error::arity_mismatch(name, format!("at least {min}"), args.len()).into());
    }
    Ok(())
}

/// The signal a built-in raises once the player's command is fully handled.
pub(crate) fn end_turn() -> Unwind {
    Unwind::Signal(Flow::Break(JumpTarget::Repeat))
}

pub(crate) const fn truth(value: bool) -> i32 {
    if value { 1 } else { 0 }
}
