//! The engine: bound world, mutable state, scopes, and I/O in one place.
//!
//! All evaluation threads through `&mut Engine`; there is no global state.
//! The bound world sits behind an `Arc` so code blocks can be borrowed from
//! it while the engine itself is mutated.

use std::sync::Arc;

use gdesc_foundation::{Error, ErrorKind, Result};
use gdesc_world::{Block, BoundWorld, Expr, Refno, WorldModel, WorldState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::builtins::BuiltinTable;
use crate::config::EngineConfig;
use crate::console::Console;
use crate::scope::ScopeStack;
use crate::signal::{Eval, Flow, Outcome, Unwind};

/// A running game.
pub struct Engine<C: Console> {
    pub(crate) world: Arc<BoundWorld>,
    pub(crate) state: WorldState,
    pub(crate) scopes: ScopeStack,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) console: C,
    pub(crate) config: EngineConfig,
    pub(crate) builtins: BuiltinTable<C>,
    pub(crate) halted: bool,
}

impl<C: Console> Engine<C> {
    /// Binds a world model and prepares it to run with the standard built-ins.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::LoadFailed`] if binding or state resolution
    /// fails, or [`ErrorKind::BuiltinMismatch`] if the built-in table does
    /// not match the grammar.
    pub fn new(model: WorldModel, console: C, config: EngineConfig) -> Result<Self> {
        Self::with_builtins(model, console, config, BuiltinTable::standard())
    }

    /// Like [`Engine::new`], with a caller-supplied built-in table.
    ///
    /// # Errors
    ///
    /// See [`Engine::new`].
    pub fn with_builtins(
        model: WorldModel,
        console: C,
        config: EngineConfig,
        builtins: BuiltinTable<C>,
    ) -> Result<Self> {
        builtins.validate()?;
        let world = BoundWorld::bind(model)?;
        let state = WorldState::new(&world);
        let mut engine = Self {
            world: Arc::new(world),
            state,
            scopes: ScopeStack::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            console,
            config,
            builtins,
            halted: false,
        };
        engine.resolve_states()?;
        debug!(
            end = engine.world.space().end(),
            "world bound"
        );
        Ok(engine)
    }

    /// Gives every state its value, in declaration order.
    ///
    /// A state without an initializer takes the previous value plus one;
    /// the counter starts at 0.
    fn resolve_states(&mut self) -> Result<()> {
        let world = Arc::clone(&self.world);
        let mut errors = Vec::new();
        let mut next: i32 = 0;
        for (index, decl) in world.states().iter().enumerate() {
            let value = match &decl.value {
                None => next,
                Some(expr) => match self.evaluate(expr) {
                    Ok(Outcome::Value(v)) => v,
                    Ok(Outcome::Signal(flow)) => {
                        errors.push(
                            Error::new(ErrorKind::InvalidDeclaration(format!(
                                "state {} initializer raised {flow:?}",
                                decl.name
                            )))
                            .at(&decl.location),
                        );
                        next
                    }
                    Err(err) => {
                        errors.push(err.at(&decl.location).in_frame(format!("state {}", decl.name)));
                        next
                    }
                },
            };
            self.state.set_state(index, value);
            next = value.wrapping_add(1);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::LoadFailed(errors)))
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The bound world.
    #[must_use]
    pub fn world(&self) -> &BoundWorld {
        &self.world
    }

    /// The mutable runtime state.
    #[must_use]
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Mutable access to the runtime state.
    pub fn state_mut(&mut self) -> &mut WorldState {
        &mut self.state
    }

    /// The console.
    #[must_use]
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Mutable access to the console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Consumes the engine, returning its console.
    #[must_use]
    pub fn into_console(self) -> C {
        self.console
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns true once `stop` has run or input is exhausted.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Marks the engine halted.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Value of a global variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<i32> {
        let refno = self.world.refno_of(name)?;
        self.state.variable(refno)
    }

    /// Stores into a global variable by name. Returns false if `name` is not a variable.
    pub fn set_variable(&mut self, name: &str, value: i32) -> bool {
        match self.world.refno_of(name) {
            Some(refno) => self.state.set_variable(refno, value),
            None => false,
        }
    }

    /// Resolved value of a named state.
    #[must_use]
    pub fn state_value(&self, name: &str) -> Option<i32> {
        match self.world.identifier(name)? {
            gdesc_world::Identifier::State(index) => self.state.state(index),
            _ => None,
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Evaluates an expression in a fresh function scope.
    ///
    /// # Errors
    ///
    /// Returns the runtime fault the expression raised.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Outcome> {
        let result = self.in_function(|engine| engine.eval(expr));
        Self::outcome(result)
    }

    /// Calls a built-in, proc, or entity by name in a fresh function scope.
    ///
    /// # Errors
    ///
    /// Returns the runtime fault the call raised.
    pub fn invoke(&mut self, name: &str, args: &[Expr]) -> Result<Outcome> {
        let location = gdesc_foundation::SourceLocation::builtin();
        let result = self.in_function(|engine| engine.call(name, args, &location));
        Self::outcome(result)
    }

    /// Runs a block in a fresh function scope, the way an init block runs.
    ///
    /// # Errors
    ///
    /// Returns the runtime fault the block raised.
    pub fn execute(&mut self, block: &Block) -> Result<Flow> {
        self.in_function(|engine| engine.exec_seq(&block.statements))
    }

    fn outcome(result: Eval<i32>) -> Result<Outcome> {
        match result {
            Ok(value) => Ok(Outcome::Value(value)),
            Err(Unwind::Signal(flow)) => Ok(Outcome::Signal(flow)),
            Err(Unwind::Fault(err)) => Err(err),
        }
    }

    // =========================================================================
    // Scope helpers
    // =========================================================================

    /// Runs `f` inside a new function scope, popping it on every exit path.
    pub(crate) fn in_function<T, E: From<Error>>(
        &mut self,
        f: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        if self.scopes.depth() >= self.config.max_call_depth {
            return Err(Error::new(ErrorKind::LimitExceeded(format!(
                "call depth {}",
                self.config.max_call_depth
            )))
            .into());
        }
        self.scopes.push_function();
        let result = f(self);
        self.scopes.pop_function();
        result
    }

    /// Runs `f` inside a new block scope, popping it on every exit path.
    pub(crate) fn in_block<T, E: From<Error>>(
        &mut self,
        f: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        self.scopes.push_block()?;
        let result = f(self);
        self.scopes.pop_block();
        result
    }

    // =========================================================================
    // Shared lookups
    // =========================================================================

    /// Current value of a default variable such as `arg1` or `here`.
    pub(crate) fn default_var(&self, refno: Refno) -> i32 {
        self.state.variable(refno).unwrap_or(0)
    }

    /// Bit of a named flag, if the game declares it.
    pub(crate) fn flag_bit(&self, name: &str) -> Option<i32> {
        self.world.flag_bit(name)
    }

    /// Resolved value of a state by name, or `fallback` if the game lacks it.
    pub(crate) fn state_or(&self, name: &str, fallback: i32) -> i32 {
        self.state_value(name).unwrap_or(fallback)
    }
}
