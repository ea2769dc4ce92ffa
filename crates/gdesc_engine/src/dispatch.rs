//! Call resolution.
//!
//! A call by name resolves, in order, to:
//!
//! 1. a built-in,
//! 2. a local holding an object refno, which runs that object's command,
//! 3. a global variable, re-dispatched on the category of its value,
//! 4. a proc,
//! 5. a place or object, which runs its command for the verb in `arg1`,
//! 6. a verb, which runs its action.
//!
//! Anything else is not callable.

use std::sync::Arc;

use gdesc_foundation::{Error, ErrorKind, SourceLocation};
use gdesc_world::{Block, Category, Expr, ExprKind, Identifier, JumpTarget, Refno};
use tracing::debug;

use crate::console::Console;
use crate::engine::Engine;
use crate::scope::LocalValue;
use crate::signal::{Eval, Flow, Unwind};

impl<C: Console> Engine<C> {
    /// Calls `name` with `args`.
    #[tracing::instrument(level = "debug", skip(self, args, location))]
    pub(crate) fn call(&mut self, name: &str, args: &[Expr], location: &SourceLocation) -> Eval<i32> {
        if let Some(builtin) = self.builtins.get(name) {
            return builtin(self, args, location);
        }

        let space = *self.world.space();
        if let Some(local) = self.scopes.get(name) {
            let target = Refno::new(local.as_int());
            if space.contains(Category::Object, target) {
                debug!(%target, "local object dispatch");
                self.run_handler(target)?;
                return Ok(0);
            }
        }

        let identifier = self
            .world
            .identifier(name)
            .ok_or_else(|| Error::undefined_identifier(name))?;
        match identifier {
            Identifier::Variable(index) => {
                let value = Refno::new(self.default_var(space.refno(Category::Variable, index)));
                match space.category_of(value) {
                    Some(Category::Place) => {
                        debug!(%value, "indirect place dispatch");
                        self.run_handler(value)?;
                    }
                    Some(Category::Verb) => {
                        debug!(%value, "indirect verb dispatch");
                        self.run_action(value)?;
                    }
                    _ => debug!(%value, "variable value is not callable"),
                }
                Ok(0)
            }
            Identifier::Proc(index) => self.call_proc(index, args),
            Identifier::Place(index) => {
                self.run_handler(space.refno(Category::Place, index))?;
                Ok(0)
            }
            Identifier::Object(index) => {
                self.run_handler(space.refno(Category::Object, index))?;
                Ok(0)
            }
            Identifier::Verb(index) => {
                self.run_action(space.refno(Category::Verb, index))?;
                Ok(0)
            }
            _ => Err(Error::new(ErrorKind::NotCallable(name.to_string())).into()),
        }
    }

    /// Runs a user proc.
    ///
    /// Arguments are evaluated in the caller's scope. A text literal argument
    /// binds as text; missing arguments leave their parameters undeclared.
    pub(crate) fn call_proc(&mut self, index: usize, args: &[Expr]) -> Eval<i32> {
        let world = Arc::clone(&self.world);
        let proc = world
            .proc(index)
            .ok_or_else(|| Error::internal(format!("proc index {index} out of range")))?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(match &arg.kind {
                ExprKind::Text(text) => {
                    LocalValue::Text(self.world.literal(text).unwrap_or(Refno::NONE))
                }
                _ => LocalValue::Int(self.eval(arg)?),
            });
        }

        let flow = self
            .in_function(|engine| {
                for (param, value) in proc.params.iter().zip(values) {
                    engine.scopes.declare(param, value)?;
                }
                engine.exec_seq(&proc.body.statements)
            })
            .map_err(|err| Unwind::Fault(err.in_frame(format!("proc {}", proc.name))))?;

        match flow {
            Flow::Normal => Ok(0),
            Flow::Return(value) => Ok(value),
            Flow::Break(JumpTarget::Proc | JumpTarget::Innermost)
            | Flow::Continue(JumpTarget::Proc | JumpTarget::Innermost) => Ok(0),
            other => Err(Unwind::Signal(other)),
        }
    }

    /// Runs the command a place or object has for the verb in `arg1`.
    pub(crate) fn run_handler(&mut self, owner: Refno) -> Eval<()> {
        let world = Arc::clone(&self.world);
        let verb = Refno::new(self.default_var(world.defaults().arg1));
        if !world.space().contains(Category::Verb, verb) {
            return Ok(());
        }
        let Some(body) = world.command(owner, verb) else {
            return Ok(());
        };
        let frame = match world.space().category_of(owner) {
            Some(Category::Place) => "place",
            _ => "object",
        };
        let name = world
            .node(owner)
            .map_or_else(String::new, |node| node_name(&node));
        debug!(%owner, %verb, "running {frame} command");
        self.run_absorbing(body, Some(owner))
            .map_err(|u| u.in_frame(format!("{frame} {name}")))
    }

    /// Runs every matching code block of a verb's action.
    pub(crate) fn run_action(&mut self, verb: Refno) -> Eval<()> {
        let world = Arc::clone(&self.world);
        let Some(action) = world.action(verb) else {
            return Ok(());
        };
        let arg2 = self.default_var(world.defaults().arg2);
        for code in &action.codes {
            if let Some(constraint) = &code.arg2 {
                let wanted = self
                    .ident_value(constraint)
                    .map_err(|err| err.in_frame(format!("action {}", action.verb)))?;
                if wanted != arg2 {
                    continue;
                }
            }
            debug!(verb = %action.verb, arg2 = ?code.arg2, "running action code");
            let flow = self
                .in_function(|engine| engine.exec_seq(&code.body.statements))
                .map_err(|err| err.in_frame(format!("action {}", action.verb)))?;
            match flow {
                Flow::Return(_) => break,
                flow if flow.targets_repeat() => return Err(Unwind::Signal(flow)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Runs a command block in its own function scope with `this` bound,
    /// absorbing every flow except those aimed at the turn driver.
    fn run_absorbing(&mut self, body: &Block, this: Option<Refno>) -> Eval<()> {
        let flow = self.in_function(|engine| {
            if let Some(this) = this {
                engine.scopes.declare("this", LocalValue::Int(this.get()))?;
            }
            engine.exec_seq(&body.statements)
        })?;
        if flow.targets_repeat() {
            return Err(Unwind::Signal(flow));
        }
        Ok(())
    }
}

fn node_name(node: &gdesc_world::Node<'_>) -> String {
    use gdesc_world::Node;
    match node {
        Node::Object(object) => object.name.clone(),
        Node::Place(place) => place.name.clone(),
        Node::Variable(variable) => variable.name.clone(),
        Node::Text(text) => text.name.clone().unwrap_or_default(),
        Node::Verb(verb) => verb.name().to_string(),
    }
}
