//! Statement execution.

use gdesc_foundation::Result;
use gdesc_world::{Declarator, Expr, ExprKind, Refno, Stmt, StmtKind};

use crate::console::Console;
use crate::engine::Engine;
use crate::scope::LocalValue;
use crate::signal::{Eval, Flow, LoopStep, Unwind};

/// Unwraps an expression result inside a statement, turning a raised flow
/// into the statement's own completion.
macro_rules! value {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(Unwind::Signal(flow)) => return Ok(flow),
            Err(Unwind::Fault(err)) => return Err(err),
        }
    };
}

/// Unwraps a loop step: `Exit` leaves the loop, `Propagate` leaves the statement.
macro_rules! step {
    ($flow:expr, $label:expr) => {
        match $flow.at_loop($label) {
            LoopStep::Next => {}
            LoopStep::Exit => break,
            LoopStep::Propagate(flow) => return Ok(flow),
        }
    };
}

impl<C: Console> Engine<C> {
    /// Runs statements in order, stopping at the first abnormal completion.
    pub(crate) fn exec_seq(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            let flow = self.exec(stmt)?;
            if !flow.is_normal() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    pub(crate) fn exec(&mut self, stmt: &Stmt) -> Result<Flow> {
        self.exec_kind(stmt).map_err(|err| err.at(&stmt.location))
    }

    fn exec_kind(&mut self, stmt: &Stmt) -> Result<Flow> {
        match &stmt.kind {
            StmtKind::Empty => Ok(Flow::Normal),
            StmtKind::Block(block) => self.in_block(|engine| engine.exec_seq(&block.statements)),
            StmtKind::Expr(expr) => {
                value!(self.eval(expr));
                Ok(Flow::Normal)
            }
            StmtKind::Local(declarators) => {
                for declarator in declarators {
                    value!(self.declare_local(declarator));
                }
                Ok(Flow::Normal)
            }
            StmtKind::If {
                conditions,
                branches,
            } => {
                for (index, condition) in conditions.iter().enumerate() {
                    if value!(self.eval(condition)) != 0 {
                        return match branches.get(index) {
                            Some(branch) => self.exec(branch),
                            None => Ok(Flow::Normal),
                        };
                    }
                }
                match branches.get(conditions.len()) {
                    Some(otherwise) => self.exec(otherwise),
                    None => Ok(Flow::Normal),
                }
            }
            StmtKind::While {
                label,
                condition,
                body,
            } => {
                while value!(self.eval(condition)) != 0 {
                    let flow = self.exec(body)?;
                    step!(flow, label.as_deref());
                }
                Ok(Flow::Normal)
            }
            StmtKind::RepeatUntil {
                label,
                body,
                condition,
            } => {
                loop {
                    let flow = self.exec(body)?;
                    step!(flow, label.as_deref());
                    if value!(self.eval(condition)) != 0 {
                        break;
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::For {
                label,
                init,
                test,
                update,
                body,
            } => self.in_block(|engine| {
                let flow = engine.exec_seq(init)?;
                if !flow.is_normal() {
                    return Ok(flow);
                }
                loop {
                    if let Some(test) = test {
                        if value!(engine.eval(test)) == 0 {
                            break;
                        }
                    }
                    let flow = engine.exec(body)?;
                    step!(flow, label.as_deref());
                    let flow = engine.exec_seq(update)?;
                    if !flow.is_normal() {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            }),
            StmtKind::ForEachAt {
                label,
                variable,
                container,
                body,
            } => self.in_block(|engine| {
                let container = value!(engine.eval(container));
                let members = engine.state.objects_at(Refno::new(container));
                engine.scopes.declare(variable, LocalValue::Int(0))?;
                for member in members {
                    engine.scopes.set(variable, member.get());
                    let flow = engine.exec(body)?;
                    step!(flow, label.as_deref());
                }
                Ok(Flow::Normal)
            }),
            StmtKind::Break(target) => Ok(Flow::Break(target.clone())),
            StmtKind::Continue(target) => Ok(Flow::Continue(target.clone())),
            StmtKind::Return(value) => Ok(Flow::Return(match value {
                Some(expr) => value!(self.eval(expr)),
                None => 0,
            })),
        }
    }

    /// Declares one local. A text literal initializer keeps its text identity.
    fn declare_local(&mut self, declarator: &Declarator) -> Eval<()> {
        let value = match declarator.init.as_ref() {
            None => LocalValue::Int(0),
            Some(Expr {
                kind: ExprKind::Text(text),
                ..
            }) => LocalValue::Text(self.world.literal(text).unwrap_or(Refno::NONE)),
            Some(expr) => LocalValue::Int(self.eval(expr)?),
        };
        self.scopes.declare(&declarator.name, value)?;
        Ok(())
    }
}
