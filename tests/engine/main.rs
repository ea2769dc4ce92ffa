//! Integration tests for Layer 2: Engine
//!
//! Tests for scoping, control flow, dispatch, text expansion, and the turn driver.

mod control_flow;
mod dispatch;
mod driver;
mod references;
mod scoping;
mod text;

use gdesc_engine::{Engine, EngineConfig, ScriptedConsole};
use gdesc_world::{AssignOp, Expr, Stmt, WorldBuilder};

/// Binds a world built by `builder` with a scripted console.
pub fn engine(builder: WorldBuilder) -> Engine<ScriptedConsole> {
    Engine::new(builder.build(), ScriptedConsole::default(), EngineConfig::default()).unwrap()
}

/// `name += 1;`
pub fn bump(name: &str) -> Stmt {
    Stmt::expr(Expr::assign(AssignOp::Add, Expr::ident(name), Expr::int(1)))
}

/// `say("text");`
pub fn say(text: &str) -> Stmt {
    Stmt::expr(Expr::call("say", vec![Expr::text(text)]))
}
