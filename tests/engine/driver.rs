//! Integration tests for the turn driver

use gdesc_engine::{Engine, EngineConfig, PassOutcome, ScriptedConsole};
use gdesc_world::{BinaryOp, Block, Expr, JumpTarget, Stmt, WorldBuilder};

use crate::{bump, engine, say};

fn three_blocks() -> WorldBuilder {
    // Block 2 ends the turn on odd passes.
    WorldBuilder::new()
        .variable("first")
        .variable("second")
        .variable("third")
        .repeat(Block::new(vec![bump("first")]))
        .repeat(Block::new(vec![
            bump("second"),
            Stmt::if_chain(
                vec![Expr::binary(
                    BinaryOp::Eq,
                    Expr::binary(BinaryOp::Rem, Expr::ident("second"), Expr::int(2)),
                    Expr::int(1),
                )],
                vec![Stmt::break_to(JumpTarget::Repeat)],
            ),
        ]))
        .repeat(Block::new(vec![bump("third")]))
}

#[test]
fn break_repeat_restarts_from_the_first_block() {
    let mut engine = engine(three_blocks());
    assert_eq!(engine.run_pass().unwrap(), PassOutcome::Restarted);
    assert_eq!(engine.run_pass().unwrap(), PassOutcome::Completed);
    assert_eq!(engine.variable("first"), Some(2));
    assert_eq!(engine.variable("second"), Some(2));
    assert_eq!(engine.variable("third"), Some(1));
}

#[test]
fn pass_limit_bounds_the_loop() {
    let mut engine = Engine::new(
        three_blocks().build(),
        ScriptedConsole::default(),
        EngineConfig::default().with_pass_limit(10),
    )
    .unwrap();
    assert_eq!(engine.run_forever().unwrap(), 10);
    assert_eq!(engine.variable("first"), Some(10));
    assert_eq!(engine.variable("third"), Some(5));
}

#[test]
fn inits_run_once_before_the_loop() {
    let builder = three_blocks()
        .init(Block::new(vec![say("Welcome.")]))
        .init(Block::new(vec![Stmt::expr(Expr::assign(
            gdesc_world::AssignOp::Assign,
            Expr::ident("third"),
            Expr::int(100),
        ))]));
    let mut engine = Engine::new(
        builder.build(),
        ScriptedConsole::default(),
        EngineConfig::default().with_pass_limit(2),
    )
    .unwrap();
    engine.run_inits().unwrap();
    engine.run_forever().unwrap();
    assert_eq!(engine.console().output(), ["Welcome."]);
    assert_eq!(engine.variable("third"), Some(101));
}

#[test]
fn exhausted_input_halts() {
    let builder = WorldBuilder::new()
        .variable("turns")
        .repeat(Block::new(vec![bump("turns"), Stmt::expr(Expr::call("input", vec![]))]));
    let console = ScriptedConsole::new(["look", "wait"]);
    let mut engine = Engine::new(builder.build(), console, EngineConfig::default()).unwrap();
    assert_eq!(engine.run_forever().unwrap(), 3);
    assert!(engine.is_halted());
    assert_eq!(engine.console().prompts(), 3);
}

#[test]
fn faults_can_be_kept_off_the_console() {
    let builder = WorldBuilder::new().repeat(Block::new(vec![Stmt::expr(Expr::ident("ghost"))]));
    let mut engine = Engine::new(
        builder.build(),
        ScriptedConsole::default(),
        EngineConfig::default().with_pass_limit(2).with_echo_faults(false),
    )
    .unwrap();
    assert_eq!(engine.run_forever().unwrap(), 2);
    assert!(engine.console().output().is_empty());
}
