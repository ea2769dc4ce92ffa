//! Integration tests for loops and control signals

use gdesc_engine::Flow;
use gdesc_world::{AssignOp, BinaryOp, Block, Expr, JumpTarget, Stmt, UnaryOp, WorldBuilder};

use crate::engine;

fn inc(name: &str) -> Stmt {
    Stmt::expr(Expr::unary(UnaryOp::PostInc, Expr::ident(name)))
}

fn counting_for(label: Option<&str>, var: &str, limit: i32, body: Stmt) -> Stmt {
    Stmt::for_loop(
        label,
        vec![Stmt::local(var, Some(Expr::int(0)))],
        Some(Expr::binary(BinaryOp::Lt, Expr::ident(var), Expr::int(limit))),
        vec![inc(var)],
        body,
    )
}

#[test]
fn labelled_break_leaves_both_loops() {
    let inner = Stmt::while_loop(
        None,
        Expr::int(1),
        Stmt::block(Block::new(vec![
            inc("n"),
            Stmt::if_chain(
                vec![Expr::binary(BinaryOp::Eq, Expr::ident("n"), Expr::int(3))],
                vec![Stmt::break_to(JumpTarget::Label("outer".into()))],
            ),
        ])),
    );
    let block = Block::new(vec![
        Stmt::local("n", Some(Expr::int(0))),
        Stmt::while_loop(Some("outer"), Expr::int(1), inner),
        Stmt::ret(Some(Expr::ident("n"))),
    ]);
    let mut engine = engine(WorldBuilder::new());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(3));
}

#[test]
fn labelled_continue_runs_the_outer_update() {
    let inner = counting_for(
        None,
        "j",
        3,
        Stmt::block(Block::new(vec![
            Stmt::if_chain(
                vec![Expr::binary(BinaryOp::Eq, Expr::ident("j"), Expr::int(1))],
                vec![Stmt::continue_to(JumpTarget::Label("outer".into()))],
            ),
            inc("hits"),
        ])),
    );
    let block = Block::new(vec![
        Stmt::local("hits", Some(Expr::int(0))),
        counting_for(Some("outer"), "i", 3, inner),
        Stmt::ret(Some(Expr::ident("hits"))),
    ]);
    let mut engine = engine(WorldBuilder::new());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(3));
}

#[test]
fn repeat_until_runs_at_least_once() {
    let block = Block::new(vec![
        Stmt::local("n", Some(Expr::int(10))),
        Stmt::repeat_until(None, inc("n"), Expr::int(1)),
        Stmt::ret(Some(Expr::ident("n"))),
    ]);
    let mut engine = engine(WorldBuilder::new());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(11));
}

#[test]
fn break_repeat_escapes_loops_and_procs() {
    let looping = Block::new(vec![Stmt::while_loop(
        None,
        Expr::int(1),
        Stmt::break_to(JumpTarget::Repeat),
    )]);
    let block = Block::new(vec![
        Stmt::expr(Expr::call("spin", vec![])),
        Stmt::expr(Expr::assign(AssignOp::Assign, Expr::ident("after"), Expr::int(1))),
    ]);
    let mut engine = engine(
        WorldBuilder::new()
            .variable("after")
            .proc("spin", Vec::<String>::new(), looping),
    );
    assert_eq!(engine.execute(&block).unwrap(), Flow::Break(JumpTarget::Repeat));
    assert_eq!(engine.variable("after"), Some(0));
}

#[test]
fn foreach_visits_objects_at_a_place() {
    use gdesc_world::{ObjectDecl, PlaceDecl};
    let block = Block::new(vec![
        Stmt::local("count", Some(Expr::int(0))),
        Stmt::for_each_at(None, "obj", Expr::ident("cave"), inc("count")),
        Stmt::ret(Some(Expr::ident("count"))),
    ]);
    let mut engine = engine(
        WorldBuilder::new()
            .object(ObjectDecl::new("rock", "A rock."))
            .object(ObjectDecl::new("bone", "A bone."))
            .object(ObjectDecl::new("coin", "A coin."))
            .place(PlaceDecl::new("cave", "A cave.")),
    );
    for name in ["rock", "coin"] {
        engine
            .invoke("apport", &[Expr::ident(name), Expr::ident("cave")])
            .unwrap();
    }
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(2));
}

#[test]
fn compound_shift_masks_the_count() {
    let block = Block::new(vec![
        Stmt::local("x", Some(Expr::int(7))),
        Stmt::expr(Expr::assign(AssignOp::Shl, Expr::ident("x"), Expr::int(33))),
        Stmt::ret(Some(Expr::ident("x"))),
    ]);
    let mut engine = engine(WorldBuilder::new());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(14));
}

#[test]
fn arithmetic_wraps() {
    let block = Block::new(vec![Stmt::ret(Some(Expr::binary(
        BinaryOp::Add,
        Expr::int(i32::MAX),
        Expr::int(1),
    )))]);
    let mut engine = engine(WorldBuilder::new());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(i32::MIN));
}
