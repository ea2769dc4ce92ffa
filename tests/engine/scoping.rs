//! Integration tests for local variable scoping

use gdesc_engine::Flow;
use gdesc_foundation::ErrorKind;
use gdesc_world::{AssignOp, Block, Expr, Stmt, WorldBuilder};

use crate::engine;

#[test]
fn callee_cannot_see_caller_locals() {
    let outer = Block::new(vec![
        Stmt::local("secret", Some(Expr::int(5))),
        Stmt::ret(Some(Expr::call("inner", vec![]))),
    ]);
    let inner = Block::new(vec![Stmt::ret(Some(Expr::ident("secret")))]);
    let mut engine = engine(
        WorldBuilder::new()
            .proc("outer", Vec::<String>::new(), outer)
            .proc("inner", Vec::<String>::new(), inner),
    );

    let err = engine.invoke("outer", &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedIdentifier(ref name) if name == "secret"));
    let stack = &err.context.as_ref().unwrap().stack;
    assert_eq!(stack, &["proc inner", "proc outer"]);
}

#[test]
fn inner_block_shadows_then_restores() {
    let block = Block::new(vec![
        Stmt::local("x", Some(Expr::int(1))),
        Stmt::block(Block::new(vec![
            Stmt::local("x", Some(Expr::int(2))),
            Stmt::expr(Expr::assign(AssignOp::Add, Expr::ident("x"), Expr::int(10))),
        ])),
        Stmt::ret(Some(Expr::ident("x"))),
    ]);
    let mut engine = engine(WorldBuilder::new());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(1));
}

#[test]
fn locals_shadow_globals() {
    let block = Block::new(vec![
        Stmt::local("score", Some(Expr::int(3))),
        Stmt::expr(Expr::assign(AssignOp::Mul, Expr::ident("score"), Expr::int(7))),
        Stmt::ret(Some(Expr::ident("score"))),
    ]);
    let mut engine = engine(WorldBuilder::new().variable("score"));
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(21));
    assert_eq!(engine.variable("score"), Some(0));
}

#[test]
fn recursion_gets_fresh_locals() {
    // proc fact(n) { if (n <= 1) return 1; local m = n; return m * fact(n - 1); }
    use gdesc_world::BinaryOp;
    let body = Block::new(vec![
        Stmt::if_chain(
            vec![Expr::binary(BinaryOp::Le, Expr::ident("n"), Expr::int(1))],
            vec![Stmt::ret(Some(Expr::int(1)))],
        ),
        Stmt::local("m", Some(Expr::ident("n"))),
        Stmt::ret(Some(Expr::binary(
            BinaryOp::Mul,
            Expr::ident("m"),
            Expr::call(
                "fact",
                vec![Expr::binary(BinaryOp::Sub, Expr::ident("n"), Expr::int(1))],
            ),
        ))),
    ]);
    let mut engine = engine(WorldBuilder::new().proc("fact", ["n"], body));
    let outcome = engine.invoke("fact", &[Expr::int(6)]).unwrap();
    assert_eq!(outcome, gdesc_engine::Outcome::Value(720));
}
