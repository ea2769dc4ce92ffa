//! Integration tests for `&name`, `*name`, and `instanceof`

use gdesc_engine::{Flow, Outcome};
use gdesc_foundation::ErrorKind;
use gdesc_world::{AssignOp, Block, Category, Expr, ObjectDecl, PlaceDecl, Stmt, WorldBuilder};

use crate::engine;

fn world() -> WorldBuilder {
    WorldBuilder::new()
        .variable("x")
        .variable("p")
        .place(PlaceDecl::new("hall", "Hall."))
        .object(ObjectDecl::new("lamp", "A lamp."))
}

#[test]
fn ref_of_entity_is_its_refno() {
    let mut engine = engine(world());
    let lamp = engine.world().refno_of("lamp").unwrap().get();
    let x = engine.world().refno_of("x").unwrap().get();
    assert_eq!(engine.evaluate(&Expr::ref_of("lamp")).unwrap(), Outcome::Value(lamp));
    assert_eq!(engine.evaluate(&Expr::ref_of("x")).unwrap(), Outcome::Value(x));
}

#[test]
fn ref_of_local_is_zero() {
    let block = Block::new(vec![
        Stmt::local("lamp", Some(Expr::int(3))),
        Stmt::ret(Some(Expr::ref_of("lamp"))),
    ]);
    let mut engine = engine(world());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(0));
}

#[test]
fn deref_reads_and_writes_the_pointed_cell() {
    let mut engine = engine(world());
    let x = engine.world().refno_of("x").unwrap().get();
    engine.set_variable("x", 41);
    engine.set_variable("p", x);

    assert_eq!(engine.evaluate(&Expr::deref("p")).unwrap(), Outcome::Value(41));

    let store = Expr::assign(AssignOp::Assign, Expr::deref("p"), Expr::int(9));
    assert_eq!(engine.evaluate(&store).unwrap(), Outcome::Value(9));
    assert_eq!(engine.variable("x"), Some(9));
    assert_eq!(engine.variable("p"), Some(x));

    let add = Expr::assign(AssignOp::Add, Expr::deref("p"), Expr::int(1));
    engine.evaluate(&add).unwrap();
    assert_eq!(engine.variable("x"), Some(10));
}

#[test]
fn deref_of_non_variable_faults() {
    let mut engine = engine(world());
    let hall = engine.world().refno_of("hall").unwrap().get();
    engine.set_variable("p", hall);

    let err = engine.evaluate(&Expr::deref("p")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAVariable(v) if v == hall));

    let store = Expr::assign(AssignOp::Assign, Expr::deref("p"), Expr::int(1));
    let err = engine.evaluate(&store).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAVariable(v) if v == hall));
}

#[test]
fn instanceof_names_the_entity_category() {
    let mut engine = engine(world());
    let is = |name: &str, category| Expr::instance_of(name, category);
    assert_eq!(engine.evaluate(&is("lamp", Category::Object)).unwrap(), Outcome::Value(1));
    assert_eq!(engine.evaluate(&is("lamp", Category::Place)).unwrap(), Outcome::Value(0));
    assert_eq!(engine.evaluate(&is("hall", Category::Place)).unwrap(), Outcome::Value(1));
}

#[test]
fn instanceof_follows_variable_value() {
    let mut engine = engine(world());
    let hall = engine.world().refno_of("hall").unwrap().get();
    engine.set_variable("p", hall);
    assert_eq!(
        engine.evaluate(&Expr::instance_of("p", Category::Place)).unwrap(),
        Outcome::Value(1)
    );
    assert_eq!(
        engine.evaluate(&Expr::instance_of("p", Category::Variable)).unwrap(),
        Outcome::Value(0)
    );
}

#[test]
fn instanceof_follows_local_value() {
    let block = Block::new(vec![
        Stmt::local("it", Some(Expr::ref_of("lamp"))),
        Stmt::ret(Some(Expr::binary(
            gdesc_world::BinaryOp::Add,
            Expr::binary(
                gdesc_world::BinaryOp::Mul,
                Expr::instance_of("it", Category::Object),
                Expr::int(10),
            ),
            Expr::instance_of("it", Category::Place),
        ))),
    ]);
    let mut engine = engine(world());
    assert_eq!(engine.execute(&block).unwrap(), Flow::Return(10));
}
