//! Integration tests for call dispatch and the built-in table

use gdesc_engine::{BuiltinTable, Engine, EngineConfig, Eval, Outcome, ScriptedConsole};
use gdesc_foundation::{ErrorKind, SourceLocation};
use gdesc_world::{AssignOp, Block, Expr, ObjectDecl, PlaceDecl, Stmt, WorldBuilder};

use crate::{engine, say};

fn always_hundred(
    _engine: &mut Engine<ScriptedConsole>,
    _args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    Ok(100)
}

// =============================================================================
// Built-in Table
// =============================================================================

#[test]
fn replaced_builtin_is_what_runs() {
    let mut table = BuiltinTable::standard();
    table.insert("chance", always_hundred);
    let mut engine = Engine::with_builtins(
        WorldBuilder::new().build(),
        ScriptedConsole::default(),
        EngineConfig::default(),
        table,
    )
    .unwrap();
    let outcome = engine.invoke("chance", &[Expr::int(0)]).unwrap();
    assert_eq!(outcome, Outcome::Value(100));
}

#[test]
fn incomplete_table_is_rejected_at_startup() {
    let mut table = BuiltinTable::<ScriptedConsole>::standard();
    table.remove("tie");
    let result = Engine::with_builtins(
        WorldBuilder::new().build(),
        ScriptedConsole::default(),
        EngineConfig::default(),
        table,
    );
    match result {
        Err(err) => assert!(matches!(
            err.kind,
            ErrorKind::BuiltinMismatch { ref missing, .. } if missing == &["tie"]
        )),
        Ok(_) => panic!("table without `tie` was accepted"),
    }
}

#[test]
fn extra_builtin_is_rejected_at_startup() {
    let mut table = BuiltinTable::<ScriptedConsole>::standard();
    table.insert("teleport", always_hundred);
    let result = Engine::with_builtins(
        WorldBuilder::new().build(),
        ScriptedConsole::default(),
        EngineConfig::default(),
        table,
    );
    assert!(result.is_err());
}

#[test]
fn proc_shadowing_a_builtin_fails_the_load() {
    let result = Engine::new(
        WorldBuilder::new()
            .proc("say", ["text"], Block::default())
            .build(),
        ScriptedConsole::default(),
        EngineConfig::default(),
    );
    let err = result.err().unwrap();
    assert!(matches!(err.kind, ErrorKind::LoadFailed(_)));
}

// =============================================================================
// Entity Dispatch
// =============================================================================

fn hall_world() -> WorldBuilder {
    WorldBuilder::new()
        .verb(["look"])
        .verb(["rub"])
        .place(
            PlaceDecl::new("hall", "A hall.")
                .with_command("look", Block::new(vec![say("Portraits line the walls.")])),
        )
        .object(
            ObjectDecl::new("lamp", "A lamp.")
                .with_command("rub", Block::new(vec![say("A genie appears.")])),
        )
        .action(
            "rub",
            Some("lamp"),
            Block::new(vec![Stmt::expr(Expr::assign(
                AssignOp::Add,
                Expr::ident("rubs"),
                Expr::int(1),
            ))]),
        )
        .variable("rubs")
}

fn set_words(engine: &mut Engine<ScriptedConsole>, arg1: &str, arg2: Option<&str>) {
    let verb = engine.world().refno_of(arg1).unwrap().get();
    engine.set_variable("arg1", verb);
    let noun = arg2.map_or(0, |name| engine.world().refno_of(name).unwrap().get());
    engine.set_variable("arg2", noun);
}

#[test]
fn here_dispatches_to_the_current_place() {
    let mut engine = engine(hall_world());
    let hall = engine.world().refno_of("hall").unwrap().get();
    engine.set_variable("here", hall);
    set_words(&mut engine, "look", None);
    assert_eq!(engine.invoke("here", &[]).unwrap(), Outcome::Value(0));
    assert_eq!(engine.console().output(), ["Portraits line the walls."]);
}

#[test]
fn arg1_dispatches_to_the_verb_action() {
    let mut engine = engine(hall_world());
    set_words(&mut engine, "rub", Some("lamp"));
    engine.invoke("arg1", &[]).unwrap();
    assert_eq!(engine.variable("rubs"), Some(1));

    set_words(&mut engine, "rub", Some("hall"));
    engine.invoke("arg1", &[]).unwrap();
    assert_eq!(engine.variable("rubs"), Some(1));
}

#[test]
fn arg2_dispatches_to_the_object_command() {
    let mut engine = engine(hall_world());
    set_words(&mut engine, "rub", Some("lamp"));
    engine.invoke("arg2", &[]).unwrap();
    assert!(engine.console().output().is_empty());

    engine.invoke("lamp", &[]).unwrap();
    assert_eq!(engine.console().output(), ["A genie appears."]);
}

#[test]
fn commands_need_a_verb_in_arg1() {
    let mut engine = engine(hall_world());
    engine.set_variable("arg1", -2);
    engine.invoke("hall", &[]).unwrap();
    assert!(engine.console().output().is_empty());
}

#[test]
fn arrays_and_states_are_not_callable() {
    let mut engine = engine(WorldBuilder::new().array("grid", 4));
    for name in ["grid", "badword"] {
        let err = engine.invoke(name, &[]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotCallable(_)), "{name}");
    }
    let err = engine.invoke("nowhere", &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedIdentifier(_)));
}
