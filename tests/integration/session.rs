//! Integration tests that play scripted sessions

use gdesc_engine::{Engine, EngineConfig, ScriptedConsole};

use crate::cellar_game;

fn play(lines: &[&str]) -> (Engine<ScriptedConsole>, u64) {
    let console = ScriptedConsole::new(lines.iter().copied());
    let mut engine = Engine::new(cellar_game(), console, EngineConfig::default()).unwrap();
    engine.run_inits().unwrap();
    let passes = engine.run_forever().unwrap();
    (engine, passes)
}

#[test]
fn walk_take_and_quit() {
    let (engine, passes) = play(&["north", "take the lamp", "xyzzy", "quit"]);
    assert_eq!(passes, 4);
    assert!(engine.is_halted());
    assert_eq!(
        engine.console().output(),
        [
            "You stand on a long dusty road.",
            "You walk north.",
            "Tall trees surround you.",
            "A brass lamp lies on the ground.",
            "Taken.",
            "I don't understand.",
            "Goodbye.",
        ]
    );

    let lamp = engine.world().refno_of("lamp").unwrap();
    assert_eq!(engine.state().location(lamp), Some(engine.world().defaults().inhand));
}

#[test]
fn returning_shows_the_brief_description() {
    let (engine, _) = play(&["n", "s", "n"]);
    let output = engine.console().output();
    assert_eq!(output[0], "You stand on a long dusty road.");
    assert_eq!(output[1], "You walk north.");
    assert_eq!(output[2], "Tall trees surround you.");
    assert_eq!(output[3], "A brass lamp lies on the ground.");
    assert_eq!(output[4], "You are on the road.");
    assert_eq!(output[5], "You walk north.");
    assert_eq!(output[6], "You are in the forest.");
}

#[test]
fn taking_what_is_not_here_fails() {
    let (engine, _) = play(&["get lamp"]);
    assert_eq!(engine.console().output()[1], "You see no lamp here.");
    let lamp = engine.world().refno_of("lamp").unwrap();
    assert_eq!(engine.state().location(lamp), engine.world().refno_of("forest"));
}

#[test]
fn unknown_words_set_badword() {
    let (engine, _) = play(&["frobnicate lamp"]);
    assert_eq!(engine.variable("arg1"), engine.state_value("badword"));
}
