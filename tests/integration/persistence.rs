//! Integration tests for loading stored world models

use gdesc_engine::{Engine, EngineConfig, ScriptedConsole};
use gdesc_runtime::{from_bytes, load_from_file, save_to_file, to_bytes};

use crate::cellar_game;

fn transcript(model: gdesc_world::WorldModel) -> Vec<String> {
    let console = ScriptedConsole::new(["north", "take lamp", "quit"]);
    let mut engine = Engine::new(model, console, EngineConfig::default()).unwrap();
    engine.run_inits().unwrap();
    engine.run_forever().unwrap();
    engine.into_console().take_output()
}

#[test]
fn stored_model_plays_identically() {
    let path = std::env::temp_dir().join(format!("gdesc_cellar_{}.msgpack", std::process::id()));
    save_to_file(&cellar_game(), &path).unwrap();
    let loaded = load_from_file(&path);
    let _ = std::fs::remove_file(&path);

    let loaded = loaded.unwrap();
    assert_eq!(loaded, cellar_game());
    assert_eq!(transcript(loaded), transcript(cellar_game()));
}

#[test]
fn info_survives_encoding() {
    let bytes = to_bytes(&cellar_game()).unwrap();
    let model = from_bytes(&bytes).unwrap();
    assert_eq!(model.info.name, "Cellar");
    assert_eq!(model.info.author, "A. Writer");
}

#[test]
fn truncated_bytes_are_rejected() {
    let bytes = to_bytes(&cellar_game()).unwrap();
    assert!(from_bytes(&bytes[..bytes.len() / 2]).is_err());
}
