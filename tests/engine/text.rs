//! Integration tests for text output and template expansion

use gdesc_engine::{Detail, Engine, EngineConfig, ScriptedConsole};
use gdesc_world::{Expr, TextMethod, WorldBuilder};

use crate::engine;

fn coins_world() -> WorldBuilder {
    WorldBuilder::new()
        .variable("score")
        .text("coins", "You have $ [no coins/one coin/=/several coins].")
        .text("status_line", "Score: {score}")
}

#[test]
fn say_expands_named_text_with_qualifier() {
    let mut engine = engine(coins_world());
    for q in [0, 2, 5] {
        engine
            .invoke("say", &[Expr::ident("coins"), Expr::int(q)])
            .unwrap();
    }
    assert_eq!(
        engine.console().output(),
        [
            "You have 0 no coins.",
            "You have 2 one coin.",
            "You have 5 several coins.",
        ]
    );
}

#[test]
fn braces_render_variable_values() {
    let mut engine = engine(coins_world());
    engine.set_variable("score", 42);
    engine.invoke("say", &[Expr::ident("status_line")]).unwrap();
    assert_eq!(engine.console().output(), ["Score: 42"]);
}

#[test]
fn say_of_a_number_prints_it() {
    let mut engine = engine(WorldBuilder::new());
    engine.invoke("say", &[Expr::int(-7)]).unwrap();
    assert_eq!(engine.console().output(), ["-7"]);
}

#[test]
fn random_texts_follow_the_seed() {
    let model = WorldBuilder::new()
        .texts("noise", ["A", "B", "C", "D", "E"], Some(TextMethod::Random))
        .build();
    let draws = |seed: u64| -> Vec<String> {
        let mut engine = Engine::new(
            model.clone(),
            ScriptedConsole::default(),
            EngineConfig::default().with_seed(seed),
        )
        .unwrap();
        let noise = engine.world().refno_of("noise").unwrap().get();
        (0..16)
            .map(|_| engine.render(noise, Detail::Default, None).unwrap())
            .collect()
    };
    let first = draws(7);
    assert_eq!(first, draws(7));
    assert!(first.iter().all(|s| ["A", "B", "C", "D", "E"].contains(&s.as_str())));
}

#[test]
fn assigned_texts_use_the_qualifier() {
    let mut engine = engine(
        WorldBuilder::new().texts("rank", ["novice", "adept", "master"], Some(TextMethod::Assigned)),
    );
    let rank = engine.world().refno_of("rank").unwrap().get();
    assert_eq!(engine.render(rank, Detail::Default, Some(1)).unwrap(), "adept");
    assert_eq!(engine.render(rank, Detail::Default, Some(99)).unwrap(), "master");
    assert_eq!(engine.render(rank, Detail::Default, None).unwrap(), "novice");
}

#[test]
fn hash_names_the_qualifying_entity() {
    let mut engine = engine(WorldBuilder::new().verb(["take", "get"]));
    let take = engine.world().refno_of("get").unwrap().get();
    assert_eq!(engine.expand("You can't # that.", Some(take)).unwrap(), "You can't take that.");
}
