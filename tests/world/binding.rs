//! Integration tests for binding a world model

use gdesc_foundation::ErrorKind;
use gdesc_world::{
    Block, BoundWorld, Expr, FlagCategory, GRAMMAR_BUILTINS, Identifier, ObjectDecl, PlaceDecl,
    Stmt, WorldBuilder,
};

// =============================================================================
// Default Elements
// =============================================================================

#[test]
fn every_world_declares_the_defaults() {
    let world = BoundWorld::bind(WorldBuilder::new().build()).unwrap();
    for name in ["arg1", "arg2", "status", "here", "there"] {
        assert!(matches!(world.identifier(name), Some(Identifier::Variable(_))), "{name}");
    }
    for name in ["badword", "ambigword", "badsyntax"] {
        assert!(matches!(world.identifier(name), Some(Identifier::State(_))), "{name}");
    }
    assert!(matches!(world.identifier("inhand"), Some(Identifier::Place(0))));
    assert!(matches!(world.identifier("ylem"), Some(Identifier::Place(1))));
}

#[test]
fn identifiers_are_case_insensitive() {
    let world = BoundWorld::bind(WorldBuilder::new().variable("Score").build()).unwrap();
    assert_eq!(world.refno_of("SCORE"), world.refno_of("score"));
}

// =============================================================================
// Collisions
// =============================================================================

#[test]
fn collisions_across_categories_fail_the_load() {
    let model = WorldBuilder::new()
        .object(ObjectDecl::new("torch", "A torch."))
        .place(PlaceDecl::new("torch", "A torch-lit hall."))
        .build();
    let err = BoundWorld::bind(model).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LoadFailed(_)));
    assert!(matches!(
        err.load_errors()[0].kind,
        ErrorKind::DuplicateIdentifier(ref name) if name == "torch"
    ));
}

#[test]
fn redeclaring_a_default_collides() {
    let model = WorldBuilder::new().variable("here").build();
    assert!(BoundWorld::bind(model).is_err());
}

#[test]
fn no_proc_may_shadow_a_builtin() {
    for name in GRAMMAR_BUILTINS {
        let model = WorldBuilder::new()
            .proc(name, Vec::<String>::new(), Block::default())
            .build();
        assert!(BoundWorld::bind(model).is_err(), "{name}");
    }
}

// =============================================================================
// Flags and Literals
// =============================================================================

#[test]
fn flag_names_resolve_to_bits() {
    let model = WorldBuilder::new()
        .flags(FlagCategory::Object, ["seen", "lit", "open"])
        .flags(FlagCategory::Variable, ["moved"])
        .build();
    let world = BoundWorld::bind(model).unwrap();
    assert_eq!(world.flag_bit("open"), Some(2));
    assert_eq!(world.flag_bit("moved"), Some(0));
    assert!(matches!(
        world.identifier("lit"),
        Some(Identifier::Flag { category: FlagCategory::Object, bit: 1 })
    ));
}

#[test]
fn repeated_literals_share_a_refno() {
    let model = WorldBuilder::new()
        .init(Block::new(vec![Stmt::expr(Expr::call("say", vec![Expr::text("Hi.")]))]))
        .repeat(Block::new(vec![Stmt::expr(Expr::call("say", vec![Expr::text("Hi.")]))]))
        .build();
    let world = BoundWorld::bind(model).unwrap();
    assert_eq!(world.text_count(), 1);
    assert!(world.literal("Hi.").is_some());
}
