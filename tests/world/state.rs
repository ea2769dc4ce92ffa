//! Integration tests for mutable world state

use gdesc_world::{BoundWorld, FlagCategory, ObjectDecl, PlaceDecl, Refno, WorldBuilder, WorldState};

fn world() -> BoundWorld {
    let model = WorldBuilder::new()
        .object(ObjectDecl::new("coin", "A coin."))
        .object(ObjectDecl::new("gem", "A gem."))
        .place(PlaceDecl::new("vault", "A vault."))
        .array("scores", 3)
        .flags(FlagCategory::Object, ["seen"])
        .build();
    BoundWorld::bind(model).unwrap()
}

#[test]
fn objects_start_in_ylem() {
    let world = world();
    let state = WorldState::new(&world);
    let ylem = world.defaults().ylem;
    assert_eq!(state.objects_at(ylem).len(), 2);
    assert_eq!(state.location(world.refno_of("coin").unwrap()), Some(ylem));
}

#[test]
fn relocation_updates_contents() {
    let world = world();
    let mut state = WorldState::new(&world);
    let gem = world.refno_of("gem").unwrap();
    let vault = world.refno_of("vault").unwrap();
    assert!(state.set_location(gem, vault));
    assert_eq!(state.objects_at(vault), vec![gem]);
    assert!(!state.set_location(vault, gem));
}

#[test]
fn variables_start_at_zero() {
    let world = world();
    let mut state = WorldState::new(&world);
    let here = world.defaults().here;
    assert_eq!(state.variable(here), Some(0));
    assert!(state.set_variable(here, 42));
    assert_eq!(state.variable(here), Some(42));
    assert_eq!(state.variable(Refno::new(1)), None);
}

#[test]
fn flags_route_by_refno() {
    let world = world();
    let mut state = WorldState::new(&world);
    let coin = world.refno_of("coin").unwrap();
    let gem = world.refno_of("gem").unwrap();
    let seen = world.flag_bit("seen").unwrap();
    state.set_flag(coin, seen);
    assert!(state.test_flag(coin, seen));
    assert!(!state.test_flag(gem, seen));
    state.clear_flag(coin, seen);
    assert!(!state.test_flag(coin, seen));
}

#[test]
fn arrays_are_zeroed_and_sized() {
    let world = world();
    let state = WorldState::new(&world);
    assert_eq!(state.array(0), Some(&[0, 0, 0][..]));
    assert_eq!(state.array(1), None);
}
