//! Integration tests for the refno space of a bound world

use gdesc_world::{BoundWorld, Category, ObjectDecl, PlaceDecl, Refno, WorldBuilder};
use proptest::prelude::*;

/// A world with the given number of user-declared entities per category.
fn world_with(objects: usize, places: usize, variables: usize, texts: usize, verbs: usize) -> BoundWorld {
    let mut builder = WorldBuilder::new();
    for i in 0..objects {
        builder = builder.object(ObjectDecl::new(format!("obj{i}"), "An object."));
    }
    for i in 0..places {
        builder = builder.place(PlaceDecl::new(format!("place{i}"), "A place."));
    }
    for i in 0..variables {
        builder = builder.variable(format!("var{i}"));
    }
    for i in 0..texts {
        builder = builder.text(format!("text{i}"), "Some text.");
    }
    for i in 0..verbs {
        builder = builder.verb([format!("verb{i}")]);
    }
    BoundWorld::bind(builder.build()).unwrap()
}

// =============================================================================
// Fixed Layout
// =============================================================================

#[test]
fn zero_is_never_an_entity() {
    let world = world_with(2, 2, 2, 2, 2);
    assert_eq!(world.space().category_of(Refno::NONE), None);
    assert!(world.node(Refno::NONE).is_none());
}

#[test]
fn default_places_come_first() {
    let world = world_with(0, 1, 0, 0, 0);
    let space = world.space();
    assert_eq!(world.defaults().inhand, space.first(Category::Place));
    assert_eq!(world.refno_of("ylem").map(Refno::get), Some(space.first(Category::Place).get() + 1));
    assert_eq!(world.refno_of("place0").map(Refno::get), Some(space.first(Category::Place).get() + 2));
}

#[test]
fn past_the_end_is_invalid() {
    let world = world_with(1, 1, 1, 1, 1);
    let end = world.space().end();
    assert_eq!(world.space().category_of(Refno::new(end)), None);
    assert_eq!(world.space().category_of(Refno::new(-1)), None);
}

// =============================================================================
// Partition Properties
// =============================================================================

proptest! {
    #[test]
    fn declared_names_land_in_their_category(
        objects in 0usize..6,
        places in 0usize..6,
        variables in 0usize..6,
        texts in 0usize..6,
        verbs in 0usize..6,
    ) {
        let world = world_with(objects, places, variables, texts, verbs);
        let space = world.space();
        let expect = |prefix: &str, count: usize, category: Category| {
            (0..count).all(|i| {
                world
                    .refno_of(&format!("{prefix}{i}"))
                    .is_some_and(|r| space.category_of(r) == Some(category))
            })
        };
        prop_assert!(expect("obj", objects, Category::Object));
        prop_assert!(expect("place", places, Category::Place));
        prop_assert!(expect("var", variables, Category::Variable));
        prop_assert!(expect("text", texts, Category::Text));
        prop_assert!(expect("verb", verbs, Category::Verb));
    }

    #[test]
    fn every_refno_below_end_has_a_node(
        objects in 0usize..6,
        places in 0usize..6,
        texts in 0usize..6,
    ) {
        let world = world_with(objects, places, 1, texts, 1);
        let space = world.space();
        for raw in 1..space.end() {
            let refno = Refno::new(raw);
            prop_assert!(space.category_of(refno).is_some());
            prop_assert!(world.node(refno).is_some());
        }
        let mut previous_end = 1;
        for category in Category::ALL {
            let range = space.range(category);
            prop_assert_eq!(range.start, previous_end);
            previous_end = range.end;
        }
        prop_assert_eq!(previous_end, space.end());
    }
}
