//! Cross-layer integration tests for gdesc
//!
//! Tests that play whole sessions through the engine and load worlds the way
//! the runtime does.

mod persistence;
mod session;

use gdesc_world::{
    Block, Expr, FlagCategory, ObjectDecl, PlaceDecl, Stmt, WorldBuilder, WorldModel,
};

fn call(name: &str, args: Vec<Expr>) -> Stmt {
    Stmt::expr(Expr::call(name, args))
}

/// A two-room game with a lamp to pick up.
pub fn cellar_game() -> WorldModel {
    let describe_on_arrival = Stmt::if_chain(
        vec![Expr::call("isflag", vec![Expr::ident("status"), Expr::ident("moved")])],
        vec![Stmt::block(Block::new(vec![
            call("describe", vec![Expr::ident("here")]),
            Stmt::for_each_at(
                None,
                "obj",
                Expr::ident("here"),
                call("say", vec![Expr::ident("obj")]),
            ),
        ]))],
    );
    let take_lamp = Block::new(vec![
        Stmt::if_chain(
            vec![Expr::call("ishere", vec![Expr::ident("lamp")])],
            vec![Stmt::block(Block::new(vec![
                call("get", vec![Expr::ident("lamp")]),
                call("quip", vec![Expr::text("Taken.")]),
            ]))],
        ),
        call("quip", vec![Expr::text("You see no lamp here.")]),
    ]);

    WorldBuilder::new()
        .info("Cellar", "1.0", "A. Writer", "2024-01-01")
        .noise(["the", "a", "an"])
        .flags(FlagCategory::Object, ["seen"])
        .flags(FlagCategory::Place, ["beenhere"])
        .flags(FlagCategory::Variable, ["moved"])
        .verb(["north", "n"])
        .verb(["south", "s"])
        .verb(["take", "get"])
        .verb(["quit", "q"])
        .place(
            PlaceDecl::new("road", "You are on the road.")
                .with_long("You stand on a long dusty road.")
                .with_command(
                    "north",
                    Block::new(vec![
                        call("goto", vec![Expr::ident("forest")]),
                        call("quip", vec![Expr::text("You walk north.")]),
                    ]),
                ),
        )
        .place(
            PlaceDecl::new("forest", "You are in the forest.")
                .with_long("Tall trees surround you.")
                .with_command(
                    "south",
                    Block::new(vec![call("move", vec![Expr::text("south"), Expr::ident("road")])]),
                ),
        )
        .object(
            ObjectDecl::new("lamp", "There is a lamp here.")
                .with_long("A brass lamp lies on the ground.")
                .with_inventory("A brass lamp"),
        )
        .action("take", Some("lamp"), take_lamp)
        .action(
            "quit",
            None,
            Block::new(vec![
                call("say", vec![Expr::text("Goodbye.")]),
                call("stop", vec![]),
            ]),
        )
        .init(Block::new(vec![
            call("apport", vec![Expr::ident("lamp"), Expr::ident("forest")]),
            call("goto", vec![Expr::ident("road")]),
        ]))
        .repeat(Block::new(vec![describe_on_arrival]))
        .repeat(Block::new(vec![call("input", vec![])]))
        .repeat(Block::new(vec![call("here", vec![])]))
        .repeat(Block::new(vec![call("arg1", vec![])]))
        .repeat(Block::new(vec![call("say", vec![Expr::text("I don't understand.")])]))
        .build()
}
