//! Player movement and object placement.

use gdesc_foundation::{Error, SourceLocation};
use gdesc_world::{Expr, ExprKind, Refno};
use tracing::debug;

use super::words::key_matches;
use super::{end_turn, require};
use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Eval;

/// A place argument: a text literal names the place, anything else is evaluated.
fn place_arg<C: Console>(engine: &mut Engine<C>, arg: &Expr) -> Eval<i32> {
    match &arg.kind {
        ExprKind::Text(text) => Ok(engine.world.refno_of(text).map_or(0, Refno::get)),
        _ => engine.eval(arg),
    }
}

/// Moves the player: `there` takes the old `here`, and `moved` is set on `status`.
fn relocate<C: Console>(engine: &mut Engine<C>, place: i32) {
    let defaults = *engine.world.defaults();
    let here = engine.default_var(defaults.here);
    engine.state.set_variable(defaults.there, here);
    engine.state.set_variable(defaults.here, place);
    if let Some(moved) = engine.flag_bit("moved") {
        engine.state.set_flag(defaults.status, moved);
    }
    debug!(from = here, to = place, "player moved");
}

/// `isat(place, ...)`: 1 if any argument is the current place.
pub(super) fn is_at<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let here = engine.default_var(engine.world.defaults().here);
    for arg in args {
        if engine.eval(arg)? == here {
            return Ok(1);
        }
    }
    Ok(0)
}

/// `atplace(object, place, ...)`: 1 if the object is at any of the places.
pub(super) fn at_place<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("atplace", args, 1)?;
    let object = Refno::new(engine.eval(&args[0])?);
    let Some(location) = engine.state.location(object) else {
        return Ok(0);
    };
    for arg in &args[1..] {
        if engine.eval(arg)? == location.get() {
            return Ok(1);
        }
    }
    Ok(0)
}

/// `apport(object, place)`: puts an object somewhere without moving the player.
pub(super) fn apport<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("apport", args, 2)?;
    let object = engine.eval(&args[0])?;
    let place = engine.eval(&args[1])?;
    if !engine.state.set_location(Refno::new(object), Refno::new(place)) {
        return Err(Error::invalid_refno(object).into());
    }
    Ok(0)
}

/// `goto(place)`: moves the player and carries on with the turn.
pub(super) fn goto<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("goto", args, 1)?;
    let place = place_arg(engine, &args[0])?;
    relocate(engine, place);
    Ok(0)
}

/// `move(word, ..., place)`: if the player typed the words, moves there,
/// marks every object at the destination as seen, and ends the turn.
pub(super) fn move_to<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("move", args, 1)?;
    let Some((destination, words)) = args.split_last() else {
        return Ok(0);
    };
    let place = place_arg(engine, destination)?;
    if !words.is_empty() && !key_matches(engine, words)? {
        return Ok(0);
    }
    relocate(engine, place);
    if let Some(seen) = engine.flag_bit("seen") {
        let target = Refno::new(place);
        for object in engine.state.objects_at(target) {
            engine.state.set_flag(object, seen);
        }
    }
    Err(end_turn())
}
