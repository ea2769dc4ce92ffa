//! Carrying and locating objects.

use gdesc_foundation::SourceLocation;
use gdesc_world::{Category, Expr, ExprKind, Refno};
use tracing::trace;

use super::{require, truth};
use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Eval;

/// Evaluates an argument expected to be an object, or `None` if it is not one.
fn object_arg<C: Console>(engine: &mut Engine<C>, arg: &Expr) -> Eval<Option<Refno>> {
    let refno = Refno::new(engine.eval(arg)?);
    Ok(engine
        .world
        .space()
        .contains(Category::Object, refno)
        .then_some(refno))
}

fn is_at<C: Console>(engine: &Engine<C>, object: Refno, place: Refno) -> bool {
    engine.state.location(object) == Some(place)
}

/// `have(object)`: 1 if the object is carried.
pub(super) fn have<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("have", args, 1)?;
    let inhand = engine.world.defaults().inhand;
    Ok(truth(
        object_arg(engine, &args[0])?.is_some_and(|obj| is_at(engine, obj, inhand)),
    ))
}

/// `ishere(object)`: 1 if the object is at the current place.
pub(super) fn is_here<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("ishere", args, 1)?;
    let here = Refno::new(engine.default_var(engine.world.defaults().here));
    Ok(truth(
        object_arg(engine, &args[0])?.is_some_and(|obj| is_at(engine, obj, here)),
    ))
}

/// `isnear(object)`: 1 if the object is carried or here.
pub(super) fn is_near<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("isnear", args, 1)?;
    let inhand = engine.world.defaults().inhand;
    let here = Refno::new(engine.default_var(engine.world.defaults().here));
    Ok(truth(object_arg(engine, &args[0])?.is_some_and(|obj| {
        is_at(engine, obj, inhand) || is_at(engine, obj, here)
    })))
}

/// Resolves the object a `get` or `drop` acts on. A text literal names the
/// object; a non-positive result means no object.
fn moved_object<C: Console>(engine: &mut Engine<C>, arg: &Expr) -> Eval<i32> {
    match &arg.kind {
        ExprKind::Text(text) => Ok(engine.world.refno_of(text).map_or(0, Refno::get)),
        _ => engine.eval(arg),
    }
}

/// `get(object)`: moves the object into the inventory.
pub(super) fn get<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("get", args, 1)?;
    let object = moved_object(engine, &args[0])?;
    if object > 0 {
        let inhand = engine.world.defaults().inhand;
        trace!(object, "get");
        engine.state.set_location(Refno::new(object), inhand);
    }
    Ok(0)
}

/// `drop(object)`: moves the object to the current place.
pub(super) fn drop<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("drop", args, 1)?;
    let object = moved_object(engine, &args[0])?;
    if object > 0 {
        let here = Refno::new(engine.default_var(engine.world.defaults().here));
        trace!(object, "drop");
        engine.state.set_location(Refno::new(object), here);
    }
    Ok(0)
}
