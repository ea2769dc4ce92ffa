//! Ranges and randomness.

use gdesc_foundation::SourceLocation;
use gdesc_world::Expr;
use rand::Rng;
use tracing::trace;

use super::{require, truth};
use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Eval;

/// `in(value, low, high)`: 1 if `low <= value <= high`.
pub(super) fn in_range<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("in", args, 3)?;
    let value = engine.eval(&args[0])?;
    let low = engine.eval(&args[1])?;
    let high = engine.eval(&args[2])?;
    Ok(truth(low <= value && value <= high))
}

/// `chance(percent)`: 1 with the given percentage probability.
pub(super) fn chance<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("chance", args, 1)?;
    let percent = engine.eval(&args[0])?;
    let roll: i32 = engine.rng.gen_range(0..100);
    trace!(percent, roll, "chance");
    Ok(truth(roll < percent))
}

/// `getrandom()`, `getrandom(max)`, `getrandom(min, max)`: a uniform
/// integer in the inclusive range, defaulting to `0..=100`.
pub(super) fn get_random<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let (min, max) = match args {
        [] => (0, 100),
        [max] => (0, engine.eval(max)?),
        [min, max, ..] => (engine.eval(min)?, engine.eval(max)?),
    };
    if max < min {
        return Ok(min);
    }
    Ok(engine.rng.gen_range(min..=max))
}
