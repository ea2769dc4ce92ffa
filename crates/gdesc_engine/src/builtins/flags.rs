//! Flag tests and updates.
//!
//! The first argument names the entity: a bare identifier means the entity
//! itself (a variable, not its value), anything else is evaluated to a refno.

use gdesc_foundation::SourceLocation;
use gdesc_world::{Expr, Refno};

use super::{require, truth};
use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Eval;

fn target_and_bit<C: Console>(
    engine: &mut Engine<C>,
    name: &str,
    args: &[Expr],
) -> Eval<(Refno, i32)> {
    require(name, args, 2)?;
    let target = engine.target_refno(&args[0])?;
    let bit = engine.eval(&args[1])?;
    Ok((Refno::new(target), bit))
}

/// `isflag(entity, flag)`
pub(super) fn is_flag<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let (target, bit) = target_and_bit(engine, "isflag", args)?;
    Ok(truth(engine.state.test_flag(target, bit)))
}

/// `setflag(entity, flag)`
pub(super) fn set_flag<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let (target, bit) = target_and_bit(engine, "setflag", args)?;
    engine.state.set_flag(target, bit);
    Ok(0)
}

/// `clearflag(entity, flag)`
pub(super) fn clear_flag<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let (target, bit) = target_and_bit(engine, "clearflag", args)?;
    engine.state.clear_flag(target, bit);
    Ok(0)
}
