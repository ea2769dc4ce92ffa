//! Text output and stopping.

use gdesc_foundation::SourceLocation;
use gdesc_world::{Category, Expr, ExprKind, Refno};
use tracing::debug;

use super::{end_turn, words};
use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Eval;
use crate::text::Detail;

/// `say(text, qualifier?)`: expands and prints a text.
///
/// An identifier prints its text value, a literal prints itself, and any
/// other expression prints whatever its value refers to.
pub(super) fn say<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let Some(subject) = args.first() else {
        return Ok(0);
    };
    let qualifier = match args.get(1) {
        Some(arg) => Some(engine.eval(arg)?),
        None => None,
    };
    let template = match &subject.kind {
        ExprKind::Ident(name) => engine.text_value(name, qualifier)?,
        ExprKind::Text(text) => text.clone(),
        _ => {
            let value = engine.eval(subject)?;
            engine.render_value(value, Detail::Default, qualifier)?
        }
    };
    let text = engine.expand(&template, qualifier)?;
    engine.console.write_line(&text)?;
    Ok(0)
}

/// `quip(text, qualifier?)`: says the text and ends the turn.
pub(super) fn quip<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    location: &SourceLocation,
) -> Eval<i32> {
    say(engine, args, location)?;
    Err(end_turn())
}

/// `respond(word, ..., text)`: quips the text if the player's verb is any of the words.
pub(super) fn respond<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    location: &SourceLocation,
) -> Eval<i32> {
    let Some((text, verbs)) = args.split_last() else {
        return Ok(0);
    };
    if words::any_of(engine, verbs, location)? != 0 {
        quip(engine, std::slice::from_ref(text), location)?;
    }
    Ok(0)
}

/// `describe(entity, long?)`: prints an entity's description. A second
/// argument asks for the long description.
pub(super) fn describe<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let Some(subject) = args.first() else {
        return Ok(0);
    };
    let mut value = match subject.as_ident() {
        Some(name) => engine.ident_value(name)?,
        None => engine.eval(subject)?,
    };
    if engine
        .world
        .space()
        .contains(Category::Variable, Refno::new(value))
    {
        value = engine.default_var(Refno::new(value));
    }
    let detail = if args.len() > 1 { Detail::Long } else { Detail::Default };
    let template = engine.render(value, detail, None)?;
    let text = engine.expand(&template, None)?;
    engine.console.write_line(&text)?;
    Ok(0)
}

/// `stop()`: halts the engine.
pub(super) fn stop<C: Console>(
    engine: &mut Engine<C>,
    _args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    debug!("stop requested");
    engine.halted = true;
    Err(end_turn())
}
