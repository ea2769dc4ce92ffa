//! Reading and matching the player's words.

use gdesc_foundation::{Error, ErrorKind, SourceLocation};
use gdesc_world::{Category, Expr, ExprKind, Identifier, Refno};
use tracing::{debug, trace};

use super::{end_turn, require, truth};
use crate::console::{Console, ReadResult};
use crate::engine::Engine;
use crate::input::tokenize;
use crate::signal::Eval;

/// `input()`: reads a command into `arg1` and `arg2`.
///
/// Unknown words store the `badword` state; missing words store 0. End of
/// input halts the engine and ends the turn.
pub(super) fn input<C: Console>(
    engine: &mut Engine<C>,
    _args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let defaults = *engine.world.defaults();
    if let Some(moved) = engine.flag_bit("moved") {
        engine.state.clear_flag(defaults.status, moved);
    }

    let prompt = engine.config.prompt.clone();
    let line = match engine.console.read_line(&prompt)? {
        ReadResult::Line(line) => line,
        ReadResult::Interrupted | ReadResult::Eof => {
            debug!("input exhausted, halting");
            engine.halted = true;
            return Err(end_turn());
        }
    };

    let words: Vec<String> = tokenize(&line)
        .into_iter()
        .filter(|word| !engine.world.is_noise(word))
        .collect();
    let badword = engine.state_or("badword", -2);
    let lookup = |word: Option<&String>| {
        word.map_or(0, |w| engine.world.vocabulary(w).map_or(badword, Refno::get))
    };
    let arg1 = lookup(words.first());
    let arg2 = lookup(words.get(1));
    trace!(?words, arg1, arg2, "command read");
    engine.state.set_variable(defaults.arg1, arg1);
    engine.state.set_variable(defaults.arg2, arg2);
    Ok(0)
}

/// True if every argument names the word in `arg1`.
///
/// A text literal matches by vocabulary; an identifier matches by value,
/// with a text compared through its first alternative and an identifier
/// whose value is 0 skipped.
pub(super) fn key_matches<C: Console>(engine: &mut Engine<C>, args: &[Expr]) -> Eval<bool> {
    let arg1 = engine.default_var(engine.world.defaults().arg1);
    if arg1 == 0 {
        return Ok(false);
    }
    for arg in args {
        let matched = match &arg.kind {
            ExprKind::Text(text) => engine.world.vocabulary(text).map(Refno::get) == Some(arg1),
            ExprKind::Ident(name) => {
                let value = engine.ident_value(name)?;
                if value == 0 {
                    continue;
                }
                match engine.world.text(Refno::new(value)) {
                    Some(text) => text
                        .alternatives
                        .first()
                        .and_then(|word| engine.world.vocabulary(word))
                        .map(Refno::get)
                        == Some(arg1),
                    None => value == arg1,
                }
            }
            _ => engine.eval(arg)? == arg1,
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `key(word, ...)`: 1 if the player's verb is every one of the words.
pub(super) fn key<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    Ok(truth(key_matches(engine, args)?))
}

/// `anyof(word, ...)`: 1 if the player's verb is any of the words.
pub(super) fn any_of<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    let arg1 = engine.default_var(engine.world.defaults().arg1);
    for arg in args {
        if engine.eval(arg)? == arg1 {
            return Ok(1);
        }
    }
    Ok(0)
}

/// `varis(variable, value, ...)`: 1 if the variable holds any of the values.
pub(super) fn var_is<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("varis", args, 1)?;
    let variable = Refno::new(engine.target_refno(&args[0])?);
    if !engine.world.space().contains(Category::Variable, variable) {
        return Ok(0);
    }
    let value = engine.default_var(variable);
    for arg in &args[1..] {
        if engine.eval(arg)? == value {
            return Ok(1);
        }
    }
    Ok(0)
}

/// `isverb(word, proc, args...)`: if the player typed `word`, calls `proc`
/// with the remaining arguments and ends the turn.
pub(super) fn is_verb<C: Console>(
    engine: &mut Engine<C>,
    args: &[Expr],
    _location: &SourceLocation,
) -> Eval<i32> {
    require("isverb", args, 2)?;
    if !key_matches(engine, &args[..1])? {
        return Ok(0);
    }
    let target = match args[1].as_ident().map(|name| (name, engine.world.identifier(name))) {
        Some((_, Some(Identifier::Proc(index)))) => index,
        Some((name, _)) => return Err(Error::new(ErrorKind::NotCallable(name.to_string())).into()),
        None => {
            return Err(Error::new(ErrorKind::InvalidDeclaration(
                "second argument to isverb must name a proc".to_string(),
            ))
            .into());
        }
    };
    engine.call_proc(target, &args[2..])?;
    Err(end_turn())
}
