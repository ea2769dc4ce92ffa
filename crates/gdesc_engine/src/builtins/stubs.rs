//! Built-ins the grammar reserves that have no observable effect.
//!
//! | Name        | Intended meaning                                   |
//! |-------------|----------------------------------------------------|
//! | `query`     | ask the player a yes/no question                   |
//! | `usertyped` | test the raw text of the last command              |
//! | `needcmd`   | require a further command word                     |
//! | `flush`     | abandon a multi-object command and its input       |
//! | `smove`     | move with a custom message                         |
//! | `append`    | continue the previous output line                  |
//! | `vocab`     | list the verbs an entity responds to               |
//! | `tie`       | bind words to an entity                            |
//!
//! Each returns 0 without evaluating its arguments.

use gdesc_foundation::SourceLocation;
use gdesc_world::Expr;
use tracing::trace;

use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Eval;

pub(super) const NAMES: [&str; 8] = [
    "query",
    "usertyped",
    "needcmd",
    "flush",
    "smove",
    "append",
    "vocab",
    "tie",
];

pub(super) fn no_op<C: Console>(
    _engine: &mut Engine<C>,
    args: &[Expr],
    location: &SourceLocation,
) -> Eval<i32> {
    trace!(%location, args = args.len(), "no-op built-in");
    Ok(0)
}
