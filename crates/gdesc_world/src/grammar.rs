//! Built-in function names reserved by the game language grammar.
//!
//! The engine's built-in table must implement exactly this set, and no
//! user procedure may take one of these names.

/// Every built-in name the grammar recognizes, in grammar order.
pub const GRAMMAR_BUILTINS: [&str; 34] = [
    "input",
    "in",
    "chance",
    "getrandom",
    "have",
    "ishere",
    "isnear",
    "isflag",
    "setflag",
    "clearflag",
    "isat",
    "atplace",
    "varis",
    "key",
    "anyof",
    "query",
    "usertyped",
    "needcmd",
    "flush",
    "apport",
    "get",
    "drop",
    "isverb",
    "goto",
    "move",
    "smove",
    "say",
    "append",
    "quip",
    "respond",
    "describe",
    "vocab",
    "tie",
    "stop",
];

/// Returns true if `name` is a reserved built-in (case-insensitive).
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    GRAMMAR_BUILTINS
        .iter()
        .any(|builtin| builtin.eq_ignore_ascii_case(name))
}
