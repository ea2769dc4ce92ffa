//! Player input tokenizing.

/// Splits a line of player input into lowercase words.
///
/// Anything other than letters, digits, `-` and `'` separates words.
///
/// # Example
///
/// ```
/// use gdesc_engine::tokenize;
///
/// assert_eq!(tokenize("Take the LAMP!"), vec!["take", "the", "lamp"]);
/// ```
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '\''))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}
