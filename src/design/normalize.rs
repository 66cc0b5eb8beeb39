//! Cleanup of pasted sequence text before primer design

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("static pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("static pattern"));

/// Remove every non-word character (keeps letters, digits and `_`).
pub fn strip_non_word(text: &str) -> String {
    NON_WORD.replace_all(text, "").into_owned()
}

/// Remove all whitespace, including line separators.
pub fn strip_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}
