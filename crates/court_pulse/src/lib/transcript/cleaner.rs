use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_ASCII_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").unwrap());

/// Flattens caption text into a single line of ASCII.
///
/// Whitespace runs collapse first, so removing non-ASCII afterwards can leave
/// a double space where a symbol sat between two words.
pub fn clean_transcript(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");
    NON_ASCII_RE.replace_all(&collapsed, "").into_owned()
}
