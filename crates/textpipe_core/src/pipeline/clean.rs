//! Raw text cleaning.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[а-яё]+(?:-[а-яё]+)?").expect("valid word regex"));

/// Cleans raw article text into space-separated words.
///
/// Hyphenated line breaks are rejoined, remaining line breaks become
/// spaces, and only Cyrillic words (optionally one hyphenated compound) are
/// kept. Case is preserved; the result is idempotent under re-cleaning.
pub fn clean_text(raw: &str) -> String {
    let joined = raw.replace("-\n", "").replace(['\n', '\r'], " ");
    WORD_RE
        .find_iter(&joined)
        .map(|word| word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
