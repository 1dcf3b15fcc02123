//! Picks the script blob most likely to carry product data and tidies it up
//! before it is sent to the model.

use std::cmp::Reverse;
use std::sync::LazyLock;

use regex::Regex;

/// Words dropped outright by [`clean_text`], matched case-insensitively.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "the", "of", "or", "to", "in", "on", "for", "with", "is",
];

static NOISE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:seo|schema)\b").expect("valid noise word regex"));

/// Whether the chosen candidate is cleaned before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupMode {
    #[default]
    Raw,
    Clean,
}

impl CleanupMode {
    pub fn apply(self, candidate: &str) -> String {
        match self {
            CleanupMode::Raw => candidate.to_string(),
            CleanupMode::Clean => clean_text(candidate),
        }
    }
}

/// Returns the longest script text by character count.
///
/// Ties go to the earliest script. `None` when `scripts` is empty.
pub fn select_candidate(scripts: &[String]) -> Option<&str> {
    let mut ranked: Vec<&String> = scripts.iter().collect();
    ranked.sort_by_key(|s| Reverse(s.chars().count()));
    ranked.into_iter().next().map(String::as_str)
}

/// Strips `seo`/`schema` noise words and stop-words, and collapses every
/// whitespace run (line breaks included) to a single space.
///
/// The output is one line. Surviving tokens keep their order and the result
/// is never longer than the input. Applying it twice is the same as
/// applying it once.
pub fn clean_text(text: &str) -> String {
    NOISE_WORDS
        .replace_all(text, "")
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.iter().any(|w| w.eq_ignore_ascii_case(token))
}
