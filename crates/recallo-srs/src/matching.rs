//! Typed-answer checking.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for comparison: lowercase, expand ligatures, strip
/// accents and punctuation, collapse whitespace.
pub fn normalize_answer(s: &str) -> String {
    s.to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe")
        .nfd()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `given` matches the card's answer or one of its accepted alternates.
///
/// An answer that normalizes to nothing never matches.
pub fn is_correct_answer(answer: &str, expected_answers: &[String], given: &str) -> bool {
    let given = normalize_answer(given);
    if given.is_empty() {
        return false;
    }

    std::iter::once(answer)
        .chain(expected_answers.iter().map(String::as_str))
        .any(|candidate| normalize_answer(candidate) == given)
}
