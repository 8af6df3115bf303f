//! Answer-key resolution against an ordered option list.
//!
//! The answer key and the options of a question are often produced
//! independently, so the same answer may be a bare letter in one place and
//! full prose in the other. Resolution maps any of those forms onto the
//! option letter.

use crate::normalize::normalize;

/// Letters addressable by position in an option list.
pub const OPTION_LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Letter for a zero-based option position, if it is addressable.
pub fn option_letter(index: usize) -> Option<char> {
    OPTION_LETTERS.get(index).copied()
}

/// Zero-based position for a single-letter token `A`..`E`.
pub fn letter_index(token: &str) -> Option<usize> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => OPTION_LETTERS.iter().position(|&l| l == c),
        _ => None,
    }
}

/// Resolve an answer into the canonical option letter.
///
/// `options` is the ordered list rendered to the user; `None` and an empty
/// slice both mean the question has no discrete options. Falls back to the
/// normalized answer when no option matches, and returns an empty string for
/// empty input.
///
/// ```
/// use gabarito_core::resolve::resolve_to_canonical;
///
/// let options = vec!["Rio de Janeiro".to_string(), "São Paulo".to_string()];
/// assert_eq!(resolve_to_canonical("são paulo", Some(options.as_slice())), "B");
/// assert_eq!(resolve_to_canonical("Verdadeiro", None), "VERDADEIRO");
/// ```
pub fn resolve_to_canonical(answer: &str, options: Option<&[String]>) -> String {
    if answer.is_empty() {
        return String::new();
    }

    let norm = normalize(answer);
    if norm.is_empty() {
        return norm;
    }

    let Some(options) = options.filter(|o| !o.is_empty()) else {
        return norm;
    };

    // Fast path: a letter that points at an existing option.
    if letter_index(&norm).is_some_and(|i| i < options.len()) {
        return norm;
    }

    // Boolean answers match options reading VERDADEIRO/FALSO the same way.
    options
        .iter()
        .position(|text| normalize(text.as_str()) == norm)
        .and_then(option_letter)
        .map(|letter| letter.to_string())
        .unwrap_or(norm)
}
