//! Answer normalization.
//!
//! Turns an arbitrary answer string (a bare letter, a decorated letter,
//! option prose, or a boolean word in Portuguese/English) into a canonical
//! token that can be compared with `==`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resolve::letter_index;

/// Canonical token for every "true" synonym.
pub const TRUE_TOKEN: &str = "VERDADEIRO";

/// Canonical token for every "false" synonym.
pub const FALSE_TOKEN: &str = "FALSO";

const TRUE_SYNONYMS: [&str; 4] = ["V", "VERDADEIRA", "TRUE", "VERDADEIRO"];
const FALSE_SYNONYMS: [&str; 4] = ["F", "FALSA", "FALSE", "FALSO"];

/// Characters removed anywhere in free text.
const STRIPPED_PUNCTUATION: [char; 6] = ['.', ')', '-', '(', '[', ']'];

/// `(X)`, `[X]`, `X)`, `X]` or `X.` with X in A..E.
static DECORATED_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\((?P<paren>[A-E])\)|\[(?P<bracket>[A-E])\]|(?P<suffix>[A-E])[)\].])$")
        .expect("decorated letter pattern is valid")
});

/// Alternative marker in front of option prose: `A) `, `B. `, `C - `.
///
/// A letter followed by whitespace alone is not a marker: `A` and `E` open
/// ordinary Portuguese sentences ("A loja", "E a resposta").
static LETTER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-E]\s*[).\-][).\-\s]*").expect("letter prefix pattern is valid")
});

/// `(X)` marker in front of option prose.
static PAREN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([A-E]\)\s*").expect("paren prefix pattern is valid"));

/// Normalize a raw answer into its canonical token.
///
/// Accepts a `&str` or `None`. The result is one of:
/// - a single letter `A`..`E`,
/// - [`TRUE_TOKEN`] or [`FALSE_TOKEN`],
/// - uppercase free text with the alternative marker and `. ) - ( [ ]`
///   removed,
/// - the empty string, for absent or pure-punctuation input.
///
/// Normalization is idempotent: `normalize(normalize(x)) == normalize(x)`,
/// and runs in a single pass over the input.
///
/// ```
/// use gabarito_core::normalize::normalize;
///
/// assert_eq!(normalize("(c)"), "C");
/// assert_eq!(normalize("Falso"), "FALSO");
/// assert_eq!(normalize("A) Rio de Janeiro"), "RIO DE JANEIRO");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    let cleaned = raw.trim().to_uppercase();
    if cleaned.is_empty() {
        return cleaned;
    }
    if let Some(token) = canonical_form(&cleaned) {
        return token;
    }

    // One strip only. The result holds none of the marker punctuation, so a
    // second call finds nothing left to remove.
    let text = strip_free_text(&cleaned);
    canonical_form(&text).unwrap_or(text)
}

/// Returns `true` if `token` is [`TRUE_TOKEN`] or [`FALSE_TOKEN`].
pub fn is_boolean_token(token: &str) -> bool {
    token == TRUE_TOKEN || token == FALSE_TOKEN
}

/// Letter and boolean forms. Letters are checked before booleans so that the
/// decision for `F` only depends on it being outside the letter range.
fn canonical_form(cleaned: &str) -> Option<String> {
    if letter_index(cleaned).is_some() {
        return Some(cleaned.to_string());
    }

    if let Some(caps) = DECORATED_LETTER.captures(cleaned) {
        let letter = caps
            .name("paren")
            .or_else(|| caps.name("bracket"))
            .or_else(|| caps.name("suffix"))?;
        return Some(letter.as_str().to_string());
    }

    if TRUE_SYNONYMS.contains(&cleaned) {
        return Some(TRUE_TOKEN.to_string());
    }
    if FALSE_SYNONYMS.contains(&cleaned) {
        return Some(FALSE_TOKEN.to_string());
    }

    None
}

fn strip_free_text(cleaned: &str) -> String {
    let mut text = cleaned;

    // A marker with nothing after it ("A -") is a decorated letter, not a prefix.
    if let Some(m) = LETTER_PREFIX.find(text) {
        if m.end() < text.len() {
            text = &text[m.end()..];
        }
    }
    if let Some(m) = PAREN_PREFIX.find(text) {
        text = &text[m.end()..];
    }

    text.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
