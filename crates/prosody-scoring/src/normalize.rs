//! English text normalization for word-level comparison.

use std::sync::LazyLock;

use regex::Regex;

/// Any run of characters that cannot appear in a lowercase English word.
static NON_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z']+").unwrap());

/// Turn free text into a sequence of lowercase word tokens.
///
/// Letters outside `a-z` (digits, punctuation, accented or non-Latin
/// characters) act as separators. Apostrophes survive so contractions such as
/// `don't` stay one token. Order and duplicates are preserved.
///
/// ```
/// use prosody_scoring::normalize;
///
/// assert_eq!(normalize("Hello, World!"), vec!["hello", "world"]);
/// assert!(normalize("  ...  ").is_empty());
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD_RUN
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(normalize("").is_empty());
    }

    #[test]
    fn whitespace_only() {
        assert!(normalize(" \t\n  ").is_empty());
    }

    #[test]
    fn punctuation_only() {
        assert!(normalize("?!... --- 123").is_empty());
    }

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(normalize("Hello, World!"), vec!["hello", "world"]);
    }

    #[test]
    fn keeps_contractions() {
        assert_eq!(normalize("don't stop"), vec!["don't", "stop"]);
        assert_eq!(normalize("It's JOHN'S car"), vec!["it's", "john's", "car"]);
    }

    #[test]
    fn digits_split_words() {
        assert_eq!(normalize("room101b"), vec!["room", "b"]);
    }

    #[test]
    fn non_latin_letters_are_separators() {
        assert_eq!(normalize("café crème"), vec!["caf", "cr", "me"]);
        assert!(normalize("Привет мир").is_empty());
    }

    #[test]
    fn duplicates_preserved_in_order() {
        assert_eq!(normalize("the the THE"), vec!["the", "the", "the"]);
    }

    #[test]
    fn collapses_mixed_separators() {
        assert_eq!(normalize("  a -- b\n\nc  "), vec!["a", "b", "c"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn idempotent_under_join(s in "\\PC{0,64}") {
                let once = normalize(&s);
                let twice = normalize(&once.join(" "));
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn tokens_are_lowercase_words(s in "\\PC{0,64}") {
                for token in normalize(&s) {
                    prop_assert!(!token.is_empty());
                    prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c == '\''));
                }
            }
        }
    }
}
