//! Human-readable feedback and the threshold bands that select it.

use std::fmt;

use serde::{Serialize, Serializer};

/// Lexical score at or above which words count as "mostly correct".
pub const MOSTLY_CORRECT_LEXICAL: f64 = 0.8;
/// Accent score below which pronunciation counts as unclear.
pub const UNCLEAR_ACCENT: f64 = 0.5;
/// Total score band for [`Feedback::Excellent`].
pub const EXCELLENT_TOTAL: f64 = 0.9;
/// Total score band for [`Feedback::VeryGood`].
pub const VERY_GOOD_TOTAL: f64 = 0.75;
/// Total score band for [`Feedback::Understandable`].
pub const UNDERSTANDABLE_TOTAL: f64 = 0.5;

/// Outcome message attached to every scoring result.
///
/// Serializes as its message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Detected language was not English.
    NotEnglish,
    /// Transcript contained no English words.
    NoWordsDetected,
    /// Recognized speech looks like a different sentence.
    DifferentSentence,
    /// Words right, model confidence low.
    UnclearAccent,
    /// Total ≥ 0.9.
    Excellent,
    /// Total ≥ 0.75.
    VeryGood,
    /// Total ≥ 0.5.
    Understandable,
    /// Total < 0.5.
    ManyDifferences,
}

impl Feedback {
    /// The user-facing message.
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotEnglish => "Speech was not recognized as English.",
            Self::NoWordsDetected => "No English words detected.",
            Self::DifferentSentence => {
                "It seems you read a different sentence than the one provided."
            }
            Self::UnclearAccent => {
                "Words are mostly correct, but pronunciation/accent may be unclear."
            }
            Self::Excellent => "Pronunciation is excellent – almost perfect match.",
            Self::VeryGood => "Very good pronunciation – only minor issues.",
            Self::Understandable => "Understandable, but there are noticeable mistakes.",
            Self::ManyDifferences => "Many differences – try speaking more clearly and slowly.",
        }
    }

    /// Whether this feedback comes from an early exit that zeroes the total.
    pub const fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::NotEnglish | Self::NoWordsDetected | Self::DifferentSentence
        )
    }

    /// Select feedback for a fully scored attempt.
    ///
    /// Correct words with low confidence get their own message; everything
    /// else falls into a band by total score. Band cutoffs are inclusive.
    pub fn classify(lexical: f64, accent: f64, total: f64) -> Self {
        if lexical >= MOSTLY_CORRECT_LEXICAL && accent < UNCLEAR_ACCENT {
            Self::UnclearAccent
        } else {
            Self::from_total(total)
        }
    }

    /// Band a total score.
    pub fn from_total(total: f64) -> Self {
        if total >= EXCELLENT_TOTAL {
            Self::Excellent
        } else if total >= VERY_GOOD_TOTAL {
            Self::VeryGood
        } else if total >= UNDERSTANDABLE_TOTAL {
            Self::Understandable
        } else {
            Self::ManyDifferences
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(Feedback::from_total(0.9), Feedback::Excellent);
        assert_eq!(Feedback::from_total(0.75), Feedback::VeryGood);
        assert_eq!(Feedback::from_total(0.5), Feedback::Understandable);
    }

    #[test]
    fn just_below_boundaries() {
        assert_eq!(Feedback::from_total(0.899_999), Feedback::VeryGood);
        assert_eq!(Feedback::from_total(0.749_999), Feedback::Understandable);
        assert_eq!(Feedback::from_total(0.499_999), Feedback::ManyDifferences);
    }

    #[test]
    fn band_extremes() {
        assert_eq!(Feedback::from_total(1.0), Feedback::Excellent);
        assert_eq!(Feedback::from_total(0.0), Feedback::ManyDifferences);
    }

    #[test]
    fn unclear_accent_takes_priority() {
        // Total would be "very good" (0.7 + 0.06 = 0.76) but accent is weak.
        assert_eq!(Feedback::classify(1.0, 0.2, 0.76), Feedback::UnclearAccent);
    }

    #[test]
    fn unclear_accent_boundaries() {
        assert_eq!(Feedback::classify(0.8, 0.49, 0.707), Feedback::UnclearAccent);
        // Accent exactly 0.5 is not unclear
        assert_eq!(Feedback::classify(0.8, 0.5, 0.71), Feedback::Understandable);
        // Lexical just under 0.8 falls through to the bands
        assert_eq!(Feedback::classify(0.79, 0.0, 0.553), Feedback::Understandable);
    }

    #[test]
    fn rejection_variants() {
        assert!(Feedback::NotEnglish.is_rejection());
        assert!(Feedback::NoWordsDetected.is_rejection());
        assert!(Feedback::DifferentSentence.is_rejection());
        assert!(!Feedback::UnclearAccent.is_rejection());
        assert!(!Feedback::Excellent.is_rejection());
    }

    #[test]
    fn serializes_as_message() {
        let json = serde_json::to_string(&Feedback::NoWordsDetected).unwrap();
        assert_eq!(json, "\"No English words detected.\"");
    }

    #[test]
    fn display_matches_message() {
        assert_eq!(
            Feedback::VeryGood.to_string(),
            "Very good pronunciation – only minor issues."
        );
    }
}
