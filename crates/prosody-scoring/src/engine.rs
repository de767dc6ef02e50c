//! Score blending and the early-exit decision procedure.

use tracing::debug;

use crate::confidence::{clamp_unit, mean_logprob, rescale_logprob};
use crate::feedback::Feedback;
use crate::normalize::normalize;
use crate::wer::wer_score;

/// Only English speech is assessed.
pub const EXPECTED_LANGUAGE: &str = "en";
/// Weight of the lexical score in the total.
pub const LEXICAL_WEIGHT: f64 = 0.7;
/// Weight of the accent score in the total.
pub const ACCENT_WEIGHT: f64 = 0.3;
/// Lexical scores below this are treated as a different sentence.
pub const DIFFERENT_SENTENCE_THRESHOLD: f64 = 0.3;

/// Inputs for one scoring pass, built per request from collaborator output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoringContext {
    /// Sentence the speaker was asked to read.
    pub target_text: String,
    /// What the speech model heard.
    pub recognized_text: String,
    /// Language code reported by the speech model, if any.
    pub detected_language: Option<String>,
    /// Average log-probability of each recognized segment, in order.
    pub segment_confidences: Vec<f64>,
}

impl ScoringContext {
    /// Context with no language and no segment confidences.
    pub fn new(target_text: impl Into<String>, recognized_text: impl Into<String>) -> Self {
        Self {
            target_text: target_text.into(),
            recognized_text: recognized_text.into(),
            detected_language: None,
            segment_confidences: Vec::new(),
        }
    }

    /// Set the detected language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.detected_language = Some(language.into());
        self
    }

    /// Set the per-segment confidences.
    #[must_use]
    pub fn with_confidences(mut self, confidences: Vec<f64>) -> Self {
        self.segment_confidences = confidences;
        self
    }

    fn is_english(&self) -> bool {
        self.detected_language.as_deref() == Some(EXPECTED_LANGUAGE)
    }
}

/// Outcome of a scoring pass. All scores lie in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringResult {
    /// WER-derived word accuracy.
    pub lexical_score: f64,
    /// Rescaled model confidence.
    pub accent_score: f64,
    /// Weighted blend of lexical and accent, or `0.0` on an early exit.
    pub total_score: f64,
    /// Message for the speaker.
    pub feedback: Feedback,
    /// Normalized target tokens.
    pub ref_words: Vec<String>,
    /// Normalized recognized tokens.
    pub hyp_words: Vec<String>,
    /// Language reported by the speech model.
    pub detected_language: Option<String>,
    /// Mean segment log-probability; only set when the total was computed.
    pub raw_avg_logprob: Option<f64>,
}

impl ScoringResult {
    fn rejected(
        feedback: Feedback,
        detected_language: Option<String>,
        ref_words: Vec<String>,
        hyp_words: Vec<String>,
        lexical_score: f64,
    ) -> Self {
        Self {
            lexical_score: clamp_unit(lexical_score),
            accent_score: 0.0,
            total_score: 0.0,
            feedback,
            ref_words,
            hyp_words,
            detected_language,
            raw_avg_logprob: None,
        }
    }

    /// Total score as a whole percentage.
    pub fn score_percent(&self) -> u8 {
        percent(self.total_score)
    }

    /// Lexical score as a whole percentage.
    pub fn lexical_percent(&self) -> u8 {
        percent(self.lexical_score)
    }

    /// Accent score as a whole percentage.
    pub fn accent_percent(&self) -> u8 {
        percent(self.accent_score)
    }
}

/// `round(score * 100)` with ties to even, within `[0, 100]`.
pub fn percent(score: f64) -> u8 {
    (clamp_unit(score) * 100.0).round_ties_even() as u8
}

/// Run the scoring decision procedure. The first matching branch wins:
///
/// 1. language is not English → zero scores, no tokens
/// 2. no recognized words → zero scores
/// 3. lexical score under [`DIFFERENT_SENTENCE_THRESHOLD`] → zero total
/// 4. otherwise blend lexical and accent and pick a band
pub fn score(context: &ScoringContext) -> ScoringResult {
    let language = context.detected_language.clone();

    if !context.is_english() {
        debug!(language = ?context.detected_language, "speech is not English, skipping scoring");
        return ScoringResult::rejected(Feedback::NotEnglish, language, Vec::new(), Vec::new(), 0.0);
    }

    let ref_words = normalize(&context.target_text);
    let hyp_words = normalize(&context.recognized_text);

    if hyp_words.is_empty() {
        debug!("no English words in transcript");
        return ScoringResult::rejected(
            Feedback::NoWordsDetected,
            language,
            ref_words,
            hyp_words,
            0.0,
        );
    }

    let lexical_score = wer_score(&ref_words, &hyp_words);
    if lexical_score < DIFFERENT_SENTENCE_THRESHOLD {
        debug!(lexical_score, "transcript does not match target sentence");
        return ScoringResult::rejected(
            Feedback::DifferentSentence,
            language,
            ref_words,
            hyp_words,
            lexical_score,
        );
    }

    let raw_avg_logprob = mean_logprob(&context.segment_confidences);
    let accent_score = rescale_logprob(raw_avg_logprob);
    let total_score = clamp_unit(LEXICAL_WEIGHT * lexical_score + ACCENT_WEIGHT * accent_score);
    let feedback = Feedback::classify(lexical_score, accent_score, total_score);

    debug!(
        lexical_score,
        accent_score,
        total_score,
        raw_avg_logprob,
        ?feedback,
        "pronunciation scored"
    );

    ScoringResult {
        lexical_score,
        accent_score,
        total_score,
        feedback,
        ref_words,
        hyp_words,
        detected_language: language,
        raw_avg_logprob: Some(raw_avg_logprob),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn en(target: &str, recognized: &str, confidences: Vec<f64>) -> ScoringContext {
        ScoringContext::new(target, recognized)
            .with_language("en")
            .with_confidences(confidences)
    }

    fn assert_all_zero(r: &ScoringResult) {
        assert_eq!(r.lexical_score, 0.0);
        assert_eq!(r.accent_score, 0.0);
        assert_eq!(r.total_score, 0.0);
        assert_eq!(r.score_percent(), 0);
    }

    // ── early exits ─────────────────────────────────────────────────

    #[test]
    fn non_english_language() {
        let ctx = ScoringContext::new("hello world", "cześć świecie").with_language("pl");
        let r = score(&ctx);
        assert_eq!(r.feedback, Feedback::NotEnglish);
        assert_eq!(
            r.feedback.message(),
            "Speech was not recognized as English."
        );
        assert_all_zero(&r);
        assert!(r.ref_words.is_empty());
        assert!(r.hyp_words.is_empty());
        assert_eq!(r.detected_language.as_deref(), Some("pl"));
        assert!(r.raw_avg_logprob.is_none());
    }

    #[test]
    fn missing_language_is_not_english() {
        let r = score(&ScoringContext::new("hello", "hello"));
        assert_eq!(r.feedback, Feedback::NotEnglish);
        assert!(r.detected_language.is_none());
    }

    #[test]
    fn language_code_is_exact() {
        let r = score(&ScoringContext::new("hello", "hello").with_language("EN"));
        assert_eq!(r.feedback, Feedback::NotEnglish);
    }

    #[test]
    fn empty_recognized_text() {
        let r = score(&en("hello world", "", vec![-0.1]));
        assert_eq!(r.feedback, Feedback::NoWordsDetected);
        assert_eq!(r.feedback.message(), "No English words detected.");
        assert_all_zero(&r);
        assert_eq!(r.ref_words, vec!["hello", "world"]);
        assert!(r.hyp_words.is_empty());
    }

    #[test]
    fn punctuation_only_recognized_text() {
        let r = score(&en("hello", " ... ", vec![]));
        assert_eq!(r.feedback, Feedback::NoWordsDetected);
    }

    #[test]
    fn empty_target_and_transcript() {
        let r = score(&en("", "", vec![]));
        assert_eq!(r.feedback, Feedback::NoWordsDetected);
        assert!(r.ref_words.is_empty());
    }

    #[test]
    fn empty_target_with_speech_is_different_sentence() {
        // Empty reference scores 0.0 lexically, which falls under the threshold.
        let r = score(&en("", "hello there", vec![0.0]));
        assert_eq!(r.feedback, Feedback::DifferentSentence);
        assert_eq!(r.lexical_score, 0.0);
        assert_eq!(r.hyp_words, vec!["hello", "there"]);
    }

    #[test]
    fn different_sentence() {
        let r = score(&en("hello world", "completely different sentence", vec![0.0]));
        assert_eq!(r.feedback, Feedback::DifferentSentence);
        assert_eq!(
            r.feedback.message(),
            "It seems you read a different sentence than the one provided."
        );
        assert!(r.lexical_score < DIFFERENT_SENTENCE_THRESHOLD);
        assert_eq!(r.total_score, 0.0);
        assert_eq!(r.accent_score, 0.0);
        assert!(r.raw_avg_logprob.is_none());
    }

    #[test]
    fn different_sentence_keeps_lexical_score() {
        // 4 reference words, 3 substitutions: lexical = 0.25
        let r = score(&en("one two three four", "one x y z", vec![0.0]));
        assert_eq!(r.feedback, Feedback::DifferentSentence);
        assert!((r.lexical_score - 0.25).abs() < 1e-12);
        assert_eq!(r.lexical_percent(), 25);
        assert_eq!(r.score_percent(), 0);
    }

    #[test]
    fn lexical_at_threshold_is_scored() {
        // 10 reference words, 7 substitutions: lexical = 1 - 0.7
        let target = "a b c d e f g h i j";
        let recognized = "a b c x x x x x x x";
        let r = score(&en(target, recognized, vec![0.0]));
        assert!(r.lexical_score >= DIFFERENT_SENTENCE_THRESHOLD);
        assert_eq!(r.lexical_percent(), 30);
        // 0.7 * 0.3 + 0.3 * 1.0 = 0.51
        assert_eq!(r.feedback, Feedback::Understandable);
        assert_eq!(r.score_percent(), 51);
    }

    // ── full computation ────────────────────────────────────────────

    #[test]
    fn perfect_reading() {
        let r = score(&en("Hello, world!", "hello world", vec![0.0, 0.0]));
        assert_eq!(r.lexical_score, 1.0);
        assert_eq!(r.accent_score, 1.0);
        assert_eq!(r.total_score, 1.0);
        assert_eq!(r.feedback, Feedback::Excellent);
        assert_eq!(r.raw_avg_logprob, Some(0.0));
        assert_eq!(r.score_percent(), 100);
    }

    #[test]
    fn blend_is_weighted() {
        let r = score(&en("the cat sat", "the cat sad", vec![-0.75]));
        let expected = LEXICAL_WEIGHT * r.lexical_score + ACCENT_WEIGHT * r.accent_score;
        assert!((r.accent_score - 0.5).abs() < 1e-12);
        assert_eq!(r.total_score, expected);
        // 0.7 * 0.667 + 0.3 * 0.5 = 0.6167
        assert_eq!(r.feedback, Feedback::Understandable);
        assert_eq!(r.score_percent(), 62);
        assert_eq!(r.lexical_percent(), 67);
        assert_eq!(r.accent_percent(), 50);
    }

    #[test]
    fn correct_words_low_confidence() {
        let r = score(&en("good morning", "good morning", vec![-1.2]));
        assert_eq!(r.lexical_score, 1.0);
        assert!(r.accent_score < 0.5);
        assert_eq!(r.feedback, Feedback::UnclearAccent);
    }

    #[test]
    fn no_segments_uses_fallback() {
        let r = score(&en("good morning", "good morning", vec![]));
        assert_eq!(r.raw_avg_logprob, Some(-5.0));
        assert_eq!(r.accent_score, 0.0);
        assert_eq!(r.total_score, LEXICAL_WEIGHT);
        assert_eq!(r.feedback, Feedback::UnclearAccent);
    }

    #[test]
    fn very_good_band() {
        // lexical 1.0, accent 0.6 → total 0.88
        let r = score(&en("see you soon", "see you soon", vec![-0.6]));
        assert!((r.accent_score - 0.6).abs() < 1e-12);
        assert_eq!(r.feedback, Feedback::VeryGood);
    }

    #[test]
    fn many_differences_band() {
        // lexical 0.4 (3 of 5 words wrong), accent 0 → total 0.28
        let r = score(&en("a b c d e", "a b x y z", vec![-2.0]));
        assert!((r.lexical_score - 0.4).abs() < 1e-12);
        assert_eq!(r.feedback, Feedback::ManyDifferences);
    }

    // ── percent ─────────────────────────────────────────────────────

    #[test]
    fn percent_rounds_half_to_even() {
        assert_eq!(percent(0.125), 12);
        assert_eq!(percent(0.375), 38);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.0), 0);
    }

    #[test]
    fn percent_clamps() {
        assert_eq!(percent(1.5), 100);
        assert_eq!(percent(-0.5), 0);
        assert_eq!(percent(f64::NAN), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn sentence() -> impl Strategy<Value = String> {
            proptest::collection::vec("[a-e]{1,3}", 0..8).prop_map(|w| w.join(" "))
        }

        proptest! {
            #[test]
            fn scores_within_bounds(
                target in sentence(),
                recognized in sentence(),
                lang in prop_oneof![Just("en"), Just("pl"), Just("de")],
                conf in proptest::collection::vec(-10.0f64..2.0, 0..6),
            ) {
                let r = score(&ScoringContext::new(target, recognized)
                    .with_language(lang)
                    .with_confidences(conf));
                for s in [r.lexical_score, r.accent_score, r.total_score] {
                    prop_assert!((0.0..=1.0).contains(&s));
                }
                for p in [r.score_percent(), r.lexical_percent(), r.accent_percent()] {
                    prop_assert!(p <= 100);
                }
            }

            #[test]
            fn full_path_total_is_blend(
                target in sentence(),
                recognized in sentence(),
                conf in proptest::collection::vec(-3.0f64..0.5, 0..6),
            ) {
                let r = score(&en(&target, &recognized, conf));
                if r.feedback.is_rejection() {
                    prop_assert_eq!(r.total_score, 0.0);
                    prop_assert!(r.raw_avg_logprob.is_none());
                } else {
                    prop_assert!(r.lexical_score >= DIFFERENT_SENTENCE_THRESHOLD);
                    let blend = LEXICAL_WEIGHT * r.lexical_score + ACCENT_WEIGHT * r.accent_score;
                    prop_assert!((r.total_score - blend).abs() < 1e-12);
                }
            }

            #[test]
            fn percents_match_scores(
                target in sentence(),
                recognized in sentence(),
                conf in proptest::collection::vec(-3.0f64..0.5, 0..6),
            ) {
                let r = score(&en(&target, &recognized, conf));
                prop_assert_eq!(u32::from(r.score_percent()), (r.total_score * 100.0).round_ties_even() as u32);
                prop_assert_eq!(u32::from(r.lexical_percent()), (r.lexical_score * 100.0).round_ties_even() as u32);
                prop_assert_eq!(u32::from(r.accent_percent()), (r.accent_score * 100.0).round_ties_even() as u32);
            }
        }
    }
}
