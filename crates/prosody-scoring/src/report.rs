//! Flat assessment record returned to clients.

use serde::Serialize;

use crate::engine::{ScoringContext, ScoringResult};
use crate::feedback::Feedback;

/// Wire form of a pronunciation assessment.
///
/// `detected_language` serializes as `null` when the model reported none.
/// `raw_avg_logprob` is omitted unless the total score was computed.
#[derive(Clone, Debug, Serialize)]
pub struct AssessmentReport {
    /// Sentence the speaker was asked to read.
    pub target_text: String,
    /// What the speech model heard.
    pub recognized_text: String,
    /// Blended total score.
    pub score: f64,
    /// Total as a whole percentage.
    pub score_percent: u8,
    /// Word accuracy score.
    pub lexical_score: f64,
    /// Word accuracy as a whole percentage.
    pub lexical_score_percent: u8,
    /// Confidence-derived accent score.
    pub accent_score: f64,
    /// Accent score as a whole percentage.
    pub accent_score_percent: u8,
    /// Message for the speaker.
    pub feedback: Feedback,
    /// Normalized target tokens.
    pub ref_words: Vec<String>,
    /// Normalized recognized tokens.
    pub hyp_words: Vec<String>,
    /// Language reported by the speech model.
    pub detected_language: Option<String>,
    /// Mean segment log-probability behind the accent score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_avg_logprob: Option<f64>,
}

impl AssessmentReport {
    /// Flatten a context and its scoring result.
    pub fn new(context: ScoringContext, result: ScoringResult) -> Self {
        let score_percent = result.score_percent();
        let lexical_score_percent = result.lexical_percent();
        let accent_score_percent = result.accent_percent();
        Self {
            target_text: context.target_text,
            recognized_text: context.recognized_text,
            score: result.total_score,
            score_percent,
            lexical_score: result.lexical_score,
            lexical_score_percent,
            accent_score: result.accent_score,
            accent_score_percent,
            feedback: result.feedback,
            ref_words: result.ref_words,
            hyp_words: result.hyp_words,
            detected_language: result.detected_language,
            raw_avg_logprob: result.raw_avg_logprob,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess;

    const WIRE_FIELDS: [&str; 12] = [
        "target_text",
        "recognized_text",
        "score",
        "score_percent",
        "lexical_score",
        "lexical_score_percent",
        "accent_score",
        "accent_score_percent",
        "feedback",
        "ref_words",
        "hyp_words",
        "detected_language",
    ];

    fn to_json(report: &AssessmentReport) -> serde_json::Value {
        serde_json::to_value(report).unwrap()
    }

    #[test]
    fn full_path_includes_raw_logprob() {
        let ctx = ScoringContext::new("The cat sat.", "the cat sat")
            .with_language("en")
            .with_confidences(vec![-0.3, -0.1]);
        let json = to_json(&assess(ctx));

        for field in WIRE_FIELDS {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert!((json["raw_avg_logprob"].as_f64().unwrap() - (-0.2)).abs() < 1e-12);
        assert_eq!(json["ref_words"], serde_json::json!(["the", "cat", "sat"]));
        assert_eq!(json["detected_language"], "en");
        assert_eq!(json["lexical_score_percent"], 100);
    }

    #[test]
    fn early_exit_omits_raw_logprob() {
        let ctx = ScoringContext::new("hello", "").with_language("en");
        let json = to_json(&assess(ctx));

        assert!(json.get("raw_avg_logprob").is_none());
        assert_eq!(json["feedback"], "No English words detected.");
        assert_eq!(json["score"], 0.0);
        assert_eq!(json["score_percent"], 0);
        assert_eq!(json["hyp_words"], serde_json::json!([]));
    }

    #[test]
    fn absent_language_serializes_null() {
        let json = to_json(&assess(ScoringContext::new("hello", "hello")));
        assert!(json["detected_language"].is_null());
        assert_eq!(json["feedback"], "Speech was not recognized as English.");
        assert_eq!(json["ref_words"], serde_json::json!([]));
    }

    #[test]
    fn percent_fields_follow_scores() {
        let ctx = ScoringContext::new("the cat sat", "the cat sad")
            .with_language("en")
            .with_confidences(vec![-0.75]);
        let report = assess(ctx);
        assert_eq!(report.score_percent, 62);
        assert_eq!(report.lexical_score_percent, 67);
        assert_eq!(report.accent_score_percent, 50);
    }
}
