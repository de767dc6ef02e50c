//! Model confidence → accent score.
//!
//! Speech models report an average log-probability per recognized segment,
//! typically somewhere in `[-1.5, 0]`. Closer to zero means the model was more
//! certain about what it heard, which serves as a proxy for clear
//! pronunciation. Values outside that range are common and simply clamp.

/// Raw log-probability assumed when no segment confidences are available.
pub const FALLBACK_LOGPROB: f64 = -5.0;

/// Log-probability that maps to an accent score of `0.0`.
pub const LOGPROB_FLOOR: f64 = -1.5;

/// Clamp a score to `[0, 1]`. NaN maps to `0.0`.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Arithmetic mean of the segment log-probabilities, or
/// [`FALLBACK_LOGPROB`] when there are none.
pub fn mean_logprob(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return FALLBACK_LOGPROB;
    }
    confidences.iter().sum::<f64>() / confidences.len() as f64
}

/// Linear map `-1.5 → 0.0`, `0.0 → 1.0`, clamped to `[0, 1]`.
pub fn rescale_logprob(raw: f64) -> f64 {
    clamp_unit((raw - LOGPROB_FLOOR) / LOGPROB_FLOOR.abs())
}

/// Accent score in `[0, 1]` for a sequence of segment confidences.
///
/// ```
/// use prosody_scoring::rescale_confidence;
///
/// assert_eq!(rescale_confidence(&[0.0]), 1.0);
/// assert_eq!(rescale_confidence(&[]), 0.0);
/// ```
pub fn rescale_confidence(confidences: &[f64]) -> f64 {
    rescale_logprob(mean_logprob(confidences))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
