//! Word error rate and the lexical similarity score derived from it.
//!
//! Tokens are compared by exact string equality. Callers are expected to run
//! both sides through [`normalize`](crate::normalize) first.

/// Word-level Levenshtein distance between `reference` and `hypothesis`.
///
/// Deletions, insertions and substitutions each cost one edit. Uses two
/// preallocated rows of the `(n+1) x (m+1)` table, so memory is `O(m)`.
pub fn word_edit_distance<R, H>(reference: &[R], hypothesis: &[H]) -> usize
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    let m = hypothesis.len();

    // Row 0: turning an empty reference into the first j hypothesis words.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for (i, ref_word) in reference.iter().enumerate() {
        curr[0] = i + 1;
        for (j, hyp_word) in hypothesis.iter().enumerate() {
            let cost = usize::from(ref_word.as_ref() != hyp_word.as_ref());
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            let substitution = prev[j] + cost;
            curr[j + 1] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}

/// Lexical similarity in `[0, 1]`: `max(0, 1 - WER)`.
///
/// An empty reference scores `0.0` whatever the hypothesis holds, including
/// an empty hypothesis. There is no accuracy to report against an empty
/// target sentence.
///
/// ```
/// use prosody_scoring::wer_score;
///
/// assert_eq!(wer_score(&["a", "b"], &["a", "b"]), 1.0);
/// assert_eq!(wer_score::<&str, &str>(&[], &[]), 0.0);
/// ```
pub fn wer_score<R, H>(reference: &[R], hypothesis: &[H]) -> f64
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    if reference.is_empty() {
        return 0.0;
    }
    let edits = word_edit_distance(reference, hypothesis);
    let wer = edits as f64 / reference.len() as f64;
    (1.0 - wer).max(0.0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
