//! Language label normalization.
//!
//! Whisper servers disagree on how they report the detected language: some
//! return ISO-639-1 codes (`"en"`), others the lowercase English name
//! (`"english"`). Scoring compares against `"en"`, so everything is folded to
//! codes here.

/// Names reported by Whisper's `verbose_json` mapped to ISO-639-1 codes.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("english", "en"),
    ("chinese", "zh"),
    ("german", "de"),
    ("spanish", "es"),
    ("russian", "ru"),
    ("korean", "ko"),
    ("french", "fr"),
    ("japanese", "ja"),
    ("portuguese", "pt"),
    ("turkish", "tr"),
    ("polish", "pl"),
    ("catalan", "ca"),
    ("dutch", "nl"),
    ("arabic", "ar"),
    ("swedish", "sv"),
    ("italian", "it"),
    ("indonesian", "id"),
    ("hindi", "hi"),
    ("finnish", "fi"),
    ("vietnamese", "vi"),
    ("hebrew", "he"),
    ("ukrainian", "uk"),
    ("greek", "el"),
    ("malay", "ms"),
    ("czech", "cs"),
    ("romanian", "ro"),
    ("danish", "da"),
    ("hungarian", "hu"),
    ("tamil", "ta"),
    ("norwegian", "no"),
    ("thai", "th"),
    ("urdu", "ur"),
    ("croatian", "hr"),
    ("bulgarian", "bg"),
    ("lithuanian", "lt"),
    ("persian", "fa"),
    ("slovak", "sk"),
    ("serbian", "sr"),
];

/// Fold a reported language label to a lowercase code.
///
/// Blank labels become `None`. Unknown names pass through lowercased.
pub fn normalize_language(label: &str) -> Option<String> {
    let lowered = label.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let code = LANGUAGE_NAMES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map_or(lowered.clone(), |(_, code)| (*code).to_string());
    Some(code)
}
