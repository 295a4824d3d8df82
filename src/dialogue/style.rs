//! Style hints: locale and CEFR-level instruction fragments.
//!
//! Every function here is total: unknown or empty codes yield an empty string
//! (or, for [`language_label`], the code itself) rather than an error.

// ---------------------------------------------------------------------------
// Dialect table
// ---------------------------------------------------------------------------

/// Locale code → vocabulary / accent instruction, written in the target
/// language where that helps the model stay in register.
const DIALECT_HINTS: &[(&str, &str)] = &[
    (
        "en-US",
        "Use U.S. English (American accent) with U.S. vocabulary (apartment, elevator, trash, soccer).",
    ),
    (
        "en-GB",
        "Use British English (UK accent) with UK vocabulary (flat, lift, rubbish, football).",
    ),
    (
        "es-ES",
        "Usa español de España (castellano peninsular): 'vosotros', vocabulario como ordenador, coche, zumo.",
    ),
    (
        "es-MX",
        "Usa español de México: 'ustedes', vocabulario como computadora, carro, jugo.",
    ),
    ("uk-UA", "Використовуй стандартну українську мову."),
    ("ru-RU", "Используй стандартный русский язык."),
    ("ar-SA", "Use Modern Standard Arabic (MSA)."),
    ("wo-SN", "Use Wolof as spoken in Senegal."),
    ("fr-FR", "Utilise le français standard (France)."),
    ("de-DE", "Verwende Standarddeutsch (Deutschland)."),
    ("it-IT", "Usa l'italiano standard (Italia)."),
    ("pt-PT", "Usa português de Portugal."),
    ("pt-BR", "Use português do Brasil."),
    ("zh-CN", "使用简体中文（中国大陆）。"),
    ("ja-JP", "標準的な日本語（日本）。"),
    ("ko-KR", "표준 한국어(대한민국)을 사용하세요."),
    ("tr-TR", "Standart Türkiye Türkçesi kullan."),
    ("pl-PL", "Używaj standardowego języka polskiego."),
];

/// Language code → English name used inside the prompt.
const LANGUAGE_LABELS: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("en", "English"),
    ("ar", "Arabic"),
    ("wo", "Wolof"),
    ("uk", "Ukrainian"),
    ("ru", "Russian"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("tr", "Turkish"),
    ("pl", "Polish"),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Exact-match lookup of a locale code such as `"en-GB"`.
///
/// Returns `""` for unknown codes.
pub fn dialect_hint(code: &str) -> &'static str {
    DIALECT_HINTS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, hint)| *hint)
        .unwrap_or("")
}

/// Pedagogical constraints for a CEFR level (case-insensitive).
///
/// A2, B1 and B2 have dedicated instructions; any other non-empty code gets a
/// generic "match complexity" instruction.  Empty input yields `""`.
///
/// ```
/// use dialogue_audio::dialogue::level_hint;
///
/// assert!(level_hint("a2").starts_with("CEFR level A2."));
/// assert_eq!(level_hint(""), "");
/// ```
pub fn level_hint(code: &str) -> String {
    let level = code.trim().to_uppercase();
    if level.is_empty() {
        return String::new();
    }

    let constraint = match level.as_str() {
        "A2" => {
            "Short, simple sentences (≤12 words), basic vocabulary, avoid idioms/slang, \
             present/preterite only, explain unknown words briefly."
        }
        "B1" => "Clear language, limited complex clauses, everyday topics, define terms when needed.",
        "B2" => "Moderate complexity, natural phrasing, some domain terms with brief explanations.",
        _ => "Match complexity to that level.",
    };

    format!("CEFR level {level}. {constraint}")
}

/// English name of a language code; unknown codes are returned unchanged.
pub fn language_label(code: &str) -> &str {
    LANGUAGE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// Space-joined non-empty hints for an optional dialect and level.
pub fn style_hint(dialect: Option<&str>, level: Option<&str>) -> String {
    let dialect = dialect.map(dialect_hint).unwrap_or("");
    let level = level.map(level_hint).unwrap_or_default();

    [dialect, level.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- dialect_hint ------------------------------------------------------

    #[test]
    fn known_dialects_have_hints() {
        assert!(dialect_hint("en-GB").contains("British English"));
        assert!(dialect_hint("en-US").contains("U.S. English"));
        assert!(dialect_hint("es-MX").contains("México"));
    }

    #[test]
    fn dialect_lookup_is_exact() {
        assert_eq!(dialect_hint("en-gb"), "");
        assert_eq!(dialect_hint("en"), "");
    }

    #[test]
    fn unknown_dialect_is_empty() {
        for code in ["", "xx-YY", "en_GB", "  "] {
            assert_eq!(dialect_hint(code), "", "code {code:?}");
        }
    }

    // ---- level_hint --------------------------------------------------------

    #[test]
    fn a2_has_sentence_length_limit() {
        let hint = level_hint("A2");
        assert!(hint.starts_with("CEFR level A2. "));
        assert!(hint.contains("≤12 words"));
    }

    #[test]
    fn level_is_case_insensitive() {
        assert_eq!(level_hint("b1"), level_hint("B1"));
    }

    #[test]
    fn unrecognised_level_gets_generic_instruction() {
        assert_eq!(level_hint("c1"), "CEFR level C1. Match complexity to that level.");
        assert_eq!(level_hint("Z9"), "CEFR level Z9. Match complexity to that level.");
    }

    #[test]
    fn empty_level_is_empty() {
        assert_eq!(level_hint(""), "");
        assert_eq!(level_hint("   "), "");
    }

    // ---- language_label ----------------------------------------------------

    #[test]
    fn labels_known_languages() {
        assert_eq!(language_label("en"), "English");
        assert_eq!(language_label("es"), "Spanish");
        assert_eq!(language_label("wo"), "Wolof");
    }

    #[test]
    fn unknown_language_passes_through() {
        assert_eq!(language_label("eu"), "eu");
    }

    // ---- style_hint --------------------------------------------------------

    #[test]
    fn style_hint_empty_when_neither_set() {
        assert_eq!(style_hint(None, None), "");
        assert_eq!(style_hint(Some(""), Some("")), "");
        assert_eq!(style_hint(Some("xx-XX"), None), "");
    }

    #[test]
    fn style_hint_joins_with_single_space() {
        let hint = style_hint(Some("en-GB"), Some("A2"));
        assert_eq!(hint, format!("{} {}", dialect_hint("en-GB"), level_hint("A2")));
    }
}
