use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}:\d{2}\s*-\s*\d{2}:\d{2}:\d{2}:\d{2}").expect("valid regex")
});
static BARE_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}:\d{2}:\d{2}:\d{2}").expect("valid regex"));
static SPEAKER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Desconhecido|Unknown)\s*").expect("valid regex"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Cleans a raw transcription down to lowercase words separated by single
/// spaces: subtitle timestamp ranges (`HH:MM:SS:FF - HH:MM:SS:FF`) and
/// speaker-label placeholders are dropped, punctuation becomes whitespace.
///
/// Always succeeds; an all-noise input normalizes to the empty string.
pub fn normalize(text: &str) -> String {
    let text = TIMESTAMP_RANGE.replace_all(text, "");
    let text = SPEAKER_LABEL.replace_all(&text, "");
    let text = NON_WORD.replace_all(&text, " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_lowercase()
}

/// Removes transcription artifacts (timestamps, speaker labels) from a single
/// sentence without touching its casing or punctuation. Used on phrase
/// candidates, which must stay readable.
pub fn strip_artifacts(sentence: &str) -> String {
    let sentence = TIMESTAMP_RANGE.replace_all(sentence, "");
    let sentence = BARE_TIMESTAMP.replace_all(&sentence, "");
    let sentence = SPEAKER_LABEL.replace_all(&sentence, "");
    sentence.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize, strip_artifacts};
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_timestamp_ranges_and_speaker_labels() {
        let raw = "00:01:02:10 - 00:01:05:20 Desconhecido Hoje vamos falar de gestão!";
        assert_eq!(normalize(raw), "hoje vamos falar de gestão");
    }

    #[test]
    fn punctuation_becomes_single_spaces() {
        assert_eq!(
            normalize("vendas, marketing... e (muito) mais?"),
            "vendas marketing e muito mais"
        );
    }

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(normalize("Liderança é ESTRATÉGIA"), "liderança é estratégia");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("  Foco;  em -- RESULTADOS!!  ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn no_double_spaces_and_no_stray_symbols() {
        let out = normalize("a@@b   c## d\n\n e\t$f");
        assert!(!out.contains("  "));
        assert!(out.chars().all(|c| c.is_alphanumeric() || c == ' ' || c == '_'));
    }

    #[test]
    fn empty_and_noise_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   ...!!!   "), "");
    }

    #[test]
    fn strip_artifacts_preserves_case_and_punctuation() {
        let s = "00:00:10:05 Desconhecido A estratégia certa muda o resultado.";
        assert_eq!(
            strip_artifacts(s),
            "A estratégia certa muda o resultado."
        );
    }
}
