use crate::core::classify::Theme;
use crate::core::tables::{KeywordBucket, SIGNAL_WORDS, THEME_BUCKETS};
use crate::core::text;

pub const DEFAULT_MAX_PHRASES: usize = 15;
const MIN_PHRASE_CHARS: usize = 20;
const MAX_PHRASE_CHARS: usize = 150;

/// Pulls quotable sentences out of the raw transcription. Works on the
/// unnormalized text so the phrases keep their casing for reuse in
/// descriptions.
pub struct PhraseExtractor<'t> {
    buckets: &'t [KeywordBucket<Theme>],
    signal_words: &'t [&'static str],
}

impl Default for PhraseExtractor<'static> {
    fn default() -> Self {
        Self {
            buckets: &THEME_BUCKETS,
            signal_words: SIGNAL_WORDS,
        }
    }
}

impl<'t> PhraseExtractor<'t> {
    pub fn with_tables(
        buckets: &'t [KeywordBucket<Theme>],
        signal_words: &'t [&'static str],
    ) -> Self {
        Self {
            buckets,
            signal_words,
        }
    }

    /// Returns up to `max_phrases` sentences of 20-150 characters, in source
    /// order, each containing a domain keyword or a signal word. Never fails;
    /// an unusable transcript yields an empty list.
    pub fn extract_phrases(&self, raw_text: &str, max_phrases: usize) -> Vec<String> {
        let mut phrases = Vec::new();

        for candidate in raw_text.split(['.', '!', '?']) {
            if phrases.len() >= max_phrases {
                break;
            }

            let sentence = text::strip_artifacts(candidate);
            let len = sentence.chars().count();
            if len < MIN_PHRASE_CHARS || len > MAX_PHRASE_CHARS {
                continue;
            }

            if self.qualifies(&sentence) {
                phrases.push(sentence);
            }
        }

        phrases
    }

    pub fn extract_default(&self, raw_text: &str) -> Vec<String> {
        self.extract_phrases(raw_text, DEFAULT_MAX_PHRASES)
    }

    fn qualifies(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();

        let domain_hit = self
            .buckets
            .iter()
            .flat_map(|bucket| bucket.keywords.iter())
            .any(|kw| lowered.contains(kw));
        if domain_hit {
            return true;
        }

        // Signal words must match a whole token, not a fragment.
        lowered
            .split_whitespace()
            .any(|word| self.signal_words.contains(&word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_domain_sentences_in_source_order() {
        let raw = "A liderança muda tudo na empresa. O céu estava azul naquele dia claro. \
                   Nosso funil de vendas triplicou no trimestre.";
        let phrases = PhraseExtractor::default().extract_default(raw);
        assert_eq!(
            phrases,
            vec![
                "A liderança muda tudo na empresa".to_string(),
                "Nosso funil de vendas triplicou no trimestre".to_string(),
            ]
        );
    }

    #[test]
    fn signal_word_qualifies_without_domain_keyword() {
        let raw = "Aquele dia tivemos um problema bem chato.";
        let phrases = PhraseExtractor::default().extract_default(raw);
        assert_eq!(phrases.len(), 1);
    }

    #[test]
    fn drops_too_short_and_too_long_sentences() {
        let short = "Vendas agora.";
        let long = format!("A estratégia {} vendas.", "muito ".repeat(30));
        let raw = format!("{short} {long}");
        assert!(PhraseExtractor::default().extract_default(&raw).is_empty());
    }

    #[test]
    fn strips_timestamps_from_kept_sentences() {
        let raw = "00:01:02:03 Desconhecido A estratégia certa dobra o resultado.";
        let phrases = PhraseExtractor::default().extract_default(raw);
        assert_eq!(
            phrases,
            vec!["A estratégia certa dobra o resultado".to_string()]
        );
    }

    #[test]
    fn respects_max_phrases() {
        let raw = "Nossa estratégia de vendas funciona muito bem. ".repeat(10);
        let phrases = PhraseExtractor::default().extract_phrases(&raw, 3);
        assert_eq!(phrases.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(PhraseExtractor::default().extract_default("").is_empty());
    }
}
