use crate::core::classify::{self, Classification, Persona, Theme};
use crate::core::keywords::{KeywordEntry, KeywordExtractor};
use crate::core::phrases::PhraseExtractor;
use serde::{Deserialize, Serialize};

const LOW_CONFIDENCE: f64 = 0.4;
const SHORT_TRANSCRIPT_CHARS: usize = 1000;
const LONG_TRANSCRIPT_CHARS: usize = 5000;

/// Everything the pipeline knows about one transcript. Built fresh per call,
/// never mutated afterwards; downstream template filling and scoring read
/// from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub keywords: Vec<KeywordEntry>,
    pub key_phrases: Vec<String>,
    pub theme: Classification<Theme>,
    pub persona: Classification<Persona>,
    pub transcript_chars: usize,
    pub recommendations: Vec<String>,
}

impl ContentAnalysis {
    pub fn top_keyword_terms(&self, n: usize) -> Vec<&str> {
        self.keywords.iter().take(n).map(|k| k.term.as_str()).collect()
    }
}

/// Runs the whole pipeline: normalization feeds the keyword and phrase
/// extractors, the keyword output feeds both classifiers, everything lands in
/// one immutable record. Empty input is not an error; it produces empty lists
/// and the fallback theme at zero confidence.
pub fn analyze_transcript(text: &str) -> ContentAnalysis {
    let keywords = KeywordExtractor::default().extract_default(text);
    let key_phrases = PhraseExtractor::default().extract_default(text);
    let theme = classify::classify_theme(text);
    let persona = classify::classify_persona(text);

    let transcript_chars = text.chars().count();
    let recommendations = build_recommendations(theme.confidence, transcript_chars);

    log::debug!(
        "analyzed transcript: {} keywords, {} phrases, theme={} ({:.2}), persona={}",
        keywords.len(),
        key_phrases.len(),
        theme.label,
        theme.confidence,
        persona.label,
    );

    ContentAnalysis {
        keywords,
        key_phrases,
        theme,
        persona,
        transcript_chars,
        recommendations,
    }
}

fn build_recommendations(theme_confidence: f64, transcript_chars: usize) -> Vec<String> {
    let mut recommendations = Vec::new();

    if theme_confidence < LOW_CONFIDENCE {
        recommendations
            .push("Conteúdo tem tema disperso - considere focar em um tópico principal".to_string());
    }

    if transcript_chars < SHORT_TRANSCRIPT_CHARS {
        recommendations
            .push("Transcrição curta - considere adicionar mais detalhes na descrição".to_string());
    } else if transcript_chars > LONG_TRANSCRIPT_CHARS {
        recommendations.push("Conteúdo extenso - considere criar uma série de vídeos".to_string());
    }

    recommendations.extend(
        [
            "Use cards e end screens para direcionar para as landing pages",
            "Adicione timestamps na descrição para melhor experiência",
            "Inclua call-to-action claro para conversão",
            "Considere criar thumbnail personalizada com as palavras-chave",
        ]
        .map(String::from),
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_transcript_yields_empty_lists_and_fallback_theme() {
        let analysis = analyze_transcript("");
        assert_eq!(analysis.keywords, vec![]);
        assert_eq!(analysis.key_phrases, Vec::<String>::new());
        assert_eq!(analysis.theme.label, Theme::Business);
        assert_eq!(analysis.theme.confidence, 0.0);
        assert_eq!(analysis.persona.confidence, 0.0);
    }

    #[test]
    fn repeated_domain_word_tops_the_keyword_ranking() {
        let filler = "pois veja depois daquilo tal coisa assim dito ";
        let text = format!("{}{}", "liderança ".repeat(10), filler.repeat(3));
        let analysis = analyze_transcript(&text);

        let top = &analysis.keywords[0];
        assert_eq!(top.term, "liderança");
        assert_eq!(top.score, 20); // 10 occurrences x domain boost
    }

    #[test]
    fn dispersed_theme_gets_the_focus_recommendation() {
        let recs = build_recommendations(0.2, 2000);
        assert!(recs[0].contains("tema disperso"));
    }

    #[test]
    fn transcript_length_advice_fires_on_both_sides() {
        assert!(
            build_recommendations(0.9, 500)
                .iter()
                .any(|r| r.contains("Transcrição curta"))
        );
        assert!(
            build_recommendations(0.9, 9000)
                .iter()
                .any(|r| r.contains("Conteúdo extenso"))
        );
        assert!(
            build_recommendations(0.9, 3000)
                .iter()
                .all(|r| !r.contains("Transcrição curta") && !r.contains("Conteúdo extenso"))
        );
    }

    #[test]
    fn checklist_recommendations_are_always_present() {
        let recs = build_recommendations(0.9, 3000);
        assert_eq!(recs.len(), 4);
    }
}
