use crate::core::keywords::{KeywordEntry, KeywordExtractor};
use crate::core::tables::{KeywordBucket, PERSONA_BUCKETS, THEME_BUCKETS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed set of content themes. Declaration order matters: it breaks
/// classifier ties and the first theme doubles as the zero-signal fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Business,
    Marketing,
    PersonalDevelopment,
    Communication,
    Management,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Business,
        Theme::Marketing,
        Theme::PersonalDevelopment,
        Theme::Communication,
        Theme::Management,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Business => "business",
            Theme::Marketing => "marketing",
            Theme::PersonalDevelopment => "personal-development",
            Theme::Communication => "communication",
            Theme::Management => "management",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three audience personas the channel produces for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    Strategic,
    Growth,
    Smart,
}

impl Persona {
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Strategic => "strategic",
            Persona::Growth => "growth",
            Persona::Smart => "smart",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScore<L> {
    pub label: L,
    pub score: f64,
}

/// Result of a weighted-bucket classification. `scores` carries every bucket
/// in declaration order so callers can render the full distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification<L> {
    pub label: L,
    pub scores: Vec<BucketScore<L>>,
    pub confidence: f64,
}

/// Weighted-bucket classifier shared by theme and persona detection: one
/// algorithm, two tables. A bucket keyword found in the text earns twice its
/// extracted keyword score when the extractor also ranked it, otherwise a
/// flat credit of one.
pub struct BucketClassifier<'t, L> {
    buckets: &'t [KeywordBucket<L>],
}

impl<'t, L: Copy + PartialEq> BucketClassifier<'t, L> {
    pub fn new(buckets: &'t [KeywordBucket<L>]) -> Self {
        Self { buckets }
    }

    pub fn classify(&self, text: &str, extracted: &[KeywordEntry]) -> Classification<L> {
        let lowered = text.to_lowercase();
        let ranked: HashMap<&str, u32> = extracted
            .iter()
            .map(|e| (e.term.as_str(), e.score))
            .collect();

        let scores: Vec<BucketScore<L>> = self
            .buckets
            .iter()
            .map(|bucket| {
                let score = bucket
                    .keywords
                    .iter()
                    .filter(|kw| lowered.contains(*kw))
                    .map(|kw| match ranked.get(*kw) {
                        Some(extracted_score) => 2.0 * f64::from(*extracted_score),
                        None => 1.0,
                    })
                    .sum();
                BucketScore {
                    label: bucket.label,
                    score,
                }
            })
            .collect();

        let total: f64 = scores.iter().map(|s| s.score).sum();

        // Strictly-greater comparison keeps the first declared bucket on ties
        // and makes it the fallback when nothing matched at all.
        let mut winner = &scores[0];
        for candidate in &scores[1..] {
            if candidate.score > winner.score {
                winner = candidate;
            }
        }

        let confidence = if total > 0.0 { winner.score / total } else { 0.0 };

        Classification {
            label: winner.label,
            scores,
            confidence,
        }
    }
}

/// Number of keywords fed to the classifiers; wider than the default ranking
/// so flat-credit matches stay rare.
pub const CLASSIFIER_TOP_N: usize = 50;

/// Classifies the dominant theme of a transcript.
pub fn classify_theme(text: &str) -> Classification<Theme> {
    let extracted = KeywordExtractor::default().extract(
        text,
        crate::core::keywords::DEFAULT_MIN_LENGTH,
        CLASSIFIER_TOP_N,
    );
    BucketClassifier::new(&THEME_BUCKETS).classify(text, &extracted)
}

/// Classifies the audience persona of a transcript, reusing the same
/// weighted-bucket technique over the persona table.
pub fn classify_persona(text: &str) -> Classification<Persona> {
    let extracted = KeywordExtractor::default().extract(
        text,
        crate::core::keywords::DEFAULT_MIN_LENGTH,
        CLASSIFIER_TOP_N,
    );
    BucketClassifier::new(&PERSONA_BUCKETS).classify(text, &extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn always_returns_a_theme_from_the_closed_set() {
        for text in ["", "texto sem relação alguma", "marketing vendas tráfego"] {
            let result = classify_theme(text);
            assert!(Theme::ALL.contains(&result.label));
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn empty_text_falls_back_to_first_declared_theme() {
        let result = classify_theme("");
        assert_eq!(result.label, Theme::Business);
        assert_eq!(result.confidence, 0.0);
        assert!(result.scores.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn marketing_heavy_text_classifies_as_marketing() {
        let text = "tráfego pago e funil de conversão geram leads; \
                    campanhas de marketing digital e anúncios vendem";
        let result = classify_theme(text);
        assert_eq!(result.label, Theme::Marketing);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn extracted_keywords_weigh_double_their_score() {
        // "liderança" repeated: extractor scores it 3 occurrences x2 boost = 6,
        // so the business bucket collects 2 x 6 = 12 from it.
        let text = "liderança liderança liderança";
        let result = classify_theme(text);
        assert_eq!(result.label, Theme::Business);
        let business = &result.scores[0];
        assert_eq!(business.score, 12.0);
    }

    #[test]
    fn persona_classifier_uses_its_own_table() {
        let text = "roi e kpi no dashboard corporativo garantem previsibilidade";
        let result = classify_persona(text);
        assert_eq!(result.label, Persona::Strategic);
    }

    #[test]
    fn confidence_is_share_of_total() {
        let text = "métricas e dashboard para começar do básico";
        let result = classify_persona(text);
        let total: f64 = result.scores.iter().map(|s| s.score).sum();
        let winning = result
            .scores
            .iter()
            .find(|s| s.label == result.label)
            .map(|s| s.score)
            .unwrap_or_default();
        assert!(total > 0.0);
        assert_eq!(result.confidence, winning / total);
    }
}
