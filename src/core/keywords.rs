use crate::core::classify::Theme;
use crate::core::tables::{KeywordBucket, STOPWORDS, THEME_BUCKETS};
use crate::core::text;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;

pub const DEFAULT_MIN_LENGTH: usize = 4;
pub const DEFAULT_TOP_N: usize = 30;
/// Multiplier applied to the frequency of a token that matches a domain
/// keyword. Editorial constant from the channel playbook.
pub const DOMAIN_BOOST: u32 = 2;

/// A ranked keyword: `score` is frequency times the domain boost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub term: String,
    pub score: u32,
}

/// Frequency-based keyword ranking with stopword filtering and domain
/// boosting. Stateless; the tables are injected so tests can swap them.
pub struct KeywordExtractor<'t> {
    stopwords: &'t HashSet<&'static str>,
    buckets: &'t [KeywordBucket<Theme>],
}

impl Default for KeywordExtractor<'static> {
    fn default() -> Self {
        Self {
            stopwords: &STOPWORDS,
            buckets: &THEME_BUCKETS,
        }
    }
}

impl<'t> KeywordExtractor<'t> {
    pub fn with_tables(
        stopwords: &'t HashSet<&'static str>,
        buckets: &'t [KeywordBucket<Theme>],
    ) -> Self {
        Self { stopwords, buckets }
    }

    /// Extracts up to `top_n` keywords of at least `min_length` characters,
    /// sorted by descending score. Ties keep first-seen order. Empty or
    /// noise-only input yields an empty list.
    pub fn extract(&self, text: &str, min_length: usize, top_n: usize) -> Vec<KeywordEntry> {
        let normalized = text::normalize(text);

        // Frequency count in first-seen order, so the later sort is stable
        // against it.
        let mut order: Vec<String> = Vec::new();
        let mut freq: HashMap<String, u32> = HashMap::new();
        for token in normalized.split_whitespace() {
            if token.chars().count() < min_length
                || self.stopwords.contains(token)
                || token.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            if !freq.contains_key(token) {
                order.push(token.to_string());
            }
            *freq.entry(token.to_string()).or_insert(0) += 1;
        }

        let mut entries: Vec<KeywordEntry> = order
            .into_iter()
            .map(|term| {
                let count = freq[&term];
                let score = if self.is_domain_term(&term) {
                    count * DOMAIN_BOOST
                } else {
                    count
                };
                KeywordEntry { term, score }
            })
            .collect();

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(top_n);
        entries
    }

    pub fn extract_default(&self, text: &str) -> Vec<KeywordEntry> {
        self.extract(text, DEFAULT_MIN_LENGTH, DEFAULT_TOP_N)
    }

    /// Substring match in either direction against any bucket; the first
    /// matching bucket settles it, boosts never stack.
    fn is_domain_term(&self, term: &str) -> bool {
        self.buckets
            .iter()
            .any(|bucket| {
                bucket
                    .keywords
                    .iter()
                    .any(|kw| kw.contains(term) || term.contains(kw))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_yields_empty_list() {
        let extractor = KeywordExtractor::default();
        assert_eq!(extractor.extract_default(""), vec![]);
        assert_eq!(extractor.extract_default("   \n  "), vec![]);
    }

    #[test]
    fn filters_short_stopword_and_numeric_tokens() {
        let extractor = KeywordExtractor::default();
        let entries = extractor.extract_default("o time de 2024 tem foco e 1000 metas");
        let terms: Vec<&str> = entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["metas"]);
    }

    #[test]
    fn domain_terms_get_doubled_scores() {
        let extractor = KeywordExtractor::default();
        let filler = "coisa banal qualquer palavra neutra ";
        let text = format!("{}{}", "liderança ".repeat(10), filler.repeat(2));
        let entries = extractor.extract_default(&text);

        assert_eq!(entries[0].term, "liderança");
        // 10 occurrences, boosted by the domain factor.
        assert_eq!(entries[0].score, 10 * DOMAIN_BOOST);
    }

    #[test]
    fn sorted_non_increasing_and_capped_at_top_n() {
        let extractor = KeywordExtractor::default();
        let text = "vendas vendas vendas cliente cliente processo talento cultura feedback";
        let entries = extractor.extract(text, 4, 3);
        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let extractor = KeywordExtractor::default();
        // Neither word is a domain term; both appear once.
        let entries = extractor.extract_default("zebra abacaxi zebra abacaxi");
        let terms: Vec<&str> = entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["zebra", "abacaxi"]);
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        let extractor = KeywordExtractor::default();
        // "ação" is four characters but six bytes.
        let entries = extractor.extract("ação ação", 4, 10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "ação");
    }
}
