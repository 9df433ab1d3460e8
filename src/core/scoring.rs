use crate::core::tables::{CORE_KEYWORDS, CTA_WORDS, CURIOSITY_WORDS, PILLARS, Pillar};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static CHAPTER_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("valid regex"));

const MAX_DIMENSION_SCORE: f64 = 10.0;

// Editorial thresholds from the channel playbook; kept verbatim, no better
// ground truth exists.
const TITLE_IDEAL: std::ops::RangeInclusive<usize> = 60..=70;
const TITLE_ACCEPTABLE_LOW: std::ops::RangeInclusive<usize> = 50..=59;
const TITLE_ACCEPTABLE_HIGH: std::ops::RangeInclusive<usize> = 71..=80;
const DESCRIPTION_MIN_CHARS: usize = 125;
const TAGS_IDEAL: std::ops::RangeInclusive<usize> = 10..=15;
const TAGS_ACCEPTABLE: std::ops::RangeInclusive<usize> = 5..=9;

const TITLE_WEIGHT: f64 = 0.4;
const DESCRIPTION_WEIGHT: f64 = 0.4;
const TAGS_WEIGHT: f64 = 0.2;

/// Rubric outcome for one dimension: a 0-10 score plus what failed a
/// threshold (`issues`) and what to do about it (`suggestions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl DimensionScore {
    fn new() -> Self {
        Self {
            score: 0.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    fn add(&mut self, points: f64) {
        self.score = (self.score + points).min(MAX_DIMENSION_SCORE);
    }

    fn issue(&mut self, text: impl Into<String>) {
        self.issues.push(text.into());
    }

    fn suggest(&mut self, text: impl Into<String>) {
        self.suggestions.push(text.into());
    }
}

/// Full SEO assessment of a title/description/tags triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoScore {
    pub title: DimensionScore,
    pub description: DimensionScore,
    pub tags: DimensionScore,
    pub overall: f64,
    pub keyword_density: BTreeMap<String, f64>,
}

/// Rubric-based scorer for upload metadata. Stateless; every call is a pure
/// function of its inputs and the fixed tables.
pub struct SeoScorer<'t> {
    core_keywords: &'t [&'static str],
    curiosity_words: &'t [&'static str],
    cta_words: &'t [&'static str],
}

impl Default for SeoScorer<'static> {
    fn default() -> Self {
        Self {
            core_keywords: CORE_KEYWORDS,
            curiosity_words: CURIOSITY_WORDS,
            cta_words: CTA_WORDS,
        }
    }
}

impl<'t> SeoScorer<'t> {
    pub fn with_tables(
        core_keywords: &'t [&'static str],
        curiosity_words: &'t [&'static str],
        cta_words: &'t [&'static str],
    ) -> Self {
        Self {
            core_keywords,
            curiosity_words,
            cta_words,
        }
    }

    pub fn score(&self, title: &str, description: &str, tags: &[String]) -> SeoScore {
        let title_score = self.score_title(title);
        let description_score = self.score_description(description);
        let tags_score = self.score_tags(tags);

        let overall = round2(
            title_score.score * TITLE_WEIGHT
                + description_score.score * DESCRIPTION_WEIGHT
                + tags_score.score * TAGS_WEIGHT,
        );

        SeoScore {
            keyword_density: self.keyword_density(title, description, tags),
            title: title_score,
            description: description_score,
            tags: tags_score,
            overall,
        }
    }

    pub fn score_title(&self, title: &str) -> DimensionScore {
        let mut dim = DimensionScore::new();
        let len = title.chars().count();

        if TITLE_IDEAL.contains(&len) {
            dim.add(2.0);
        } else if TITLE_ACCEPTABLE_LOW.contains(&len) || TITLE_ACCEPTABLE_HIGH.contains(&len) {
            dim.add(1.0);
            dim.suggest("Considere ajustar o título para 60-70 caracteres para melhor exibição");
        } else {
            dim.issue("Título muito curto ou muito longo");
            dim.suggest("Mantenha o título entre 60-70 caracteres");
        }

        let title_lower = title.to_lowercase();
        if self.core_keywords.iter().any(|kw| title_lower.contains(kw)) {
            dim.add(2.0);
        } else {
            dim.issue("Nenhuma palavra-chave principal encontrada no título");
            dim.suggest(format!(
                "Inclua uma das palavras-chave: {}",
                self.core_keywords
                    .iter()
                    .take(3)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        if self
            .curiosity_words
            .iter()
            .any(|word| title_lower.contains(word))
        {
            dim.add(1.0);
        } else {
            dim.suggest(
                "Considere adicionar palavras que geram interesse como 'como', 'dicas', 'estratégia'",
            );
        }

        dim
    }

    pub fn score_description(&self, description: &str) -> DimensionScore {
        let mut dim = DimensionScore::new();

        if description.chars().count() >= DESCRIPTION_MIN_CHARS {
            dim.add(2.0);
        } else {
            dim.issue("Descrição muito curta");
            dim.suggest("A descrição deve ter pelo menos 125 caracteres");
        }

        let desc_lower = description.to_lowercase();
        let keywords_found = self
            .core_keywords
            .iter()
            .filter(|kw| desc_lower.contains(*kw))
            .count();
        match keywords_found {
            n if n >= 3 => dim.add(3.0),
            n if n >= 1 => dim.add(1.0),
            _ => {
                dim.issue("Poucas palavras-chave na descrição");
                dim.suggest("Inclua mais palavras-chave relevantes na descrição");
            }
        }

        if self.cta_words.iter().any(|word| desc_lower.contains(word)) {
            dim.add(1.0);
        } else {
            dim.suggest("Adicione call-to-action (inscreva-se, curtir, comentar)");
        }

        if CHAPTER_TIMESTAMP.is_match(description) {
            dim.add(1.0);
        } else {
            dim.suggest("Considere adicionar timestamps para vídeos longos");
        }

        dim
    }

    pub fn score_tags(&self, tags: &[String]) -> DimensionScore {
        let mut dim = DimensionScore::new();

        let count = tags.len();
        if TAGS_IDEAL.contains(&count) {
            dim.add(2.0);
        } else if TAGS_ACCEPTABLE.contains(&count) {
            dim.add(1.0);
            dim.suggest("Considere adicionar mais tags (10-15 é o ideal)");
        } else if count < *TAGS_ACCEPTABLE.start() {
            dim.issue("Muito poucas tags");
        } else {
            dim.issue("Muitas tags podem diluir a relevância");
        }

        let tags_text = tags.join(" ").to_lowercase();
        let core_in_tags = self
            .core_keywords
            .iter()
            .filter(|kw| tags_text.contains(*kw))
            .count();
        match core_in_tags {
            n if n >= 3 => dim.add(3.0),
            n if n >= 1 => dim.add(1.0),
            _ => dim.issue("Poucas palavras-chave principais nas tags"),
        }

        let has_variation = tags.iter().any(|tag| {
            let tag_lower = tag.to_lowercase();
            self.core_keywords.iter().any(|kw| tag_lower.contains(kw))
        });
        if has_variation {
            dim.add(1.0);
        }

        dim
    }

    /// Occurrences of each core keyword as a percentage of the combined word
    /// count, two decimals. All zeros when there are no words at all.
    pub fn keyword_density(
        &self,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> BTreeMap<String, f64> {
        let all_text = format!("{} {} {}", title, description, tags.join(" ")).to_lowercase();
        let word_count = all_text.split_whitespace().count();

        self.core_keywords
            .iter()
            .map(|kw| {
                let density = if word_count == 0 {
                    0.0
                } else {
                    let occurrences = all_text.matches(kw).count();
                    round2(occurrences as f64 * 100.0 / word_count as f64)
                };
                ((*kw).to_string(), density)
            })
            .collect()
    }
}

/// Score of one methodology pillar, normalized to 0-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub key: char,
    pub name: String,
    pub description: String,
    pub score: f64,
    pub keywords_found: usize,
    pub weight: f64,
}

/// The five-pillar methodology assessment with its weighted aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodologyScore {
    pub pillars: Vec<PillarScore>,
    pub overall: f64,
}

/// Scores content against the five-pillar methodology rubric: each pillar
/// keyword present in the content earns one point, two when it appears in
/// the title, normalized against the pillar's maximum.
pub struct MethodologyScorer<'t> {
    pillars: &'t [Pillar],
}

impl Default for MethodologyScorer<'static> {
    fn default() -> Self {
        Self { pillars: &PILLARS }
    }
}

impl<'t> MethodologyScorer<'t> {
    pub fn with_pillars(pillars: &'t [Pillar]) -> Self {
        Self { pillars }
    }

    pub fn score(&self, title: &str, description: &str, tags: &[String]) -> MethodologyScore {
        let title_lower = title.to_lowercase();
        let content = format!("{} {} {}", title, description, tags.join(" ")).to_lowercase();

        let pillars: Vec<PillarScore> = self
            .pillars
            .iter()
            .map(|pillar| {
                let mut points = 0u32;
                let mut found = 0usize;
                for kw in pillar.keywords {
                    if content.contains(kw) {
                        found += 1;
                        points += if title_lower.contains(kw) { 2 } else { 1 };
                    }
                }

                let max_possible = (pillar.keywords.len() * 2) as f64;
                let normalized = if max_possible > 0.0 {
                    (f64::from(points) / max_possible * 10.0).min(10.0)
                } else {
                    0.0
                };

                PillarScore {
                    key: pillar.key,
                    name: pillar.name.to_string(),
                    description: pillar.description.to_string(),
                    score: round2(normalized),
                    keywords_found: found,
                    weight: pillar.weight,
                }
            })
            .collect();

        let overall = round2(pillars.iter().map(|p| p.score * p.weight).sum());

        MethodologyScore { pillars, overall }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ideal_title_earns_the_full_additive_total() {
        // Exactly 60 characters, carries a core keyword and a curiosity word.
        let title = "Como dominar marketing digital e vender todos os dias aqui.";
        assert_eq!(title.chars().count(), 59); // sanity of the fixture below
        let title = format!("{title}x");
        assert_eq!(title.chars().count(), 60);

        let dim = SeoScorer::default().score_title(&title);
        assert_eq!(dim.score, 5.0); // 2 (length) + 2 (keyword) + 1 (curiosity)
        assert!(dim.issues.is_empty());
        assert!(dim.suggestions.is_empty());
    }

    #[test]
    fn short_title_with_keyword_and_curiosity_word() {
        // 42 characters: keyword and curiosity bonuses apply, length does not.
        let title = "Como aumentar vendas com marketing digital";
        let dim = SeoScorer::default().score_title(title);

        assert_eq!(dim.score, 3.0); // 0 (length) + 2 (keyword) + 1 ("como")
        assert_eq!(dim.issues, vec!["Título muito curto ou muito longo"]);
        assert!(
            dim.suggestions
                .iter()
                .any(|s| s.contains("60-70 caracteres"))
        );
    }

    #[test]
    fn near_ideal_title_length_earns_one_point_and_a_suggestion() {
        let base = "a".repeat(55);
        let dim = SeoScorer::default().score_title(&base);
        // 1 (acceptable length); no keyword, no curiosity word.
        assert_eq!(dim.score, 1.0);
        assert!(dim.issues.iter().all(|i| !i.contains("curto")));
        assert_eq!(dim.suggestions.len(), 3);
    }

    #[test]
    fn title_boundaries_fire_exactly_at_the_documented_thresholds() {
        let scorer = SeoScorer::default();
        for (len, expected) in [(49, 0.0), (50, 1.0), (59, 1.0), (60, 2.0), (70, 2.0), (71, 1.0), (80, 1.0), (81, 0.0)]
        {
            let title = "x".repeat(len);
            let dim = scorer.score_title(&title);
            // Strip the keyword/curiosity components: neither can fire on "xxx".
            assert_eq!(dim.score, expected, "length {len}");
        }
    }

    #[test]
    fn description_rubric_rewards_length_keywords_cta_and_timestamps() {
        let description = format!(
            "{} Aqui falamos de marketing digital, tráfego pago e funil de vendas. \
             Inscreva-se no canal! 01:23 introdução",
            "Conteúdo completo sobre crescimento. ".repeat(3)
        );
        let dim = SeoScorer::default().score_description(&description);
        assert_eq!(dim.score, 7.0); // 2 + 3 + 1 + 1
        assert!(dim.issues.is_empty());
    }

    #[test]
    fn short_description_without_keywords_flags_both_issues() {
        let dim = SeoScorer::default().score_description("Vídeo novo no ar.");
        assert_eq!(dim.score, 0.0);
        assert_eq!(
            dim.issues,
            vec!["Descrição muito curta", "Poucas palavras-chave na descrição"]
        );
        assert_eq!(dim.suggestions.len(), 4);
    }

    #[test]
    fn description_single_keyword_earns_one_point() {
        let description = format!("{} Falamos só de crm hoje.", "Texto neutro. ".repeat(10));
        let dim = SeoScorer::default().score_description(&description);
        // 2 (length) + 1 (one keyword); no CTA, no timestamp.
        assert_eq!(dim.score, 3.0);
    }

    #[test]
    fn twelve_tags_with_four_core_keywords_score_at_least_six() {
        let list = tags(&[
            "marketing digital",
            "tráfego pago",
            "crm",
            "funil de vendas",
            "lideranca",
            "gestao",
            "vendas",
            "negocios",
            "estrategia",
            "crescimento",
            "equipe",
            "resultados",
        ]);
        assert_eq!(list.len(), 12);
        let dim = SeoScorer::default().score_tags(&list);
        // 2 (count in 10-15) + 3 (>=3 core keywords) + 1 (substring variation)
        assert_eq!(dim.score, 6.0);
        assert!(dim.issues.is_empty());
    }

    #[test]
    fn tag_count_boundaries() {
        let scorer = SeoScorer::default();

        let four = tags(&["a", "b", "c", "d"]);
        let dim = scorer.score_tags(&four);
        assert!(dim.issues.contains(&"Muito poucas tags".to_string()));

        let sixteen: Vec<String> = (0..16).map(|i| format!("tag{i}")).collect();
        let dim = scorer.score_tags(&sixteen);
        assert!(
            dim.issues
                .contains(&"Muitas tags podem diluir a relevância".to_string())
        );

        let seven: Vec<String> = (0..7).map(|i| format!("tag{i}")).collect();
        let dim = scorer.score_tags(&seven);
        assert!(!dim.issues.contains(&"Muito poucas tags".to_string()));
        assert!(!dim.issues.contains(&"Muitas tags podem diluir a relevância".to_string()));
        assert!(dim.suggestions.iter().any(|s| s.contains("10-15")));
    }

    #[test]
    fn overall_is_the_weighted_average_rounded_to_two_decimals() {
        let scorer = SeoScorer::default();
        let title = "Como aumentar vendas com marketing digital"; // 3.0
        let description = "curta"; // 0.0
        let list = tags(&["marketing digital", "crm", "tráfego pago"]); // 0+3+1 = 4.0

        let result = scorer.score(title, description, &list);
        assert_eq!(result.title.score, 3.0);
        assert_eq!(result.description.score, 0.0);
        assert_eq!(result.tags.score, 4.0);
        assert_eq!(result.overall, round2(3.0 * 0.4 + 0.0 * 0.4 + 4.0 * 0.2));
    }

    #[test]
    fn dimension_scores_stay_within_bounds() {
        let scorer = SeoScorer::default();
        let stuffed = format!(
            "Como usar marketing digital, tráfego pago, meta ads, google ads, growth marketing, \
             vendas online, crm, funil de vendas e lead generation | 01:00 {}",
            "inscreva-se acesse o link ".repeat(5)
        );
        let many: Vec<String> = (0..12).map(|_| stuffed.clone()).collect();
        let result = scorer.score(&stuffed, &stuffed, &many);
        for dim in [&result.title, &result.description, &result.tags] {
            assert!((0.0..=10.0).contains(&dim.score));
        }
    }

    #[test]
    fn keyword_density_counts_occurrences_per_hundred_words() {
        let scorer = SeoScorer::default();
        let density = scorer.keyword_density("crm crm", "crm é essencial", &[]);
        // 3 occurrences of "crm" out of 5 words = 60%.
        assert_eq!(density["crm"], 60.0);
        assert_eq!(density["meta ads"], 0.0);
    }

    #[test]
    fn keyword_density_of_empty_input_is_zero() {
        let scorer = SeoScorer::default();
        let density = scorer.keyword_density("", "", &[]);
        assert!(density.values().all(|v| *v == 0.0));
    }

    #[test]
    fn methodology_doubles_points_for_title_hits() {
        let scorer = MethodologyScorer::default();
        let result = scorer.score(
            "Estratégia e planejamento de público",
            "pesquisa de mercado com mapa mental",
            &[],
        );
        let campaign = &result.pillars[0];
        assert_eq!(campaign.key, 'C');
        assert_eq!(campaign.keywords_found, 5);
        // estratégia/planejamento/público in the title (2 each), pesquisa and
        // mapa mental only in the description (1 each): 8 of 10 -> 8.0.
        assert_eq!(campaign.score, 8.0);
    }

    #[test]
    fn methodology_overall_is_weight_blended() {
        let scorer = MethodologyScorer::default();
        let result = scorer.score("vendas e dados", "métricas de conversão e leads", &[]);
        let expected = round2(result.pillars.iter().map(|p| p.score * p.weight).sum());
        assert_eq!(result.overall, expected);
        assert!((0.0..=10.0).contains(&result.overall));
    }
}
