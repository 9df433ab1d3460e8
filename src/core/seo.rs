use crate::config::BrandProfile;
use crate::core::analysis::{self, ContentAnalysis};
use crate::core::scoring::{MethodologyScore, MethodologyScorer, SeoScore, SeoScorer};
use crate::core::tables::{theme_tags, title_templates};
use chrono::Local;
use serde::{Deserialize, Serialize};

const MAX_TITLE_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_TAGS: usize = 15;
const MIN_TAG_CHARS: usize = 3;
const MAX_CONTENT_TAGS: usize = 5;
const KEY_POINT_MIN_CHARS: usize = 30;

/// Primary title plus ranked alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSet {
    pub primary: String,
    pub alternatives: Vec<String>,
    pub keywords_used: Vec<String>,
}

/// Metadata for the video/thumbnail files that accompany an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub category: String,
    pub author: String,
    pub creation_date: String,
    pub theme_confidence: String,
}

/// The complete upload package for one video: analysis, generated fields and
/// their scores. This is what gets persisted as `package.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoPackage {
    pub video_id: String,
    pub generated_at: String,
    pub analysis: ContentAnalysis,
    pub title: TitleSet,
    pub description: String,
    pub tags: Vec<String>,
    pub metadata: FileMetadata,
    pub seo: SeoScore,
    pub methodology: MethodologyScore,
    #[serde(default)]
    pub ai_suggestions: Vec<String>,
}

/// Template-filling content generator. Everything it produces is a pure
/// function of the analysis, the fixed tables and the brand profile.
pub struct SeoContentGenerator {
    brand: BrandProfile,
}

impl Default for SeoContentGenerator {
    fn default() -> Self {
        Self {
            brand: BrandProfile::default(),
        }
    }
}

impl SeoContentGenerator {
    pub fn new(brand: BrandProfile) -> Self {
        Self { brand }
    }

    /// Runs the analysis pipeline and fills every template. The only
    /// non-deterministic inputs are the clock fields.
    pub fn build_package(&self, video_id: &str, transcript: &str) -> SeoPackage {
        let analysis = analysis::analyze_transcript(transcript);

        let title = self.generate_title(&analysis);
        let description = self.generate_description(&analysis, &title.primary);
        let tags = self.generate_tags(&analysis);
        let metadata = self.generate_metadata(&analysis, &title.primary);

        let seo = SeoScorer::default().score(&title.primary, &description, &tags);
        let methodology = MethodologyScorer::default().score(&title.primary, &description, &tags);

        SeoPackage {
            video_id: video_id.to_string(),
            generated_at: Local::now().to_rfc3339(),
            analysis,
            title,
            description,
            tags,
            metadata,
            seo,
            methodology,
            ai_suggestions: Vec::new(),
        }
    }

    pub fn generate_title(&self, analysis: &ContentAnalysis) -> TitleSet {
        let top_keywords: Vec<String> = analysis
            .top_keyword_terms(5)
            .into_iter()
            .map(String::from)
            .collect();

        let mut titles = Vec::new();
        for template in title_templates(analysis.theme.label) {
            for keyword in top_keywords.iter().take(3) {
                let candidate = template
                    .replace("{keyword}", &title_case(keyword))
                    .replace("{channel}", self.brand.channel_name);
                if candidate.chars().count() <= MAX_TITLE_CHARS {
                    titles.push(candidate);
                }
            }
        }

        let primary = titles.first().cloned().unwrap_or_else(|| {
            format!("Desenvolvimento Profissional | {}", self.brand.channel_name)
        });
        let alternatives = titles.into_iter().skip(1).take(5).collect();

        TitleSet {
            primary,
            alternatives,
            keywords_used: top_keywords,
        }
    }

    pub fn generate_description(&self, analysis: &ContentAnalysis, title: &str) -> String {
        let lead_keyword = analysis
            .keywords
            .first()
            .map(|k| k.term.clone())
            .unwrap_or_else(|| "desenvolvimento".to_string());

        let key_points: Vec<&String> = analysis
            .key_phrases
            .iter()
            .filter(|p| p.chars().count() > KEY_POINT_MIN_CHARS)
            .take(3)
            .collect();

        let mut description = format!(
            "🎯 {title}\n\n\
             Neste vídeo, exploramos conceitos fundamentais sobre {lead_keyword} e como \
             aplicar na prática para transformar seus resultados.\n\n\
             📋 PRINCIPAIS PONTOS ABORDADOS:\n"
        );

        for (i, point) in key_points.iter().enumerate() {
            description.push_str(&format!("\n{}. {}", i + 1, point.trim()));
        }

        let keyword_strip = analysis.top_keyword_terms(6).join(" | ");
        let landing_page = self.brand.landing_page(analysis.theme.label);

        description.push_str(&format!(
            "\n\n🔍 PALAVRAS-CHAVE:\n{keyword_strip}\n\n\
             🚀 TRANSFORME SEUS RESULTADOS:\n\
             Quer implementar essas estratégias no seu negócio? A {channel} oferece \
             consultoria especializada para empresários que buscam crescimento sustentável \
             e resultados consistentes.\n\n\
             👉 Conheça nossos serviços: {landing_page}\n\
             📞 Agende uma consultoria gratuita: {contact}\n\n\
             🔔 INSCREVA-SE no canal para mais conteúdos sobre:\n\
             • Desenvolvimento empresarial\n\
             • Marketing digital estratégico\n\
             • Liderança e gestão\n\
             • Crescimento de negócios\n\n\
             📱 NOS SIGA NAS REDES SOCIAIS:\n\
             Instagram: {instagram}\n\
             LinkedIn: {linkedin}\n\
             Site: {site}\n\n\
             {hashtag} #{lead_tag} #DesenvolvimentoProfissional #Empreendedorismo \
             #MarketingDigital #Lideranca #Resultados\n\n\
             ---\n\
             © {channel} - Todos os direitos reservados.",
            channel = self.brand.channel_name,
            contact = self.brand.contact_url,
            instagram = self.brand.instagram,
            linkedin = self.brand.linkedin,
            site = self.brand.site_url,
            hashtag = self.brand.hashtag,
            lead_tag = title_case(&lead_keyword).replace(' ', ""),
        ));

        // YouTube caps descriptions at 5000 characters; drop the hashtag tail
        // first, it is the lowest-value section.
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            if let Some(head) = description.split(self.brand.hashtag).next() {
                description = format!(
                    "{head}{} #{}",
                    self.brand.hashtag,
                    title_case(&lead_keyword).replace(' ', "")
                );
            }
        }

        description
    }

    pub fn generate_tags(&self, analysis: &ContentAnalysis) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        let mut push_unique = |tag: String, tags: &mut Vec<String>| {
            if tag.chars().count() >= MIN_TAG_CHARS && !tags.contains(&tag) && tags.len() < MAX_TAGS
            {
                tags.push(tag);
            }
        };

        for base in self.brand.base_tags {
            push_unique((*base).to_string(), &mut tags);
        }

        let mut content_tags = 0;
        for entry in &analysis.keywords {
            if content_tags >= MAX_CONTENT_TAGS {
                break;
            }
            if entry.term.chars().count() < 4 {
                continue;
            }
            let tag = entry.term.replace(' ', "-").to_lowercase();
            let before = tags.len();
            push_unique(tag, &mut tags);
            if tags.len() > before {
                content_tags += 1;
            }
        }

        for theme_tag in theme_tags(analysis.theme.label) {
            push_unique((*theme_tag).to_string(), &mut tags);
        }

        tags
    }

    pub fn generate_metadata(&self, analysis: &ContentAnalysis, title: &str) -> FileMetadata {
        let lead_keyword = analysis
            .keywords
            .first()
            .map(|k| title_case(&k.term))
            .unwrap_or_else(|| "Desenvolvimento".to_string());

        FileMetadata {
            title: title.to_string(),
            description: format!("{lead_keyword} - Conteúdo {}", self.brand.channel_name),
            keywords: analysis
                .top_keyword_terms(8)
                .join("-")
                .replace(' ', "-"),
            category: analysis.theme.label.label().to_string(),
            author: self.brand.channel_name.to_string(),
            creation_date: Local::now().format("%Y-%m-%d").to_string(),
            theme_confidence: format!("{:.2}", analysis.theme.confidence),
        }
    }
}

/// Uppercases the first letter of each word; Portuguese keywords come out of
/// the pipeline fully lowercased.
fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the human-readable report persisted as `summary.md` next to the
/// upload files.
pub fn render_summary(package: &SeoPackage) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# Pacote SEO: {}\n\nGerado em: {}\n\n",
        package.video_id, package.generated_at
    ));

    out.push_str(&format!(
        "## Classificação\n\n\
         - Tema: **{}** (confiança {:.0}%)\n\
         - Persona: **{}** (confiança {:.0}%)\n\n",
        package.analysis.theme.label,
        package.analysis.theme.confidence * 100.0,
        package.analysis.persona.label,
        package.analysis.persona.confidence * 100.0,
    ));

    out.push_str("## Notas SEO\n\n| Dimensão | Nota |\n|----------|------|\n");
    out.push_str(&format!("| Título | {:.1} |\n", package.seo.title.score));
    out.push_str(&format!(
        "| Descrição | {:.1} |\n",
        package.seo.description.score
    ));
    out.push_str(&format!("| Tags | {:.1} |\n", package.seo.tags.score));
    out.push_str(&format!("| **Geral** | **{:.2}** |\n\n", package.seo.overall));

    out.push_str("## Metodologia\n\n| Pilar | Nota | Palavras encontradas |\n|-------|------|----------------------|\n");
    for pillar in &package.methodology.pillars {
        out.push_str(&format!(
            "| {} ({}) | {:.1} | {} |\n",
            pillar.name, pillar.key, pillar.score, pillar.keywords_found
        ));
    }
    out.push_str(&format!(
        "\nNota ponderada: **{:.2}**\n\n",
        package.methodology.overall
    ));

    out.push_str(&format!("## Título\n\n{}\n", package.title.primary));
    if !package.title.alternatives.is_empty() {
        out.push_str("\nAlternativas:\n");
        for alt in &package.title.alternatives {
            out.push_str(&format!("- {alt}\n"));
        }
    }

    out.push_str(&format!(
        "\n## Tags ({})\n\n{}\n",
        package.tags.len(),
        package.tags.join(" | ")
    ));

    if !package.analysis.keywords.is_empty() {
        out.push_str("\n## Palavras-chave extraídas\n\n");
        let line = package
            .analysis
            .keywords
            .iter()
            .take(10)
            .map(|k| format!("{} ({})", k.term, k.score))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&textwrap::fill(&line, 100));
        out.push('\n');
    }

    if !package.analysis.key_phrases.is_empty() {
        out.push_str("\n## Frases-chave\n\n");
        for phrase in &package.analysis.key_phrases {
            out.push_str(&format!("- {}\n", textwrap::fill(phrase, 100)));
        }
    }

    let issues: Vec<&String> = package
        .seo
        .title
        .issues
        .iter()
        .chain(&package.seo.description.issues)
        .chain(&package.seo.tags.issues)
        .collect();
    if !issues.is_empty() {
        out.push_str("\n## Pontos de atenção\n\n");
        for issue in issues {
            out.push_str(&format!("- {issue}\n"));
        }
    }

    let suggestions: Vec<&String> = package
        .seo
        .title
        .suggestions
        .iter()
        .chain(&package.seo.description.suggestions)
        .chain(&package.seo.tags.suggestions)
        .collect();
    if !suggestions.is_empty() {
        out.push_str("\n## Sugestões\n\n");
        for suggestion in suggestions {
            out.push_str(&format!("- {suggestion}\n"));
        }
    }

    if !package.analysis.recommendations.is_empty() {
        out.push_str("\n## Recomendações\n\n");
        for rec in &package.analysis.recommendations {
            out.push_str(&format!("- {rec}\n"));
        }
    }

    if !package.ai_suggestions.is_empty() {
        out.push_str("\n## Sugestões da IA\n\n");
        for suggestion in &package.ai_suggestions {
            out.push_str(&format!("{suggestion}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::Theme;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const TRANSCRIPT: &str = indoc! {"
        00:00:01:00 - 00:00:05:00 Desconhecido Hoje vamos falar sobre liderança e gestão de equipes.
        A liderança verdadeira nasce da autorresponsabilidade no dia a dia.
        Um líder de alta performance constrói uma equipe com cultura forte e feedback constante.
        Liderança também é comunicação: clareza, escuta e objetividade mudam o resultado.
        Liderança, liderança e mais liderança: gestão de pessoas é treino diário.
    "};

    #[test]
    fn build_package_produces_consistent_fields() {
        let generator = SeoContentGenerator::default();
        let package = generator.build_package("video01", TRANSCRIPT);

        assert_eq!(package.video_id, "video01");
        assert!(!package.title.primary.is_empty());
        assert!(package.tags.len() <= MAX_TAGS);
        assert!(package.description.contains(&package.title.primary));
        assert!((0.0..=10.0).contains(&package.seo.overall));
        assert!(package.ai_suggestions.is_empty());
    }

    #[test]
    fn titles_carry_a_top_keyword_and_the_channel_name() {
        let generator = SeoContentGenerator::default();
        let analysis = analysis::analyze_transcript(TRANSCRIPT);
        let titles = generator.generate_title(&analysis);

        assert!(titles.primary.contains("Vetor Estratégia"));
        assert!(titles.primary.contains("Liderança"));
        assert!(titles.alternatives.len() <= 5);
        assert!(titles.primary.chars().count() <= MAX_TITLE_CHARS);
    }

    #[test]
    fn empty_analysis_falls_back_to_the_default_title() {
        let generator = SeoContentGenerator::default();
        let analysis = analysis::analyze_transcript("");
        let titles = generator.generate_title(&analysis);
        assert_eq!(
            titles.primary,
            "Desenvolvimento Profissional | Vetor Estratégia"
        );
    }

    #[test]
    fn description_contains_landing_page_and_cta_block() {
        let generator = SeoContentGenerator::default();
        let analysis = analysis::analyze_transcript(TRANSCRIPT);
        let description = generator.generate_description(&analysis, "Título de teste");

        let landing = BrandProfile::default().landing_page(analysis.theme.label);
        assert!(description.contains(landing));
        assert!(description.contains("INSCREVA-SE"));
        assert!(description.contains("PRINCIPAIS PONTOS ABORDADOS"));
        assert!(description.chars().count() <= MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn tags_are_unique_hyphenated_and_capped() {
        let generator = SeoContentGenerator::default();
        let analysis = analysis::analyze_transcript(TRANSCRIPT);
        let tags = generator.generate_tags(&analysis);

        assert!(tags.len() <= MAX_TAGS);
        assert!(tags.iter().all(|t| !t.contains(' ')));
        assert!(tags.iter().all(|t| t.chars().count() >= MIN_TAG_CHARS));
        let unique: std::collections::HashSet<&String> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len());
        assert!(tags.contains(&"lideranca".to_string()) || tags.contains(&"liderança".to_string()));
    }

    #[test]
    fn metadata_keywords_are_hyphen_joined() {
        let generator = SeoContentGenerator::default();
        let analysis = analysis::analyze_transcript(TRANSCRIPT);
        let metadata = generator.generate_metadata(&analysis, "Título");

        assert!(!metadata.keywords.contains(' '));
        assert!(metadata.keywords.contains("liderança"));
        assert_eq!(metadata.author, "Vetor Estratégia");
    }

    #[test]
    fn theme_of_the_fixture_is_management_or_business() {
        // The fixture mixes leadership and team management vocabulary; either
        // way it must never classify as marketing.
        let analysis = analysis::analyze_transcript(TRANSCRIPT);
        assert_ne!(analysis.theme.label, Theme::Marketing);
    }

    #[test]
    fn summary_renders_scores_and_sections() {
        let generator = SeoContentGenerator::default();
        let package = generator.build_package("video01", TRANSCRIPT);
        let summary = render_summary(&package);

        assert!(summary.contains("# Pacote SEO: video01"));
        assert!(summary.contains("## Notas SEO"));
        assert!(summary.contains("## Metodologia"));
        assert!(summary.contains("## Tags"));
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("funil de vendas"), "Funil De Vendas");
        assert_eq!(title_case("liderança"), "Liderança");
    }
}
