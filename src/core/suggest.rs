use crate::config::AiConfig;
use crate::core::seo::SeoPackage;
use crate::core::tables::persona_profile;
use crate::error::{Error, Result};
use async_openai::types::responses::{
    CreateResponseArgs, EasyInputMessageArgs, InputItem, InputParam, OutputItem,
    OutputMessageContent, Role,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "Você é um especialista em SEO para YouTube e growth marketing, \
     focado em conteúdo para empresários e empreendedores. Responda sempre em português.";

const DESCRIPTION_PREVIEW_CHARS: usize = 500;

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+[.)]").expect("valid regex"));

/// One interchangeable text-suggestion backend. Implementations only turn a
/// prompt into text; prompt construction and opt-in policy live in the
/// service so every provider behaves identically.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Google Gemini over its REST generateContent endpoint.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.gemini_model.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl SuggestionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: format!("{SYSTEM_PROMPT}\n\n{prompt}"),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        };

        let response: GeminiResponse = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::custom("Gemini returned an empty response"));
        }
        Ok(text)
    }
}

/// OpenAI through the Responses API; the client reads OPENAI_API_KEY itself.
pub struct OpenAiProvider {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_output_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: async_openai::Client::new(),
            model: config.openai_model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[async_trait]
impl SuggestionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateResponseArgs::default()
            .max_output_tokens(self.max_output_tokens)
            .model(self.model.clone())
            .input(InputParam::Items(vec![
                InputItem::EasyMessage(
                    EasyInputMessageArgs::default()
                        .role(Role::System)
                        .content(SYSTEM_PROMPT)
                        .build()?,
                ),
                InputItem::EasyMessage(
                    EasyInputMessageArgs::default()
                        .role(Role::User)
                        .content(prompt)
                        .build()?,
                ),
            ]))
            .build()?;

        let response = self.client.responses().create(request).await?;

        let mut content = String::new();
        for output in response.output {
            if let OutputItem::Message(out) = output {
                for c in out.content {
                    match c {
                        OutputMessageContent::OutputText(text) => content.push_str(&text.text),
                        _ => {
                            log::warn!("unexpected content type in OpenAI response");
                            continue;
                        }
                    }
                }
            }
        }

        if content.is_empty() {
            return Err(Error::custom("OpenAI returned an empty response"));
        }
        Ok(content)
    }
}

/// Picks the suggestion backend once, at startup, from the ranked chain:
/// Gemini first, OpenAI as fallback.
pub struct SuggestionService {
    provider: Box<dyn SuggestionProvider>,
    config: AiConfig,
}

impl SuggestionService {
    pub fn from_env() -> Result<Self> {
        Self::new(AiConfig::from_env())
    }

    pub fn new(config: AiConfig) -> Result<Self> {
        let provider: Box<dyn SuggestionProvider> =
            if let Some(key) = config.gemini_api_key.clone() {
                Box::new(GeminiProvider::new(key, &config))
            } else if config.openai_configured {
                Box::new(OpenAiProvider::new(&config))
            } else {
                return Err(Error::custom(
                    "No AI provider configured. Set GEMINI_API_KEY or OPENAI_API_KEY.",
                ));
            };

        log::info!("suggestion provider selected: {}", provider.name());
        Ok(Self { provider, config })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Asks the selected provider for 5-7 actionable optimization steps for
    /// an already-generated package. Content derived from the transcript
    /// leaves the machine, so the upload opt-in is enforced first.
    pub async fn optimization_suggestions(&self, package: &SeoPackage) -> Result<Vec<String>> {
        if !self.config.upload_allowed() {
            return Err(Error::custom(format!(
                "Suggestion generation requires explicit opt-in. {}",
                AiConfig::opt_in_hint()
            )));
        }

        let prompt = build_suggestion_prompt(package)?;
        let text = self.provider.complete(&prompt).await?;

        let suggestions = parse_numbered_lines(&text);
        if suggestions.is_empty() {
            // Model ignored the numbered-list instruction; hand back the raw
            // text rather than nothing.
            return Ok(vec![text]);
        }
        Ok(suggestions)
    }
}

/// Builds the analysis-grounded prompt: scores, classification and keywords
/// all come from the package record, never from the raw transcript.
pub fn build_suggestion_prompt(package: &SeoPackage) -> Result<String> {
    let persona = persona_profile(package.analysis.persona.label);
    let description_preview: String = package
        .description
        .chars()
        .take(DESCRIPTION_PREVIEW_CHARS)
        .collect();
    let pillars = serde_json::to_string_pretty(&package.methodology.pillars)?;
    let keywords = package.analysis.top_keyword_terms(10).join(", ");

    Ok(format!(
        "Como especialista em SEO do YouTube e na metodologia de cinco pilares do canal, \
         analise este conteúdo:\n\n\
         TÍTULO: {title}\n\
         DESCRIÇÃO: {description_preview}...\n\
         TEMA DETECTADO: {theme} (confiança {theme_confidence:.2})\n\
         PERSONA ALVO: {persona_name} ({persona_revenue})\n\
         FOCO DA PERSONA: {persona_focus}\n\n\
         NOTAS POR PILAR:\n{pillars}\n\n\
         NOTA SEO GERAL: {seo_overall}/10\n\n\
         PALAVRAS-CHAVE EXTRAÍDAS: {keywords}\n\n\
         Forneça de 5 a 7 sugestões ESPECÍFICAS e ACIONÁVEIS para otimizar este conteúdo, \
         considerando:\n\
         1. Os pilares com menor pontuação\n\
         2. SEO para YouTube\n\
         3. Adequação à persona alvo\n\
         4. Tom de voz confiável, analítico e determinado\n\n\
         Formato: lista numerada com sugestões diretas e específicas.",
        title = package.title.primary,
        theme = package.analysis.theme.label,
        theme_confidence = package.analysis.theme.confidence,
        persona_name = persona.name,
        persona_revenue = persona.revenue,
        persona_focus = persona.focus.join(", "),
        seo_overall = package.seo.overall,
    ))
}

fn parse_numbered_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| NUMBERED_LINE.is_match(line))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seo::SeoContentGenerator;
    use pretty_assertions::assert_eq;

    fn sample_package() -> SeoPackage {
        SeoContentGenerator::default().build_package(
            "video01",
            "A liderança e a gestão de equipes definem os resultados da empresa. \
             Estratégia de vendas e marketing digital geram crescimento.",
        )
    }

    #[test]
    fn prompt_embeds_scores_and_classification() {
        let package = sample_package();
        let prompt = build_suggestion_prompt(&package).expect("prompt");

        assert!(prompt.contains(&package.title.primary));
        assert!(prompt.contains("NOTAS POR PILAR"));
        assert!(prompt.contains("PALAVRAS-CHAVE EXTRAÍDAS"));
        assert!(prompt.contains(&format!("{}", package.analysis.theme.label)));
    }

    #[test]
    fn prompt_truncates_the_description_preview() {
        let mut package = sample_package();
        package.description = "x".repeat(2000);
        let prompt = build_suggestion_prompt(&package).expect("prompt");
        assert!(!prompt.contains(&"x".repeat(501)));
    }

    #[test]
    fn parses_numbered_suggestion_lines() {
        let text = "Resumo inicial\n1. Melhore o título\n 2) Adicione timestamps\ntexto solto\n3. Use mais tags";
        let parsed = parse_numbered_lines(text);
        assert_eq!(
            parsed,
            vec![
                "1. Melhore o título".to_string(),
                "2) Adicione timestamps".to_string(),
                "3. Use mais tags".to_string(),
            ]
        );
    }

    #[test]
    fn unconfigured_environment_yields_no_service() {
        let config = AiConfig {
            gemini_api_key: None,
            gemini_model: "gemini-2.5-pro".to_string(),
            openai_configured: false,
            openai_model: "gpt-4.1".to_string(),
            max_output_tokens: 4000,
            temperature: 0.7,
        };
        assert!(SuggestionService::new(config).is_err());
    }

    #[test]
    fn gemini_is_preferred_when_both_are_configured() {
        let config = AiConfig {
            gemini_api_key: Some("test-key".to_string()),
            gemini_model: "gemini-2.5-pro".to_string(),
            openai_configured: true,
            openai_model: "gpt-4.1".to_string(),
            max_output_tokens: 4000,
            temperature: 0.7,
        };
        let service = SuggestionService::new(config).expect("service");
        assert_eq!(service.provider_name(), "gemini");
    }
}
