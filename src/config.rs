use crate::core::classify::Theme;
use std::env;

const UPLOAD_OPT_IN_ENV: &str = "VIDSEO_ALLOW_UPLOAD";

/// Runtime configuration for the suggestion providers, read from the
/// environment (a `.env` file is honored via dotenvy in `main`).
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_configured: bool,
    pub openai_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl AiConfig {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("VIDSEO_GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro".to_string()),
            openai_configured: env::var("OPENAI_API_KEY").is_ok_and(|k| !k.is_empty()),
            openai_model: env::var("VIDSEO_OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4.1".to_string()),
            max_output_tokens: 4000,
            temperature: 0.7,
        }
    }

    /// Transcript text leaves the machine only when the user opted in.
    pub fn upload_allowed(&self) -> bool {
        matches!(
            env::var(UPLOAD_OPT_IN_ENV)
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
                .as_str(),
            "1" | "true" | "yes"
        )
    }

    pub fn opt_in_hint() -> String {
        format!("Set {UPLOAD_OPT_IN_ENV}=1 to allow sending transcript content to an AI provider.")
    }
}

/// Channel identity used by the template-filling layer: boilerplate, landing
/// pages and social handles that end up in generated descriptions and tags.
#[derive(Debug, Clone)]
pub struct BrandProfile {
    pub channel_name: &'static str,
    pub site_url: &'static str,
    pub consulting_url: &'static str,
    pub contact_url: &'static str,
    pub instagram: &'static str,
    pub linkedin: &'static str,
    pub hashtag: &'static str,
    pub base_tags: &'static [&'static str],
}

impl BrandProfile {
    pub fn landing_page(&self, theme: Theme) -> &'static str {
        match theme {
            Theme::Business => "https://vetorestrategia.com.br/gestao-empresarial",
            Theme::Marketing => "https://vetorestrategia.com.br/marketing-digital",
            Theme::PersonalDevelopment => "https://vetorestrategia.com.br/desenvolvimento-pessoal",
            Theme::Communication => "https://vetorestrategia.com.br/comunicacao-estrategica",
            Theme::Management => "https://vetorestrategia.com.br/gestao-equipes",
        }
    }
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            channel_name: "Vetor Estratégia",
            site_url: "https://vetorestrategia.com.br",
            consulting_url: "https://vetorestrategia.com.br/consultoria",
            contact_url: "https://vetorestrategia.com.br/contato",
            instagram: "@vetorestrategia",
            linkedin: "Vetor Estratégia",
            hashtag: "#VetorEstrategia",
            base_tags: &[
                "vetor-estrategia",
                "marketing-digital",
                "empreendedorismo",
                "desenvolvimento-profissional",
                "gestao-empresarial",
                "lideranca",
                "estrategia-empresarial",
            ],
        }
    }
}
