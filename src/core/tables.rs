//! Fixed configuration tables for the analysis pipeline.
//!
//! All thresholds and word lists are editorial choices inherited from the
//! channel's content playbook. They are deliberately kept as data, not code:
//! every component takes its table by reference so tests can substitute one.
//! The corpus is Brazilian Portuguese, so the literals are too.

use crate::core::classify::{Persona, Theme};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// One labeled bucket of domain keywords, shared by the theme and persona
/// classifiers and by the keyword booster.
pub struct KeywordBucket<L> {
    pub label: L,
    pub keywords: &'static [&'static str],
}

/// Function words that carry no SEO weight.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "o", "e", "é", "de", "do", "da", "em", "um", "uma", "com", "como", "para", "por",
        "no", "na", "se", "eu", "ele", "ela", "nós", "vocês", "eles", "elas", "que", "qual",
        "quando", "onde", "porque", "então", "mas", "ou", "nem", "já", "ainda", "só", "também",
        "muito", "mais", "menos", "bem", "mal", "todo", "toda", "tudo", "nada", "algo", "alguém",
        "ninguém", "sim", "não", "talvez", "quem", "isso", "aquilo", "este", "esta", "esse",
        "essa", "aquele", "aquela", "meu", "minha", "seu", "sua", "nosso", "nossa", "deles",
        "delas", "ter", "ser", "estar", "fazer", "vai", "vou", "foi", "era", "está", "estou",
        "tem", "tinha", "faz", "fazia", "pode", "podia", "quer", "queria", "sabe", "sabia",
        "vem", "vinha", "ali", "aqui", "lá", "aí", "cá", "assim", "agora", "hoje", "ontem",
        "amanhã", "antes", "depois", "sempre", "nunca", "às", "vezes", "pelo", "pela", "pelos",
        "pelas", "contra", "sobre", "sob", "entre", "até", "desde", "durante", "através",
    ]
    .into_iter()
    .collect()
});

/// Domain keywords grouped by theme. First matching bucket wins when boosting
/// extracted keywords; declaration order also breaks classifier ties.
pub static THEME_BUCKETS: [KeywordBucket<Theme>; 5] = [
    KeywordBucket {
        label: Theme::Business,
        keywords: &[
            "empreendedorismo", "empresário", "negócio", "empresa", "gestão", "liderança",
            "estratégia", "planejamento", "crescimento", "escalabilidade", "inovação",
            "produtividade", "performance", "resultados", "metas", "objetivos",
        ],
    },
    KeywordBucket {
        label: Theme::Marketing,
        keywords: &[
            "marketing", "digital", "vendas", "tráfego", "leads", "conversão", "funil",
            "campanhas", "anúncios", "publicidade", "branding", "marca", "posicionamento",
            "segmentação", "audiência", "cliente", "público", "mercado",
        ],
    },
    KeywordBucket {
        label: Theme::PersonalDevelopment,
        keywords: &[
            "autoconhecimento", "autorresponsabilidade", "desenvolvimento", "pessoal",
            "profissional", "competências", "habilidades", "mindset", "mentalidade",
            "consciência", "reflexão", "aprendizado", "evolução", "transformação",
        ],
    },
    KeywordBucket {
        label: Theme::Communication,
        keywords: &[
            "comunicação", "oratória", "apresentação", "discurso", "storytelling", "persuasão",
            "influência", "networking", "relacionamento", "conexão", "diálogo", "escuta",
            "feedback", "clareza", "objetividade",
        ],
    },
    KeywordBucket {
        label: Theme::Management,
        keywords: &[
            "equipe", "time", "colaborador", "funcionário", "talento", "recrutamento",
            "seleção", "treinamento", "capacitação", "motivação", "engajamento", "cultura",
            "organizacional", "processo", "sistemática", "metodologia",
        ],
    },
];

/// Audience indicators, one bucket per persona. Same classifier as the themes,
/// different table.
pub static PERSONA_BUCKETS: [KeywordBucket<Persona>; 3] = [
    KeywordBucket {
        label: Persona::Strategic,
        keywords: &[
            "roi", "kpi", "métricas", "escalabilidade", "enterprise", "corporativo",
            "dashboard", "business intelligence", "previsibilidade", "sustentável",
        ],
    },
    KeywordBucket {
        label: Persona::Growth,
        keywords: &[
            "pme", "pequena empresa", "crescer", "escalar", "estruturar", "funil",
            "processo", "organizacional", "otimizar",
        ],
    },
    KeywordBucket {
        label: Persona::Smart,
        keywords: &[
            "rápido", "simples", "prático", "urgente", "sobrevivência", "início",
            "começar", "básico", "essencial",
        ],
    },
];

/// Words that qualify a sentence as a key phrase even without a domain hit.
pub static SIGNAL_WORDS: &[&str] = &[
    "problema",
    "solução",
    "resultado",
    "estratégia",
    "desenvolvimento",
];

/// Click-interest words rewarded by the title rubric.
pub static CURIOSITY_WORDS: &[&str] = &[
    "como", "segredo", "dicas", "estratégia", "resultado", "aumento", "melhores",
];

/// Call-to-action stems rewarded by the description rubric.
pub static CTA_WORDS: &[&str] = &[
    "inscreva", "curtir", "comentar", "compartilhar", "link", "acesse",
];

/// Core keywords the rubric and density calculations check against.
pub static CORE_KEYWORDS: &[&str] = &[
    "marketing digital",
    "tráfego pago",
    "meta ads",
    "google ads",
    "growth marketing",
    "vendas online",
    "crm",
    "funil de vendas",
    "lead generation",
];

/// Extra upload tags appended per detected theme.
pub fn theme_tags(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Business => &[
            "crescimento-empresarial",
            "inovacao-negocios",
            "escalabilidade",
            "resultados",
        ],
        Theme::Marketing => &["trafego-pago", "leads", "conversao", "vendas-digitais"],
        Theme::PersonalDevelopment => &[
            "autoconhecimento",
            "crescimento-pessoal",
            "soft-skills",
            "mindset",
        ],
        Theme::Communication => &["oratoria", "apresentacao", "persuasao", "networking"],
        Theme::Management => &[
            "gestao-equipes",
            "alta-performance",
            "cultura-organizacional",
            "processos",
        ],
    }
}

/// Title templates per theme; `{keyword}` is replaced with a top keyword in
/// title case, `{channel}` with the channel name.
pub fn title_templates(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Business => &[
            "Como {keyword} Pode Revolucionar seu Negócio | {channel}",
            "{keyword} para Empresários: Estratégias Comprovadas | {channel}",
            "Aumente seus Resultados com {keyword} | Método {channel}",
            "{keyword}: O Segredo dos Empresários de Sucesso | {channel}",
        ],
        Theme::Marketing => &[
            "{keyword} no Marketing Digital: Estratégias que Vendem | {channel}",
            "Como Usar {keyword} para Gerar Mais Leads | {channel}",
            "{keyword}: A Estratégia Secreta para Vender Mais | {channel}",
            "Aumente suas Vendas com {keyword} | Método Comprovado {channel}",
        ],
        Theme::PersonalDevelopment => &[
            "Como Desenvolver {keyword} e Transformar sua Carreira | {channel}",
            "{keyword}: A Chave para o Sucesso Profissional | {channel}",
            "Desenvolva {keyword} em 30 Dias e Mude sua Carreira | {channel}",
            "{keyword} na Prática: Estratégias que Funcionam | {channel}",
        ],
        Theme::Communication => &[
            "Comunicação e {keyword}: Como Influenciar e Persuadir | {channel}",
            "{keyword} na Comunicação Empresarial | {channel}",
            "Domine a Arte da {keyword} e Mude seus Resultados | {channel}",
            "{keyword}: Comunicação que Gera Resultados | {channel}",
        ],
        Theme::Management => &[
            "Gestão e {keyword}: Como Liderar Equipes de Alta Performance | {channel}",
            "{keyword} para Gestores: Estratégias Eficazes | {channel}",
            "Como Aplicar {keyword} na sua Gestão | Método {channel}",
            "{keyword}: O Diferencial dos Líderes de Sucesso | {channel}",
        ],
    }
}

/// One pillar of the five-pillar methodology rubric.
pub struct Pillar {
    pub key: char,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub weight: f64,
}

/// The methodology rubric: Campanha, Humanização, Anúncios, Vendas,
/// Inteligência. Weights sum to 1.0.
pub static PILLARS: [Pillar; 5] = [
    Pillar {
        key: 'C',
        name: "Campanha",
        description: "Planejamento estratégico e definição de público",
        keywords: &["estratégia", "planejamento", "pesquisa", "público", "mapa mental"],
        weight: 0.2,
    },
    Pillar {
        key: 'H',
        name: "Humanização",
        description: "Qualidade do vídeo e conexão humana",
        keywords: &["vídeo", "roteiro", "oratória", "humanizar", "conexão", "história"],
        weight: 0.25,
    },
    Pillar {
        key: 'A',
        name: "Anúncios",
        description: "Foco em performance e conversão",
        keywords: &["performance", "conversão", "otimização", "segmentação", "meta", "google"],
        weight: 0.2,
    },
    Pillar {
        key: 'V',
        name: "Vendas",
        description: "Geração de leads e vendas",
        keywords: &["vendas", "leads", "conversão", "crm", "oportunidade", "resultado"],
        weight: 0.2,
    },
    Pillar {
        key: 'I',
        name: "Inteligência",
        description: "Inteligência de dados e análise",
        keywords: &["dados", "métricas", "análise", "insights", "relatórios", "bi"],
        weight: 0.15,
    },
];

/// Audience profile embedded in AI suggestion prompts.
pub struct PersonaProfile {
    pub persona: Persona,
    pub name: &'static str,
    pub revenue: &'static str,
    pub focus: &'static [&'static str],
}

pub static PERSONA_PROFILES: [PersonaProfile; 3] = [
    PersonaProfile {
        persona: Persona::Strategic,
        name: "Empresário Estratégico",
        revenue: "R$ 300k+/mês",
        focus: &[
            "métricas detalhadas",
            "inovação tecnológica",
            "crescimento sustentável",
        ],
    },
    PersonaProfile {
        persona: Persona::Growth,
        name: "Empresário em Crescimento",
        revenue: "R$ 50-300k/mês",
        focus: &["cases de comprovação", "soluções práticas", "estruturar funil"],
    },
    PersonaProfile {
        persona: Persona::Smart,
        name: "Empresário Smart",
        revenue: "até R$ 50k/mês",
        focus: &["resultados rápidos", "geração de caixa", "leads reais"],
    },
];

pub fn persona_profile(persona: Persona) -> &'static PersonaProfile {
    PERSONA_PROFILES
        .iter()
        .find(|p| p.persona == persona)
        .unwrap_or(&PERSONA_PROFILES[0])
}
