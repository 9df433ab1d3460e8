use indoc::indoc;
use pretty_assertions::assert_eq;
use vidseo::core::analysis::analyze_transcript;
use vidseo::core::classify::Theme;
use vidseo::core::load_transcript_file;
use vidseo::core::scoring::SeoScorer;
use vidseo::core::seo::SeoContentGenerator;

const TRANSCRIPT: &str = indoc! {"
    00:00:01:00 - 00:00:06:12 Desconhecido Hoje eu quero falar com você sobre liderança.
    00:00:06:13 - 00:00:12:00 Desconhecido A liderança não é um cargo, é uma decisão diária.
    00:00:12:01 - 00:00:20:05 Desconhecido Um bom líder assume a autorresponsabilidade pelos resultados da equipe.
    00:00:20:06 - 00:00:27:10 Desconhecido A estratégia sem execução é só um problema adiado.
    00:00:27:11 - 00:00:35:00 Desconhecido Liderança, gestão e comunicação andam juntas na empresa.
    00:00:35:01 - 00:00:41:22 Desconhecido Quando a liderança melhora, as vendas e o marketing também melhoram.
"};

#[test]
fn full_pipeline_on_a_realistic_transcript() {
    let analysis = analyze_transcript(TRANSCRIPT);

    // No timestamp fragments may survive into keywords.
    assert!(analysis.keywords.iter().all(|k| !k.term.contains(':')));
    assert!(analysis.keywords.len() <= 30);
    assert!(
        analysis
            .keywords
            .windows(2)
            .all(|w| w[0].score >= w[1].score)
    );
    assert!(analysis.keywords.iter().all(|k| k.term.chars().count() >= 4));

    // Phrases keep their original casing and carry no speaker labels.
    assert!(!analysis.key_phrases.is_empty());
    assert!(
        analysis
            .key_phrases
            .iter()
            .all(|p| !p.contains("Desconhecido"))
    );

    assert!(Theme::ALL.contains(&analysis.theme.label));
    assert!((0.0..=1.0).contains(&analysis.theme.confidence));
}

#[test]
fn empty_transcript_produces_fallbacks_not_errors() {
    let analysis = analyze_transcript("");

    assert!(analysis.keywords.is_empty());
    assert!(analysis.key_phrases.is_empty());
    assert_eq!(analysis.theme.label, Theme::Business);
    assert_eq!(analysis.theme.confidence, 0.0);
    assert_eq!(analysis.persona.confidence, 0.0);
}

#[test]
fn repeated_domain_keyword_takes_the_top_slot_with_boost() {
    let filler = "veja pois coisa qualquer naquele momento certo ";
    let text = format!("{}{}", "liderança ".repeat(10), filler.repeat(4));
    let analysis = analyze_transcript(&text);

    assert_eq!(analysis.keywords[0].term, "liderança");
    // Frequency 10, domain boost x2.
    assert_eq!(analysis.keywords[0].score, 20);
}

#[test]
fn short_title_scenario_matches_the_rubric() {
    let scorer = SeoScorer::default();
    let dim = scorer.score_title("Como aumentar vendas com marketing digital");

    // Length misses every band, keyword and curiosity bonuses both land.
    assert_eq!(dim.score, 3.0);
    assert!(dim.issues.iter().any(|i| i.contains("curto")));
}

#[test]
fn twelve_tags_with_core_keywords_earn_count_and_keyword_bonuses() {
    let scorer = SeoScorer::default();
    let tags: Vec<String> = [
        "marketing digital",
        "google ads",
        "meta ads",
        "funil de vendas",
        "gestao",
        "lideranca",
        "negocios",
        "resultados",
        "estrategia",
        "equipe",
        "crescimento",
        "performance",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(tags.len(), 12);

    let dim = scorer.score_tags(&tags);
    // +2 for the 10-15 count band, +3 for >=3 core keywords, before the
    // substring-variation bonus.
    assert!(dim.score >= 5.0);
}

#[test]
fn generated_package_is_internally_consistent() {
    let package = SeoContentGenerator::default().build_package("video01", TRANSCRIPT);

    assert_eq!(package.video_id, "video01");
    assert!(package.description.contains(&package.title.primary));
    assert!(package.tags.len() <= 15);
    assert!((0.0..=10.0).contains(&package.seo.overall));
    assert!((0.0..=10.0).contains(&package.methodology.overall));
    assert_eq!(package.metadata.category, package.analysis.theme.label.label());
}

#[test]
fn package_round_trips_through_json() {
    let package = SeoContentGenerator::default().build_package("video01", TRANSCRIPT);
    let json = serde_json::to_string_pretty(&package).expect("serialize");
    let restored: vidseo::core::SeoPackage = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(package, restored);
}

#[tokio::test]
async fn transcript_files_are_loaded_with_entities_decoded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("video 1.txt");
    tokio::fs::write(&path, "lideran&ccedil;a &amp; gest&atilde;o de equipes")
        .await
        .expect("write");

    let content = load_transcript_file(&path).await.expect("load");
    assert_eq!(content, "liderança & gestão de equipes");

    let analysis = analyze_transcript(&content);
    assert!(analysis.keywords.iter().any(|k| k.term == "liderança"));
}
