use clap::Parser;
use std::path::Path;
use tokio::sync::mpsc;
use vidseo::cli::{Cli, Commands};
use vidseo::core::scoring::{DimensionScore, MethodologyScorer, SeoScorer};
use vidseo::core::{
    SeoContentGenerator, StorageService, TranscriptService, extract_video_id, id_from_path,
    load_transcript_file, sanitize_video_id,
};
use vidseo::core::{storage, suggest::SuggestionService};
use vidseo::error::{Error, Result};
use vidseo::tui::{App, EventHandler, init as tui_init, restore as tui_restore, ui};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Get {
            video_id,
            languages,
            preserve_formatting,
            package,
        }) => {
            run_cli_get(video_id, languages, preserve_formatting, package).await?;
        }
        Some(Commands::Analyze { input, id }) => {
            run_cli_analyze(input, id).await?;
        }
        Some(Commands::Score {
            package,
            title,
            description,
            tags,
        }) => {
            run_cli_score(package, title, description, tags).await?;
        }
        Some(Commands::Suggest { video_id }) => {
            run_cli_suggest(video_id).await?;
        }
        Some(Commands::List) => {
            run_cli_list()?;
        }
        Some(Commands::Tui) | None => {
            if cli.cli {
                println!("Use 'vidseo --help' for available commands");
            } else {
                run_tui().await?;
            }
        }
    }

    Ok(())
}

async fn run_cli_get(
    video_input: String,
    languages: String,
    preserve_formatting: bool,
    build_package: bool,
) -> Result<()> {
    let video_id = extract_video_id(&video_input)
        .ok_or_else(|| Error::invalid_input("get", "invalid video URL or ID"))?;

    println!("Processing video: {video_id}");

    let transcript_service = TranscriptService::new()?;
    let languages: Vec<&str> = languages.split(',').map(|s| s.trim()).collect();

    let transcript_exists = StorageService::transcript_exists(&video_id);
    let package_exists = StorageService::package_exists(&video_id);
    let needs_package = build_package && !package_exists;

    if transcript_exists && !needs_package {
        println!("Transcript already exists locally. Skipping processing.");
        if build_package {
            println!("SEO package already exists as well.");
        }
        return Ok(());
    }

    if !transcript_exists {
        println!("Fetching transcript...");
        let transcript = transcript_service
            .fetch_transcript(&video_id, &languages, preserve_formatting)
            .await?;

        let content = TranscriptService::format_transcript(&transcript).join("\n");
        let transcript_path = StorageService::save_transcript(&video_id, &content).await?;
        println!("Transcript saved to: {transcript_path:?}");
    } else {
        println!("Transcript already saved. Skipping download.");
    }

    if needs_package {
        println!("Building SEO package...");
        let content = StorageService::load_transcript(&video_id).await?;
        let package = SeoContentGenerator::default().build_package(&video_id, &content);
        let package_dir = StorageService::save_package(&package).await?;
        println!("SEO package saved to: {package_dir:?}");
        print_package_scores(&package);
    } else if build_package {
        println!("SEO package already exists. Skipping generation.");
    }

    Ok(())
}

async fn run_cli_analyze(input: String, id: Option<String>) -> Result<()> {
    let input_path = Path::new(&input);

    let (video_id, content) = if input_path.exists() {
        let video_id = match id {
            Some(id) => sanitize_video_id(&id)?,
            None => id_from_path(input_path)?,
        };
        let content = load_transcript_file(input_path).await?;
        // Keep a managed copy so the browser and later commands can find it.
        StorageService::save_transcript(&video_id, &content).await?;
        (video_id, content)
    } else {
        let video_id = sanitize_video_id(&input)?;
        let content = StorageService::load_transcript(&video_id).await?;
        (video_id, content)
    };

    println!("Analyzing transcript: {video_id}");

    let package = SeoContentGenerator::default().build_package(&video_id, &content);
    let package_dir = StorageService::save_package(&package).await?;

    println!("SEO package saved to: {package_dir:?}");
    println!();
    println!("Theme:   {} ({:.0}%)", package.analysis.theme.label, package.analysis.theme.confidence * 100.0);
    println!("Persona: {} ({:.0}%)", package.analysis.persona.label, package.analysis.persona.confidence * 100.0);
    println!("Title:   {}", package.title.primary);
    println!("Tags:    {}", storage::tags_field(&package.tags));
    print_package_scores(&package);

    Ok(())
}

async fn run_cli_score(
    package: Option<String>,
    title: Option<String>,
    description: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let (title, description, tags) = if let Some(package_id) = package {
        let video_id = sanitize_video_id(&package_id)?;
        let package = StorageService::load_package(&video_id).await?;
        (package.title.primary, package.description, package.tags)
    } else {
        let title = title.ok_or_else(|| {
            Error::invalid_input("score", "either --package or --title is required")
        })?;
        let description = description.ok_or_else(|| {
            Error::invalid_input("score", "--description is required without --package")
        })?;
        let tags: Vec<String> = tags
            .ok_or_else(|| Error::invalid_input("score", "--tags is required without --package"))?
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        (title, description, tags)
    };

    let seo = SeoScorer::default().score(&title, &description, &tags);
    let methodology = MethodologyScorer::default().score(&title, &description, &tags);

    print_dimension("Title", &seo.title);
    print_dimension("Description", &seo.description);
    print_dimension("Tags", &seo.tags);
    println!("Overall SEO score: {:.2}/10", seo.overall);
    println!();

    println!("Methodology pillars:");
    for pillar in &methodology.pillars {
        println!(
            "  {} ({}) {:>5.1}  [{} keywords]",
            pillar.name, pillar.key, pillar.score, pillar.keywords_found
        );
    }
    println!("Weighted methodology score: {:.2}/10", methodology.overall);

    Ok(())
}

async fn run_cli_suggest(video_id: String) -> Result<()> {
    let video_id = sanitize_video_id(&video_id)?;
    let mut package = StorageService::load_package(&video_id).await?;

    let service = SuggestionService::from_env()?;
    println!(
        "Requesting suggestions from provider '{}'...",
        service.provider_name()
    );

    let suggestions = service.optimization_suggestions(&package).await?;

    println!();
    for suggestion in &suggestions {
        println!("{suggestion}");
    }

    package.ai_suggestions = suggestions;
    let package_dir = StorageService::save_package(&package).await?;
    println!();
    println!("Suggestions stored in: {package_dir:?}");

    Ok(())
}

fn run_cli_list() -> Result<()> {
    let files = StorageService::list_files()?;

    if files.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    println!("Found {} entries:", files.len());
    println!();

    for file in files {
        let file_type = match file.file_type {
            storage::FileType::Transcript => "Transcript",
            storage::FileType::Package => "Package",
        };

        let size_kb = file.size / 1024;
        let size_str = if size_kb < 1024 {
            format!("{size_kb}KB")
        } else {
            format!("{:.1}MB", size_kb as f64 / 1024.0)
        };

        println!("{:<12} {:<30} {}", file_type, file.name, size_str);
    }

    Ok(())
}

fn print_dimension(name: &str, dimension: &DimensionScore) {
    println!("{name}: {:.1}/10", dimension.score);
    for issue in &dimension.issues {
        println!("  ! {issue}");
    }
    for suggestion in &dimension.suggestions {
        println!("  > {suggestion}");
    }
}

fn print_package_scores(package: &vidseo::core::SeoPackage) {
    println!();
    println!(
        "SEO scores: title {:.1} | description {:.1} | tags {:.1} | overall {:.2}",
        package.seo.title.score,
        package.seo.description.score,
        package.seo.tags.score,
        package.seo.overall
    );
    println!("Methodology score: {:.2}/10", package.methodology.overall);
}

async fn run_tui() -> Result<()> {
    let mut terminal = tui_init()?;

    let mut app = App::new()?;
    let event_handler = EventHandler::new();

    // Channel for progress updates from background processing tasks.
    let (tx, rx) = mpsc::unbounded_channel();
    app.processing_tx = Some(tx.clone());
    app.processing_rx = Some(rx);

    loop {
        let event = event_handler.next_event()?;
        app.handle_event(event)?;

        terminal.draw(|f| {
            ui::draw(f, &mut app);
        })?;

        if app.should_quit {
            break;
        }
    }

    tui_restore()?;
    Ok(())
}
