use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vidseo")]
#[command(about = "Transcript analysis and YouTube SEO package generator")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Force CLI mode (skip TUI)
    #[arg(long)]
    pub cli: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a transcript from YouTube and optionally build its SEO package
    Get {
        /// YouTube video URL or video ID
        video_id: String,

        /// Preferred languages (comma-separated)
        #[arg(short, long, default_value = "pt,en")]
        languages: String,

        /// Preserve formatting in transcript
        #[arg(long)]
        preserve_formatting: bool,

        /// Build the SEO upload package after downloading
        #[arg(short, long)]
        package: bool,
    },

    /// Analyze a transcription and build the SEO upload package
    Analyze {
        /// Path to a transcription file, or the ID of a saved transcript
        input: String,

        /// Identifier for the generated package (defaults to the file stem)
        #[arg(long)]
        id: Option<String>,
    },

    /// Score a title/description/tags triple against the SEO rubric
    Score {
        /// Re-score a previously generated package by its ID
        #[arg(long)]
        package: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tag list
        #[arg(long)]
        tags: Option<String>,
    },

    /// Ask the configured AI provider for optimization suggestions
    Suggest {
        /// ID of a previously generated package
        video_id: String,
    },

    /// List all saved transcripts and packages
    List,

    /// Open TUI interface
    Tui,
}
