use crate::config::AiConfig;
use crate::core::storage::{FileEntry, FileType, StorageService};
use crate::core::{
    SeoContentGenerator, TranscriptService, extract_video_id, id_from_path, load_transcript_file,
};
use crate::error::Result;
use crate::tui::components::{ContentViewer, FileList, InputField, ProgressBar};
use crate::tui::events::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Home,
    NewAnalysis,
    Processing { video_id: String },
    Browser,
    Viewer { file_path: PathBuf },
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFilter {
    All,
    Transcripts,
    Packages,
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source: String,
    pub languages: Vec<String>,
    pub preserve_formatting: bool,
    pub build_package: bool,
}

pub struct App {
    pub state: AppState,
    pub should_quit: bool,

    // Home screen
    pub selected_option: usize,

    // New analysis screen
    pub source_input: InputField,
    pub languages_input: InputField,
    pub preserve_formatting: bool,
    pub build_package: bool,
    pub input_focus: usize,

    // Browser screen
    pub file_list: FileList,
    pub search_input: InputField,
    pub filter: FileFilter,

    // Viewer screen
    pub content_viewer: Option<ContentViewer>,
    pub viewer_height: u16,

    // Processing screen
    pub progress_bar: ProgressBar,

    // Settings screen
    pub settings_lines: Vec<String>,

    // Services
    pub transcript_service: TranscriptService,

    // Async communication
    pub processing_tx: Option<mpsc::UnboundedSender<String>>,
    pub processing_rx: Option<mpsc::UnboundedReceiver<String>>,
}

impl App {
    pub fn new() -> Result<Self> {
        let transcript_service = TranscriptService::new()?;
        let files = StorageService::list_files().unwrap_or_default();

        Ok(Self {
            state: AppState::Home,
            should_quit: false,

            selected_option: 0,

            source_input: InputField::new(
                "Source",
                "Transcript path, YouTube URL, or video ID",
            ),
            languages_input: InputField::new("Languages", "pt,en"),
            preserve_formatting: true,
            build_package: true,
            input_focus: 0,

            file_list: FileList::new(files),
            search_input: InputField::new("Search", "Filter entries..."),
            filter: FileFilter::All,

            content_viewer: None,
            viewer_height: 0,
            progress_bar: ProgressBar::new(),

            settings_lines: settings_overview(),

            transcript_service,

            processing_tx: None,
            processing_rx: None,
        })
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Key(key) => self.handle_key(key)?,
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Tick => self.handle_tick()?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match &self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::NewAnalysis => self.handle_new_analysis_key(key),
            AppState::Browser => self.handle_browser_key(key),
            AppState::Viewer { .. } => self.handle_viewer_key(key),
            AppState::Processing { .. } => self.handle_processing_key(key),
            AppState::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if matches!(self.state, AppState::Browser) {
            self.file_list.handle_mouse(mouse);
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.selected_option = self.selected_option.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_option < 3 {
                    self.selected_option += 1;
                }
            }
            KeyCode::Char('1') => self.selected_option = 0,
            KeyCode::Char('2') => self.selected_option = 1,
            KeyCode::Char('3') => self.selected_option = 2,
            KeyCode::Char('4') => self.selected_option = 3,
            KeyCode::Enter => match self.selected_option {
                0 => {
                    self.state = AppState::NewAnalysis;
                    self.source_input.clear();
                    self.languages_input.value = "pt,en".to_string();
                    self.source_input.focused = true;
                    self.input_focus = 0;
                }
                1 => {
                    self.filter = FileFilter::Transcripts;
                    self.refresh_file_list()?;
                    self.state = AppState::Browser;
                }
                2 => {
                    self.filter = FileFilter::Packages;
                    self.refresh_file_list()?;
                    self.state = AppState::Browser;
                }
                3 => {
                    self.settings_lines = settings_overview();
                    self.state = AppState::Settings;
                }
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    fn handle_new_analysis_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Home;
            }
            KeyCode::Tab => {
                self.cycle_input_focus();
            }
            KeyCode::Enter => {
                if self.input_focus < 2 {
                    self.cycle_input_focus();
                } else {
                    self.start_processing();
                }
            }
            KeyCode::Char(' ') if self.input_focus == 2 => {
                self.preserve_formatting = !self.preserve_formatting;
            }
            KeyCode::Char(' ') if self.input_focus == 3 => {
                self.build_package = !self.build_package;
            }
            _ => {
                if self.input_focus == 0 {
                    self.source_input.handle_key(key);
                } else if self.input_focus == 1 {
                    self.languages_input.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_browser_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc if !self.search_input.focused => {
                self.state = AppState::Home;
            }
            KeyCode::Enter => {
                if let Some(file) = self.file_list.get_selected() {
                    self.open_file(file.clone())?;
                }
            }
            KeyCode::Delete => {
                self.delete_marked_entries()?;
            }
            KeyCode::Char('/') if !self.search_input.focused => {
                self.search_input.focused = true;
            }
            KeyCode::Char('1') if !self.search_input.focused => {
                self.filter = FileFilter::All;
                self.refresh_file_list()?;
            }
            KeyCode::Char('2') if !self.search_input.focused => {
                self.filter = FileFilter::Transcripts;
                self.refresh_file_list()?;
            }
            KeyCode::Char('3') if !self.search_input.focused => {
                self.filter = FileFilter::Packages;
                self.refresh_file_list()?;
            }
            _ => {
                if self.search_input.focused {
                    if key.code == KeyCode::Esc {
                        self.search_input.focused = false;
                        self.search_input.clear();
                    } else {
                        self.search_input.handle_key(key);
                    }
                    self.refresh_file_list()?;
                } else {
                    self.file_list.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Browser;
            }
            _ => {
                if let Some(viewer) = &mut self.content_viewer {
                    viewer.handle_key(key, self.viewer_height as usize);
                }
            }
        }
        Ok(())
    }

    fn handle_processing_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Esc {
            // Leave the screen; the background task finishes on its own.
            self.state = AppState::NewAnalysis;
            self.progress_bar.reset();
        }
        Ok(())
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Esc {
            self.state = AppState::Home;
        }
        Ok(())
    }

    fn handle_tick(&mut self) -> Result<()> {
        let mut messages = Vec::new();
        if let Some(rx) = &mut self.processing_rx {
            while let Ok(message) = rx.try_recv() {
                messages.push(message);
            }
        }

        for message in messages {
            if let Some(progress) = message.strip_prefix("PROGRESS:") {
                if let Ok(progress) = progress.parse::<f64>() {
                    self.progress_bar.set_progress(progress);
                }
            } else if let Some(status) = message.strip_prefix("STATUS:") {
                self.progress_bar.set_message(status.to_string());
            } else if let Some(log) = message.strip_prefix("LOG:") {
                self.progress_bar.add_log(log.to_string());
            } else if message == "COMPLETE" {
                self.refresh_file_list()?;
                self.state = AppState::Home;
                self.progress_bar.reset();
            }
        }
        Ok(())
    }

    fn cycle_input_focus(&mut self) {
        self.source_input.focused = false;
        self.languages_input.focused = false;

        self.input_focus = (self.input_focus + 1) % 4;

        match self.input_focus {
            0 => self.source_input.focused = true,
            1 => self.languages_input.focused = true,
            _ => {}
        }
    }

    fn start_processing(&mut self) {
        if !self.source_input.is_valid() {
            return;
        }

        let request = AnalysisRequest {
            source: self.source_input.value.trim().to_string(),
            languages: self
                .languages_input
                .value
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            preserve_formatting: self.preserve_formatting,
            build_package: self.build_package,
        };

        let display_id = display_id_for(&request.source);
        self.state = AppState::Processing {
            video_id: display_id,
        };
        self.progress_bar.reset();
        self.progress_bar.set_message("Starting...".to_string());

        if let Some(tx) = &self.processing_tx {
            self.spawn_processing(request, tx.clone());
        }
    }

    fn spawn_processing(&self, request: AnalysisRequest, tx: mpsc::UnboundedSender<String>) {
        let transcript_service = self.transcript_service.clone();

        tokio::spawn(async move {
            let _ = tx.send("STATUS:Resolving source...".to_string());
            let _ = tx.send("PROGRESS:0.1".to_string());

            let resolved = resolve_source(&transcript_service, &request, &tx).await;

            let (video_id, content) = match resolved {
                Ok(pair) => pair,
                Err(e) => {
                    let _ = tx.send(format!("LOG:Error: {e}"));
                    let _ = tx.send("STATUS:Failed".to_string());
                    let _ = tx.send("COMPLETE".to_string());
                    return;
                }
            };

            let _ = tx.send("PROGRESS:0.5".to_string());
            let _ = tx.send("LOG:Saving transcript...".to_string());
            if let Err(e) = StorageService::save_transcript(&video_id, &content).await {
                let _ = tx.send(format!("LOG:Error saving transcript: {e}"));
                let _ = tx.send("STATUS:Failed".to_string());
                let _ = tx.send("COMPLETE".to_string());
                return;
            }

            if request.build_package {
                let _ = tx.send("STATUS:Building SEO package...".to_string());
                let _ = tx.send("PROGRESS:0.7".to_string());
                let _ = tx.send("LOG:Running analysis pipeline...".to_string());

                let package = SeoContentGenerator::default().build_package(&video_id, &content);

                let _ = tx.send(format!(
                    "LOG:Theme {} ({:.0}%), SEO score {:.2}",
                    package.analysis.theme.label,
                    package.analysis.theme.confidence * 100.0,
                    package.seo.overall
                ));

                match StorageService::save_package(&package).await {
                    Ok(_) => {
                        let _ = tx.send("PROGRESS:1.0".to_string());
                        let _ = tx.send("LOG:SEO package saved.".to_string());
                    }
                    Err(e) => {
                        let _ = tx.send(format!("LOG:Error saving package: {e}"));
                    }
                }
            } else {
                let _ = tx.send("PROGRESS:1.0".to_string());
            }

            let _ = tx.send("STATUS:Completed".to_string());
            let _ = tx.send("COMPLETE".to_string());
        });
    }

    fn refresh_file_list(&mut self) -> Result<()> {
        let all_files = StorageService::list_files()?;
        let search_term = self.search_input.value.to_lowercase();
        let filter = self.filter;

        let filtered: Vec<FileEntry> = all_files
            .into_iter()
            .filter(|file| {
                let matches_filter = match filter {
                    FileFilter::All => true,
                    FileFilter::Transcripts => file.file_type == FileType::Transcript,
                    FileFilter::Packages => file.file_type == FileType::Package,
                };
                let matches_search =
                    search_term.is_empty() || file.name.to_lowercase().contains(&search_term);
                matches_filter && matches_search
            })
            .collect();

        self.file_list.update_items(filtered);
        Ok(())
    }

    fn open_file(&mut self, file: FileEntry) -> Result<()> {
        let content = std::fs::read_to_string(&file.path)?;
        let viewer = ContentViewer::new(content, file.path.to_string_lossy().to_string());
        self.content_viewer = Some(viewer);
        self.state = AppState::Viewer {
            file_path: file.path,
        };
        Ok(())
    }

    fn delete_marked_entries(&mut self) -> Result<()> {
        let marked: Vec<FileEntry> = self.file_list.get_marked().into_iter().cloned().collect();
        for entry in marked {
            StorageService::delete_entry(&entry)?;
        }
        self.refresh_file_list()?;
        Ok(())
    }
}

/// Short identifier shown on the processing screen before the background task
/// settles the real one.
fn display_id_for(source: &str) -> String {
    let path = Path::new(source);
    if path.exists() {
        id_from_path(path).unwrap_or_else(|_| source.to_string())
    } else {
        extract_video_id(source).unwrap_or_else(|| source.to_string())
    }
}

async fn resolve_source(
    transcript_service: &TranscriptService,
    request: &AnalysisRequest,
    tx: &mpsc::UnboundedSender<String>,
) -> Result<(String, String)> {
    let path = PathBuf::from(&request.source);

    if path.exists() {
        let _ = tx.send("LOG:Reading transcript file...".to_string());
        let video_id = id_from_path(&path)?;
        let content = load_transcript_file(&path).await?;
        return Ok((video_id, content));
    }

    let video_id = extract_video_id(&request.source).ok_or_else(|| {
        crate::error::Error::invalid_input("tui", "not a readable file, URL, or video ID")
    })?;

    if StorageService::transcript_exists(&video_id) {
        let _ = tx.send("LOG:Using saved transcript.".to_string());
        let content = StorageService::load_transcript(&video_id).await?;
        return Ok((video_id, content));
    }

    let _ = tx.send("STATUS:Downloading transcript...".to_string());
    let _ = tx.send("PROGRESS:0.25".to_string());
    let _ = tx.send("LOG:Fetching transcript from YouTube...".to_string());

    let languages: Vec<&str> = request.languages.iter().map(|s| s.as_str()).collect();
    let transcript = transcript_service
        .fetch_transcript(&video_id, &languages, request.preserve_formatting)
        .await?;
    let content = TranscriptService::format_transcript(&transcript).join("\n");

    Ok((video_id, content))
}

fn settings_overview() -> Vec<String> {
    let config = AiConfig::from_env();

    let provider = if config.gemini_api_key.is_some() {
        format!("gemini ({})", config.gemini_model)
    } else if config.openai_configured {
        format!("openai ({})", config.openai_model)
    } else {
        "none configured".to_string()
    };

    vec![
        format!("Suggestion provider: {provider}"),
        format!(
            "Transcript upload opt-in: {}",
            if config.upload_allowed() { "enabled" } else { "disabled" }
        ),
        String::new(),
        "Transcripts directory: ./transcripts".to_string(),
        "Packages directory:    ./packages".to_string(),
        String::new(),
        AiConfig::opt_in_hint(),
    ]
}
