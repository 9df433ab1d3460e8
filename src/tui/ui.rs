use crate::tui::app::{App, AppState, FileFilter};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    match &app.state {
        AppState::Home => draw_home(f, app),
        AppState::NewAnalysis => draw_new_analysis(f, app),
        AppState::Processing { video_id } => {
            let video_id = video_id.clone();
            draw_processing(f, app, &video_id);
        }
        AppState::Browser => draw_browser(f, app),
        AppState::Viewer { .. } => draw_viewer(f, app),
        AppState::Settings => draw_settings(f, app),
    }
}

fn draw_home(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Menu
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("vidseo · Transcript Analysis & YouTube SEO")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let options = [
        "● New Analysis",
        "○ View Transcripts",
        "○ View Packages",
        "○ Settings",
    ];

    let menu_items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == app.selected_option {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let text = if i == app.selected_option {
                option.replace("○", "●")
            } else {
                option.replace("●", "○")
            };

            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let menu = List::new(menu_items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .style(Style::default().fg(Color::White));
    f.render_widget(menu, chunks[1]);

    let help = Paragraph::new("[↑↓] Navigate  [Enter] Select  [q] Exit")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_new_analysis(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Source input
            Constraint::Length(3), // Languages input
            Constraint::Length(5), // Checkboxes
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("New Analysis")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    app.source_input.render(f, chunks[1]);
    app.languages_input.render(f, chunks[2]);

    let checkbox_block = Block::default().borders(Borders::ALL).title("Options");
    f.render_widget(checkbox_block, chunks[3]);

    let checkbox_area = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(chunks[3]);

    let preserve_style = if app.input_focus == 2 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let package_style = if app.input_focus == 3 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let preserve_checkbox = if app.preserve_formatting { "☑" } else { "☐" };
    let package_checkbox = if app.build_package { "☑" } else { "☐" };

    let preserve_text = Paragraph::new(format!(
        "{preserve_checkbox} Preserve formatting (YouTube fetch only)"
    ))
    .style(preserve_style);
    f.render_widget(preserve_text, checkbox_area[0]);

    let package_text =
        Paragraph::new(format!("{package_checkbox} Build SEO upload package")).style(package_style);
    f.render_widget(package_text, checkbox_area[1]);

    let help = Paragraph::new("[Enter] Process  [Esc] Back  [Tab] Next  [Space] Toggle")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

fn draw_processing(f: &mut Frame, app: &App, video_id: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Progress area
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Processing...")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    app.progress_bar.render(f, chunks[1], video_id);

    let help = Paragraph::new("[Esc] Back")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_browser(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(1)])
        .split(f.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Filters
            Constraint::Length(3), // Search
        ])
        .split(chunks[0]);

    let filter_options = ["● All", "○ Transcripts", "○ Packages"];
    let filter_items: Vec<ListItem> = filter_options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_selected = matches!(
                (&app.filter, i),
                (FileFilter::All, 0) | (FileFilter::Transcripts, 1) | (FileFilter::Packages, 2)
            );

            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let text = if is_selected {
                option.replace("○", "●")
            } else {
                option.replace("●", "○")
            };

            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let filters =
        List::new(filter_items).block(Block::default().borders(Borders::ALL).title("Filters"));
    f.render_widget(filters, left_chunks[0]);

    app.search_input.render(f, left_chunks[1]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(chunks[1]);

    app.file_list.render(f, right_chunks[0], "Entries");

    let help =
        Paragraph::new("[Enter] Open  [Del] Delete  [Space] Mark  [/] Search  [1-3] Filters")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, right_chunks[1]);
}

fn draw_viewer(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.area());

    if let Some(viewer) = &mut app.content_viewer {
        app.viewer_height = chunks[0].height;
        viewer.render(f, chunks[0]);
    }

    let help = Paragraph::new("[↑↓] Scroll  [PgUp/PgDn] Page  [Home/End] Jump  [Esc] Back")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_settings(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Settings content
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Settings")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let lines: Vec<Line> = app
        .settings_lines
        .iter()
        .map(|line| Line::from(Span::raw(line)))
        .collect();

    let settings_content = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Environment"));
    f.render_widget(settings_content, chunks[1]);

    let help = Paragraph::new("[Esc] Back")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
