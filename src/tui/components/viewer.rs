use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Read-only scrolling viewer for package summaries and raw transcripts,
/// with lightweight markdown styling.
pub struct ContentViewer {
    pub content: String,
    pub scroll: usize,
    pub file_path: String,
}

impl ContentViewer {
    pub fn new(content: String, file_path: String) -> Self {
        Self {
            content,
            scroll: 0,
            file_path,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, area_height: usize) -> bool {
        let page_size = area_height.saturating_sub(2);
        let lines = self.content.lines().count();

        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                if self.scroll < lines.saturating_sub(page_size) {
                    self.scroll += 1;
                }
                true
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(page_size);
                true
            }
            KeyCode::PageDown => {
                self.scroll = (self.scroll + page_size).min(lines.saturating_sub(page_size));
                true
            }
            KeyCode::Home => {
                self.scroll = 0;
                true
            }
            KeyCode::End => {
                self.scroll = lines.saturating_sub(page_size);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let title = format!(
            "Viewer: {}",
            std::path::Path::new(&self.file_path)
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        );

        let lines: Vec<Line> = self
            .content
            .lines()
            .skip(self.scroll)
            .take(area.height.saturating_sub(2) as usize)
            .map(|line| {
                if line.starts_with('#') {
                    Line::from(Span::styled(line, Style::default().fg(Color::Yellow)))
                } else if line.starts_with('|') && line.ends_with('|') {
                    Line::from(Span::styled(line, Style::default().fg(Color::Cyan)))
                } else if line.starts_with('-') || line.starts_with('*') {
                    Line::from(Span::styled(line, Style::default().fg(Color::Green)))
                } else {
                    Line::from(Span::raw(line))
                }
            })
            .collect();

        let total_lines = self.content.lines().count();
        let visible_lines = area.height.saturating_sub(2) as usize;
        let scroll_info = if total_lines > visible_lines {
            format!(
                " (linha {}-{} de {})",
                self.scroll + 1,
                (self.scroll + visible_lines).min(total_lines),
                total_lines
            )
        } else {
            String::new()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{title}{scroll_info}"));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }
}
