use crate::core::storage::{FileEntry, FileType};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Scrollable, multi-select list over the managed transcript and package
/// entries.
pub struct FileList {
    pub items: Vec<FileEntry>,
    pub state: ListState,
    pub selected_items: Vec<bool>,
    viewport_size: usize,
}

impl FileList {
    pub fn new(items: Vec<FileEntry>) -> Self {
        let selected_items = vec![false; items.len()];
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }

        Self {
            items,
            state,
            selected_items,
            viewport_size: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.step(-1);
                true
            }
            KeyCode::Down => {
                self.step(1);
                true
            }
            KeyCode::PageUp => {
                self.page(-1);
                true
            }
            KeyCode::PageDown => {
                self.page(1);
                true
            }
            KeyCode::Home => {
                self.select_index(0);
                true
            }
            KeyCode::End => {
                self.select_index(self.items.len().saturating_sub(1));
                true
            }
            KeyCode::Char(' ') => {
                self.toggle_selected();
                true
            }
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.step(-1);
                true
            }
            MouseEventKind::ScrollDown => {
                self.step(1);
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.state.select(Some(next));
        self.adjust_offset();
    }

    fn page(&mut self, direction: isize) {
        if self.items.is_empty() {
            return;
        }
        let step = self.viewport_size.max(1) as isize * direction;
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + step).clamp(0, self.items.len() as isize - 1) as usize;
        self.state.select(Some(next));
        self.adjust_offset();
    }

    fn select_index(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.state.select(Some(index.min(self.items.len() - 1)));
        self.adjust_offset();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(i) = self.state.selected()
            && i < self.selected_items.len()
        {
            self.selected_items[i] = !self.selected_items[i];
        }
    }

    pub fn get_selected(&self) -> Option<&FileEntry> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    /// Entries marked with the space bar; falls back to the highlighted one
    /// so Delete always has a target.
    pub fn get_marked(&self) -> Vec<&FileEntry> {
        let marked: Vec<&FileEntry> = self
            .selected_items
            .iter()
            .enumerate()
            .filter_map(|(i, &sel)| if sel { self.items.get(i) } else { None })
            .collect();

        if marked.is_empty() {
            self.get_selected().into_iter().collect()
        } else {
            marked
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, title: &str) {
        self.viewport_size = (area.height.saturating_sub(2) as usize).max(1);
        self.adjust_offset();

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let checkbox = if self.selected_items.get(i).copied().unwrap_or(false) {
                    "☑ "
                } else {
                    "☐ "
                };

                let icon = match file.file_type {
                    FileType::Transcript => "📄",
                    FileType::Package => "📦",
                };

                let size_kb = file.size / 1024;
                let size_str = if size_kb < 1024 {
                    format!("{size_kb}KB")
                } else {
                    format!("{:.1}MB", size_kb as f64 / 1024.0)
                };

                let line = Line::from(vec![
                    Span::raw(checkbox),
                    Span::raw(icon),
                    Span::raw(" "),
                    Span::styled(&file.name, Style::default().fg(Color::White)),
                    Span::raw(format!(" ({size_str})")),
                ]);

                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_stateful_widget(list, area, &mut self.state);
    }

    pub fn update_items(&mut self, new_items: Vec<FileEntry>) {
        let current_selected = self.state.selected();
        self.items = new_items;
        self.selected_items = vec![false; self.items.len()];

        if self.items.is_empty() {
            self.state.select(None);
        } else if let Some(selected) = current_selected {
            if selected >= self.items.len() {
                self.state.select(Some(self.items.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }

        self.adjust_offset();
    }

    fn adjust_offset(&mut self) {
        if self.items.is_empty() {
            *self.state.offset_mut() = 0;
            return;
        }

        let viewport = self.viewport_size.max(1);
        let max_index = self.items.len() - 1;
        let selected = self
            .state
            .selected()
            .map(|idx| idx.min(max_index))
            .unwrap_or(0);
        self.state.select(Some(selected));

        let max_offset = self.items.len().saturating_sub(viewport);
        let offset = self.state.offset().min(max_offset);
        *self.state.offset_mut() = offset;

        if selected < offset {
            *self.state.offset_mut() = selected;
        } else if selected >= offset + viewport {
            *self.state.offset_mut() = selected + 1 - viewport;
        }
    }
}
