use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Single-line text input. The cursor is tracked as a character index, not a
/// byte offset; transcripts paths and keywords here are Portuguese and
/// multi-byte characters are the norm.
#[derive(Debug, Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub placeholder: String,
    pub label: String,
    pub focused: bool,
}

impl InputField {
    pub fn new(label: &str, placeholder: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.to_string(),
            label: label.to_string(),
            focused: false,
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                let offset = self.byte_offset(self.cursor);
                self.value.insert(offset, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let offset = self.byte_offset(self.cursor);
                    self.value.remove(offset);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let offset = self.byte_offset(self.cursor);
                    self.value.remove(offset);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label.as_str())
            .border_style(if self.focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            });

        let text = if self.value.is_empty() && !self.focused {
            Line::from(Span::styled(
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else if self.focused {
            let offset = self.byte_offset(self.cursor);
            let (before, after) = self.value.split_at(offset);
            Line::from(vec![
                Span::raw(before),
                Span::styled("│", Style::default().fg(Color::Yellow)),
                Span::raw(after),
            ])
        } else {
            Line::from(Span::raw(&self.value))
        };

        // Keep the cursor visible when the value outgrows the field.
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.value.width().saturating_sub(inner_width.saturating_sub(1)) as u16;

        let paragraph = Paragraph::new(text).block(block).scroll((0, scroll));
        f.render_widget(paragraph, area);
    }

    pub fn is_valid(&self) -> bool {
        !self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn inserts_multibyte_characters_at_the_cursor() {
        let mut field = InputField::new("Source", "");
        for c in "ação".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(field.value, "ação");
        assert_eq!(field.cursor, 4);
    }

    #[test]
    fn backspace_removes_the_character_before_the_cursor() {
        let mut field = InputField::new("Source", "");
        for c in "gestão".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value, "gesto");
    }

    #[test]
    fn home_and_end_jump_to_the_bounds() {
        let mut field = InputField::new("Source", "");
        for c in "líder".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field.handle_key(key(KeyCode::Home));
        assert_eq!(field.cursor, 0);
        field.handle_key(key(KeyCode::End));
        assert_eq!(field.cursor, 5);
    }
}
