use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::events::View;
use crate::theme::THEME;

/// One-line prompt for jumping to a page by its path.
pub struct RoutePrompt {
    pub active: bool,
    pub input: String,
    cursor_position: usize,
    pub error: Option<String>,
}

impl RoutePrompt {
    pub fn new() -> Self {
        Self {
            active: false,
            input: String::new(),
            cursor_position: 0,
            error: None,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.input = "/".to_string();
        self.cursor_position = 1;
        self.error = None;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.error = None;
    }

    /// Returns the target view once Enter resolves to a known path.
    /// Unknown paths keep the prompt open with an error.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<View> {
        if !self.active {
            return None;
        }

        match key.code {
            KeyCode::Enter => match View::from_path(&self.input) {
                Some(view) => {
                    self.deactivate();
                    Some(view)
                }
                None => {
                    tracing::debug!(path = %self.input, "unknown route");
                    self.error = Some(format!("no page at {}", self.input.trim()));
                    None
                }
            },
            KeyCode::Esc => {
                self.deactivate();
                None
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    self.input.remove(self.cursor_position);
                }
                self.error = None;
                None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_position < self.input.len() {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.input.clear();
                    self.cursor_position = 0;
                } else if c.is_ascii() {
                    self.input.insert(self.cursor_position, c);
                    self.cursor_position += 1;
                }
                self.error = None;
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let width = area.width.min(60);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let popup_area = Rect::new(x, area.y + 2, width, 3);

        frame.render_widget(Clear, popup_area);

        let border_style = if self.error.is_some() {
            Style::default().fg(THEME.error)
        } else {
            THEME.border_focused_style()
        };

        let title = if let Some(ref err) = self.error {
            format!(" Go to - {err} ")
        } else {
            " Go to (e.g. /dashboard/marketplace) ".to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(THEME.surface));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let input_paragraph = Paragraph::new(Span::styled(
            self.input.as_str(),
            Style::default().fg(THEME.text),
        ));
        frame.render_widget(input_paragraph, inner);

        let cursor_x = inner.x + self.cursor_position as u16;
        if cursor_x < inner.right() {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(prompt: &mut RoutePrompt, s: &str) {
        for c in s.chars() {
            prompt.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn enter(prompt: &mut RoutePrompt) -> Option<View> {
        prompt.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn test_known_path_navigates() {
        let mut prompt = RoutePrompt::new();
        prompt.activate();
        type_str(&mut prompt, "dashboard/mytickets");
        assert_eq!(enter(&mut prompt), Some(View::MyTickets));
        assert!(!prompt.active);
    }

    #[test]
    fn test_unknown_path_reports_error() {
        let mut prompt = RoutePrompt::new();
        prompt.activate();
        type_str(&mut prompt, "dashboard/");
        assert_eq!(enter(&mut prompt), None);
        assert!(prompt.active);
        assert!(prompt.error.as_deref().unwrap().contains("/dashboard/"));
        // editing clears the error
        prompt.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert!(prompt.error.is_none());
        assert_eq!(enter(&mut prompt), Some(View::Booking));
    }

    #[test]
    fn test_inactive_prompt_ignores_keys() {
        let mut prompt = RoutePrompt::new();
        assert_eq!(enter(&mut prompt), None);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut prompt = RoutePrompt::new();
        prompt.activate();
        type_str(&mut prompt, "abc");
        prompt.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(prompt.input.is_empty());
    }
}
