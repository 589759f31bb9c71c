use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::botcheck::{BotCheck, BotCheckToken, Challenge};
use crate::components::centered_rect;
use crate::theme::THEME;

pub enum BotCheckResult {
    Passed(BotCheckToken),
    Cancelled,
}

/// Modal that shows a challenge code and reads the typed answer.
pub struct BotCheckDialog {
    check: BotCheck,
    challenge: Option<Challenge>,
    input: String,
    error: Option<String>,
}

impl BotCheckDialog {
    pub fn new(check: BotCheck) -> Self {
        Self {
            check,
            challenge: None,
            input: String::new(),
            error: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.check.is_available()
    }

    pub fn is_open(&self) -> bool {
        self.challenge.is_some()
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// Issue a fresh challenge. Returns false when no site key is configured.
    pub fn open(&mut self) -> bool {
        self.input.clear();
        self.error = None;
        self.challenge = self.check.challenge(now_nanos());
        self.challenge.is_some()
    }

    pub fn close(&mut self) {
        self.challenge = None;
        self.input.clear();
        self.error = None;
    }

    /// Returns the result once the dialog is done with, `None` while it stays open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<BotCheckResult> {
        let challenge = self.challenge.as_ref()?;
        match key.code {
            KeyCode::Esc => {
                self.close();
                Some(BotCheckResult::Cancelled)
            }
            KeyCode::Enter => match self.check.verify(challenge, &self.input) {
                Some(token) => {
                    tracing::info!("bot check passed");
                    self.close();
                    Some(BotCheckResult::Passed(token))
                }
                None => {
                    tracing::debug!("bot check answer rejected");
                    self.open();
                    self.error = Some("Incorrect code, try again".to_string());
                    None
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                self.input.push(c);
                self.error = None;
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(challenge) = &self.challenge else {
            return;
        };
        let popup = centered_rect(area, 40, 30, 40, 9);
        frame.render_widget(Clear, popup);

        let border_style = if self.error.is_some() {
            Style::default().fg(THEME.error)
        } else {
            THEME.border_focused_style()
        };
        let title = match &self.error {
            Some(err) => format!(" Bot check - {err} "),
            None => " Bot check ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(THEME.surface));

        let text = vec![
            Line::from(Span::styled("Type the code below to continue", THEME.muted_style())),
            Line::from(""),
            Line::from(Span::styled(
                spaced(&challenge.code),
                Style::default()
                    .fg(THEME.text_accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", THEME.muted_style()),
                Span::styled(self.input.as_str(), Style::default().fg(THEME.text)),
            ]),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }
}

fn spaced(code: &str) -> String {
    code.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn now_nanos() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, |n| n as u64)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_code(dialog: &mut BotCheckDialog, code: &str) {
        for c in code.chars() {
            assert!(dialog.handle_key(key(KeyCode::Char(c))).is_none());
        }
    }

    #[test]
    fn test_unavailable_without_site_key() {
        let mut dialog = BotCheckDialog::new(BotCheck::new(None));
        assert!(!dialog.is_available());
        assert!(!dialog.open());
        assert!(!dialog.is_open());
        assert!(dialog.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_correct_code_passes() {
        let mut dialog = BotCheckDialog::new(BotCheck::new(Some("key".into())));
        assert!(dialog.open());
        let code = dialog.challenge().unwrap().code.to_lowercase();
        type_code(&mut dialog, &code);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            Some(BotCheckResult::Passed(_))
        ));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_wrong_code_reissues_challenge() {
        let mut dialog = BotCheckDialog::new(BotCheck::new(Some("key".into())));
        dialog.open();
        type_code(&mut dialog, "zzzz");
        assert!(dialog.handle_key(key(KeyCode::Enter)).is_none());
        assert!(dialog.is_open());
        assert!(dialog.error.is_some());
        assert!(dialog.input.is_empty());
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = BotCheckDialog::new(BotCheck::new(Some("key".into())));
        dialog.open();
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Esc)),
            Some(BotCheckResult::Cancelled)
        ));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_spaced_code() {
        assert_eq!(spaced("AB3"), "A B 3");
    }
}
