use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct StatusBar {
    pub error_message: Option<String>,
    pub loading: bool,
    pub tx_pending: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            error_message: None,
            loading: false,
            tx_pending: false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
        // Background
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(24)])
            .split(area);

        let left_content = if let Some(ref err) = self.error_message {
            Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
            ])
        } else if self.loading {
            Line::from(Span::styled(" Loading...", THEME.accent_style()))
        } else {
            let mut spans = vec![Span::raw(" ")];
            for (key, action) in hints {
                spans.push(Span::styled(*key, THEME.accent_style()));
                spans.push(Span::styled(format!(":{action}  "), THEME.muted_style()));
            }
            Line::from(spans)
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        let right_content = if self.tx_pending {
            Line::from(vec![
                Span::styled("\u{25cf} ", Style::default().fg(THEME.warning)),
                Span::styled("Tx pending ", Style::default().fg(THEME.warning)),
            ])
        } else {
            Line::from(vec![
                Span::styled("?", THEME.accent_style()),
                Span::styled(":Help  ", THEME.muted_style()),
                Span::styled("q", THEME.accent_style()),
                Span::styled(":Quit ", THEME.muted_style()),
            ])
        };

        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}
