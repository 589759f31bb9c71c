use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::routes::Route;
use crate::session::Session;
use crate::theme::THEME;
use crate::utils;

/// Top bar: title, menu hint on narrow terminals, active page and wallet.
pub struct Header {
    pub show_menu_hint: bool,
}

impl Header {
    pub fn new() -> Self {
        Self {
            show_menu_hint: false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, session: &Session, current: &str) {
        // Background for the entire header bar
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(16),
                Constraint::Min(0),
                Constraint::Length(48),
            ])
            .split(area);

        let mut title = Vec::new();
        if self.show_menu_hint {
            title.push(Span::styled(" \u{2261}", THEME.accent_style()));
        }
        title.push(Span::styled(
            " Ticketify",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ));
        let title = Paragraph::new(Line::from(title)).style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        let page = Route::find(current).map_or(current, |r| r.label);
        let page = Paragraph::new(Span::styled(page, Style::default().fg(THEME.text)))
            .style(THEME.header_style());
        frame.render_widget(page, chunks[1]);

        let account = match &session.account {
            Some(address) => Span::styled(utils::truncate_address(address), THEME.address_style()),
            None => Span::styled("No wallet", THEME.error_style()),
        };
        let network_info = Line::from(vec![
            Span::styled(session.chain_name.as_str(), Style::default().fg(THEME.text)),
            Span::styled(format!(" ({}, {})", session.chain_id, session.symbol), THEME.muted_style()),
            Span::styled(" | ", THEME.muted_style()),
            account,
            Span::raw(" "),
        ]);
        let network_paragraph = Paragraph::new(network_info)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(network_paragraph, chunks[2]);
    }
}
