use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::centered_rect;
use crate::routes::ROUTES;
use crate::theme::THEME;

pub struct HelpOverlay {
    pub visible: bool,
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("/", "Go to a page by path"),
            ("m", "Toggle the menu (narrow terminals)"),
            ("\u{2191}\u{2193} j/k", "Move through tickets"),
            ("g / G", "First / last ticket"),
        ],
    ),
    (
        "Book Tickets",
        &[
            ("arrows h/j/k/l", "Move across the seat map"),
            ("Space / Enter", "Select or deselect a seat"),
            ("b", "Start the bot check"),
            ("s", "Submit the selected seats"),
        ],
    ),
    (
        "Marketplace / Sell ticket",
        &[
            ("Enter", "Buy the ticket / open the price dialog"),
            ("\u{2190}\u{2192} h/l", "Adjust the asking price"),
            ("Esc", "Close a dialog"),
        ],
    ),
    (
        "Other",
        &[
            ("r", "Reload the current page"),
            ("x", "Dismiss the latest notification"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
];

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        if self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_area = centered_rect(area, 60, 80, 50, 20);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let heading = Style::default()
            .fg(THEME.text_accent)
            .add_modifier(Modifier::BOLD);

        let mut help_text = vec![Line::from(Span::styled("Pages", heading))];
        for route in ROUTES {
            help_text.push(key_line(&route.hotkey.to_string(), route.label));
        }
        for (title, keys) in SECTIONS {
            help_text.push(Line::from(""));
            help_text.push(Line::from(Span::styled(*title, heading)));
            for (key, action) in keys.iter() {
                help_text.push(key_line(key, action));
            }
        }

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

fn key_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<16}"), THEME.accent_style()),
        Span::styled(action.to_string(), Style::default().fg(THEME.text)),
    ])
}
