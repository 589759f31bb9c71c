use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::routes::{self, ROUTES, Route};
use crate::theme::THEME;

/// Terminals at least this wide keep the sidebar on screen.
pub const PERSISTENT_MIN_WIDTH: u16 = 100;
pub const SIDEBAR_WIDTH: u16 = 26;

/// Route list rendered as a fixed column on wide terminals and as a
/// toggled overlay menu on narrow ones.
pub struct Sidebar {
    pub overlay_open: bool,
    cursor: usize,
}

impl Sidebar {
    pub fn new() -> Self {
        Self {
            overlay_open: false,
            cursor: 0,
        }
    }

    pub fn is_persistent(width: u16) -> bool {
        width >= PERSISTENT_MIN_WIDTH
    }

    pub fn toggle_overlay(&mut self, current: &str) {
        self.overlay_open = !self.overlay_open;
        if self.overlay_open {
            self.cursor = routes::active_index(current).unwrap_or(0);
        }
    }

    /// Overlay keys; returns the chosen route when one is picked.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<&'static Route> {
        if !self.overlay_open {
            return None;
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(ROUTES.len() - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                self.overlay_open = false;
                return ROUTES.get(self.cursor);
            }
            KeyCode::Char(c) => {
                if let Some(route) = Route::by_hotkey(c) {
                    self.overlay_open = false;
                    return Some(route);
                }
                if c == 'm' {
                    self.overlay_open = false;
                }
            }
            KeyCode::Esc => self.overlay_open = false,
            _ => {}
        }
        None
    }

    fn items(current: &str, cursor: Option<usize>) -> Vec<ListItem<'static>> {
        let active = routes::active_index(current);
        ROUTES
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let style = if active == Some(i) {
                    THEME.active_route_style()
                } else if cursor == Some(i) {
                    THEME.selected_style()
                } else {
                    Style::default().fg(THEME.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", route.icon), style),
                    Span::styled(route.label, style),
                    Span::styled(format!("  [{}]", route.hotkey), THEME.muted_style()),
                ]))
            })
            .collect()
    }

    /// Fixed left column.
    pub fn render(&self, frame: &mut Frame, area: Rect, current: &str) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(THEME.border_style())
            .style(Style::default().bg(THEME.surface));
        let list = List::new(Self::items(current, None)).block(block);
        frame.render_widget(list, area);
    }

    pub fn render_overlay(&self, frame: &mut Frame, area: Rect, current: &str) {
        if !self.overlay_open {
            return;
        }
        let height = (ROUTES.len() as u16 + 2).min(area.height);
        let width = SIDEBAR_WIDTH.min(area.width);
        let popup = Rect::new(area.x, area.y, width, height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));
        let list = List::new(Self::items(current, Some(self.cursor))).block(block);
        frame.render_widget(list, popup);
    }
}
