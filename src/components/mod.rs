pub mod bot_check;
pub mod header;
pub mod help;
pub mod listing;
pub mod marketplace;
pub mod my_tickets;
pub mod price_slider;
pub mod route_prompt;
pub mod seat_map;
pub mod sell_ticket;
pub mod sidebar;
pub mod status_bar;
pub mod toasts;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::events::AppEvent;
use crate::session::Session;

/// Trait for all page components
pub trait Component {
    /// Handle a key event, optionally returning an AppEvent
    fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Option<AppEvent>;

    /// Render the component into the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// True while a modal inside the component owns the keyboard.
    fn captures_input(&self) -> bool {
        false
    }
}

/// A `width_pct` x `height_pct` rectangle centered in `area`, at least `min_w` x `min_h`.
pub fn centered_rect(area: Rect, width_pct: u16, height_pct: u16, min_w: u16, min_h: u16) -> Rect {
    let width = percent_of(area.width, width_pct).max(min_w).min(area.width);
    let height = percent_of(area.height, height_pct).max(min_h).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn percent_of(len: u16, pct: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(pct) / 100;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}
