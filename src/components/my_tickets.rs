use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

use crate::components::Component;
use crate::components::listing::TicketListing;
use crate::events::AppEvent;
use crate::session::Session;

/// Read-only list of the tickets the connected account holds.
pub struct MyTickets {
    pub listing: TicketListing,
}

impl MyTickets {
    pub fn new() -> Self {
        Self {
            listing: TicketListing::new(false),
        }
    }
}

impl Component for MyTickets {
    fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> Option<AppEvent> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.listing.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.listing.select_prev(),
            KeyCode::Char('g') => self.listing.select_first(),
            KeyCode::Char('G') => self.listing.select_last(),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.listing
            .render(frame, area, "My Tickets", "\u{2191}\u{2193}:Browse");
    }
}
