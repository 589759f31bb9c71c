use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

use crate::components::Component;
use crate::components::listing::TicketListing;
use crate::data::records;
use crate::data::types::{Listing, TxAction};
use crate::events::{AppEvent, View, WriteRequest};
use crate::notify::Outcome;
use crate::session::Session;

/// Tickets offered for resale; `Enter` buys the selected one at its asking price.
pub struct Marketplace {
    pub listing: TicketListing,
    last_write: Option<Outcome>,
}

impl Marketplace {
    pub fn new() -> Self {
        Self {
            listing: TicketListing::new(true),
            last_write: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.last_write == Some(Outcome::Pending)
    }

    /// The purchase submitted from this page has settled.
    pub fn settle(&mut self, outcome: &Outcome) {
        self.last_write = Some(outcome.clone());
    }

    fn buy_selected(&mut self, session: &Session) -> Option<AppEvent> {
        if self.is_pending() {
            return None;
        }
        let listing = self.listing.selected_ticket().and_then(Listing::from_ticket)?;
        if !session.is_connected() {
            return Some(AppEvent::PreconditionFailed(TxAction::Buy));
        }
        self.last_write = Some(Outcome::Pending);
        Some(AppEvent::Submit {
            view: View::Marketplace,
            request: WriteRequest::Buy {
                seat_id: listing.seat_id,
                price: listing.price,
            },
        })
    }
}

impl Component for Marketplace {
    fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Option<AppEvent> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.listing.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.listing.select_prev(),
            KeyCode::Char('g') => self.listing.select_first(),
            KeyCode::Char('G') => self.listing.select_last(),
            KeyCode::Enter => return self.buy_selected(session),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let footer = match &self.last_write {
            Some(Outcome::Pending) => "Purchase in progress...",
            Some(Outcome::Failed(_)) => "Last purchase failed  \u{2191}\u{2193}:Browse  Enter:Buy Now",
            _ => "\u{2191}\u{2193}:Browse  Enter:Buy Now",
        };
        let on_sale = records::listings(self.listing.records()).len();
        let title = format!("Ticket Marketplace ({on_sale} on sale)");
        self.listing.render(frame, area, &title, footer);
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::data::records::decode;

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    fn loaded() -> Marketplace {
        let mut page = Marketplace::new();
        let generation = page.listing.begin_fetch();
        page.listing.apply(
            generation,
            Ok(vec![decode(
                r#"{"name":"Resale","price":"6000000000000000","attributes":[{"trait_type":"Seat","value":"B4"}]}"#,
            )]),
        );
        page
    }

    fn connected() -> Session {
        Session::new(Some(Address::repeat_byte(0x22)), 11155111, "Sepolia")
    }

    #[test]
    fn test_enter_buys_at_listed_price() {
        let mut page = loaded();
        match page.handle_key(enter(), &connected()) {
            Some(AppEvent::Submit {
                view: View::Marketplace,
                request: WriteRequest::Buy { seat_id, price },
            }) => {
                assert_eq!(seat_id, "B4");
                assert_eq!(price, U256::from(6_000_000_000_000_000u64));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(page.is_pending());
    }

    #[test]
    fn test_second_enter_ignored_until_settled() {
        let mut page = loaded();
        let session = connected();
        assert!(page.handle_key(enter(), &session).is_some());
        assert!(page.handle_key(enter(), &session).is_none());
        page.settle(&Outcome::Failed(crate::data::gateway::ErrorKind::Revert));
        assert!(!page.is_pending());
        assert!(page.handle_key(enter(), &session).is_some());
    }

    #[test]
    fn test_without_wallet_reports_precondition() {
        let mut page = loaded();
        let session = Session::new(None, 11155111, "Sepolia");
        assert!(matches!(
            page.handle_key(enter(), &session),
            Some(AppEvent::PreconditionFailed(TxAction::Buy))
        ));
        assert!(!page.is_pending());
    }

    #[test]
    fn test_malformed_selection_does_nothing() {
        let mut page = Marketplace::new();
        let generation = page.listing.begin_fetch();
        page.listing.apply(generation, Ok(vec![decode("{")]));
        assert!(page.handle_key(enter(), &connected()).is_none());
    }
}
