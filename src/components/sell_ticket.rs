use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::listing::TicketListing;
use crate::components::price_slider::PriceSlider;
use crate::components::{Component, centered_rect};
use crate::data::types::TxAction;
use crate::events::{AppEvent, View, WriteRequest};
use crate::notify::Outcome;
use crate::session::Session;
use crate::theme::THEME;

/// Price dialog for one owned ticket.
struct SellDialog {
    seat_id: String,
    name: String,
    slider: PriceSlider,
}

/// Owned tickets that can be put up for resale.
pub struct SellTicket {
    pub listing: TicketListing,
    dialog: Option<SellDialog>,
    last_write: Option<Outcome>,
}

impl SellTicket {
    pub fn new() -> Self {
        Self {
            listing: TicketListing::new(false),
            dialog: None,
            last_write: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.last_write == Some(Outcome::Pending)
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// The listing submitted from this page has settled.
    pub fn settle(&mut self, outcome: &Outcome) {
        self.last_write = Some(outcome.clone());
    }

    fn open_dialog(&mut self) {
        if self.is_pending() {
            return;
        }
        let Some(ticket) = self.listing.selected_ticket() else {
            return;
        };
        let Some(seat_id) = ticket.seat_id() else {
            tracing::debug!(name = %ticket.name, "ticket has no seat attribute");
            return;
        };
        self.dialog = Some(SellDialog {
            seat_id: seat_id.to_string(),
            name: ticket.name.clone(),
            slider: PriceSlider::listing(),
        });
    }

    fn handle_dialog_key(&mut self, key: KeyEvent, session: &Session) -> Option<AppEvent> {
        let dialog = self.dialog.as_mut()?;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => dialog.slider.decrease(1),
            KeyCode::Right | KeyCode::Char('l') => dialog.slider.increase(1),
            KeyCode::Char('g') => dialog.slider.to_min(),
            KeyCode::Char('G') => dialog.slider.to_max(),
            KeyCode::Esc => self.dialog = None,
            KeyCode::Enter => {
                if self.is_pending() {
                    return None;
                }
                if !session.is_connected() {
                    return Some(AppEvent::PreconditionFailed(TxAction::List));
                }
                let dialog = self.dialog.take()?;
                self.last_write = Some(Outcome::Pending);
                return Some(AppEvent::Submit {
                    view: View::SellTicket,
                    request: WriteRequest::List {
                        seat_id: dialog.seat_id,
                        price: dialog.slider.price_wei(),
                    },
                });
            }
            _ => {}
        }
        None
    }

    fn render_dialog(&self, frame: &mut Frame, area: Rect) {
        let Some(dialog) = &self.dialog else {
            return;
        };
        let popup = centered_rect(area, 50, 40, 44, 11);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" Sell {} ", dialog.name))
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let seat = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Seat: ", THEME.muted_style()),
                Span::styled(dialog.seat_id.as_str(), THEME.accent_style()),
            ]),
            Line::from(Span::styled("Set ticket price", THEME.muted_style())),
        ]);
        frame.render_widget(seat, chunks[0]);

        dialog.slider.render(frame, chunks[2]);

        let bounds = Line::from(vec![
            Span::styled(
                crate::utils::format_eth_fixed(dialog.slider.min_wei(), 4),
                THEME.muted_style(),
            ),
            Span::raw(" - "),
            Span::styled(
                crate::utils::format_eth_fixed(dialog.slider.max_wei(), 4),
                THEME.muted_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(bounds), chunks[3]);

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("\u{2190}\u{2192}", THEME.accent_style()),
            Span::styled(":Adjust  ", THEME.muted_style()),
            Span::styled("Enter", THEME.accent_style()),
            Span::styled(":Submit  ", THEME.muted_style()),
            Span::styled("Esc", THEME.accent_style()),
            Span::styled(":Cancel", THEME.muted_style()),
        ]));
        frame.render_widget(hint, chunks[5]);
    }
}

impl Component for SellTicket {
    fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Option<AppEvent> {
        if self.dialog.is_some() {
            return self.handle_dialog_key(key, session);
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.listing.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.listing.select_prev(),
            KeyCode::Char('g') => self.listing.select_first(),
            KeyCode::Char('G') => self.listing.select_last(),
            KeyCode::Enter => self.open_dialog(),
            _ => {}
        }
        None
    }

    fn captures_input(&self) -> bool {
        self.dialog_open()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let footer = match &self.last_write {
            Some(Outcome::Pending) => "Listing in progress...",
            Some(Outcome::Failed(_)) => "Last listing failed  \u{2191}\u{2193}:Browse  Enter:Sell",
            _ => "\u{2191}\u{2193}:Browse  Enter:Sell",
        };
        self.listing.render(frame, area, "Sell Ticket", footer);
        self.render_dialog(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::data::records::decode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> SellTicket {
        let mut page = SellTicket::new();
        let generation = page.listing.begin_fetch();
        page.listing.apply(
            generation,
            Ok(vec![decode(
                r#"{"name":"Mine","attributes":[{"trait_type":"Seat","value":"C7"}]}"#,
            )]),
        );
        page
    }

    fn connected() -> Session {
        Session::new(Some(Address::repeat_byte(0x33)), 11155111, "Sepolia")
    }

    fn submitted_price(event: Option<AppEvent>) -> U256 {
        match event {
            Some(AppEvent::Submit {
                view: View::SellTicket,
                request: WriteRequest::List { seat_id, price },
            }) => {
                assert_eq!(seat_id, "C7");
                price
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_default_price_is_submitted() {
        let mut page = loaded();
        let session = connected();
        assert!(page.handle_key(key(KeyCode::Enter), &session).is_none());
        assert!(page.dialog_open());
        let price = submitted_price(page.handle_key(key(KeyCode::Enter), &session));
        assert_eq!(price, U256::from(6_000_000_000_000_000u64));
        assert!(!page.dialog_open());
        assert!(page.is_pending());
    }

    #[test]
    fn test_slider_adjusts_and_clamps() {
        let mut page = loaded();
        let session = connected();
        page.handle_key(key(KeyCode::Enter), &session);
        for _ in 0..50 {
            page.handle_key(key(KeyCode::Right), &session);
        }
        let price = submitted_price(page.handle_key(key(KeyCode::Enter), &session));
        assert_eq!(price, U256::from(7_000_000_000_000_000u64));
    }

    #[test]
    fn test_min_jump_and_step() {
        let mut page = loaded();
        let session = connected();
        page.handle_key(key(KeyCode::Enter), &session);
        page.handle_key(key(KeyCode::Char('g')), &session);
        page.handle_key(key(KeyCode::Char('l')), &session);
        let price = submitted_price(page.handle_key(key(KeyCode::Enter), &session));
        assert_eq!(price, U256::from(5_100_000_000_000_000u64));
    }

    #[test]
    fn test_escape_closes_without_submitting() {
        let mut page = loaded();
        let session = connected();
        page.handle_key(key(KeyCode::Enter), &session);
        assert!(page.handle_key(key(KeyCode::Esc), &session).is_none());
        assert!(!page.dialog_open());
        assert!(!page.is_pending());
    }

    #[test]
    fn test_pending_blocks_new_dialog() {
        let mut page = loaded();
        let session = connected();
        page.handle_key(key(KeyCode::Enter), &session);
        page.handle_key(key(KeyCode::Enter), &session);
        page.handle_key(key(KeyCode::Enter), &session);
        assert!(!page.dialog_open());
        page.settle(&Outcome::Failed(crate::data::gateway::ErrorKind::Network));
        page.handle_key(key(KeyCode::Enter), &session);
        assert!(page.dialog_open());
    }

    #[test]
    fn test_without_wallet_keeps_dialog_open() {
        let mut page = loaded();
        let session = Session::new(None, 11155111, "Sepolia");
        page.handle_key(key(KeyCode::Enter), &session);
        assert!(matches!(
            page.handle_key(key(KeyCode::Enter), &session),
            Some(AppEvent::PreconditionFailed(TxAction::List))
        ));
        assert!(page.dialog_open());
    }
}
