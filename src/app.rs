use std::time::{Duration, Instant};

use alloy::primitives::U256;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::booking::BookingEffect;
use crate::botcheck::BotCheck;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::listing::TicketListing;
use crate::components::marketplace::Marketplace;
use crate::components::my_tickets::MyTickets;
use crate::components::route_prompt::RoutePrompt;
use crate::components::seat_map::SeatMap;
use crate::components::sell_ticket::SellTicket;
use crate::components::sidebar::{SIDEBAR_WIDTH, Sidebar};
use crate::components::status_bar::StatusBar;
use crate::components::{Component, toasts};
use crate::data::TicketService;
use crate::data::gateway::{ContractGateway, ErrorKind};
use crate::events::{AppEvent, View};
use crate::notify::NotificationSink;
use crate::routes::Route;
use crate::session::Session;
use crate::theme::THEME;

pub struct App<G> {
    session: Session,
    current_view: View,

    // Components
    header: Header,
    sidebar: Sidebar,
    seat_map: SeatMap,
    marketplace: Marketplace,
    my_tickets: MyTickets,
    sell_ticket: SellTicket,
    status_bar: StatusBar,
    route_prompt: RoutePrompt,
    help: HelpOverlay,
    notifications: NotificationSink,

    // Data
    service: TicketService<G>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    writes_in_flight: usize,
    width: u16,
    should_quit: bool,
    tick_rate: Duration,
}

impl<G: ContractGateway> App<G> {
    pub fn new(
        service: TicketService<G>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        session: Session,
        seat_price: U256,
        bot_check: BotCheck,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            session,
            current_view: View::Booking,
            header: Header::new(),
            sidebar: Sidebar::new(),
            seat_map: SeatMap::new(seat_price, bot_check),
            marketplace: Marketplace::new(),
            my_tickets: MyTickets::new(),
            sell_ticket: SellTicket::new(),
            status_bar: StatusBar::new(),
            route_prompt: RoutePrompt::new(),
            help: HelpOverlay::new(),
            notifications: NotificationSink::new(),
            service,
            event_rx,
            writes_in_flight: 0,
            width: 0,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(
        &mut self,
        mut terminal: ratatui::DefaultTerminal,
        start: View,
    ) -> color_eyre::Result<()> {
        self.navigate_to(start);

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    self.notifications.prune(Instant::now());
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        tracing::info!("shutting down");
        Ok(())
    }

    fn current_page(&mut self) -> &mut dyn Component {
        match self.current_view {
            View::Booking => &mut self.seat_map,
            View::Marketplace => &mut self.marketplace,
            View::MyTickets => &mut self.my_tickets,
            View::SellTicket => &mut self.sell_ticket,
        }
    }

    fn listing_mut(&mut self, view: View) -> Option<&mut TicketListing> {
        match view {
            View::Booking => None,
            View::Marketplace => Some(&mut self.marketplace.listing),
            View::MyTickets => Some(&mut self.my_tickets.listing),
            View::SellTicket => Some(&mut self.sell_ticket.listing),
        }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.current_view {
            View::Booking => &[
                ("\u{2190}\u{2191}\u{2193}\u{2192}", "Move"),
                ("Space", "Select"),
                ("b", "Bot check"),
                ("s", "Submit"),
                ("/", "Go to"),
            ],
            View::Marketplace => &[("\u{2191}\u{2193}", "Browse"), ("Enter", "Buy"), ("/", "Go to")],
            View::MyTickets => &[("\u{2191}\u{2193}", "Browse"), ("r", "Reload"), ("/", "Go to")],
            View::SellTicket => &[("\u{2191}\u{2193}", "Browse"), ("Enter", "Sell"), ("/", "Go to")],
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.width = area.width;

        // Fill background
        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | content (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let persistent = Sidebar::is_persistent(area.width);
        if persistent {
            self.sidebar.overlay_open = false;
        }
        self.header.show_menu_hint = !persistent;

        let current = self.current_view.path();
        self.header.render(frame, chunks[0], &self.session, current);

        let content = if persistent {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[1]);
            self.sidebar.render(frame, body[0], current);
            body[1]
        } else {
            chunks[1]
        };

        self.current_page().render(frame, content);

        self.status_bar.tx_pending = self.writes_in_flight > 0;
        let view = self.current_view;
        self.status_bar.loading = match self.listing_mut(view) {
            Some(listing) => listing.is_loading(),
            None => self.seat_map.is_loading(),
        };
        self.status_bar.render(frame, chunks[2], self.hints());

        // Overlays (rendered on top)
        toasts::render(frame, chunks[1], &self.notifications);
        self.sidebar.render_overlay(frame, chunks[1], current);
        self.route_prompt.render(frame, area);
        self.help.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only handle key press events (not release/repeat) for cross-platform compat
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.handle_key(key);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Help overlay consumes all keys when visible
        if self.help.handle_key(key) {
            return;
        }

        if self.route_prompt.active {
            if let Some(view) = self.route_prompt.handle_key(key) {
                self.handle_app_event(AppEvent::Navigate(view));
            }
            return;
        }

        if self.sidebar.overlay_open {
            if let Some(view) = self
                .sidebar
                .handle_key(key)
                .and_then(|route| View::from_path(route.path))
            {
                self.handle_app_event(AppEvent::Navigate(view));
            }
            return;
        }

        if !self.current_page().captures_input() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('/') => {
                    self.route_prompt.activate();
                    return;
                }
                KeyCode::Char('?') => {
                    self.help.toggle();
                    return;
                }
                KeyCode::Char('m') if !Sidebar::is_persistent(self.width) => {
                    self.sidebar.toggle_overlay(self.current_view.path());
                    return;
                }
                KeyCode::Char('x') => {
                    self.notifications.dismiss_latest();
                    return;
                }
                KeyCode::Char('r') => {
                    self.navigate_to(self.current_view);
                    return;
                }
                KeyCode::Char(c) => {
                    if let Some(view) = Route::by_hotkey(c).and_then(|r| View::from_path(r.path)) {
                        self.navigate_to(view);
                        return;
                    }
                }
                _ => {}
            }
        }

        // Delegate to current view's component
        let session = self.session.clone();
        if let Some(event) = self.current_page().handle_key(key, &session) {
            self.handle_app_event(event);
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::BookedSeatsLoaded { generation, seats } => {
                self.seat_map.seats_loaded(generation, &seats);
            }
            AppEvent::BookedSeatsFailed { generation, error } => {
                self.seat_map.load_failed(generation, error);
            }
            AppEvent::RecordsLoaded {
                view,
                generation,
                records,
            } => {
                if let Some(listing) = self.listing_mut(view) {
                    listing.apply(generation, Ok(records));
                }
            }
            AppEvent::RecordsFailed {
                view,
                generation,
                error,
            } => {
                if let Some(listing) = self.listing_mut(view) {
                    listing.apply(generation, Err(error));
                }
            }
            AppEvent::Submit { view, request } => {
                let id = self.notifications.pending(request.action());
                self.writes_in_flight += 1;
                self.service.submit(view, request, id);
            }
            AppEvent::PreconditionFailed(action) => {
                self.notifications.failure(action, ErrorKind::Precondition);
            }
            AppEvent::TxSettled {
                view,
                action,
                notification,
                outcome,
            } => {
                self.writes_in_flight = self.writes_in_flight.saturating_sub(1);
                self.notifications.resolve(notification, action, &outcome);
                match view {
                    View::Booking => {
                        if let Some(BookingEffect::RefreshBookedSeats) = self.seat_map.settle(&outcome) {
                            let generation = self.seat_map.begin_load();
                            self.service.fetch_booked_seats(generation);
                        }
                    }
                    View::Marketplace => self.marketplace.settle(&outcome),
                    View::SellTicket => self.sell_ticket.settle(&outcome),
                    View::MyTickets => {}
                }
            }
            AppEvent::Navigate(view) => {
                self.navigate_to(view);
            }
            AppEvent::Error(msg) => {
                tracing::warn!(%msg, "status error");
                self.status_bar.error_message = Some(msg);
            }
        }
    }

    /// Switch pages. Every visit issues a fresh read; nothing is cached across visits.
    fn navigate_to(&mut self, view: View) {
        tracing::debug!(path = view.path(), "navigate");
        self.current_view = view;
        self.status_bar.error_message = None;
        self.sidebar.overlay_open = false;

        match view {
            View::Booking => {
                let generation = self.seat_map.begin_load();
                self.service.fetch_booked_seats(generation);
            }
            View::Marketplace | View::MyTickets | View::SellTicket => {
                let account = self.session.account;
                let Some(listing) = self.listing_mut(view) else {
                    return;
                };
                let Some(owner) = account else {
                    listing.wait_for_account();
                    return;
                };
                let generation = listing.begin_fetch();
                match view {
                    View::Marketplace => self.service.fetch_listings(generation),
                    _ => self.service.fetch_owned_tickets(view, generation, owner),
                }
            }
        }
    }
}
