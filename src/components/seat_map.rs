use alloy::primitives::U256;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::booking::{
    BookingEffect, BookingState, BookingWorkflow, EventInfo, ROW_LABELS, SEATS_PER_ROW, Seat,
};
use crate::botcheck::BotCheck;
use crate::components::bot_check::{BotCheckDialog, BotCheckResult};
use crate::components::{Component, centered_rect};
use crate::data::types::TxAction;
use crate::events::{AppEvent, View, WriteRequest};
use crate::notify::Outcome;
use crate::session::Session;
use crate::theme::THEME;
use crate::utils;

/// The booking page: event card, seat map, bot check and purchase confirmation.
pub struct SeatMap {
    workflow: BookingWorkflow,
    bot_check: BotCheckDialog,
    event: EventInfo,
    cursor_row: usize,
    cursor_col: usize,
    loading: bool,
    load_error: Option<String>,
    generation: u64,
}

impl SeatMap {
    pub fn new(seat_price: U256, bot_check: BotCheck) -> Self {
        Self {
            workflow: BookingWorkflow::new(seat_price),
            bot_check: BotCheckDialog::new(bot_check),
            event: EventInfo::default(),
            cursor_row: 0,
            cursor_col: 0,
            loading: false,
            load_error: None,
            generation: 0,
        }
    }

    #[cfg(test)]
    pub fn workflow(&self) -> &BookingWorkflow {
        &self.workflow
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a booked-seat read; only its result will be applied.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.load_error = None;
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale booked seats");
            return false;
        }
        true
    }

    pub fn seats_loaded(&mut self, generation: u64, booked: &[String]) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.loading = false;
        self.workflow.seats_loaded(booked);
        true
    }

    pub fn load_failed(&mut self, generation: u64, error: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.loading = false;
        self.load_error = Some(error);
        true
    }

    /// The claim submitted from this page has settled.
    pub fn settle(&mut self, outcome: &Outcome) -> Option<BookingEffect> {
        self.workflow.finish_payment(outcome)
    }

    #[cfg(test)]
    pub fn bot_code(&self) -> Option<String> {
        self.bot_check.challenge().map(|c| c.code.clone())
    }

    fn cursor_seat(&self) -> Option<Seat> {
        Seat::new(ROW_LABELS[self.cursor_row], self.cursor_col as u8 + 1)
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let rows = ROW_LABELS.len() as isize;
        let cols = SEATS_PER_ROW as isize;
        self.cursor_row = (self.cursor_row as isize + d_row).clamp(0, rows - 1) as usize;
        self.cursor_col = (self.cursor_col as isize + d_col).clamp(0, cols - 1) as usize;
    }

    fn start_bot_check(&mut self) -> Option<AppEvent> {
        if !self.bot_check.is_available() {
            return Some(AppEvent::Error(
                "Bot check unavailable: no site key configured".to_string(),
            ));
        }
        if self.workflow.request_bot_check() {
            self.bot_check.open();
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, session: &Session) -> Option<AppEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => match self.workflow.begin_payment(session) {
                Ok(claim) => {
                    tracing::info!(seats = ?claim.seats, value = %claim.value, "submitting claim");
                    Some(AppEvent::Submit {
                        view: View::Booking,
                        request: WriteRequest::Claim(claim),
                    })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "claim not submitted");
                    self.workflow.cancel_confirm();
                    Some(AppEvent::PreconditionFailed(TxAction::Claim))
                }
            },
            KeyCode::Esc | KeyCode::Char('n') => {
                self.workflow.cancel_confirm();
                None
            }
            _ => None,
        }
    }

    fn render_event_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(THEME.border_style());
        let text = vec![
            Line::from(Span::styled(
                self.event.name.as_str(),
                Style::default()
                    .fg(THEME.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.event.tagline.as_str(), THEME.muted_style())),
            Line::from(vec![
                Span::styled("Place: ", THEME.muted_style()),
                Span::styled(self.event.place.as_str(), Style::default().fg(THEME.text)),
                Span::styled("   Date: ", THEME.muted_style()),
                Span::styled(self.event.date.as_str(), Style::default().fg(THEME.text)),
                Span::styled("   Time: ", THEME.muted_style()),
                Span::styled(self.event.time.as_str(), Style::default().fg(THEME.text)),
            ]),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let cursor = self.cursor_seat();
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:^53}", "STAGE"),
                Style::default()
                    .fg(THEME.text_accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
        ];

        for &row in ROW_LABELS.iter() {
            let mut spans = vec![Span::styled(format!("{row}  "), THEME.muted_style())];
            for col in 1..=SEATS_PER_ROW {
                let Some(seat) = Seat::new(row, col) else {
                    continue;
                };
                let mut style = THEME.seat_style(
                    self.workflow.is_booked(&seat),
                    self.workflow.is_selected(&seat),
                );
                if cursor == Some(seat) {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!("{:^4}", seat.to_string()), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans).alignment(Alignment::Center));
            lines.push(Line::from(""));
        }

        lines.push(
            Line::from(vec![
                Span::styled(" A1 ", THEME.seat_style(false, false)),
                Span::styled(" available  ", THEME.muted_style()),
                Span::styled(" A1 ", THEME.seat_style(false, true)),
                Span::styled(" selected  ", THEME.muted_style()),
                Span::styled(" A1 ", THEME.seat_style(true, false)),
                Span::styled(" booked", THEME.muted_style()),
            ])
            .alignment(Alignment::Center),
        );

        let title = if self.loading {
            " Seats (loading...) ".to_string()
        } else if let Some(err) = &self.load_error {
            format!(" Seats - {err} ")
        } else {
            " Seats ".to_string()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let selected: Vec<String> = self.workflow.selected().iter().map(Seat::to_string).collect();
        let seats = if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(", ")
        };
        let (check_text, check_style) = if self.workflow.has_token() {
            ("passed", THEME.success_style())
        } else if self.bot_check.is_available() {
            ("required (b)", THEME.accent_style())
        } else {
            ("unavailable", THEME.error_style())
        };
        let submit_style = if self.workflow.can_submit() {
            THEME.accent_style().add_modifier(Modifier::BOLD)
        } else {
            THEME.muted_style()
        };
        let submit_text = match self.workflow.state() {
            BookingState::PaymentPending => "Booking...",
            _ => "[s] Submit",
        };

        let text = vec![
            Line::from(vec![
                Span::styled("Selected: ", THEME.muted_style()),
                Span::styled(seats, Style::default().fg(THEME.text)),
                Span::styled("   Total: ", THEME.muted_style()),
                Span::styled(
                    utils::format_eth(self.workflow.amount_due()),
                    THEME.eth_style(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Bot check: ", THEME.muted_style()),
                Span::styled(check_text, check_style),
                Span::raw("   "),
                Span::styled(submit_text, submit_style),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), area);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        if self.workflow.state() != BookingState::ConfirmDialogOpen {
            return;
        }
        let popup = centered_rect(area, 50, 40, 52, 12);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm booking ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let seats: Vec<String> = self.workflow.selected().iter().map(Seat::to_string).collect();
        let warning = Style::default().fg(THEME.warning);
        let text = vec![
            Line::from(Span::styled("\u{26a0} Transaction Fees might fluctuate", warning)),
            Line::from(Span::styled(
                "\u{26a0} To increase your chance of booking pay higher transaction fees",
                warning,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Seats selected: ", THEME.muted_style()),
                Span::styled(seats.join(", "), Style::default().fg(THEME.text)),
            ]),
            Line::from(vec![
                Span::styled("Amount payable - ", THEME.muted_style()),
                Span::styled(
                    utils::format_eth(self.workflow.amount_due()),
                    THEME.eth_style().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", THEME.accent_style()),
                Span::styled(":Pay  ", THEME.muted_style()),
                Span::styled("Esc", THEME.accent_style()),
                Span::styled(":Cancel", THEME.muted_style()),
            ]),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }
}

impl Component for SeatMap {
    fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Option<AppEvent> {
        if self.bot_check.is_open() {
            match self.bot_check.handle_key(key)? {
                BotCheckResult::Passed(token) => self.workflow.attach_token(token),
                BotCheckResult::Cancelled => self.workflow.cancel_bot_check(),
            }
            return None;
        }

        if self.workflow.state() == BookingState::ConfirmDialogOpen {
            return self.handle_confirm_key(key, session);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(seat) = self.cursor_seat() {
                    self.workflow.toggle(seat);
                }
            }
            KeyCode::Char('b') => return self.start_bot_check(),
            KeyCode::Char('s') => {
                self.workflow.open_confirm();
            }
            _ => {}
        }
        None
    }

    fn captures_input(&self) -> bool {
        self.bot_check.is_open() || self.workflow.state() == BookingState::ConfirmDialogOpen
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(14),
                Constraint::Length(2),
            ])
            .split(area);

        self.render_event_card(frame, chunks[0]);
        self.render_grid(frame, chunks[1]);
        self.render_summary(frame, chunks[2]);

        self.render_confirm(frame, area);
        self.bot_check.render(frame, area);
    }
}
