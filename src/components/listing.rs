use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::{Record, Ticket};
use crate::theme::THEME;
use crate::utils;

/// Fetch-render lifecycle shared by the ticket pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    /// No account yet; nothing has been requested.
    Waiting,
    Loading,
    Loaded(Vec<Record>),
    Failed(String),
}

/// Records of one page plus the selection cursor.
pub struct TicketListing {
    pub state: ListingState,
    generation: u64,
    show_price: bool,
    list_state: ListState,
}

impl TicketListing {
    pub fn new(show_price: bool) -> Self {
        Self {
            state: ListingState::Waiting,
            generation: 0,
            show_price,
            list_state: ListState::default(),
        }
    }

    /// Start a new fetch; results tagged with an older generation are dropped.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.state = ListingState::Loading;
        self.list_state.select(None);
        self.generation
    }

    pub fn wait_for_account(&mut self) {
        self.generation += 1;
        self.state = ListingState::Waiting;
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListingState::Loading
    }

    /// Apply a settled read. Returns false when the result is stale.
    pub fn apply(&mut self, generation: u64, result: Result<Vec<Record>, String>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale read");
            return false;
        }
        self.state = match result {
            Ok(records) => {
                self.list_state
                    .select(if records.is_empty() { None } else { Some(0) });
                ListingState::Loaded(records)
            }
            Err(e) => ListingState::Failed(e),
        };
        true
    }

    pub fn records(&self) -> &[Record] {
        match &self.state {
            ListingState::Loaded(records) => records,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&Record> {
        self.list_state.selected().and_then(|i| self.records().get(i))
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.selected().and_then(Record::ticket)
    }

    pub fn select_next(&mut self) {
        let len = self.records().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if current + 1 >= len { current } else { current + 1 };
        self.list_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.records().is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(current.saturating_sub(1)));
    }

    pub fn select_first(&mut self) {
        if !self.records().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.records().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, footer: &str) {
        let outer_block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let message = match &self.state {
            ListingState::Waiting => Some(("Connect a wallet to view tickets.".to_string(), THEME.muted_style())),
            ListingState::Loading => Some(("Loading...".to_string(), THEME.accent_style())),
            ListingState::Failed(e) => Some((format!("Could not load tickets: {e}"), THEME.error_style())),
            ListingState::Loaded(records) if records.is_empty() => {
                Some(("No tickets found.".to_string(), THEME.muted_style()))
            }
            ListingState::Loaded(_) => None,
        };
        if let Some((text, style)) = message {
            let paragraph = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, inner);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let show_price = self.show_price;
        let items: Vec<ListItem> = self
            .records()
            .iter()
            .map(|record| card(record, show_price))
            .collect();
        let list = List::new(items)
            .highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let footer = Paragraph::new(Span::styled(format!(" {footer}"), THEME.muted_style()));
        frame.render_widget(footer, chunks[1]);
    }
}

/// One ticket card: name, description, image, attributes and an optional price.
fn card(record: &Record, show_price: bool) -> ListItem<'static> {
    let ticket = match record {
        Record::Valid(ticket) => ticket,
        Record::Malformed { raw, reason } => {
            let preview: String = raw.chars().take(48).collect();
            return ListItem::new(vec![
                Line::from(Span::styled("Unreadable ticket record", THEME.error_style())),
                Line::from(Span::styled(format!("  {reason}"), THEME.muted_style())),
                Line::from(Span::styled(format!("  {preview}"), THEME.muted_style())),
                Line::from(""),
            ]);
        }
    };

    let mut lines = vec![Line::from(Span::styled(
        ticket.name.clone(),
        Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
    ))];
    if !ticket.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", ticket.description),
            THEME.muted_style(),
        )));
    }
    if !ticket.image.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Image: ", THEME.muted_style()),
            Span::styled(ticket.image.clone(), THEME.accent_style()),
        ]));
    }
    if show_price {
        lines.push(Line::from(vec![
            Span::styled("  Price: ", THEME.muted_style()),
            Span::styled(utils::format_eth(ticket.price), THEME.eth_style()),
        ]));
    }
    for attr in &ticket.attributes {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}: ", attr.trait_type),
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(attr.value.clone(), Style::default().fg(THEME.text)),
        ]));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}
