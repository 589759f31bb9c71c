use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, U256};

use crate::botcheck::BotCheckToken;
use crate::data::gateway::ContractCallError;
use crate::notify::Outcome;
use crate::session::Session;

pub const ROW_LABELS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];
pub const SEATS_PER_ROW: u8 = 10;

/// One seat of the fixed 5 x 10 hall, e.g. `C5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seat {
    row: char,
    col: u8,
}

impl Seat {
    pub fn new(row: char, col: u8) -> Option<Seat> {
        let row = row.to_ascii_uppercase();
        (ROW_LABELS.contains(&row) && (1..=SEATS_PER_ROW).contains(&col)).then_some(Seat { row, col })
    }

    /// All 50 seats in row-major order.
    pub fn all() -> impl Iterator<Item = Seat> {
        ROW_LABELS
            .iter()
            .flat_map(|&row| (1..=SEATS_PER_ROW).map(move |col| Seat { row, col }))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

impl FromStr for Seat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let row = chars.next().ok_or_else(|| "empty seat id".to_string())?;
        let digits = chars.as_str();
        // Canonical spelling only: "A1", never "A01" or "A+1"
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid seat column in {s:?}"));
        }
        let col: u8 = digits
            .parse()
            .map_err(|_| format!("invalid seat column in {s:?}"))?;
        Seat::new(row, col).ok_or_else(|| format!("seat {s:?} is outside the hall"))
    }
}

/// Event details shown above the seat map.
#[derive(Debug, Clone)]
pub struct EventInfo {
    pub name: String,
    pub tagline: String,
    pub place: String,
    pub date: String,
    pub time: String,
}

impl Default for EventInfo {
    fn default() -> Self {
        Self {
            name: "The Grand Summit".to_string(),
            tagline: "A gathering of minds".to_string(),
            place: "Convocation Hall".to_string(),
            date: "March 25, 2025".to_string(),
            time: "5:00 PM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    Idle,
    SeatsLoaded,
    Selecting,
    BotCheckPending,
    ConfirmDialogOpen,
    PaymentPending,
    PaymentSucceeded,
    PaymentFailed,
}

/// Arguments for the payable `claim` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub receiver: Address,
    pub count: U256,
    pub seats: Vec<String>,
    pub value: U256,
}

/// Follow-up work the workflow asks its host to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEffect {
    RefreshBookedSeats,
}

/// Seat selection and purchase confirmation for one booking page.
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    state: BookingState,
    booked: HashSet<Seat>,
    selected: Vec<Seat>,
    token: Option<BotCheckToken>,
    seat_price: U256,
}

impl BookingWorkflow {
    pub fn new(seat_price: U256) -> Self {
        Self {
            state: BookingState::Idle,
            booked: HashSet::new(),
            selected: Vec::new(),
            token: None,
            seat_price,
        }
    }

    pub fn state(&self) -> BookingState {
        self.state
    }

    pub fn selected(&self) -> &[Seat] {
        &self.selected
    }

    pub fn is_booked(&self, seat: &Seat) -> bool {
        self.booked.contains(seat)
    }

    pub fn is_selected(&self, seat: &Seat) -> bool {
        self.selected.contains(seat)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_payment_pending(&self) -> bool {
        self.state == BookingState::PaymentPending
    }

    /// Apply a fresh booked-seats read. Ids outside the hall are ignored.
    pub fn seats_loaded(&mut self, booked: &[String]) {
        self.booked = booked
            .iter()
            .filter_map(|id| match id.parse::<Seat>() {
                Ok(seat) => Some(seat),
                Err(e) => {
                    tracing::debug!(%e, "ignoring booked seat id");
                    None
                }
            })
            .collect();
        let booked = &self.booked;
        self.selected.retain(|seat| !booked.contains(seat));
        if self.state == BookingState::Idle {
            self.state = BookingState::SeatsLoaded;
        }
    }

    /// Toggle a seat in the selection. Returns whether anything changed.
    pub fn toggle(&mut self, seat: Seat) -> bool {
        if self.is_booked(&seat) || self.is_payment_pending() {
            return false;
        }
        if let Some(pos) = self.selected.iter().position(|s| *s == seat) {
            self.selected.remove(pos);
        } else {
            self.selected.push(seat);
        }
        self.state = BookingState::Selecting;
        true
    }

    pub fn request_bot_check(&mut self) -> bool {
        if self.is_payment_pending() {
            return false;
        }
        self.state = BookingState::BotCheckPending;
        true
    }

    pub fn attach_token(&mut self, token: BotCheckToken) {
        tracing::debug!(token = %token.as_str(), "bot check token attached");
        self.token = Some(token);
        if self.state == BookingState::BotCheckPending {
            self.state = BookingState::Selecting;
        }
    }

    pub fn cancel_bot_check(&mut self) {
        if self.state == BookingState::BotCheckPending {
            self.state = BookingState::Selecting;
        }
    }

    /// The submit control is enabled only with seats selected and a bot-check token.
    pub fn can_submit(&self) -> bool {
        !self.selected.is_empty() && self.token.is_some() && !self.is_payment_pending()
    }

    pub fn open_confirm(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.state = BookingState::ConfirmDialogOpen;
        true
    }

    pub fn cancel_confirm(&mut self) {
        if self.state == BookingState::ConfirmDialogOpen {
            self.state = BookingState::Selecting;
        }
    }

    pub fn amount_due(&self) -> U256 {
        U256::from(self.selected.len()) * self.seat_price
    }

    /// Build the `claim` call for the current selection and enter `PaymentPending`.
    pub fn begin_payment(&mut self, session: &Session) -> Result<ClaimRequest, ContractCallError> {
        if self.state != BookingState::ConfirmDialogOpen || !self.can_submit() {
            return Err(ContractCallError::Precondition(
                "select seats and pass the bot check first".to_string(),
            ));
        }
        let receiver = session.account.ok_or_else(ContractCallError::no_account)?;
        let request = ClaimRequest {
            receiver,
            count: U256::from(self.selected.len()),
            seats: self.selected.iter().map(Seat::to_string).collect(),
            value: self.amount_due(),
        };
        self.state = BookingState::PaymentPending;
        Ok(request)
    }

    /// Settle the pending payment.
    pub fn finish_payment(&mut self, outcome: &Outcome) -> Option<BookingEffect> {
        if !self.is_payment_pending() {
            return None;
        }
        match outcome {
            Outcome::Pending => None,
            Outcome::Confirmed(_) => {
                self.selected.clear();
                self.state = BookingState::PaymentSucceeded;
                Some(BookingEffect::RefreshBookedSeats)
            }
            Outcome::Failed(_) => {
                self.state = BookingState::PaymentFailed;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::B256;
    use proptest::prelude::*;

    use super::*;
    use crate::data::gateway::ErrorKind;
    use crate::data::types::Receipt;

    const SEAT_PRICE: u64 = 5_000_000_000_000_000;

    fn seat(id: &str) -> Seat {
        id.parse().unwrap()
    }

    fn token() -> BotCheckToken {
        let check = crate::botcheck::BotCheck::new(Some("test-key".to_string()));
        let challenge = check.challenge(1).unwrap();
        check.verify(&challenge, &challenge.code.clone()).unwrap()
    }

    fn session() -> Session {
        Session::new(Some(Address::repeat_byte(0x11)), 11155111, "Sepolia")
    }

    fn loaded(booked: &[&str]) -> BookingWorkflow {
        let mut wf = BookingWorkflow::new(U256::from(SEAT_PRICE));
        let booked: Vec<String> = booked.iter().map(|s| s.to_string()).collect();
        wf.seats_loaded(&booked);
        wf
    }

    fn receipt() -> Outcome {
        Outcome::Confirmed(Receipt {
            tx_hash: B256::repeat_byte(0xab),
            block_number: Some(7),
        })
    }

    /// Walk a workflow with `seats` selected into PaymentPending.
    fn pending_with(seats: &[&str]) -> BookingWorkflow {
        let mut wf = loaded(&[]);
        for s in seats {
            wf.toggle(seat(s));
        }
        wf.attach_token(token());
        assert!(wf.open_confirm());
        wf.begin_payment(&session()).unwrap();
        wf
    }

    #[test]
    fn test_seat_universe() {
        let seats: Vec<Seat> = Seat::all().collect();
        assert_eq!(seats.len(), 50);
        assert_eq!(seats[0].to_string(), "A1");
        assert_eq!(seats[9].to_string(), "A10");
        assert_eq!(seats[10].to_string(), "B1");
        assert_eq!(seats[49].to_string(), "E10");
    }

    #[test]
    fn test_seat_parse_rejects_outside_hall() {
        assert!("F1".parse::<Seat>().is_err());
        assert!("A0".parse::<Seat>().is_err());
        assert!("A11".parse::<Seat>().is_err());
        assert!("".parse::<Seat>().is_err());
        assert!("AX".parse::<Seat>().is_err());
        assert!("A+1".parse::<Seat>().is_err());
        assert!("A01".parse::<Seat>().is_err());
        assert!("A-1".parse::<Seat>().is_err());
        assert_eq!(seat("c5"), seat("C5"));
    }

    #[test]
    fn test_initial_load_moves_to_seats_loaded() {
        let mut wf = BookingWorkflow::new(U256::from(SEAT_PRICE));
        assert_eq!(wf.state(), BookingState::Idle);
        wf.seats_loaded(&[]);
        assert_eq!(wf.state(), BookingState::SeatsLoaded);
    }

    #[test]
    fn test_booked_seat_scenario() {
        let mut wf = loaded(&["A1", "B3"]);

        assert!(!wf.toggle(seat("A1")));
        assert!(wf.selected().is_empty());

        assert!(wf.toggle(seat("C5")));
        assert_eq!(wf.selected(), &[seat("C5")]);
        assert!(!wf.can_submit());

        wf.attach_token(token());
        assert!(wf.can_submit());
        assert!(wf.open_confirm());
        assert_eq!(crate::utils::format_eth(wf.amount_due()), "0.005 ETH");

        let request = wf.begin_payment(&session()).unwrap();
        assert_eq!(request.seats, vec!["C5".to_string()]);
        assert_eq!(request.count, U256::from(1));
        assert_eq!(request.value, U256::from(SEAT_PRICE));
        assert_eq!(request.receiver, Address::repeat_byte(0x11));
    }

    #[test]
    fn test_submit_gate_all_combinations() {
        for (with_seat, with_token, expected) in [
            (false, false, false),
            (false, true, false),
            (true, false, false),
            (true, true, true),
        ] {
            let mut wf = loaded(&[]);
            if with_seat {
                wf.toggle(seat("D4"));
            }
            if with_token {
                wf.attach_token(token());
            }
            assert_eq!(wf.can_submit(), expected, "seat={with_seat} token={with_token}");
            assert_eq!(wf.open_confirm(), expected);
        }
    }

    #[test]
    fn test_selection_keeps_click_order() {
        let mut wf = loaded(&[]);
        wf.toggle(seat("E10"));
        wf.toggle(seat("A2"));
        wf.toggle(seat("C3"));
        let ids: Vec<String> = wf.selected().iter().map(Seat::to_string).collect();
        assert_eq!(ids, vec!["E10", "A2", "C3"]);
    }

    #[test]
    fn test_bot_check_round_trip_states() {
        let mut wf = loaded(&[]);
        wf.toggle(seat("A5"));
        assert!(wf.request_bot_check());
        assert_eq!(wf.state(), BookingState::BotCheckPending);
        wf.cancel_bot_check();
        assert_eq!(wf.state(), BookingState::Selecting);
        wf.request_bot_check();
        wf.attach_token(token());
        assert_eq!(wf.state(), BookingState::Selecting);
        assert!(wf.has_token());
    }

    #[test]
    fn test_cancel_confirm_returns_to_selecting() {
        let mut wf = loaded(&[]);
        wf.toggle(seat("A5"));
        wf.attach_token(token());
        wf.open_confirm();
        wf.cancel_confirm();
        assert_eq!(wf.state(), BookingState::Selecting);
        assert_eq!(wf.selected().len(), 1);
    }

    #[test]
    fn test_payment_requires_account() {
        let mut wf = loaded(&[]);
        wf.toggle(seat("A5"));
        wf.attach_token(token());
        wf.open_confirm();
        let no_wallet = Session::new(None, 1, "Ethereum");
        let err = wf.begin_payment(&no_wallet).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(wf.state(), BookingState::ConfirmDialogOpen);
    }

    #[test]
    fn test_payment_requires_open_dialog() {
        let mut wf = loaded(&[]);
        wf.toggle(seat("A5"));
        wf.attach_token(token());
        assert!(wf.begin_payment(&session()).is_err());
    }

    #[test]
    fn test_success_clears_selection_and_refreshes_once() {
        let mut wf = pending_with(&["A1", "A2"]);
        assert_eq!(wf.finish_payment(&receipt()), Some(BookingEffect::RefreshBookedSeats));
        assert!(wf.selected().is_empty());
        assert_eq!(wf.state(), BookingState::PaymentSucceeded);
        // A duplicate settlement must not trigger a second refresh.
        assert_eq!(wf.finish_payment(&receipt()), None);
    }

    #[test]
    fn test_failure_preserves_selection() {
        for kind in [ErrorKind::Network, ErrorKind::Revert, ErrorKind::Decode] {
            let mut wf = pending_with(&["B2", "B3"]);
            let before = wf.selected().to_vec();
            assert_eq!(wf.finish_payment(&Outcome::Failed(kind)), None);
            assert_eq!(wf.selected(), before.as_slice());
            assert_eq!(wf.state(), BookingState::PaymentFailed);
            assert!(wf.can_submit());
        }
    }

    #[test]
    fn test_no_toggle_or_resubmit_while_pending() {
        let mut wf = pending_with(&["C1"]);
        assert!(!wf.toggle(seat("C2")));
        assert!(!wf.can_submit());
        assert!(!wf.open_confirm());
        assert_eq!(wf.finish_payment(&Outcome::Pending), None);
        assert!(wf.is_payment_pending());
    }

    #[test]
    fn test_reload_prunes_newly_booked_selection() {
        let mut wf = loaded(&[]);
        wf.toggle(seat("A1"));
        wf.toggle(seat("A2"));
        wf.seats_loaded(&["A1".to_string()]);
        assert_eq!(wf.selected(), &[seat("A2")]);
        assert!(!wf.toggle(seat("A1")));
    }

    #[test]
    fn test_reload_ignores_unknown_ids() {
        let wf = loaded(&["Z9", "A3", ""]);
        assert!(wf.is_booked(&seat("A3")));
        assert_eq!(Seat::all().filter(|s| wf.is_booked(s)).count(), 1);
    }

    fn any_seat() -> impl Strategy<Value = Seat> {
        (0usize..50).prop_map(|i| Seat::all().nth(i).unwrap())
    }

    proptest! {
        #[test]
        fn prop_booked_seats_never_toggle(booked in proptest::collection::vec(any_seat(), 0..20), clicks in proptest::collection::vec(any_seat(), 0..40)) {
            let ids: Vec<String> = booked.iter().map(Seat::to_string).collect();
            let mut wf = BookingWorkflow::new(U256::from(SEAT_PRICE));
            wf.seats_loaded(&ids);
            for s in clicks {
                let changed = wf.toggle(s);
                prop_assert_eq!(changed, !booked.contains(&s));
            }
            for s in &booked {
                prop_assert!(!wf.is_selected(s));
            }
        }

        #[test]
        fn prop_double_toggle_restores_selection(pre in proptest::collection::vec(any_seat(), 0..10), target in any_seat()) {
            let mut wf = BookingWorkflow::new(U256::from(SEAT_PRICE));
            wf.seats_loaded(&[]);
            for s in pre {
                wf.toggle(s);
            }
            let before: HashSet<Seat> = wf.selected().iter().copied().collect();
            wf.toggle(target);
            wf.toggle(target);
            let after: HashSet<Seat> = wf.selected().iter().copied().collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_amount_is_count_times_price(seats in proptest::collection::hash_set(any_seat(), 0..20)) {
            let mut wf = BookingWorkflow::new(U256::from(SEAT_PRICE));
            wf.seats_loaded(&[]);
            for s in &seats {
                wf.toggle(*s);
            }
            prop_assert_eq!(wf.amount_due(), U256::from(seats.len() as u64 * SEAT_PRICE));
        }
    }
}
