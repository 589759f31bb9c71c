use alloy::primitives::U256;

use crate::booking::ClaimRequest;
use crate::data::types::{Record, TxAction};
use crate::notify::Outcome;
use crate::routes;

/// Pages the user can navigate to, one per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Booking,
    Marketplace,
    MyTickets,
    SellTicket,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Booking => routes::BOOKING,
            View::Marketplace => routes::MARKETPLACE,
            View::MyTickets => routes::MY_TICKETS,
            View::SellTicket => routes::SELL_TICKET,
        }
    }

    /// Resolve a path exactly as the navigation shell does.
    pub fn from_path(path: &str) -> Option<View> {
        match routes::Route::find(path.trim())?.path {
            routes::BOOKING => Some(View::Booking),
            routes::MARKETPLACE => Some(View::Marketplace),
            routes::MY_TICKETS => Some(View::MyTickets),
            routes::SELL_TICKET => Some(View::SellTicket),
            _ => None,
        }
    }
}

/// A write the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    Claim(ClaimRequest),
    Buy { seat_id: String, price: U256 },
    List { seat_id: String, price: U256 },
}

impl WriteRequest {
    pub fn action(&self) -> TxAction {
        match self {
            WriteRequest::Claim(_) => TxAction::Claim,
            WriteRequest::Buy { .. } => TxAction::Buy,
            WriteRequest::List { .. } => TxAction::List,
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    // Reads
    BookedSeatsLoaded {
        generation: u64,
        seats: Vec<String>,
    },
    BookedSeatsFailed {
        generation: u64,
        error: String,
    },
    RecordsLoaded {
        view: View,
        generation: u64,
        records: Vec<Record>,
    },
    RecordsFailed {
        view: View,
        generation: u64,
        error: String,
    },

    // Writes
    Submit {
        view: View,
        request: WriteRequest,
    },
    /// A write was attempted without its precondition (wallet) being met.
    PreconditionFailed(TxAction),
    TxSettled {
        view: View,
        action: TxAction,
        notification: u64,
        outcome: Outcome,
    },

    // Navigation
    Navigate(View),

    // Status
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_paths_round_trip() {
        for view in [View::Booking, View::Marketplace, View::MyTickets, View::SellTicket] {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }

    #[test]
    fn test_from_path_trims_whitespace_only() {
        assert_eq!(View::from_path("  /dashboard/sellticket "), Some(View::SellTicket));
        assert_eq!(View::from_path("/dashboard/sell"), None);
        assert_eq!(View::from_path(""), None);
    }

    #[test]
    fn test_write_request_actions() {
        let buy = WriteRequest::Buy {
            seat_id: "A1".into(),
            price: U256::from(1),
        };
        let list = WriteRequest::List {
            seat_id: "A1".into(),
            price: U256::from(1),
        };
        assert_eq!(buy.action(), TxAction::Buy);
        assert_eq!(list.action(), TxAction::List);
    }
}
