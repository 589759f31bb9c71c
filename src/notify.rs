use std::time::{Duration, Instant};

use crate::data::gateway::ErrorKind;
use crate::data::types::{Receipt, TxAction};
use crate::utils;

/// How long a terminal notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Lifecycle of a submitted write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Confirmed(Receipt),
    Failed(ErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Info,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: Variant,
    pub shown_at: String,
    /// `None` for notifications that stay until dismissed or resolved.
    pub expires_at: Option<Instant>,
}

/// Ephemeral status messages, newest last.
#[derive(Debug, Default)]
pub struct NotificationSink {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        variant: Variant,
        ttl: Option<Duration>,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            title: title.into(),
            description: description.into(),
            variant,
            shown_at: chrono::Local::now().format("%H:%M:%S").to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        });
        id
    }

    /// Show the in-progress notification for a write; it stays until resolved.
    pub fn pending(&mut self, action: TxAction) -> u64 {
        tracing::info!(%action, "transaction pending");
        self.push(
            "Transaction in progress",
            "Please wait while your transaction is being processed...",
            Variant::Info,
            None,
        )
    }

    /// Replace the pending notification `id` with the terminal message for `outcome`.
    pub fn resolve(&mut self, id: u64, action: TxAction, outcome: &Outcome) {
        self.dismiss(id);
        match outcome {
            Outcome::Pending => {}
            Outcome::Confirmed(receipt) => {
                let mut description = format!(
                    "{} (tx {}",
                    success_message(action),
                    utils::truncate_hash(&receipt.tx_hash)
                );
                if let Some(block) = receipt.block_number {
                    description.push_str(&format!(", block {block}"));
                }
                description.push(')');
                self.push(
                    "Transaction Successful",
                    description,
                    Variant::Success,
                    Some(NOTIFICATION_TTL),
                );
            }
            Outcome::Failed(kind) => self.failure(action, *kind),
        }
    }

    /// Terminal failure message. Only missing preconditions get their own wording.
    pub fn failure(&mut self, action: TxAction, kind: ErrorKind) {
        let (title, description) = match kind {
            ErrorKind::Precondition => ("Connect Wallet", "Please connect your wallet to proceed."),
            _ => ("Transaction Failed", failure_message(action)),
        };
        self.push(title, description, Variant::Destructive, Some(NOTIFICATION_TTL));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Dismiss the newest notification that is not a pending transaction.
    pub fn dismiss_latest(&mut self) -> bool {
        match self.items.iter().rposition(|n| n.expires_at.is_some()) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|n| n.expires_at.is_none_or(|deadline| deadline > now));
    }

    pub fn visible(&self) -> &[Notification] {
        &self.items
    }
}

fn success_message(action: TxAction) -> &'static str {
    match action {
        TxAction::Claim => "Your ticket has been booked successfully!",
        TxAction::Buy => "Ticket purchased!",
        TxAction::List => "Your ticket is listed for sale.",
    }
}

fn failure_message(action: TxAction) -> &'static str {
    match action {
        TxAction::Claim => "Something went wrong. Please try again.",
        TxAction::Buy => "Could not purchase the ticket.",
        TxAction::List => "Could not list the ticket for sale.",
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::B256;

    use super::*;

    fn confirmed() -> Outcome {
        Outcome::Confirmed(Receipt {
            tx_hash: B256::repeat_byte(0x42),
            block_number: Some(1),
        })
    }

    #[test]
    fn test_pending_never_expires() {
        let mut sink = NotificationSink::new();
        let id = sink.pending(TxAction::Claim);
        sink.prune(Instant::now() + Duration::from_secs(3600));
        assert_eq!(sink.visible().len(), 1);
        assert_eq!(sink.visible()[0].id, id);
        assert_eq!(sink.visible()[0].title, "Transaction in progress");
    }

    #[test]
    fn test_resolve_confirmed_replaces_pending() {
        let mut sink = NotificationSink::new();
        let id = sink.pending(TxAction::Claim);
        sink.resolve(id, TxAction::Claim, &confirmed());
        let items = sink.visible();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Transaction Successful");
        assert_eq!(items[0].variant, Variant::Success);
        assert!(items[0].description.starts_with("Your ticket has been booked successfully!"));
    }

    #[test]
    fn test_resolve_failed_is_destructive() {
        let mut sink = NotificationSink::new();
        let id = sink.pending(TxAction::List);
        sink.resolve(id, TxAction::List, &Outcome::Failed(ErrorKind::Revert));
        let items = sink.visible();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Transaction Failed");
        assert_eq!(items[0].description, "Could not list the ticket for sale.");
        assert_eq!(items[0].variant, Variant::Destructive);
    }

    #[test]
    fn test_network_and_decode_share_wording() {
        let mut sink = NotificationSink::new();
        sink.failure(TxAction::Buy, ErrorKind::Network);
        sink.failure(TxAction::Buy, ErrorKind::Decode);
        let items = sink.visible();
        assert_eq!(items[0].description, items[1].description);
    }

    #[test]
    fn test_precondition_asks_for_wallet() {
        let mut sink = NotificationSink::new();
        sink.failure(TxAction::Buy, ErrorKind::Precondition);
        assert_eq!(sink.visible()[0].title, "Connect Wallet");
    }

    #[test]
    fn test_terminal_notifications_expire() {
        let mut sink = NotificationSink::new();
        sink.failure(TxAction::Claim, ErrorKind::Network);
        sink.prune(Instant::now());
        assert_eq!(sink.visible().len(), 1);
        sink.prune(Instant::now() + NOTIFICATION_TTL + Duration::from_millis(1));
        assert!(sink.visible().is_empty());
    }

    #[test]
    fn test_dismiss_latest_skips_pending() {
        let mut sink = NotificationSink::new();
        let pending = sink.pending(TxAction::Buy);
        assert!(!sink.dismiss_latest());
        sink.failure(TxAction::List, ErrorKind::Network);
        assert!(sink.dismiss_latest());
        assert_eq!(sink.visible().len(), 1);
        assert_eq!(sink.visible()[0].id, pending);
    }
}
