pub mod chains;
pub mod contract;
pub mod gateway;
pub mod provider;
pub mod records;
pub mod types;

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::mpsc;

use crate::data::gateway::{CallResult, ContractGateway};
use crate::data::types::Receipt;
use crate::events::{AppEvent, View, WriteRequest};
use crate::notify::Outcome;

/// Runs contract calls in background tasks and reports results as [`AppEvent`]s.
pub struct TicketService<G> {
    gateway: Arc<G>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl<G: ContractGateway> TicketService<G> {
    pub fn new(gateway: G, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            gateway: Arc::new(gateway),
            event_tx,
        }
    }

    #[cfg(test)]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Read the booked seats for the booking page.
    pub fn fetch_booked_seats(&self, generation: u64) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match gateway.booked_seats().await {
                Ok(seats) => {
                    tracing::debug!(count = seats.len(), "booked seats loaded");
                    let _ = tx.send(AppEvent::BookedSeatsLoaded { generation, seats });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch booked seats");
                    let _ = tx.send(AppEvent::BookedSeatsFailed {
                        generation,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Read the tickets held by `owner` for `view`.
    pub fn fetch_owned_tickets(&self, view: View, generation: u64, owner: Address) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = gateway.nfts_by_owner(owner).await;
            Self::send_records(&tx, view, generation, result);
        });
    }

    /// Read the marketplace listings.
    pub fn fetch_listings(&self, generation: u64) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = gateway.seats_on_sale().await;
            Self::send_records(&tx, View::Marketplace, generation, result);
        });
    }

    fn send_records(
        tx: &mpsc::UnboundedSender<AppEvent>,
        view: View,
        generation: u64,
        result: CallResult<Vec<String>>,
    ) {
        let event = match result {
            Ok(raw) => AppEvent::RecordsLoaded {
                view,
                generation,
                records: records::decode_all(raw),
            },
            Err(e) => {
                tracing::warn!(?view, error = %e, "failed to fetch tickets");
                AppEvent::RecordsFailed {
                    view,
                    generation,
                    error: e.to_string(),
                }
            }
        };
        let _ = tx.send(event);
    }

    /// Submit a write and report its settlement against `notification`.
    pub fn submit(&self, view: View, request: WriteRequest, notification: u64) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();
        let action = request.action();

        tokio::spawn(async move {
            let result: CallResult<Receipt> = match request {
                WriteRequest::Claim(claim) => {
                    gateway
                        .claim(claim.receiver, claim.count, claim.seats, claim.value)
                        .await
                }
                WriteRequest::Buy { seat_id, price } => gateway.buy_seat(seat_id, price).await,
                WriteRequest::List { seat_id, price } => {
                    gateway.list_seat_for_sale(seat_id, price).await
                }
            };
            let outcome = match result {
                Ok(receipt) => Outcome::Confirmed(receipt),
                Err(e) => {
                    tracing::warn!(%action, error = %e, "transaction failed");
                    Outcome::Failed(e.kind())
                }
            };
            let _ = tx.send(AppEvent::TxSettled {
                view,
                action,
                notification,
                outcome,
            });
        });
    }
}
