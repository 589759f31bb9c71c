use std::future::Future;

use alloy::primitives::{Address, U256};
use alloy::transports::TransportError;
use thiserror::Error;

use crate::data::types::Receipt;

/// Coarse failure classes for a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Revert,
    Decode,
    Precondition,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractCallError {
    #[error("rpc transport error: {0}")]
    Network(String),

    #[error("contract reverted: {0}")]
    Revert(String),

    #[error("could not decode contract response: {0}")]
    Decode(String),

    #[error("precondition not met: {0}")]
    Precondition(String),
}

impl ContractCallError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractCallError::Network(_) => ErrorKind::Network,
            ContractCallError::Revert(_) => ErrorKind::Revert,
            ContractCallError::Decode(_) => ErrorKind::Decode,
            ContractCallError::Precondition(_) => ErrorKind::Precondition,
        }
    }

    pub fn no_account() -> Self {
        ContractCallError::Precondition("no wallet connected".to_string())
    }
}

impl From<TransportError> for ContractCallError {
    fn from(err: TransportError) -> Self {
        // Nodes report reverts as JSON-RPC error responses ("execution reverted: ...").
        if let Some(payload) = err.as_error_resp() {
            if payload.message.to_ascii_lowercase().contains("revert") {
                return ContractCallError::Revert(payload.message.to_string());
            }
        }
        ContractCallError::Network(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for ContractCallError {
    fn from(err: alloy::sol_types::Error) -> Self {
        ContractCallError::Decode(err.to_string())
    }
}

pub type CallResult<T> = Result<T, ContractCallError>;

/// Typed access to the deployed ticketing contract.
///
/// Reads are side-effect free. Writes are awaited to inclusion and are not retried.
pub trait ContractGateway: Send + Sync + 'static {
    /// Address of the connected account, if any.
    fn account(&self) -> Option<Address>;

    fn booked_seats(&self) -> impl Future<Output = CallResult<Vec<String>>> + Send;

    fn nfts_by_owner(&self, owner: Address) -> impl Future<Output = CallResult<Vec<String>>> + Send;

    fn seats_on_sale(&self) -> impl Future<Output = CallResult<Vec<String>>> + Send;

    fn claim(
        &self,
        receiver: Address,
        count: U256,
        seats: Vec<String>,
        value: U256,
    ) -> impl Future<Output = CallResult<Receipt>> + Send;

    fn buy_seat(&self, seat_id: String, value: U256) -> impl Future<Output = CallResult<Receipt>> + Send;

    fn list_seat_for_sale(
        &self,
        seat_id: String,
        price: U256,
    ) -> impl Future<Output = CallResult<Receipt>> + Send;
}
