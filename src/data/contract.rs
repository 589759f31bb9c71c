use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::data::gateway::{CallResult, ContractCallError, ContractGateway};
use crate::data::provider::ChainProvider;
use crate::data::types::Receipt;

// Ticketing contract surface used by the client
sol! {
    #[allow(missing_docs)]
    #[derive(Debug)]
    interface ITicketify {
        function getBookedSeats() external view returns (string[] memory);
        function getNFTsByOwner(address owner) external view returns (string[] memory);
        function listSeatsOnSale() external view returns (string[] memory);
        function claim(address receiver, uint256 quantity, string[] calldata seats) external payable;
        function buySeat(string calldata seatId) external payable;
        function listSeatForSale(string calldata seatId, uint256 price) external;
    }
}

/// The deployed ticketing contract, reached through a [`ChainProvider`].
pub struct TicketContract {
    provider: ChainProvider,
    address: Address,
}

impl TicketContract {
    pub fn new(provider: ChainProvider, address: Address) -> Self {
        Self { provider, address }
    }

    fn request<C: SolCall>(&self, call: &C) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(call.abi_encode()).into());
        match self.provider.account() {
            Some(from) => tx.from(from),
            None => tx,
        }
    }

    async fn read<C: SolCall>(&self, call: C) -> CallResult<C::Return> {
        let data = self.provider.call(self.request(&call)).await?;
        Ok(C::abi_decode_returns(&data, true)?)
    }

    async fn write<C: SolCall>(&self, call: C, value: U256) -> CallResult<Receipt> {
        if self.provider.account().is_none() {
            return Err(ContractCallError::no_account());
        }
        let tx = self.request(&call).value(value);
        let receipt = self.provider.send_and_confirm(tx).await?;
        if !receipt.status() {
            return Err(ContractCallError::Revert(format!(
                "{} reverted in transaction {}",
                C::SIGNATURE,
                receipt.transaction_hash
            )));
        }
        tracing::info!(
            method = C::SIGNATURE,
            tx_hash = %receipt.transaction_hash,
            block = ?receipt.block_number,
            "transaction confirmed"
        );
        Ok(Receipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

impl ContractGateway for TicketContract {
    fn account(&self) -> Option<Address> {
        self.provider.account()
    }

    async fn booked_seats(&self) -> CallResult<Vec<String>> {
        Ok(self.read(ITicketify::getBookedSeatsCall {}).await?._0)
    }

    async fn nfts_by_owner(&self, owner: Address) -> CallResult<Vec<String>> {
        Ok(self.read(ITicketify::getNFTsByOwnerCall { owner }).await?._0)
    }

    async fn seats_on_sale(&self) -> CallResult<Vec<String>> {
        Ok(self.read(ITicketify::listSeatsOnSaleCall {}).await?._0)
    }

    async fn claim(
        &self,
        receiver: Address,
        count: U256,
        seats: Vec<String>,
        value: U256,
    ) -> CallResult<Receipt> {
        let call = ITicketify::claimCall {
            receiver,
            quantity: count,
            seats,
        };
        self.write(call, value).await
    }

    async fn buy_seat(&self, seat_id: String, value: U256) -> CallResult<Receipt> {
        self.write(ITicketify::buySeatCall { seatId: seat_id }, value)
            .await
    }

    async fn list_seat_for_sale(&self, seat_id: String, price: U256) -> CallResult<Receipt> {
        let call = ITicketify::listSeatForSaleCall {
            seatId: seat_id,
            price,
        };
        self.write(call, U256::ZERO).await
    }
}
