use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportResult;
use color_eyre::eyre::Result;

use crate::data::gateway::ContractCallError;

/// HTTP provider, wallet-filled when a signing key is configured.
pub struct ChainProvider {
    provider: Box<dyn Provider + Send + Sync>,
    chain_id: u64,
    account: Option<Address>,
}

impl ChainProvider {
    pub async fn connect(rpc_url: &str, signer: Option<PrivateKeySigner>) -> Result<Self> {
        let url = rpc_url.parse()?;
        let account = signer.as_ref().map(|s| s.address());
        let provider: Box<dyn Provider + Send + Sync> = match signer {
            Some(signer) => Box::new(
                ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .on_http(url),
            ),
            None => Box::new(ProviderBuilder::new().on_http(url)),
        };
        let chain_id = provider.get_chain_id().await?;
        Ok(Self {
            provider,
            chain_id,
            account,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    /// `eth_call` against the latest block.
    pub async fn call(&self, tx: TransactionRequest) -> TransportResult<Bytes> {
        self.provider.call(tx).await
    }

    /// Submit a transaction and wait until it is included.
    ///
    /// Gas estimation runs on submission, so most reverts surface from `send_transaction`.
    pub async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, ContractCallError> {
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::debug!(%tx_hash, "transaction submitted");
        pending
            .get_receipt()
            .await
            .map_err(|e| ContractCallError::Network(format!("awaiting {tx_hash}: {e}")))
    }
}
