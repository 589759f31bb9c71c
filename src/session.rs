use alloy::primitives::Address;

/// Connection facts shared by every view, derived once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account: Option<Address>,
    pub chain_id: u64,
    pub chain_name: String,
    pub symbol: String,
}

impl Session {
    pub fn new(account: Option<Address>, chain_id: u64, chain_name: impl Into<String>) -> Self {
        Self {
            account,
            chain_id,
            chain_name: chain_name.into(),
            symbol: "ETH".to_string(),
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}
