use std::path::PathBuf;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ticketify", about = "Book, resell and buy event tickets from the terminal")]
pub struct Config {
    /// RPC endpoint URL (overrides the chain preset's public endpoint)
    #[arg(short, long, env = "TICKETIFY_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Chain preset (ethereum, sepolia, base, base-sepolia, polygon)
    #[arg(long, default_value = "sepolia")]
    pub chain: String,

    /// Address of the deployed ticketing contract
    #[arg(short, long, env = "TICKETIFY_CONTRACT")]
    pub contract: Address,

    /// Hex private key of the wallet used to sign purchases and listings
    #[arg(long, env = "TICKETIFY_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Site key for the bot check; without it seat submission stays disabled
    #[arg(long, env = "TICKETIFY_BOTCHECK_SITE_KEY")]
    pub bot_check_site_key: Option<String>,

    /// Price of one seat in ETH
    #[arg(long, default_value = "0.005", value_parser = parse_eth_amount)]
    pub seat_price: U256,

    /// Page to open on start
    #[arg(long, default_value = "/dashboard")]
    pub route: String,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,

    /// Log file (defaults to the user cache directory)
    #[arg(long, env = "TICKETIFY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve where logs go: explicit flag, else `<cache>/ticketify/ticketify.log`.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("ticketify")
                .join("ticketify.log")
        })
    }
}

fn parse_eth_amount(s: &str) -> Result<U256, String> {
    parse_ether(s).map_err(|e| format!("invalid ETH amount {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["ticketify", "--contract", CONTRACT]).unwrap();
        assert_eq!(config.chain, "sepolia");
        assert_eq!(config.route, "/dashboard");
        assert_eq!(config.seat_price, U256::from(5_000_000_000_000_000u64));
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_seat_price_parses_ether() {
        let config = Config::try_parse_from([
            "ticketify",
            "--contract",
            CONTRACT,
            "--seat-price",
            "0.01",
        ])
        .unwrap();
        assert_eq!(config.seat_price, U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_rejects_bad_contract_and_price() {
        assert!(Config::try_parse_from(["ticketify", "--contract", "0x1234"]).is_err());
        assert!(
            Config::try_parse_from(["ticketify", "--contract", CONTRACT, "--seat-price", "abc"])
                .is_err()
        );
    }

    #[test]
    fn test_explicit_log_path() {
        let config = Config::try_parse_from([
            "ticketify",
            "--contract",
            CONTRACT,
            "--log-file",
            "/tmp/t.log",
        ])
        .unwrap();
        assert_eq!(config.log_path(), PathBuf::from("/tmp/t.log"));
    }
}
