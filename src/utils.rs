use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, B256, U256};

/// Truncate a B256 hash to "0xabcd...ef12" format
pub fn truncate_hash(hash: &B256) -> String {
    truncate_hex(format!("{hash}"))
}

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    truncate_hex(format!("{addr}"))
}

fn truncate_hex(s: String) -> String {
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Format a U256 wei value as ETH, trailing zeros trimmed
pub fn format_eth(wei: U256) -> String {
    let ether = format_ether(wei);
    let trimmed = match ether.split_once('.') {
        Some((whole, frac)) => match frac.trim_end_matches('0') {
            "" => whole.to_string(),
            frac => format!("{whole}.{frac}"),
        },
        None => ether,
    };
    format!("{trimmed} ETH")
}

/// Format wei as ETH with exactly `places` fractional digits (truncating).
pub fn format_eth_fixed(wei: U256, places: usize) -> String {
    let ether = format_ether(wei);
    let (whole, frac) = ether.split_once('.').unwrap_or((ether.as_str(), ""));
    if places == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0<places$}");
    format!("{whole}.{}", &frac[..places])
}
