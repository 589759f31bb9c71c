use crate::data::types::ChainConfig;

/// Get a chain configuration preset by name.
pub fn get_chain_config(name: &str) -> Option<ChainConfig> {
    let (name, chain_id, rpc_url, symbol) = match name.to_lowercase().as_str() {
        "ethereum" | "eth" | "mainnet" => ("Ethereum", 1, "https://eth.merkle.io", "ETH"),
        "sepolia" => (
            "Sepolia",
            11155111,
            "https://ethereum-sepolia-rpc.publicnode.com",
            "ETH",
        ),
        "base" => ("Base", 8453, "https://mainnet.base.org", "ETH"),
        "base-sepolia" => ("Base Sepolia", 84532, "https://sepolia.base.org", "ETH"),
        "polygon" | "matic" => ("Polygon", 137, "https://polygon-rpc.com", "POL"),
        _ => return None,
    };
    Some(ChainConfig {
        name: name.to_string(),
        chain_id,
        rpc_url: rpc_url.to_string(),
        symbol: symbol.to_string(),
    })
}

/// Display name for a chain id reported by the node.
pub fn chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum",
        11155111 => "Sepolia",
        8453 => "Base",
        84532 => "Base Sepolia",
        137 => "Polygon",
        31337 => "Anvil",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethereum_aliases() {
        for name in ["ethereum", "eth", "mainnet", "Ethereum"] {
            assert_eq!(get_chain_config(name).unwrap().chain_id, 1);
        }
    }

    #[test]
    fn test_sepolia_config() {
        let config = get_chain_config("sepolia").unwrap();
        assert_eq!(config.chain_id, 11155111);
        assert_eq!(config.symbol, "ETH");
    }

    #[test]
    fn test_base_sepolia_config() {
        let config = get_chain_config("base-sepolia").unwrap();
        assert_eq!(config.chain_id, 84532);
        assert_eq!(config.rpc_url, "https://sepolia.base.org");
    }

    #[test]
    fn test_polygon_symbol() {
        assert_eq!(get_chain_config("matic").unwrap().symbol, "POL");
    }

    #[test]
    fn test_unknown_chain() {
        assert!(get_chain_config("unknown").is_none());
        assert_eq!(chain_name(999), "Unknown");
    }

    #[test]
    fn test_chain_name_matches_presets() {
        for preset in ["ethereum", "sepolia", "base", "base-sepolia", "polygon"] {
            let config = get_chain_config(preset).unwrap();
            assert_eq!(chain_name(config.chain_id), config.name);
        }
    }
}
