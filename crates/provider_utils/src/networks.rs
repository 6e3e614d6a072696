use ethers::prelude::Lazy;
use std::collections::HashMap;

use crate::enums::ENetwork;

#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    pub network: ENetwork,
    pub chain_id: u64,
    pub rpc_url: Vec<String>,
    /// Block explorer base url, without trailing slash
    pub explorer_url: String,
}

impl NetworkConfig {
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }
}

pub static NETWORKS: Lazy<HashMap<ENetwork, NetworkConfig>> = Lazy::new(|| {
    HashMap::from([
        (
            ENetwork::BaseMainnet,
            NetworkConfig {
                network: ENetwork::BaseMainnet,
                chain_id: 8453,
                rpc_url: vec![
                    "https://mainnet.base.org".to_string(),
                    "https://base-rpc.publicnode.com".to_string(),
                ],
                explorer_url: "https://basescan.org".to_string(),
            },
        ),
        (
            ENetwork::BaseSepolia,
            NetworkConfig {
                network: ENetwork::BaseSepolia,
                chain_id: 84532,
                rpc_url: vec![
                    "https://sepolia.base.org".to_string(),
                    "https://base-sepolia-rpc.publicnode.com".to_string(),
                ],
                explorer_url: "https://sepolia.basescan.org".to_string(),
            },
        ),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_network_is_configured() {
        for network in [ENetwork::BaseMainnet, ENetwork::BaseSepolia] {
            let config = NETWORKS.get(&network).unwrap();
            assert_eq!(config.network, network);
            assert!(!config.rpc_url.is_empty());
            assert!(!config.explorer_url.ends_with('/'));
        }
    }

    #[test]
    fn builds_explorer_links() {
        let base = NETWORKS.get(&ENetwork::BaseMainnet).unwrap();
        assert_eq!(base.chain_id, 8453);
        assert_eq!(base.tx_url("0xabc"), "https://basescan.org/tx/0xabc");
        assert_eq!(
            base.address_url("0xdef"),
            "https://basescan.org/address/0xdef"
        );
    }
}
