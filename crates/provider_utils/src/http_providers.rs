use anyhow::{anyhow, Error};
use ethers::providers::{Http, Middleware, Provider};

use crate::{
    constants::{DESERIALIZATION_ERROR_MSG, DNS_LOOKUP_ERROR_MSG},
    enums::ENetwork,
    networks::NETWORKS,
};

pub struct HttpProviders;

impl HttpProviders {
    /// Providers for `network`, in priority order. A non-empty `rpc_override`
    /// replaces the static rpc list.
    pub fn get_providers(
        network: &ENetwork,
        rpc_override: Option<&str>,
    ) -> anyhow::Result<Vec<Provider<Http>>> {
        let urls: Vec<String> = match rpc_override {
            Some(url) if !url.trim().is_empty() => vec![url.trim().to_string()],
            _ => {
                let Some(network_config) = NETWORKS.get(network) else {
                    return Err(anyhow!("NETWORKS {:?} not found", network));
                };
                network_config.rpc_url.clone()
            }
        };

        let mut providers = Vec::new();
        for url in urls {
            let provider = Provider::<Http>::try_from(url.as_str())
                .map_err(|err| anyhow!("invalid rpc url {:?}: {}", url, err))?;
            providers.push(provider);
        }

        Ok(providers)
    }

    /// First provider able to answer `eth_blockNumber`. Unreachable hosts are
    /// skipped; any other node error is returned as-is.
    pub async fn get_healthy_provider(
        network: &ENetwork,
        rpc_override: Option<&str>,
    ) -> anyhow::Result<Provider<Http>, Error> {
        let providers = Self::get_providers(network, rpc_override)?;

        for provider in providers {
            match provider.get_block_number().await {
                Ok(_) => {
                    return Ok(provider);
                }
                Err(err) => {
                    if Self::is_unavailable_error(&err.to_string()) {
                        log::info!("Provider {:?} is unavailable !!", provider.url().host());
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }

        Err(anyhow!("All providers failed to retrieve the block number"))
    }

    pub fn is_unavailable_error(err_string: &str) -> bool {
        err_string.contains(DNS_LOOKUP_ERROR_MSG)
            || err_string.contains(DESERIALIZATION_ERROR_MSG)
            || err_string.contains("error sending request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_override_replaces_network_list() {
        let providers =
            HttpProviders::get_providers(&ENetwork::BaseMainnet, Some("http://127.0.0.1:8545"))
                .unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].url().as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn blank_override_falls_back_to_network_list() {
        let providers = HttpProviders::get_providers(&ENetwork::BaseMainnet, Some("  ")).unwrap();
        assert_eq!(
            providers.len(),
            NETWORKS.get(&ENetwork::BaseMainnet).unwrap().rpc_url.len()
        );
    }

    #[test]
    fn rejects_malformed_rpc_url() {
        assert!(HttpProviders::get_providers(&ENetwork::BaseSepolia, Some("not a url")).is_err());
    }

    #[test]
    fn classifies_unreachable_hosts() {
        assert!(HttpProviders::is_unavailable_error(DESERIALIZATION_ERROR_MSG));
        assert!(!HttpProviders::is_unavailable_error("execution reverted"));
    }

    #[tokio::test]
    async fn healthy_provider_fails_when_nothing_answers() {
        let result =
            HttpProviders::get_healthy_provider(&ENetwork::BaseMainnet, Some("http://127.0.0.1:1"))
                .await;
        assert!(result.is_err());
    }
}
