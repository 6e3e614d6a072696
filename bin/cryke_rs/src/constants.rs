use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use cryke_utils::{
    constants::{CRYKE_LAUNCH_API_URL, FEE_LOCKERS, WRAPPED_NATIVE_TOKENS},
    env::{get_env, get_optional_env},
    utils::load_private_key_wallet,
};
use ethers::{
    signers::{LocalWallet, Signer},
    types::Address,
};
use provider_utils::{
    enums::ENetwork,
    networks::{NetworkConfig, NETWORKS},
};
use url::Url;

use crate::errors::CrykeError;

pub const WALLETS_DIR_NAME: &str = "wallets";

/// Process configuration. Read once from the environment by [`Env::new`] and
/// handed to the services, so nothing below the binaries touches env vars.
#[derive(Clone)]
pub struct Env {
    pub listen_network: ENetwork,
    pub network_config: NetworkConfig,
    /// Replaces the network's rpc list when set
    pub rpc_url: Option<String>,
    pub fee_locker_address: Option<Address>,
    pub weth_address: Address,
    pub signer_secret: Option<String>,
    pub launch_api_url: Url,
    pub cryke_home: PathBuf,
    pub moltx_api_key: Option<String>,
    pub moltbook_api_key: Option<String>,
    pub fourclaw_api_key: Option<String>,
    /// Bound on waiting for a claim receipt; `None` waits forever
    pub confirmation_timeout: Option<Duration>,
}

impl Env {
    pub fn new() -> Result<Self, CrykeError> {
        let network_str = get_env("LISTEN_NETWORK", Some("BASE_MAINNET".to_string()));
        let Ok(listen_network) = ENetwork::from_str(&network_str) else {
            return Err(CrykeError::Config(format!(
                "LISTEN_NETWORK {:?} invalid",
                network_str
            )));
        };

        let cryke_home = match get_optional_env("CRYKE_HOME") {
            Some(home) => PathBuf::from(home),
            None => match get_optional_env("HOME") {
                Some(home) => PathBuf::from(home).join(".cryke"),
                None => {
                    return Err(CrykeError::Config(
                        "neither CRYKE_HOME nor HOME is set".to_string(),
                    ))
                }
            },
        };

        let mut env = Self::defaults(listen_network, cryke_home)?;
        env.rpc_url = get_optional_env("RPC_URL");
        env.signer_secret = get_optional_env("BASE_PRIVATE_KEY");
        env.moltx_api_key = get_optional_env("MOLTX_API_KEY");
        env.moltbook_api_key = get_optional_env("MOLTBOOK_API_KEY");
        env.fourclaw_api_key = get_optional_env("FOURCLAW_API_KEY");

        if let Some(fee_locker) = get_optional_env("FEE_LOCKER_ADDRESS") {
            env.fee_locker_address = Some(parse_address("FEE_LOCKER_ADDRESS", &fee_locker)?);
        }
        if let Some(api_url) = get_optional_env("CRYKE_API_URL") {
            env.launch_api_url = Url::parse(&api_url).map_err(|err| {
                CrykeError::Config(format!("CRYKE_API_URL {:?} invalid: {}", api_url, err))
            })?;
        }
        if let Some(timeout_secs) = get_optional_env("CONFIRMATION_TIMEOUT_SECS") {
            let secs: u64 = timeout_secs.parse().map_err(|_| {
                CrykeError::Config(format!(
                    "CONFIRMATION_TIMEOUT_SECS {:?} invalid",
                    timeout_secs
                ))
            })?;
            env.confirmation_timeout = Some(Duration::from_secs(secs));
        }

        Ok(env)
    }

    /// Built-in settings for `network`, with no secrets or credentials.
    pub fn defaults(network: ENetwork, cryke_home: PathBuf) -> Result<Self, CrykeError> {
        let Some(network_config) = NETWORKS.get(&network) else {
            return Err(CrykeError::Config(format!(
                "NETWORKS {:?} not found",
                network
            )));
        };
        let Some(weth) = WRAPPED_NATIVE_TOKENS.get(&network) else {
            return Err(CrykeError::Config(format!(
                "WRAPPED_NATIVE_TOKENS not found in {:?}",
                network
            )));
        };
        let launch_api_url = Url::parse(CRYKE_LAUNCH_API_URL)
            .map_err(|err| CrykeError::Config(format!("launch api url invalid: {}", err)))?;

        Ok(Self {
            listen_network: network,
            network_config: network_config.clone(),
            rpc_url: None,
            fee_locker_address: FEE_LOCKERS.get(&network).copied(),
            weth_address: *weth,
            signer_secret: None,
            launch_api_url,
            cryke_home,
            moltx_api_key: None,
            moltbook_api_key: None,
            fourclaw_api_key: None,
            confirmation_timeout: None,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.network_config.chain_id
    }

    pub fn wallets_dir(&self) -> PathBuf {
        self.cryke_home.join(WALLETS_DIR_NAME)
    }

    pub fn fee_locker(&self) -> Result<Address, CrykeError> {
        self.fee_locker_address.ok_or_else(|| {
            CrykeError::Config(format!(
                "no fee locker known on {:?}, set FEE_LOCKER_ADDRESS",
                self.listen_network
            ))
        })
    }

    /// Claim signer from `BASE_PRIVATE_KEY`, bound to this network's chain id
    pub fn signer(&self) -> Result<LocalWallet, CrykeError> {
        let Some(secret) = &self.signer_secret else {
            return Err(CrykeError::Config(
                "BASE_PRIVATE_KEY environment variable required".to_string(),
            ));
        };
        let wallet = load_private_key_wallet(secret)
            .map_err(|err| CrykeError::Config(format!("BASE_PRIVATE_KEY invalid: {}", err)))?;
        Ok(wallet.with_chain_id(self.chain_id()))
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Env")
            .field("listen_network", &self.listen_network)
            .field("chain_id", &self.chain_id())
            .field("rpc_url", &self.rpc_url)
            .field("fee_locker_address", &self.fee_locker_address)
            .field("weth_address", &self.weth_address)
            .field("signer_secret", &redact(&self.signer_secret))
            .field("launch_api_url", &self.launch_api_url.as_str())
            .field("cryke_home", &self.cryke_home)
            .field("moltx_api_key", &redact(&self.moltx_api_key))
            .field("moltbook_api_key", &redact(&self.moltbook_api_key))
            .field("fourclaw_api_key", &redact(&self.fourclaw_api_key))
            .field("confirmation_timeout", &self.confirmation_timeout)
            .finish()
    }
}

pub fn parse_address(label: &str, value: &str) -> Result<Address, CrykeError> {
    Address::from_str(value.trim())
        .map_err(|_| CrykeError::Config(format!("{} {:?} is not a valid address", label, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn env() -> Env {
        Env::defaults(ENetwork::BaseMainnet, PathBuf::from("/tmp/cryke")).unwrap()
    }

    #[test]
    fn defaults_point_at_base_mainnet() {
        let env = env();
        assert_eq!(env.chain_id(), 8453);
        assert_eq!(
            env.weth_address,
            Address::from_str("0x4200000000000000000000000000000000000006").unwrap()
        );
        assert!(env.fee_locker().is_ok());
        assert_eq!(env.wallets_dir(), PathBuf::from("/tmp/cryke/wallets"));
        assert_eq!(env.launch_api_url.as_str(), CRYKE_LAUNCH_API_URL);
    }

    #[test]
    fn sepolia_needs_explicit_fee_locker() {
        let env = Env::defaults(ENetwork::BaseSepolia, PathBuf::from("/tmp/cryke")).unwrap();
        assert!(matches!(env.fee_locker(), Err(CrykeError::Config(_))));
    }

    #[test]
    fn signer_requires_secret() {
        let mut env = env();
        assert!(matches!(env.signer(), Err(CrykeError::Config(_))));

        env.signer_secret = Some("0x1234".to_string());
        assert!(matches!(env.signer(), Err(CrykeError::Config(_))));

        env.signer_secret = Some(ANVIL_KEY.to_string());
        let signer = env.signer().unwrap();
        assert_eq!(signer.chain_id(), 8453);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let mut env = env();
        env.signer_secret = Some(ANVIL_KEY.to_string());
        env.moltx_api_key = Some("moltx-secret".to_string());
        let debug = format!("{:?}", env);
        assert!(!debug.contains(&ANVIL_KEY[2..]));
        assert!(!debug.contains("moltx-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn parse_address_reports_label() {
        assert!(parse_address("token", " 0x4200000000000000000000000000000000000006 ").is_ok());
        let err = parse_address("token", "0xTOKEN").unwrap_err();
        assert!(err.to_string().contains("token \"0xTOKEN\""));
    }
}
