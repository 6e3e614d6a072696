use std::sync::Arc;

use cryke_toolkit::{LaunchApiError, LaunchEvent, LaunchRequest, LaunchedToken, TokenDeployer};
use cryke_utils::utils::format_address;
use ethers::types::Address;

use super::{AnnouncementFanout, WalletStore};
use crate::{
    constants::{parse_address, Env},
    errors::CrykeError,
    types::{AnnouncementOutcome, LaunchArgs, LaunchSummary, ResolvedWallet},
};

const MAX_NAME_LEN: usize = 32;
const MAX_SYMBOL_LEN: usize = 8;
const DESCRIPTION_PREVIEW_LEN: usize = 60;

/// Token launch flow:
/// resolve wallet -> validate -> deploy -> announce -> summarize.
/// Only a failed deploy aborts; announcements never do.
pub struct LaunchService {
    env: Env,
    wallet_store: WalletStore,
    deployer: Arc<dyn TokenDeployer>,
    fanout: AnnouncementFanout,
}

enum FeeWallet {
    Provided(Address),
    Stored(ResolvedWallet),
}

impl FeeWallet {
    fn address(&self) -> Address {
        match self {
            FeeWallet::Provided(address) => *address,
            FeeWallet::Stored(resolved) => resolved.address,
        }
    }
}

impl LaunchService {
    pub fn new(env: Env, deployer: Arc<dyn TokenDeployer>, fanout: AnnouncementFanout) -> Self {
        let wallet_store = WalletStore::new(env.wallets_dir());
        Self {
            env,
            wallet_store,
            deployer,
            fanout,
        }
    }

    pub async fn launch(&self, args: LaunchArgs) -> Result<LaunchSummary, CrykeError> {
        let fee_wallet = self.resolve_wallet(&args)?;
        let request = self.validate_inputs(&args, fee_wallet.address())?;
        let token = self.deploy(&request).await?;

        let event = LaunchEvent {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            description: request.description.clone(),
            token: token.clone(),
        };
        let announcements = self.announce(&event).await;

        let (key_path, wallet_created) = match fee_wallet {
            FeeWallet::Provided(_) => (None, false),
            FeeWallet::Stored(resolved) => (Some(resolved.path), resolved.created),
        };
        Ok(LaunchSummary {
            symbol: request.symbol,
            wallet_address: request.wallet,
            key_path,
            wallet_created,
            deploy_tx_url: token
                .transaction
                .as_deref()
                .map(|tx_hash| self.env.network_config.tx_url(tx_hash)),
            token,
            announcements,
        })
    }

    fn resolve_wallet(&self, args: &LaunchArgs) -> Result<FeeWallet, CrykeError> {
        match &args.wallet {
            Some(wallet) => {
                let address = parse_address("--wallet", wallet)?;
                log::info!("[WALLET] Using provided wallet: {}", format_address(&address));
                Ok(FeeWallet::Provided(address))
            }
            None => Ok(FeeWallet::Stored(
                self.wallet_store.resolve_or_create(&args.symbol)?,
            )),
        }
    }

    fn validate_inputs(
        &self,
        args: &LaunchArgs,
        wallet: Address,
    ) -> Result<LaunchRequest, CrykeError> {
        log::info!("[VALIDATE] Checking token parameters...");
        let request = LaunchRequest {
            name: args.name.trim().to_string(),
            symbol: args.symbol.trim().to_uppercase(),
            wallet,
            description: args.description.trim().to_string(),
            image: args.image.clone(),
            website: args.website.clone(),
            twitter: args.twitter.clone(),
        };
        request
            .validate()
            .map_err(|err| CrykeError::Config(err.to_string()))?;

        log::info!("   Name: {}", request.name);
        log::info!("   Symbol: {}", request.symbol);
        log::info!("   Wallet: {}", format_address(&request.wallet));
        log::info!("   Description: {}", preview(&request.description));
        if let Some(image) = &request.image {
            log::info!("   Image: {}", image);
        }
        if request.name.chars().count() > MAX_NAME_LEN {
            log::warn!(
                "Name is longer than {} characters, the launch API may refuse it",
                MAX_NAME_LEN
            );
        }
        if request.symbol.chars().count() > MAX_SYMBOL_LEN {
            log::warn!(
                "Symbol is longer than {} characters, the launch API may refuse it",
                MAX_SYMBOL_LEN
            );
        }

        Ok(request)
    }

    async fn deploy(&self, request: &LaunchRequest) -> Result<LaunchedToken, CrykeError> {
        log::info!("[LAUNCH] Calling Cryke API to deploy token...");
        let token = self
            .deployer
            .deploy(request)
            .await
            .map_err(|err| match err {
                LaunchApiError::MissingField(_) => CrykeError::Config(err.to_string()),
                err => CrykeError::Deployment(err.to_string()),
            })?;

        log::info!("TOKEN DEPLOYED! Token Address: {}", format_address(&token.address));
        if let Some(pool) = &token.pool {
            log::info!("   Pool: {}", pool);
        }
        if let Some(dexscreener) = &token.dexscreener {
            log::info!("   DexScreener: {}", dexscreener);
        }
        Ok(token)
    }

    async fn announce(&self, event: &LaunchEvent) -> Vec<AnnouncementOutcome> {
        log::info!("[SOCIAL] Checking for social platform credentials...");
        if self.fanout.is_empty() {
            log::info!("   No social credentials found, skipping announcements");
            log::info!(
                "   Set MOLTX_API_KEY, MOLTBOOK_API_KEY, or FOURCLAW_API_KEY to auto-announce"
            );
            return Vec::new();
        }
        log::info!("   Announcing on: {}", self.fanout.platforms().join(", "));
        self.fanout.announce(event).await
    }
}

fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_LEN {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_LEN).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}
