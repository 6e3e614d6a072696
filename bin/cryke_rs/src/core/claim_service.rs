use std::sync::Arc;

use cryke_utils::utils::{format_address, format_lower_hex};
use ethers::{
    signers::{LocalWallet, Signer},
    types::{Address, U256},
    utils::format_ether,
};

use super::FeeLedger;
use crate::{
    constants::Env,
    errors::CrykeError,
    types::{AssetClaim, ClaimOutcome, ClaimReport, FeeAsset, FeeAssetKind, FeeBalances},
};

/// Fee check and claim flows against the fee locker.
pub struct ClaimService {
    env: Env,
    ledger: Arc<dyn FeeLedger>,
}

impl ClaimService {
    pub fn new(env: Env, ledger: Arc<dyn FeeLedger>) -> Self {
        Self { env, ledger }
    }

    fn assets(&self, token_address: Address) -> [FeeAsset; 2] {
        [
            FeeAsset {
                kind: FeeAssetKind::WrappedNative,
                address: self.env.weth_address,
            },
            FeeAsset {
                kind: FeeAssetKind::ProjectToken,
                address: token_address,
            },
        ]
    }

    /// Both queries always run; one failing does not stop the other.
    async fn query_both(
        &self,
        fee_owner: Address,
        token_address: Address,
    ) -> [(FeeAsset, Result<U256, CrykeError>); 2] {
        let [native, token] = self.assets(token_address);
        let (native_balance, token_balance) = tokio::join!(
            self.ledger.query_claimable(fee_owner, native.address),
            self.ledger.query_claimable(fee_owner, token.address)
        );
        [(native, native_balance), (token, token_balance)]
    }

    pub async fn check_fees(
        &self,
        fee_owner: Address,
        token_address: Address,
    ) -> Result<FeeBalances, CrykeError> {
        log::info!(
            "Checking fees for wallet: {}, token: {}",
            format_address(&fee_owner),
            format_address(&token_address)
        );
        let [(native, native_balance), (token, token_balance)] =
            self.query_both(fee_owner, token_address).await;

        match (native_balance, token_balance) {
            (Err(err), Err(other)) => {
                log::error!("{} fee query failed: {}", token.label(), other);
                Err(err)
            }
            (native_balance, token_balance) => Ok(FeeBalances {
                fee_owner,
                native_wrapped: settle(native, native_balance),
                project_token: settle(token, token_balance),
            }),
        }
    }

    /// Claims every asset with a positive balance, each in its own failure
    /// boundary. An address is evaluated once even when the token is WETH
    /// itself. Errors only when no signer is configured.
    pub async fn claim_fees(&self, token_address: Address) -> Result<ClaimReport, CrykeError> {
        let signer = self.env.signer()?;
        let fee_owner = signer.address();
        log::info!(
            "[CLAIM] Wallet: {}, token: {}",
            format_address(&fee_owner),
            format_address(&token_address)
        );

        let mut claims: Vec<AssetClaim> = Vec::new();
        for (asset, balance) in self.query_both(fee_owner, token_address).await {
            if claims.iter().any(|claim| claim.asset.address == asset.address) {
                log::info!(
                    "[CLAIM] {} is the wrapped native token, already evaluated",
                    format_address(&asset.address)
                );
                continue;
            }
            claims.push(self.claim_asset(&signer, fee_owner, asset, balance).await);
        }

        Ok(ClaimReport {
            fee_owner,
            token_address,
            claims,
        })
    }

    async fn claim_asset(
        &self,
        signer: &LocalWallet,
        fee_owner: Address,
        asset: FeeAsset,
        balance: Result<U256, CrykeError>,
    ) -> AssetClaim {
        let balance = match balance {
            Ok(balance) => balance,
            Err(err) => {
                log::error!("[CLAIM] {} fee query failed: {}", asset.label(), err);
                return AssetClaim {
                    asset,
                    balance: None,
                    outcome: ClaimOutcome::Failed {
                        reason: err.to_string(),
                    },
                };
            }
        };

        if balance.is_zero() {
            log::info!("[CLAIM] No {} fees to claim", asset.label());
            return AssetClaim {
                asset,
                balance: Some(balance),
                outcome: ClaimOutcome::Skipped,
            };
        }

        log::info!(
            "[CLAIM] Claiming {} {} fees...",
            format_ether(balance),
            asset.unit()
        );
        let outcome = match self.submit_and_confirm(signer, fee_owner, asset).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("[CLAIM] {} claim failed: {}", asset.label(), err);
                ClaimOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };

        AssetClaim {
            asset,
            balance: Some(balance),
            outcome,
        }
    }

    async fn submit_and_confirm(
        &self,
        signer: &LocalWallet,
        fee_owner: Address,
        asset: FeeAsset,
    ) -> Result<ClaimOutcome, CrykeError> {
        let tx_hash = self
            .ledger
            .submit_claim(signer, fee_owner, asset.address)
            .await?;
        log::info!(
            "[CLAIM] TX: {}",
            self.env.network_config.tx_url(&format_lower_hex(&tx_hash))
        );
        self.ledger.await_confirmation(tx_hash).await?;
        log::info!("[CLAIM] {} fees claimed!", asset.label());
        Ok(ClaimOutcome::Claimed { tx_hash })
    }
}

fn settle(asset: FeeAsset, balance: Result<U256, CrykeError>) -> Result<U256, String> {
    balance.map_err(|err| {
        log::error!("{} fee query failed: {}", asset.label(), err);
        err.to_string()
    })
}
