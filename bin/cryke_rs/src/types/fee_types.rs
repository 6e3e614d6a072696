use cryke_utils::utils::{format_address, format_lower_hex};
use ethers::{
    types::{Address, H256, U256},
    utils::format_ether,
};
use provider_utils::networks::NetworkConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeAssetKind {
    WrappedNative,
    ProjectToken,
}

/// One of the two assets fees accrue in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeAsset {
    pub kind: FeeAssetKind,
    pub address: Address,
}

impl FeeAsset {
    pub fn label(&self) -> &'static str {
        match self.kind {
            FeeAssetKind::WrappedNative => "WETH",
            FeeAssetKind::ProjectToken => "Token",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.kind {
            FeeAssetKind::WrappedNative => "WETH",
            FeeAssetKind::ProjectToken => "tokens",
        }
    }
}

/// Point-in-time claimable balances of one fee owner for one token. A
/// failed query keeps its reason so the other balance is still reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBalances {
    pub fee_owner: Address,
    pub native_wrapped: Result<U256, String>,
    pub project_token: Result<U256, String>,
}

impl FeeBalances {
    pub fn has_failures(&self) -> bool {
        self.native_wrapped.is_err() || self.project_token.is_err()
    }

    pub fn render(&self) -> String {
        format!(
            "WETH fees available: {}\nToken fees available: {}",
            available(&self.native_wrapped, "WETH"),
            available(&self.project_token, "tokens")
        )
    }
}

fn available(balance: &Result<U256, String>, unit: &str) -> String {
    match balance {
        Ok(balance) => format!("{} {}", format_ether(*balance), unit),
        Err(reason) => format!("unavailable ({})", reason),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Balance was zero, nothing broadcast
    Skipped,
    Claimed { tx_hash: H256 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetClaim {
    pub asset: FeeAsset,
    /// `None` when the balance query itself failed
    pub balance: Option<U256>,
    pub outcome: ClaimOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReport {
    pub fee_owner: Address,
    pub token_address: Address,
    pub claims: Vec<AssetClaim>,
}

impl ClaimReport {
    pub fn claimed_count(&self) -> usize {
        self.claims
            .iter()
            .filter(|claim| matches!(claim.outcome, ClaimOutcome::Claimed { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.claims
            .iter()
            .filter(|claim| matches!(claim.outcome, ClaimOutcome::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    pub fn nothing_to_claim(&self) -> bool {
        self.claims
            .iter()
            .all(|claim| claim.outcome == ClaimOutcome::Skipped)
    }

    pub fn render(&self, network: &NetworkConfig) -> String {
        let mut lines = vec![
            format!("Wallet: {}", format_address(&self.fee_owner)),
            format!("Explorer: {}", network.address_url(&format_address(&self.fee_owner))),
            format!("Token: {}", format_address(&self.token_address)),
        ];
        for claim in &self.claims {
            let balance = claim
                .balance
                .map(|balance| format!("{} {}", format_ether(balance), claim.asset.unit()))
                .unwrap_or_else(|| "unknown".to_string());
            let line = match &claim.outcome {
                ClaimOutcome::Skipped => {
                    format!("{} fees: {} (nothing to claim)", claim.asset.label(), balance)
                }
                ClaimOutcome::Claimed { tx_hash } => format!(
                    "{} fees: {} claimed, TX: {}",
                    claim.asset.label(),
                    balance,
                    network.tx_url(&format_lower_hex(tx_hash))
                ),
                ClaimOutcome::Failed { reason } => {
                    format!("{} fees: {} FAILED: {}", claim.asset.label(), balance, reason)
                }
            };
            lines.push(line);
        }
        if self.nothing_to_claim() {
            lines.push("No fees to claim. Keep promoting your token!".to_string());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use provider_utils::{enums::ENetwork, networks::NETWORKS};

    use super::*;

    fn asset(kind: FeeAssetKind) -> FeeAsset {
        FeeAsset {
            kind,
            address: Address::from_low_u64_be(6),
        }
    }

    fn report(outcomes: Vec<ClaimOutcome>) -> ClaimReport {
        let kinds = [FeeAssetKind::WrappedNative, FeeAssetKind::ProjectToken];
        ClaimReport {
            fee_owner: Address::from_str("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap(),
            token_address: Address::from_low_u64_be(7),
            claims: outcomes
                .into_iter()
                .zip(kinds)
                .map(|(outcome, kind)| AssetClaim {
                    asset: asset(kind),
                    balance: Some(U256::exp10(18)),
                    outcome,
                })
                .collect(),
        }
    }

    #[test]
    fn balances_render_in_ether_units() {
        let balances = FeeBalances {
            fee_owner: Address::zero(),
            native_wrapped: Ok(U256::exp10(18)),
            project_token: Ok(U256::zero()),
        };
        assert!(!balances.has_failures());
        assert_eq!(
            balances.render(),
            "WETH fees available: 1.000000000000000000 WETH\nToken fees available: 0.000000000000000000 tokens"
        );
    }

    #[test]
    fn failed_balance_renders_its_reason() {
        let balances = FeeBalances {
            fee_owner: Address::zero(),
            native_wrapped: Ok(U256::exp10(18)),
            project_token: Err("connection reset".to_string()),
        };
        assert!(balances.has_failures());
        assert_eq!(
            balances.render(),
            "WETH fees available: 1.000000000000000000 WETH\nToken fees available: unavailable (connection reset)"
        );
    }

    #[test]
    fn report_counts_outcomes() {
        let report = report(vec![
            ClaimOutcome::Claimed {
                tx_hash: H256::from_low_u64_be(1),
            },
            ClaimOutcome::Failed {
                reason: "execution reverted".to_string(),
            },
        ]);
        assert_eq!(report.claimed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.has_failures());
        assert!(!report.nothing_to_claim());

        let rendered = report.render(NETWORKS.get(&ENetwork::BaseMainnet).unwrap());
        assert!(rendered.contains("Wallet: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        assert!(rendered.contains(
            "Explorer: https://basescan.org/address/0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        ));
        assert!(rendered.contains("https://basescan.org/tx/0x0000000000000000000000000000000000000000000000000000000000000001"));
        assert!(rendered.contains("Token fees: 1.000000000000000000 tokens FAILED: execution reverted"));
    }

    #[test]
    fn all_skipped_means_nothing_to_claim() {
        let report = report(vec![ClaimOutcome::Skipped, ClaimOutcome::Skipped]);
        assert_eq!(report.claimed_count(), 0);
        assert!(!report.has_failures());
        assert!(report.nothing_to_claim());
        assert!(report
            .render(NETWORKS.get(&ENetwork::BaseMainnet).unwrap())
            .ends_with("No fees to claim. Keep promoting your token!"));
    }
}
