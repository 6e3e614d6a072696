use std::path::PathBuf;

use cryke_toolkit::LaunchedToken;
use cryke_utils::{constants::CREATOR_FEE_SHARE_PERCENT, utils::format_address};
use ethers::types::Address;

/// Launch parameters as given by the user. `wallet` stays unparsed so a bad
/// address surfaces as a config error from the flow.
#[derive(Debug, Clone, Default)]
pub struct LaunchArgs {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub wallet: Option<String>,
    pub image: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementOutcome {
    pub platform: &'static str,
    pub announced: bool,
}

#[derive(Debug, Clone)]
pub struct LaunchSummary {
    pub symbol: String,
    pub wallet_address: Address,
    /// Wallet file of a store-managed fee wallet, `None` for `--wallet`
    pub key_path: Option<PathBuf>,
    pub wallet_created: bool,
    pub token: LaunchedToken,
    pub deploy_tx_url: Option<String>,
    pub announcements: Vec<AnnouncementOutcome>,
}

impl LaunchSummary {
    pub fn render(&self) -> String {
        let token_address = format_address(&self.token.address);
        let mut lines = vec![
            format!("🎉 ${} launched!", self.symbol),
            format!("📍 Token Address: {}", token_address),
            format!("💰 Fee Wallet: {}", format_address(&self.wallet_address)),
            format!(
                "💵 Your Share: {}% of all trading fees",
                CREATOR_FEE_SHARE_PERCENT
            ),
            "🔄 Fee Token: WETH (accumulates automatically)".to_string(),
        ];
        if let Some(chart) = &self.token.dexscreener {
            lines.push(format!("📊 Chart: {}", chart));
        }
        if let Some(tx_url) = &self.deploy_tx_url {
            lines.push(format!("🔗 Tx: {}", tx_url));
        }
        if let Some(key_path) = &self.key_path {
            lines.push(String::new());
            lines.push("🔐 PRIVATE KEY LOCATION:".to_string());
            lines.push(format!("   {}", key_path.display()));
            lines.push(String::new());
            if self.wallet_created {
                lines.push("   ⚠️  BACK THIS UP NOW!".to_string());
            }
            lines.push("   This key is the only way to claim this token's fees.".to_string());
        }
        lines.push(String::new());
        lines.push("To claim fees later:".to_string());
        lines.push(format!("  claim_fees claim {}", token_address));
        lines.push(String::new());
        lines.push("Your token is LIVE. You're now earning from every trade. 🚀".to_string());
        lines.join("\n")
    }
}
