use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ethers::{signers::LocalWallet, types::Address};
use serde::{Deserialize, Serialize};

pub const WALLET_FILE_NOTE: &str =
    "KEEP THIS FILE SAFE! This private key controls your token's fee wallet.";

/// On-disk wallet file, one per symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub symbol: String,
    /// Stored at creation, never re-derived from the key
    pub address: Address,
    #[serde(alias = "privateKey")]
    pub private_key_secret: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedWallet {
    pub symbol: String,
    pub address: Address,
    pub wallet: LocalWallet,
    pub path: PathBuf,
    /// `true` only when this call generated and wrote the key
    pub created: bool,
}
