use std::{fmt::LowerHex, str::FromStr};

use ethers::{
    signers::{LocalWallet, WalletError},
    types::Address,
    utils::to_checksum,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("private key must be 64 hex characters, got {0}")]
    InvalidLength(usize),
    #[error("private key is not valid hex")]
    InvalidHex,
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

pub fn format_lower_hex(hash: &impl LowerHex) -> String {
    format!("{:#x}", hash)
}

/// EIP-55 checksummed form, as shown to users.
pub fn format_address(address: &Address) -> String {
    to_checksum(address, None)
}

/// Generate a fresh secp256k1 signing key from the thread rng
pub fn random_wallet() -> LocalWallet {
    LocalWallet::new(&mut rand::thread_rng())
}

/// Load a wallet from a hex private key, with or without the `0x` prefix
pub fn load_private_key_wallet(private_key: &str) -> Result<LocalWallet, KeyError> {
    let private_key = private_key.trim();
    let private_key = private_key
        .strip_prefix("0x")
        .or_else(|| private_key.strip_prefix("0X"))
        .unwrap_or(private_key);
    if private_key.len() != 64 {
        return Err(KeyError::InvalidLength(private_key.len()));
    }
    if !private_key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KeyError::InvalidHex);
    }
    Ok(LocalWallet::from_str(private_key)?)
}

pub fn private_key_hex(wallet: &LocalWallet) -> String {
    format!("0x{}", hex::encode(wallet.signer().to_bytes()))
}
