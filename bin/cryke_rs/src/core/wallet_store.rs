use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use cryke_utils::utils::{format_address, load_private_key_wallet, private_key_hex, random_wallet};
use ethers::signers::Signer;

use crate::{
    errors::CrykeError,
    types::{ResolvedWallet, WalletRecord, WALLET_FILE_NOTE},
};

/// Per-symbol fee wallets, one JSON file each under `wallets_dir`.
#[derive(Debug, Clone)]
pub struct WalletStore {
    wallets_dir: PathBuf,
}

enum Lookup {
    Missing,
    Found(ResolvedWallet),
    Corrupt(String),
}

impl WalletStore {
    pub fn new(wallets_dir: impl Into<PathBuf>) -> Self {
        Self {
            wallets_dir: wallets_dir.into(),
        }
    }

    pub fn wallets_dir(&self) -> &Path {
        &self.wallets_dir
    }

    /// Uppercases `symbol` and rejects anything unusable as a file name.
    pub fn normalize_symbol(symbol: &str) -> Result<String, CrykeError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CrykeError::Config("symbol is empty".to_string()));
        }
        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(CrykeError::Config(format!(
                "symbol {:?} may only contain letters, digits, '_' or '-'",
                symbol
            )));
        }
        Ok(symbol)
    }

    pub fn wallet_path(&self, symbol: &str) -> Result<PathBuf, CrykeError> {
        let symbol = Self::normalize_symbol(symbol)?;
        Ok(self.wallets_dir.join(format!("{}.json", symbol)))
    }

    /// Existing wallet for `symbol`, or a freshly generated one. Never
    /// overwrites a wallet file; an unreadable one is set aside first.
    pub fn resolve_or_create(&self, symbol: &str) -> Result<ResolvedWallet, CrykeError> {
        let symbol = Self::normalize_symbol(symbol)?;
        let path = self.wallet_path(&symbol)?;

        match Self::lookup(&path)? {
            Lookup::Found(resolved) => {
                log::info!(
                    "[WALLET] Found existing wallet for {}: {}",
                    symbol,
                    format_address(&resolved.address)
                );
                return Ok(resolved);
            }
            Lookup::Corrupt(reason) => {
                let quarantine = Self::quarantine(&path)?;
                log::warn!(
                    "[WALLET] Wallet file {} is unreadable ({}), moved to {}. Any funds on its address are NOT lost, recover the key from that file.",
                    path.display(),
                    reason,
                    quarantine.display()
                );
            }
            Lookup::Missing => {}
        }

        log::info!("[WALLET] No wallet for {}, creating one...", symbol);
        self.create(&symbol, &path)
    }

    fn lookup(path: &Path) -> Result<Lookup, CrykeError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Lookup::Missing),
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                return Ok(Lookup::Corrupt(err.to_string()))
            }
            Err(err) => return Err(CrykeError::storage(path)(err)),
        };

        let record: WalletRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(err) => return Ok(Lookup::Corrupt(err.to_string())),
        };
        let wallet = match load_private_key_wallet(&record.private_key_secret) {
            Ok(wallet) => wallet,
            Err(err) => return Ok(Lookup::Corrupt(err.to_string())),
        };

        Ok(Lookup::Found(ResolvedWallet {
            symbol: record.symbol,
            address: record.address,
            wallet,
            path: path.to_path_buf(),
            created: false,
        }))
    }

    fn quarantine(path: &Path) -> Result<PathBuf, CrykeError> {
        let quarantine = path.with_extension(format!(
            "json.corrupt-{}",
            Utc::now().format("%Y%m%d%H%M%S%3f")
        ));
        fs::rename(path, &quarantine).map_err(CrykeError::storage(path))?;
        Ok(quarantine)
    }

    fn create(&self, symbol: &str, path: &Path) -> Result<ResolvedWallet, CrykeError> {
        Self::ensure_dir(&self.wallets_dir)?;

        let wallet = random_wallet();
        let record = WalletRecord {
            symbol: symbol.to_string(),
            address: wallet.address(),
            private_key_secret: private_key_hex(&wallet),
            created_at: Utc::now(),
            note: WALLET_FILE_NOTE.to_string(),
        };
        let json = serde_json::to_string_pretty(&record).map_err(|err| {
            CrykeError::storage(path)(std::io::Error::new(ErrorKind::InvalidData, err))
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path).map_err(CrykeError::storage(path))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(CrykeError::storage(path))?;

        // Restrict file permissions to owner-only on Unix (0o600 = rw-------).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(CrykeError::storage(path))?;
        }

        log::info!("Wallet created: {}", format_address(&record.address));
        log::info!("[SECURITY] Private key saved to: {}", path.display());
        log::warn!("BACK UP THIS FILE! If you lose it, you lose access to your fees.");

        Ok(ResolvedWallet {
            symbol: record.symbol,
            address: record.address,
            wallet,
            path: path.to_path_buf(),
            created: true,
        })
    }

    fn ensure_dir(dir: &Path) -> Result<(), CrykeError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(dir).map_err(CrykeError::storage(dir))
    }
}
