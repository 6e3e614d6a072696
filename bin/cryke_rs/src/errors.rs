use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy of the launch and claim flows.
#[derive(Error, Debug)]
pub enum CrykeError {
    /// Missing or malformed secret, argument or environment value.
    #[error("config error: {0}")]
    Config(String),
    /// The wallet directory or a wallet file could not be read or written.
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Contract read or node communication failure.
    #[error("rpc error: {0}")]
    Rpc(String),
    /// A claim transaction could not be sent, reverted, or never mined.
    #[error("transaction error: {0}")]
    Transaction(String),
    /// The launch API refused or failed the deployment.
    #[error("LAUNCH FAILED: {0}")]
    Deployment(String),
    /// A social post failed. Always absorbed by the fan-out.
    #[error("{platform} announcement failed: {reason}")]
    Announcement {
        platform: &'static str,
        reason: String,
    },
}

impl CrykeError {
    pub fn storage(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Storage { path, source }
    }
}
