mod announcement_fanout;
mod claim_service;
mod fee_ledger_client;
mod launch_service;
mod wallet_store;

#[cfg(test)]
pub(crate) mod mocks;

pub use announcement_fanout::*;
pub use claim_service::*;
pub use fee_ledger_client::*;
pub use launch_service::*;
pub use wallet_store::*;
