use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use cryke_utils::{abi::FeeLockerAbigen, utils::format_lower_hex};
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TransactionReceipt, H256, U256, U64},
};
use tokio::time::{sleep, timeout};

use crate::errors::CrykeError;

const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Read and claim access to the fee-locker contract.
#[async_trait]
pub trait FeeLedger: Send + Sync {
    /// `feesToClaim(feeOwner, asset)`. Untracked assets read as zero.
    async fn query_claimable(&self, fee_owner: Address, asset: Address)
        -> Result<U256, CrykeError>;

    /// Sends `claim(feeOwner, asset)` and returns as soon as the node
    /// accepted it.
    async fn submit_claim(
        &self,
        signer: &LocalWallet,
        fee_owner: Address,
        asset: Address,
    ) -> Result<H256, CrykeError>;

    async fn await_confirmation(&self, tx_hash: H256) -> Result<TransactionReceipt, CrykeError>;
}

/// Polls `eth_getTransactionReceipt` until the node returns a receipt. A
/// missing receipt means not mined yet; a fresh broadcast may be unknown to
/// some nodes behind a load-balanced rpc.
pub async fn wait_for_receipt<M: Middleware>(
    provider: &M,
    tx_hash: H256,
    interval: Duration,
) -> Result<TransactionReceipt, CrykeError> {
    loop {
        match provider.get_transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => return Ok(receipt),
            Ok(None) => log::debug!("[CLAIM] {} not mined yet", format_lower_hex(&tx_hash)),
            Err(err) => return Err(CrykeError::Rpc(err.to_string())),
        }
        sleep(interval).await;
    }
}

#[derive(Debug, Clone)]
pub struct FeeLedgerClient {
    http_provider: Arc<Provider<Http>>,
    fee_locker_address: Address,
    chain_id: u64,
    confirmation_timeout: Option<Duration>,
}

impl FeeLedgerClient {
    pub fn new(
        http_provider: Arc<Provider<Http>>,
        fee_locker_address: Address,
        chain_id: u64,
        confirmation_timeout: Option<Duration>,
    ) -> Self {
        Self {
            http_provider,
            fee_locker_address,
            chain_id,
            confirmation_timeout,
        }
    }

    /// Mined receipts without a status field predate EIP-658 and count as
    /// successful.
    pub fn check_receipt(receipt: TransactionReceipt) -> Result<TransactionReceipt, CrykeError> {
        match receipt.status {
            Some(status) if status != U64::from(1) => Err(CrykeError::Transaction(format!(
                "{} reverted in block {:?}",
                format_lower_hex(&receipt.transaction_hash),
                receipt.block_number
            ))),
            _ => Ok(receipt),
        }
    }
}

#[async_trait]
impl FeeLedger for FeeLedgerClient {
    async fn query_claimable(
        &self,
        fee_owner: Address,
        asset: Address,
    ) -> Result<U256, CrykeError> {
        let fee_locker = FeeLockerAbigen::new(self.fee_locker_address, self.http_provider.clone());
        fee_locker
            .fees_to_claim(fee_owner, asset)
            .call()
            .await
            .map_err(|err| {
                CrykeError::Rpc(format!(
                    "feesToClaim({:?}, {:?}) failed: {}",
                    fee_owner, asset, err
                ))
            })
    }

    async fn submit_claim(
        &self,
        signer: &LocalWallet,
        fee_owner: Address,
        asset: Address,
    ) -> Result<H256, CrykeError> {
        let signer = SignerMiddleware::new(
            self.http_provider.clone(),
            signer.clone().with_chain_id(self.chain_id),
        );
        let fee_locker = FeeLockerAbigen::new(self.fee_locker_address, Arc::new(signer));
        let call = fee_locker.claim(fee_owner, asset);
        let pending_tx = call.send().await.map_err(|err| {
            CrykeError::Transaction(format!("claim({:?}, {:?}) failed: {}", fee_owner, asset, err))
        })?;
        let tx_hash = pending_tx.tx_hash();
        log::info!("[CLAIM] pending_tx {}", format_lower_hex(&tx_hash));
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: H256) -> Result<TransactionReceipt, CrykeError> {
        let polling = wait_for_receipt(
            self.http_provider.as_ref(),
            tx_hash,
            CONFIRMATION_POLL_INTERVAL,
        );

        let receipt = match self.confirmation_timeout {
            Some(limit) => timeout(limit, polling).await.map_err(|_| {
                CrykeError::Transaction(format!(
                    "{} not mined within {:?}",
                    format_lower_hex(&tx_hash),
                    limit
                ))
            })??,
            None => polling.await?,
        };

        Self::check_receipt(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: Option<u64>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: H256::from_low_u64_be(0xbeef),
            block_number: Some(U64::from(42)),
            status: status.map(U64::from),
            ..Default::default()
        }
    }

    #[test]
    fn successful_receipt_passes() {
        assert!(FeeLedgerClient::check_receipt(receipt(Some(1))).is_ok());
        assert!(FeeLedgerClient::check_receipt(receipt(None)).is_ok());
    }

    #[test]
    fn reverted_receipt_is_a_transaction_error() {
        let err = FeeLedgerClient::check_receipt(receipt(Some(0))).unwrap_err();
        assert!(matches!(err, CrykeError::Transaction(_)));
        assert!(err.to_string().contains("reverted in block Some(42)"));
    }

    #[tokio::test]
    async fn missing_receipt_is_polled_again() {
        let (provider, mock) = Provider::mocked();
        // first and last lookups miss, whichever end the mock serves from
        mock.push::<Option<TransactionReceipt>, _>(None).unwrap();
        mock.push(receipt(Some(1))).unwrap();
        mock.push::<Option<TransactionReceipt>, _>(None).unwrap();

        let mined = wait_for_receipt(
            &provider,
            H256::from_low_u64_be(0xbeef),
            Duration::from_millis(1),
        )
        .await
        .unwrap();

        assert_eq!(mined.transaction_hash, H256::from_low_u64_be(0xbeef));
        assert_eq!(mined.block_number, Some(U64::from(42)));
    }

    #[tokio::test]
    async fn failing_receipt_lookup_is_an_rpc_error() {
        // an exhausted mock answers with an error
        let (provider, _mock) = Provider::mocked();
        let result = wait_for_receipt(
            &provider,
            H256::from_low_u64_be(0xbeef),
            Duration::from_millis(1),
        )
        .await;
        assert!(matches!(result, Err(CrykeError::Rpc(_))));
    }

    #[tokio::test]
    async fn unreachable_node_is_an_rpc_error() {
        let provider = Provider::<Http>::try_from("http://127.0.0.1:1").unwrap();
        let client = FeeLedgerClient::new(
            Arc::new(provider),
            Address::from_low_u64_be(1),
            8453,
            None,
        );
        let result = client
            .query_claimable(Address::from_low_u64_be(2), Address::from_low_u64_be(3))
            .await;
        assert!(matches!(result, Err(CrykeError::Rpc(_))));
    }
}
