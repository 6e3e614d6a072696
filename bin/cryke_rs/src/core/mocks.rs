use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use cryke_toolkit::{
    LaunchApiError, LaunchEvent, LaunchRequest, LaunchedToken, PublishError, Publisher,
    TokenDeployer,
};
use ethers::{
    signers::LocalWallet,
    types::{Address, TransactionReceipt, H256, U256},
};

use super::FeeLedger;
use crate::errors::CrykeError;

pub const TOKEN_ADDRESS: &str = "0x00000000000000000000000000000000000070cE";

pub fn token_address() -> Address {
    Address::from_str(TOKEN_ADDRESS).unwrap()
}

pub fn launched_token() -> LaunchedToken {
    LaunchedToken {
        address: token_address(),
        pool: Some("0xpool".to_string()),
        dexscreener: Some(format!("https://dexscreener.com/base/{}", TOKEN_ADDRESS)),
        transaction: Some("0xd3910y".to_string()),
    }
}

pub fn launch_event() -> LaunchEvent {
    LaunchEvent {
        name: "Foo Token".to_string(),
        symbol: "FOO".to_string(),
        description: "foo".to_string(),
        token: launched_token(),
    }
}

pub struct MockPublisher {
    platform: &'static str,
    succeed: bool,
    calls: Arc<AtomicUsize>,
}

impl MockPublisher {
    pub fn new(platform: &'static str, succeed: bool) -> Self {
        Self {
            platform,
            succeed,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn platform(&self) -> &'static str {
        self.platform
    }

    async fn publish(&self, _event: &LaunchEvent) -> Result<(), PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            Ok(())
        } else {
            Err(PublishError::NotAccepted {
                platform: self.platform,
                body: r#"{"success":false}"#.to_string(),
            })
        }
    }
}

/// Answers every deploy with a clone of `response` and records the requests.
pub struct MockDeployer {
    response: Result<LaunchedToken, String>,
    pub requests: Mutex<Vec<LaunchRequest>>,
}

impl MockDeployer {
    pub fn succeeding() -> Self {
        Self {
            response: Ok(launched_token()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenDeployer for MockDeployer {
    async fn deploy(&self, request: &LaunchRequest) -> Result<LaunchedToken, LaunchApiError> {
        request.validate()?;
        self.requests.lock().unwrap().push(request.clone());
        self.response
            .clone()
            .map_err(|message| LaunchApiError::Rejected { message })
    }
}

/// In-memory fee locker. Assets without a configured balance read as zero,
/// and a confirmed claim empties the asset.
#[derive(Default)]
pub struct MockLedger {
    balances: HashMap<Address, U256>,
    failing_queries: HashSet<Address>,
    failing_claims: HashSet<Address>,
    reverting_claims: HashSet<Address>,
    pub submitted: Mutex<Vec<(Address, Address)>>,
    pending: Mutex<HashMap<H256, Address>>,
    drained: Mutex<HashSet<Address>>,
}

impl MockLedger {
    pub fn with_balance(mut self, asset: Address, balance: U256) -> Self {
        self.balances.insert(asset, balance);
        self
    }

    pub fn failing_query(mut self, asset: Address) -> Self {
        self.failing_queries.insert(asset);
        self
    }

    /// Submission itself is refused by the node.
    pub fn failing_claim(mut self, asset: Address) -> Self {
        self.failing_claims.insert(asset);
        self
    }

    /// Submission succeeds, the mined receipt reverts.
    pub fn reverting_claim(mut self, asset: Address) -> Self {
        self.reverting_claims.insert(asset);
        self
    }

    pub fn submitted_assets(&self) -> Vec<Address> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, asset)| *asset)
            .collect()
    }
}

#[async_trait]
impl FeeLedger for MockLedger {
    async fn query_claimable(
        &self,
        _fee_owner: Address,
        asset: Address,
    ) -> Result<U256, CrykeError> {
        if self.failing_queries.contains(&asset) {
            return Err(CrykeError::Rpc("connection reset".to_string()));
        }
        if self.drained.lock().unwrap().contains(&asset) {
            return Ok(U256::zero());
        }
        Ok(self.balances.get(&asset).copied().unwrap_or_default())
    }

    async fn submit_claim(
        &self,
        _signer: &LocalWallet,
        fee_owner: Address,
        asset: Address,
    ) -> Result<H256, CrykeError> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push((fee_owner, asset));
        if self.failing_claims.contains(&asset) {
            return Err(CrykeError::Transaction("execution reverted".to_string()));
        }
        let tx_hash = H256::from_low_u64_be(submitted.len() as u64);
        self.pending.lock().unwrap().insert(tx_hash, asset);
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: H256) -> Result<TransactionReceipt, CrykeError> {
        let asset = self.pending.lock().unwrap().get(&tx_hash).copied();
        match asset {
            Some(asset) if self.reverting_claims.contains(&asset) => Err(CrykeError::Transaction(
                format!("{:?} reverted", tx_hash),
            )),
            Some(asset) => {
                self.drained.lock().unwrap().insert(asset);
                Ok(TransactionReceipt {
                    transaction_hash: tx_hash,
                    status: Some(1u64.into()),
                    ..Default::default()
                })
            }
            None => Err(CrykeError::Transaction("unknown transaction".to_string())),
        }
    }
}
