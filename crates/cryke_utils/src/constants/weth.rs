use ethers::{prelude::Lazy, types::Address};
use provider_utils::enums::ENetwork;
use std::{collections::HashMap, str::FromStr};

/// Canonical WETH predeploy per network.
pub static WRAPPED_NATIVE_TOKENS: Lazy<HashMap<ENetwork, Address>> = Lazy::new(|| {
    HashMap::from([
        (
            ENetwork::BaseMainnet,
            Address::from_str("0x4200000000000000000000000000000000000006").unwrap(),
        ),
        (
            ENetwork::BaseSepolia,
            Address::from_str("0x4200000000000000000000000000000000000006").unwrap(),
        ),
    ])
});
