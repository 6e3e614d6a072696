use ethers::{prelude::Lazy, types::Address};
use provider_utils::enums::ENetwork;
use std::{collections::HashMap, str::FromStr};

pub const CRYKE_LAUNCH_API_URL: &str = "https://cryke.com/api/launch";

/// Share of trading fees routed to the fee owner, in percent.
pub const CREATOR_FEE_SHARE_PERCENT: u32 = 80;

/// Fee-locker deployments; networks missing here need `FEE_LOCKER_ADDRESS`.
pub static FEE_LOCKERS: Lazy<HashMap<ENetwork, Address>> = Lazy::new(|| {
    HashMap::from([(
        ENetwork::BaseMainnet,
        Address::from_str("0xF3622742b1E446D92e45E22923Ef11C2fcD55D68").unwrap(),
    )])
});
