mod fee_types;
mod launch_types;
mod wallet_types;

pub use fee_types::*;
pub use launch_types::*;
pub use wallet_types::*;
