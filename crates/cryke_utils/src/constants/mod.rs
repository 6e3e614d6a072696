mod fee_locker;
mod weth;

pub use fee_locker::*;
pub use weth::*;
