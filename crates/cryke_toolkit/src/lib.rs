pub mod launch_api;
pub mod publishers;

pub use launch_api::*;
pub use publishers::*;
