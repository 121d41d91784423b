//! Execute handlers for the bridge minter.
//!
//! - `outgoing` - burn and announce (`RequestSwap`, `RequestSwapNft`)
//! - `incoming` - verify and mint (`Swap`, `SwapNft`)
//! - `admin` - governance configuration

mod admin;
mod incoming;
mod outgoing;

pub use admin::*;
pub use incoming::*;
pub use outgoing::*;
