//! Execute handlers for the bridge vault.
//!
//! - `outgoing` - lock and announce (`Deposit`, `DepositToken`, `DepositNft`)
//! - `incoming` - verify and release (`Withdraw`, `WithdrawNft`)
//! - `admin` - governance and policy admin configuration
//! - `farm` - yield farm binding and rebinding

mod admin;
mod farm;
mod incoming;
mod outgoing;

pub use admin::*;
pub use farm::*;
pub use incoming::*;
pub use outgoing::*;
