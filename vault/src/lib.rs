//! Bridge Vault - lock/unlock side of the hub bridge
//!
//! Native coins, CW20 tokens and NFTs are held in custody when they leave this
//! chain and released when a governance-signed message brings them back.
//! Fungible custody can be parked in a yield farm, one farm per asset.
//!
//! # Outgoing Flow (Lock)
//! 1. User attaches the chain fee (and, for native deposits, the bridged coins)
//! 2. The asset is pulled into custody and forwarded to its farm when one is bound
//! 3. A `deposit` event with a fresh deposit id is picked up by relayers
//!
//! # Incoming Flow (Unlock)
//! 1. A relayer submits the hub message together with multisig owner signatures
//! 2. Widths, the vault binding id, replay and quorum are checked
//! 3. The asset is released from custody (or withdrawn from the farm) to the
//!    recipient, which is notified when it is a contract and a payload is attached

pub mod contract;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use bridge_common::ContractError;
