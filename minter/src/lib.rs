//! Bridge Minter - mint/burn side of the hub bridge
//!
//! Wrapped CW20 tokens and NFTs are burned when they leave this chain and minted
//! when a governance-signed message brings them back.
//!
//! # Outgoing Flow (Burn)
//! 1. User pays the bridging fee and requests a swap to an admitted chain
//! 2. The wrapped token is burned from the user (`BurnFrom` needs an allowance)
//! 3. A `swap_request` event with a fresh deposit id is picked up by relayers
//!
//! # Incoming Flow (Mint)
//! 1. A relayer submits the hub message together with multisig owner signatures
//! 2. Widths, governance id, replay and quorum are checked
//! 3. The token is minted to the decoded recipient, which is notified when it is a
//!    contract and a payload is attached

pub mod contract;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use bridge_common::ContractError;
