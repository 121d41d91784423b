//! Bridge Common - shared core of the hub bridge contracts
//!
//! Both the mint/burn contract (`bridge-minter`) and the lock/unlock contract
//! (`bridge-vault`) are built from the pieces in this package:
//!
//! - `chain` / `token` - admission registries for remote chains and tokens
//! - `codec` / `inbound` - canonical message hashing and structural checks
//! - `replay` / `quorum` - at-most-once application and multisig authorization
//! - `fee` / `state` - flat fee, tax routing and deposit ids
//! - `adapter` / `effects` - guarded balance effects on collaborator contracts
//!
//! # Inbound Flow
//! 1. Widths are checked against the source chain's registry record
//! 2. The embedded binding id must match this deployment
//! 3. The message hash is consumed, then the governance quorum is verified
//! 4. The transfer adapter mints or unlocks, optionally notifying the receiver

pub mod adapter;
pub mod address;
pub mod asset;
pub mod chain;
pub mod codec;
pub mod effects;
pub mod error;
pub mod events;
pub mod fee;
pub mod hash;
pub mod inbound;
pub mod interfaces;
pub mod query;
pub mod quorum;
pub mod replay;
pub mod safe_math;
pub mod state;
pub mod token;

pub use asset::AssetInfo;
pub use codec::{InboundMessage, MessageKind};
pub use error::ContractError;
