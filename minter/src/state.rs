//! State definitions for the bridge minter.
//!
//! Registries, the replay set, the deposit counter and the tax config live in
//! `bridge_common`; only the minter configuration is kept here.

use bridge_common::inbound::{FixedBlock, Layout};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::Item;

pub const CONTRACT_NAME: &str = "crates.io:bridge-minter";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hub messages carry one or more 32-byte words, the first being the governance
/// id; the token descriptor width is chosen by the hub.
pub const MINTER_LAYOUT: Layout = Layout {
    bytes32s: FixedBlock::AtLeast(32),
    token_length: None,
};

pub const GOV_ID_LENGTH: usize = 32;

#[cw_serde]
pub struct Config {
    /// Multisig contract: admin of the bridge and source of the signer set
    pub governance: Addr,
    /// Receiver of the flat bridging fee
    pub fee_governance: Addr,
    /// Minimum fee attached to an outbound request
    pub bridging_fee: Uint128,
    /// Expected first word of inbound `bytes32s`
    pub gov_id: HexBinary,
    /// Name of this chain in hub messages
    pub chain: String,
    /// Bank denom the bridging fee is paid in
    pub fee_denom: String,
    /// Bech32 prefix of local addresses
    pub address_prefix: String,
    /// Destination chain of tax transfers
    pub settlement_chain: String,
    pub activated: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");
