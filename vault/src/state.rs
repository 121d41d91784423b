//! State definitions for the bridge vault.
//!
//! Registries, the replay set, the deposit counter and the tax config live in
//! `bridge_common`. The vault adds its configuration and the farm bindings.

use bridge_common::address::{wire_address, AddressKind};
use bridge_common::hash::binding_id;
use bridge_common::inbound::{FixedBlock, Layout, TOKEN_DESCRIPTOR_LENGTH};
use bridge_common::AssetInfo;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:bridge-vault";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hub messages for the vault carry exactly the binding id and one reserved word,
/// and a 21-byte token descriptor.
pub const VAULT_LAYOUT: Layout = Layout {
    bytes32s: FixedBlock::Exactly(64),
    token_length: Some(TOKEN_DESCRIPTOR_LENGTH),
};

#[cw_serde]
pub struct Config {
    /// Multisig contract: admin of the bridge and source of the signer set
    pub governance: Addr,
    /// Receiver of the flat bridging fee
    pub fee_governance: Addr,
    /// Operator allowed to pause the bridge and set per-chain fees
    pub policy_admin: Option<Addr>,
    /// Name of this chain in hub messages
    pub chain: String,
    /// Bank denom of fees and of native deposits
    pub fee_denom: String,
    /// Decimals announced for native deposits
    pub native_decimals: u8,
    /// Bech32 prefix of local addresses
    pub address_prefix: String,
    /// Destination chain of tax transfers
    pub settlement_chain: String,
    pub activated: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Farm proxy bound to a fungible asset, keyed by [`AssetInfo::key`]
pub const FARMS: Map<&str, Addr> = Map::new("farms");

/// Farm change waiting for the old farm's `WithdrawAll` to settle.
#[cw_serde]
pub struct PendingRebind {
    pub asset: AssetInfo,
    pub new_farm: Option<Addr>,
}

pub const PENDING_REBIND: Item<PendingRebind> = Item::new("pending_rebind");

pub fn bound_farm(storage: &dyn Storage, asset: &AssetInfo) -> StdResult<Option<Addr>> {
    FARMS.may_load(storage, &asset.key())
}

/// Binding id of this vault instance for messages relayed from `hub_contract`.
pub fn vault_binding(hub_contract: &[u8], chain: &str, vault: &Addr) -> StdResult<[u8; 32]> {
    let own = wire_address(AddressKind::Contract, vault)?;
    Ok(binding_id(hub_contract, chain, own.as_slice()))
}
