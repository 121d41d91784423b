//! Registry of admitted remote chains.
//!
//! Records are keyed by `sha256(chain_name)`. A present record is an admitted
//! chain; disabling a chain removes its record, so an unregistered chain always
//! reads back with zero widths and zero fees.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Storage, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::hash::chain_id;

#[cw_serde]
#[derive(Default)]
pub struct ChainRecord {
    pub name: String,
    /// Expected byte length of `from_addr` for messages from this chain
    pub address_length: u64,
    /// Expected byte length of the numeric block for messages from this chain
    pub uints_length: u64,
    /// Flat outbound fee (vault)
    pub fee: Uint128,
    /// Flat outbound fee when a payload is attached (vault)
    pub fee_with_data: Uint128,
}

/// Admitted chains, keyed by chain id
pub const CHAINS: Map<&[u8], ChainRecord> = Map::new("chains");

pub fn is_valid_chain(storage: &dyn Storage, chain: &str) -> bool {
    CHAINS.has(storage, &chain_id(chain))
}

pub fn load_chain(storage: &dyn Storage, chain: &str) -> Result<Option<ChainRecord>, ContractError> {
    Ok(CHAINS.may_load(storage, &chain_id(chain))?)
}

/// Load an admitted chain or fail with `Invalid {field}`.
pub fn require_valid_chain(
    storage: &dyn Storage,
    chain: &str,
    field: &str,
) -> Result<ChainRecord, ContractError> {
    load_chain(storage, chain)?.ok_or_else(|| ContractError::invalid_chain(field))
}

pub fn set_valid_chain(
    storage: &mut dyn Storage,
    local_chain: &str,
    chain: &str,
    valid: bool,
    address_length: u64,
    uints_length: u64,
) -> Result<ChainRecord, ContractError> {
    if chain == local_chain {
        return Err(ContractError::LocalChain {
            chain: chain.to_string(),
        });
    }

    let key = chain_id(chain);
    if !valid {
        CHAINS.remove(storage, &key);
        return Ok(ChainRecord {
            name: chain.to_string(),
            ..ChainRecord::default()
        });
    }

    let mut record = CHAINS.may_load(storage, &key)?.unwrap_or_default();
    record.name = chain.to_string();
    record.address_length = address_length;
    record.uints_length = uints_length;
    CHAINS.save(storage, &key, &record)?;
    Ok(record)
}

pub fn set_chain_length(
    storage: &mut dyn Storage,
    chain: &str,
    address_length: u64,
    uints_length: u64,
) -> Result<ChainRecord, ContractError> {
    let mut record = require_valid_chain(storage, chain, "chain")?;
    record.address_length = address_length;
    record.uints_length = uints_length;
    CHAINS.save(storage, &chain_id(chain), &record)?;
    Ok(record)
}

pub fn set_chain_fee(
    storage: &mut dyn Storage,
    chain: &str,
    fee: Uint128,
    fee_with_data: Uint128,
) -> Result<ChainRecord, ContractError> {
    let mut record = require_valid_chain(storage, chain, "chain")?;
    record.fee = fee;
    record.fee_with_data = fee_with_data;
    CHAINS.save(storage, &chain_id(chain), &record)?;
    Ok(record)
}
