//! Governance and policy admin handlers.
//!
//! Governance owns roles, registries and tax. The policy admin can only pause the
//! bridge and price the chains.

use bridge_common::chain::{set_chain_fee, set_chain_length, set_valid_chain};
use bridge_common::fee::{validate_tax_rate, validate_tax_receiver, TAX};
use bridge_common::hash::{chain_id, to_hex};
use bridge_common::token::add_token;
use bridge_common::{AssetInfo, ContractError};
use cosmwasm_std::{DepsMut, HexBinary, MessageInfo, Response, Storage, Uint128};

use crate::state::{Config, CONFIG};

pub(crate) fn only_governance(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.governance {
        return Err(ContractError::unauthorized("governance"));
    }
    Ok(config)
}

fn only_policy_admin(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.policy_admin.as_ref() != Some(&info.sender) {
        return Err(ContractError::unauthorized("policy admin"));
    }
    Ok(config)
}

// ============================================================================
// Roles
// ============================================================================

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    governance: String,
) -> Result<Response, ContractError> {
    let mut config = only_governance(deps.storage, &info)?;
    config.governance = deps.api.addr_validate(&governance)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("governance", config.governance))
}

pub fn execute_set_fee_governance(
    deps: DepsMut,
    info: MessageInfo,
    fee_governance: String,
) -> Result<Response, ContractError> {
    let mut config = only_governance(deps.storage, &info)?;
    config.fee_governance = deps.api.addr_validate(&fee_governance)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_governance")
        .add_attribute("fee_governance", config.fee_governance))
}

pub fn execute_set_policy_admin(
    deps: DepsMut,
    info: MessageInfo,
    policy_admin: String,
) -> Result<Response, ContractError> {
    let mut config = only_governance(deps.storage, &info)?;
    let policy_admin = deps.api.addr_validate(&policy_admin)?;
    config.policy_admin = Some(policy_admin.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_policy_admin")
        .add_attribute("policy_admin", policy_admin))
}

// ============================================================================
// Registries
// ============================================================================

pub fn execute_set_valid_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain: String,
    valid: bool,
    address_length: u64,
    uints_length: u64,
) -> Result<Response, ContractError> {
    let config = only_governance(deps.storage, &info)?;
    let record = set_valid_chain(
        deps.storage,
        &config.chain,
        &chain,
        valid,
        address_length,
        uints_length,
    )?;

    Ok(Response::new()
        .add_attribute("method", "set_valid_chain")
        .add_attribute("chain", chain.as_str())
        .add_attribute("chain_id", to_hex(&chain_id(&chain)))
        .add_attribute("valid", valid.to_string())
        .add_attribute("address_length", record.address_length.to_string())
        .add_attribute("uints_length", record.uints_length.to_string()))
}

pub fn execute_set_chain_length(
    deps: DepsMut,
    info: MessageInfo,
    chain: String,
    address_length: u64,
    uints_length: u64,
) -> Result<Response, ContractError> {
    only_governance(deps.storage, &info)?;
    let record = set_chain_length(deps.storage, &chain, address_length, uints_length)?;

    Ok(Response::new()
        .add_attribute("method", "set_chain_length")
        .add_attribute("chain", chain)
        .add_attribute("address_length", record.address_length.to_string())
        .add_attribute("uints_length", record.uints_length.to_string()))
}

pub fn execute_add_token(
    deps: DepsMut,
    info: MessageInfo,
    descriptor: HexBinary,
    asset: AssetInfo,
) -> Result<Response, ContractError> {
    let config = only_governance(deps.storage, &info)?;
    let asset = asset.validate(deps.api)?;
    let token_address = asset.address().to_string();
    let summary = add_token(deps, &config.chain, descriptor.as_slice(), asset)?;

    Ok(Response::new()
        .add_attribute("method", "add_token")
        .add_attribute("token", to_hex(descriptor.as_slice()))
        .add_attribute("token_address", token_address)
        .add_attribute("summary", to_hex(&summary)))
}

// ============================================================================
// Tax
// ============================================================================

pub fn execute_set_tax_rate(
    deps: DepsMut,
    info: MessageInfo,
    rate_bps: u16,
) -> Result<Response, ContractError> {
    only_governance(deps.storage, &info)?;
    validate_tax_rate(rate_bps)?;

    let mut tax = TAX.may_load(deps.storage)?.unwrap_or_default();
    tax.rate_bps = rate_bps;
    TAX.save(deps.storage, &tax)?;

    Ok(Response::new()
        .add_attribute("method", "set_tax_rate")
        .add_attribute("rate_bps", rate_bps.to_string()))
}

pub fn execute_set_tax_receiver(
    deps: DepsMut,
    info: MessageInfo,
    receiver: HexBinary,
) -> Result<Response, ContractError> {
    only_governance(deps.storage, &info)?;
    validate_tax_receiver(&receiver)?;

    let mut tax = TAX.may_load(deps.storage)?.unwrap_or_default();
    tax.receiver = Some(receiver.clone());
    TAX.save(deps.storage, &tax)?;

    Ok(Response::new()
        .add_attribute("method", "set_tax_receiver")
        .add_attribute("receiver", to_hex(receiver.as_slice())))
}

// ============================================================================
// Policy Admin
// ============================================================================

pub fn execute_set_activated(
    deps: DepsMut,
    info: MessageInfo,
    activated: bool,
) -> Result<Response, ContractError> {
    let mut config = only_policy_admin(deps.storage, &info)?;
    config.activated = activated;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_activated")
        .add_attribute("activated", activated.to_string()))
}

pub fn execute_set_chain_fee(
    deps: DepsMut,
    info: MessageInfo,
    chain: String,
    fee: Uint128,
    fee_with_data: Uint128,
) -> Result<Response, ContractError> {
    only_policy_admin(deps.storage, &info)?;
    let record = set_chain_fee(deps.storage, &chain, fee, fee_with_data)?;

    Ok(Response::new()
        .add_attribute("method", "set_chain_fee")
        .add_attribute("chain", chain)
        .add_attribute("fee", record.fee)
        .add_attribute("fee_with_data", record.fee_with_data))
}
