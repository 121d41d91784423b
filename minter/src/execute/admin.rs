//! Governance handlers.
//!
//! Every handler here is callable only by the governance multisig contract.

use bridge_common::chain::set_valid_chain;
use bridge_common::fee::{validate_tax_rate, validate_tax_receiver, TAX};
use bridge_common::hash::{chain_id, to_hex};
use bridge_common::token::add_token;
use bridge_common::{AssetInfo, ContractError};
use cosmwasm_std::{DepsMut, HexBinary, MessageInfo, Response, Storage, Uint128};

use crate::state::{Config, CONFIG, GOV_ID_LENGTH};

fn only_governance(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.governance {
        return Err(ContractError::unauthorized("governance"));
    }
    Ok(config)
}

// ============================================================================
// Roles and Fees
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

pub fn execute_set_bridging_fee(
    deps: DepsMut,
    info: MessageInfo,
    bridging_fee: Uint128,
) -> Result<Response, ContractError> {
    let mut config = only_governance(deps.storage, &info)?;
    config.bridging_fee = bridging_fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_bridging_fee")
        .add_attribute("bridging_fee", bridging_fee))
}

pub fn execute_set_gov_id(
    deps: DepsMut,
    info: MessageInfo,
    gov_id: HexBinary,
) -> Result<Response, ContractError> {
    let mut config = only_governance(deps.storage, &info)?;
    if gov_id.len() != GOV_ID_LENGTH {
        return Err(ContractError::InvalidGovId);
    }
    config.gov_id = gov_id;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_gov_id")
        .add_attribute("gov_id", to_hex(config.gov_id.as_slice())))
}

pub fn execute_set_activated(
    deps: DepsMut,
    info: MessageInfo,
    activated: bool,
) -> Result<Response, ContractError> {
    let mut config = only_governance(deps.storage, &info)?;
    config.activated = activated;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_activated")
        .add_attribute("activated", activated.to_string()))
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

pub fn execute_add_token(
    deps: DepsMut,
    info: MessageInfo,
    descriptor: HexBinary,
    asset: AssetInfo,
) -> Result<Response, ContractError> {
    let config = only_governance(deps.storage, &info)?;
    if asset.is_native() {
        return Err(ContractError::InvalidTokenAddress {
            reason: "native denominations cannot be minted by the bridge".to_string(),
        });
    }
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
