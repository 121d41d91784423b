//! Outgoing transfer handlers (burn).
//!
//! Checks run before any effect; the bridging fee is forwarded first, then the
//! wrapped asset is burned and the transfer announced under a fresh deposit id.

use bridge_common::adapter::{MintBurn, TransferAdapter};
use bridge_common::address::sender_wire_address;
use bridge_common::chain::require_valid_chain;
use bridge_common::events::{OutboundDetail, OutboundTransfer};
use bridge_common::fee::{ensure_fee, forward_fee, supplied_native};
use bridge_common::interfaces::{nft_owner, token_balance, token_decimals};
use bridge_common::state::{announce, announce_taxed};
use bridge_common::token::require_admitted;
use bridge_common::{AssetInfo, ContractError};
use cosmwasm_std::{DepsMut, Env, HexBinary, MessageInfo, Response, SubMsg, Uint128, Uint256};

use crate::state::{Config, CONFIG};

/// Config of an activated bridge whose `to_chain` is admitted.
fn load_for_request(deps: &DepsMut, to_chain: &str) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.activated {
        return Err(ContractError::NotActivated);
    }
    require_valid_chain(deps.storage, to_chain, "toChain")?;
    Ok(config)
}

/// Collect the bridging fee; the whole supplied amount goes to fee governance.
fn collect_fee(config: &Config, info: &MessageInfo) -> Result<Vec<SubMsg>, ContractError> {
    let supplied = supplied_native(info, &config.fee_denom)?;
    ensure_fee(supplied, config.bridging_fee)?;
    Ok(forward_fee(&config.fee_governance, &config.fee_denom, supplied)
        .into_iter()
        .collect())
}

/// Burn wrapped CW20 tokens to bridge them to `to_chain`.
pub fn execute_request_swap(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    to_chain: String,
    to_addr: HexBinary,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_for_request(&deps, &to_chain)?;

    let asset = AssetInfo::Cw20 {
        contract_addr: deps.api.addr_validate(&token)?,
    };
    let record = require_admitted(deps.storage, &asset)?;
    let mut messages = collect_fee(&config, &info)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Not enough amount".to_string(),
        });
    }

    let decimal = token_decimals(&deps.querier, &asset, 0)?;
    if decimal == 0 {
        return Err(ContractError::InvalidDecimal {
            expected: "non-zero".to_string(),
            got: decimal.to_string(),
        });
    }
    let balance = token_balance(&deps.querier, &asset, &info.sender)?;
    if balance < amount {
        return Err(ContractError::InvalidAmount {
            reason: format!("Not enough balance: {} < {}", balance, amount),
        });
    }

    messages.extend(MintBurn.outbound(&env, &asset, &info.sender, amount)?);

    let transfer = OutboundTransfer {
        from_chain: config.chain.clone(),
        to_chain: to_chain.clone(),
        from_addr: sender_wire_address(&deps.querier, &info.sender)?,
        to_addr,
        token: record.descriptor,
        token_address: asset.address().to_string(),
        detail: OutboundDetail::Decimal(decimal),
        amount,
        data: None,
    };
    let events = announce_taxed(
        deps.storage,
        "swap_request",
        transfer,
        &config.settlement_chain,
    )?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_events(events)
        .add_attribute("method", "request_swap")
        .add_attribute("token", token)
        .add_attribute("to_chain", to_chain)
        .add_attribute("amount", amount))
}

/// Burn a wrapped NFT owned by the sender to bridge it to `to_chain`.
pub fn execute_request_swap_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    nft: String,
    to_chain: String,
    to_addr: HexBinary,
    token_id: Uint256,
) -> Result<Response, ContractError> {
    let config = load_for_request(&deps, &to_chain)?;

    let contract = deps.api.addr_validate(&nft)?;
    let asset = AssetInfo::Cw721 {
        contract_addr: contract.clone(),
    };
    let record = require_admitted(deps.storage, &asset)?;
    let mut messages = collect_fee(&config, &info)?;

    let id = token_id.to_string();
    let owner = nft_owner(&deps.querier, &contract, &id)?;
    if owner != info.sender.as_str() {
        return Err(ContractError::OwnerCheckFail);
    }

    messages.extend(MintBurn.outbound_nft(&env, &contract, &info.sender, &id)?);

    let transfer = OutboundTransfer {
        from_chain: config.chain.clone(),
        to_chain: to_chain.clone(),
        from_addr: sender_wire_address(&deps.querier, &info.sender)?,
        to_addr,
        token: record.descriptor,
        token_address: contract.to_string(),
        detail: OutboundDetail::TokenId(token_id),
        amount: Uint128::one(),
        data: None,
    };
    let event = announce(deps.storage, "swap_nft_request", &transfer)?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_event(event)
        .add_attribute("method", "request_swap_nft")
        .add_attribute("nft", nft)
        .add_attribute("to_chain", to_chain)
        .add_attribute("token_id", id))
}
