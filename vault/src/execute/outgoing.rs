//! Outgoing transfer handlers (lock).
//!
//! Checks run before any effect. The fee is forwarded first, then the asset is
//! pulled into custody (and on into its farm) and the transfer is announced under
//! a fresh deposit id.

use bridge_common::adapter::{LockUnlock, TransferAdapter};
use bridge_common::address::sender_wire_address;
use bridge_common::chain::{require_valid_chain, ChainRecord};
use bridge_common::events::{OutboundDetail, OutboundRequest, OutboundTransfer};
use bridge_common::fee::{ensure_fee, forward_fee, required_fee, supplied_native};
use bridge_common::interfaces::{nft_owner, token_decimals};
use bridge_common::safe_math::sub_u128;
use bridge_common::state::{announce, announce_taxed};
use bridge_common::token::require_admitted;
use bridge_common::{AssetInfo, ContractError};
use cosmwasm_std::{DepsMut, Env, HexBinary, MessageInfo, Response, SubMsg, Uint128, Uint256};

use crate::state::{bound_farm, Config, CONFIG};

/// Config of an activated vault, with the admitted record of `to_chain`.
fn load_for_deposit(
    deps: &DepsMut,
    to_chain: &str,
) -> Result<(Config, ChainRecord), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.activated {
        return Err(ContractError::NotActivated);
    }
    let chain = require_valid_chain(deps.storage, to_chain, "toChain")?;
    Ok((config, chain))
}

/// Fee collection for token and NFT deposits: the tier must be covered and the
/// whole supplied amount goes to fee governance.
fn collect_fee(
    config: &Config,
    chain: &ChainRecord,
    info: &MessageInfo,
    data: Option<&HexBinary>,
) -> Result<Vec<SubMsg>, ContractError> {
    let fee = required_fee(chain, data)?;
    let supplied = supplied_native(info, &config.fee_denom)?;
    ensure_fee(supplied, fee)?;
    Ok(forward_fee(&config.fee_governance, &config.fee_denom, supplied)
        .into_iter()
        .collect())
}

/// Lock the attached native coins, minus the chain fee, and bridge them.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request: OutboundRequest,
) -> Result<Response, ContractError> {
    let OutboundRequest {
        to_chain,
        to_addr,
        data,
    } = request;
    let (config, chain) = load_for_deposit(&deps, &to_chain)?;

    let fee = required_fee(&chain, data.as_ref())?;
    let supplied = supplied_native(&info, &config.fee_denom)?;
    if supplied <= fee {
        return Err(ContractError::InsufficientFee {
            expected: fee.saturating_add(Uint128::one()),
            got: supplied,
        });
    }
    let amount = sub_u128(supplied, fee)?;

    let asset = AssetInfo::Native {
        denom: config.fee_denom.clone(),
    };
    let record = require_admitted(deps.storage, &asset)?;
    let decimal = config.native_decimals;
    if decimal == 0 {
        return Err(ContractError::InvalidDecimal {
            expected: "non-zero".to_string(),
            got: decimal.to_string(),
        });
    }

    let mut messages: Vec<SubMsg> = forward_fee(&config.fee_governance, &config.fee_denom, fee)
        .into_iter()
        .collect();
    let adapter = LockUnlock {
        farm: bound_farm(deps.storage, &asset)?,
    };
    messages.extend(adapter.outbound(&env, &asset, &info.sender, amount)?);

    let transfer = OutboundTransfer {
        from_chain: config.chain.clone(),
        to_chain: to_chain.clone(),
        from_addr: sender_wire_address(&deps.querier, &info.sender)?,
        to_addr,
        token: record.descriptor,
        token_address: asset.address().to_string(),
        detail: OutboundDetail::Decimal(decimal),
        amount,
        data,
    };
    let events = announce_taxed(deps.storage, "deposit", transfer, &config.settlement_chain)?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_events(events)
        .add_attribute("method", "deposit")
        .add_attribute("to_chain", to_chain)
        .add_attribute("amount", amount)
        .add_attribute("fee", fee))
}

/// Lock CW20 tokens of an admitted asset and bridge them.
pub fn execute_deposit_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    request: OutboundRequest,
) -> Result<Response, ContractError> {
    let OutboundRequest {
        to_chain,
        to_addr,
        data,
    } = request;
    let (config, chain) = load_for_deposit(&deps, &to_chain)?;

    let asset = AssetInfo::Cw20 {
        contract_addr: deps.api.addr_validate(&token)?,
    };
    let record = require_admitted(deps.storage, &asset)?;
    let mut messages = collect_fee(&config, &chain, &info, data.as_ref())?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Not enough amount".to_string(),
        });
    }

    let decimal = token_decimals(&deps.querier, &asset, config.native_decimals)?;
    if decimal == 0 {
        return Err(ContractError::InvalidDecimal {
            expected: "non-zero".to_string(),
            got: decimal.to_string(),
        });
    }

    let adapter = LockUnlock {
        farm: bound_farm(deps.storage, &asset)?,
    };
    messages.extend(adapter.outbound(&env, &asset, &info.sender, amount)?);

    let transfer = OutboundTransfer {
        from_chain: config.chain.clone(),
        to_chain: to_chain.clone(),
        from_addr: sender_wire_address(&deps.querier, &info.sender)?,
        to_addr,
        token: record.descriptor,
        token_address: asset.address().to_string(),
        detail: OutboundDetail::Decimal(decimal),
        amount,
        data,
    };
    let events = announce_taxed(deps.storage, "deposit", transfer, &config.settlement_chain)?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_events(events)
        .add_attribute("method", "deposit_token")
        .add_attribute("token", token)
        .add_attribute("to_chain", to_chain)
        .add_attribute("amount", amount))
}

/// Lock an NFT owned by the sender and bridge it.
pub fn execute_deposit_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    nft: String,
    token_id: Uint256,
    request: OutboundRequest,
) -> Result<Response, ContractError> {
    let OutboundRequest {
        to_chain,
        to_addr,
        data,
    } = request;
    let (config, chain) = load_for_deposit(&deps, &to_chain)?;

    let contract = deps.api.addr_validate(&nft)?;
    let asset = AssetInfo::Cw721 {
        contract_addr: contract.clone(),
    };
    let record = require_admitted(deps.storage, &asset)?;

    let id = token_id.to_string();
    let owner = nft_owner(&deps.querier, &contract, &id)?;
    if owner != info.sender.as_str() {
        return Err(ContractError::OwnerCheckFail);
    }
    let mut messages = collect_fee(&config, &chain, &info, data.as_ref())?;

    messages.extend(LockUnlock { farm: None }.outbound_nft(&env, &contract, &info.sender, &id)?);

    let transfer = OutboundTransfer {
        from_chain: config.chain.clone(),
        to_chain: to_chain.clone(),
        from_addr: sender_wire_address(&deps.querier, &info.sender)?,
        to_addr,
        token: record.descriptor,
        token_address: contract.to_string(),
        detail: OutboundDetail::TokenId(token_id),
        amount: Uint128::one(),
        data,
    };
    let event = announce(deps.storage, "deposit_nft", &transfer)?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_event(event)
        .add_attribute("method", "deposit_nft")
        .add_attribute("nft", nft)
        .add_attribute("to_chain", to_chain)
        .add_attribute("token_id", id))
}
