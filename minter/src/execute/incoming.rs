//! Incoming transfer handlers (mint).
//!
//! A hub message is applied at most once: its hash is consumed before the quorum
//! check and before any effect is dispatched.

use bridge_common::adapter::{MintBurn, TransferAdapter};
use bridge_common::address::LocalAddress;
use bridge_common::chain::require_valid_chain;
use bridge_common::effects::notify_if_contract;
use bridge_common::events::inbound_event;
use bridge_common::hash::to_hex;
use bridge_common::inbound::{authorize, require_binding, validate_structure};
use bridge_common::interfaces::{token_decimals, ReceiverExecuteMsg};
use bridge_common::token::require_descriptor;
use bridge_common::{AssetInfo, ContractError, InboundMessage, MessageKind};
use cosmwasm_std::{DepsMut, Response, Uint256};

use crate::state::{Config, CONFIG, MINTER_LAYOUT};

/// Structural and binding checks shared by both swap kinds.
fn check_message(
    deps: &DepsMut,
    message: &InboundMessage,
) -> Result<(Config, LocalAddress, AssetInfo), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.activated {
        return Err(ContractError::NotActivated);
    }

    let chain = require_valid_chain(deps.storage, &message.from_chain, "fromChain")?;
    let recipient = validate_structure(message, &chain, &MINTER_LAYOUT)?;
    require_binding(message, config.gov_id.as_slice())?;

    let asset = require_descriptor(deps.storage, &config.chain, message.token.as_slice())?;
    Ok((config, recipient, asset))
}

fn wrong_kind(asset: &AssetInfo) -> ContractError {
    ContractError::InvalidToken {
        token: asset.to_string(),
    }
}

/// Mint a wrapped CW20 to the recipient of a signed hub message.
///
/// `uints[0]` is the amount and `uints[1]` the decimals, which must match the
/// wrapped token.
pub fn execute_swap(
    mut deps: DepsMut,
    message: InboundMessage,
    sigs: String,
) -> Result<Response, ContractError> {
    let (config, recipient, asset) = check_message(&deps, &message)?;
    if !matches!(asset, AssetInfo::Cw20 { .. }) {
        return Err(wrong_kind(&asset));
    }

    let amount = message.amount(0)?;
    let decimal = message.uint(1)?;
    let token_decimal = token_decimals(&deps.querier, &asset, 0)?;
    if decimal != Uint256::from(token_decimal) {
        return Err(ContractError::InvalidDecimal {
            expected: token_decimal.to_string(),
            got: decimal.to_string(),
        });
    }

    let hash = authorize(
        deps.branch(),
        &message,
        &config.chain,
        MessageKind::Fungible,
        &sigs,
        &config.governance,
    )?;

    let to = recipient.to_addr(deps.api, &config.address_prefix)?;
    let mut messages = MintBurn.inbound(&asset, &to, amount)?;
    let notify = ReceiverExecuteMsg::OnTokenBridgeReceived {
        token: asset.address().to_string(),
        amount,
        from_chain: message.from_chain.clone(),
        from_addr: message.from_addr.clone(),
        data: message.data.clone().unwrap_or_default(),
    };
    messages.extend(notify_if_contract(
        deps.storage,
        &recipient,
        &to,
        &message,
        asset.address(),
        notify,
    )?);

    Ok(Response::new()
        .add_submessages(messages)
        .add_event(inbound_event("swap", &message, &config.chain, asset.address()))
        .add_attribute("method", "swap")
        .add_attribute("hash", to_hex(&hash))
        .add_attribute("recipient", to)
        .add_attribute("amount", amount))
}

/// Mint a wrapped NFT to the recipient of a signed hub message.
///
/// `uints[1]` carries the token id.
pub fn execute_swap_nft(
    mut deps: DepsMut,
    message: InboundMessage,
    sigs: String,
) -> Result<Response, ContractError> {
    let (config, recipient, asset) = check_message(&deps, &message)?;
    let contract = match &asset {
        AssetInfo::Cw721 { contract_addr } => contract_addr.clone(),
        _ => return Err(wrong_kind(&asset)),
    };
    let token_id = message.uint(1)?.to_string();

    let hash = authorize(
        deps.branch(),
        &message,
        &config.chain,
        MessageKind::NonFungible,
        &sigs,
        &config.governance,
    )?;

    let to = recipient.to_addr(deps.api, &config.address_prefix)?;
    let mut messages = MintBurn.inbound_nft(&contract, &to, &token_id)?;
    let notify = ReceiverExecuteMsg::OnNftBridgeReceived {
        token: contract.to_string(),
        token_id: token_id.clone(),
        from_chain: message.from_chain.clone(),
        from_addr: message.from_addr.clone(),
        data: message.data.clone().unwrap_or_default(),
    };
    messages.extend(notify_if_contract(
        deps.storage,
        &recipient,
        &to,
        &message,
        contract.as_str(),
        notify,
    )?);

    Ok(Response::new()
        .add_submessages(messages)
        .add_event(inbound_event(
            "swap_nft",
            &message,
            &config.chain,
            contract.as_str(),
        ))
        .add_attribute("method", "swap_nft")
        .add_attribute("hash", to_hex(&hash))
        .add_attribute("recipient", to)
        .add_attribute("token_id", token_id))
}
