//! Incoming transfer handlers (unlock).
//!
//! A hub message is applied at most once: its hash is consumed before the quorum
//! check and before any effect is dispatched. Messages are bound to this vault
//! instance by `sha256(hub_contract ++ chain ++ vault_address)`, the address in its
//! kind-prefixed wire form.

use bridge_common::adapter::{LockUnlock, TransferAdapter};
use bridge_common::address::LocalAddress;
use bridge_common::chain::require_valid_chain;
use bridge_common::effects::notify_if_contract;
use bridge_common::events::inbound_event;
use bridge_common::hash::to_hex;
use bridge_common::inbound::{authorize, require_binding, validate_structure};
use bridge_common::interfaces::{nft_owner, ReceiverExecuteMsg};
use bridge_common::token::require_descriptor;
use bridge_common::{AssetInfo, ContractError, InboundMessage, MessageKind};
use cosmwasm_std::{DepsMut, Env, Response};

use crate::state::{bound_farm, vault_binding, Config, CONFIG, VAULT_LAYOUT};

fn check_message(
    deps: &DepsMut,
    env: &Env,
    message: &InboundMessage,
) -> Result<(Config, LocalAddress, AssetInfo), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.activated {
        return Err(ContractError::NotActivated);
    }

    let chain = require_valid_chain(deps.storage, &message.from_chain, "fromChain")?;
    let recipient = validate_structure(message, &chain, &VAULT_LAYOUT)?;
    let binding = vault_binding(
        message.hub_contract.as_slice(),
        &config.chain,
        &env.contract.address,
    )?;
    require_binding(message, &binding)?;

    let asset = require_descriptor(deps.storage, &config.chain, message.token.as_slice())?;
    Ok((config, recipient, asset))
}

/// Release locked coins or CW20 tokens to the recipient of a signed hub message.
///
/// `uints[0]` is the amount. With a farm bound the farm pays the recipient.
pub fn execute_withdraw(
    mut deps: DepsMut,
    env: Env,
    message: InboundMessage,
    sigs: String,
) -> Result<Response, ContractError> {
    let (config, recipient, asset) = check_message(&deps, &env, &message)?;
    if asset.is_nft() {
        return Err(ContractError::InvalidToken {
            token: asset.to_string(),
        });
    }
    let amount = message.amount(0)?;

    let hash = authorize(
        deps.branch(),
        &message,
        &config.chain,
        MessageKind::Fungible,
        &sigs,
        &config.governance,
    )?;

    let to = recipient.to_addr(deps.api, &config.address_prefix)?;
    let adapter = LockUnlock {
        farm: bound_farm(deps.storage, &asset)?,
    };
    let mut messages = adapter.inbound(&asset, &to, amount)?;
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
        .add_event(inbound_event("withdraw", &message, &config.chain, asset.address()))
        .add_attribute("method", "withdraw")
        .add_attribute("hash", to_hex(&hash))
        .add_attribute("recipient", to)
        .add_attribute("amount", amount))
}

/// Release a locked NFT. `uints[1]` carries the token id.
pub fn execute_withdraw_nft(
    mut deps: DepsMut,
    env: Env,
    message: InboundMessage,
    sigs: String,
) -> Result<Response, ContractError> {
    let (config, recipient, asset) = check_message(&deps, &env, &message)?;
    let contract = match &asset {
        AssetInfo::Cw721 { contract_addr } => contract_addr.clone(),
        _ => {
            return Err(ContractError::InvalidToken {
                token: asset.to_string(),
            })
        }
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

    let owner = nft_owner(&deps.querier, &contract, &token_id)?;
    if owner != env.contract.address.as_str() {
        return Err(ContractError::OwnerCheckFail);
    }

    let to = recipient.to_addr(deps.api, &config.address_prefix)?;
    let mut messages = LockUnlock { farm: None }.inbound_nft(&contract, &to, &token_id)?;
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
            "withdraw_nft",
            &message,
            &config.chain,
            contract.as_str(),
        ))
        .add_attribute("method", "withdraw_nft")
        .add_attribute("hash", to_hex(&hash))
        .add_attribute("recipient", to)
        .add_attribute("token_id", token_id))
}
