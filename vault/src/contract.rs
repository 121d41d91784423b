//! Bridge Vault - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `bridge_common` - registries, codec, quorum and transfer adapters

use bridge_common::effects::{guarded_reply, notify_reply, unknown_reply, ExternalCall};
use bridge_common::events::OutboundRequest;
use bridge_common::query::{
    query_chain, query_deposit_count, query_is_used_hash, query_message_hash, query_tax,
    query_token, query_token_by_asset,
};
use bridge_common::ContractError;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::execute::{
    execute_add_farm, execute_add_token, execute_deposit, execute_deposit_nft,
    execute_deposit_token, execute_remove_farm, execute_set_activated, execute_set_chain_fee,
    execute_set_chain_length, execute_set_fee_governance, execute_set_policy_admin,
    execute_set_tax_rate, execute_set_tax_receiver, execute_set_valid_chain,
    execute_transfer_ownership, execute_withdraw, execute_withdraw_nft, rebind_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_config, query_farm, query_gov_id};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let governance = deps.api.addr_validate(&msg.governance)?;
    let fee_governance = deps.api.addr_validate(&msg.fee_governance)?;
    let policy_admin = msg
        .policy_admin
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    if msg.chain.is_empty() {
        return Err(ContractError::invalid_chain("chain"));
    }
    if msg.settlement_chain.is_empty() || msg.settlement_chain == msg.chain {
        return Err(ContractError::invalid_chain("settlementChain"));
    }

    let config = Config {
        governance,
        fee_governance,
        policy_admin,
        chain: msg.chain,
        fee_denom: msg.fee_denom,
        native_decimals: msg.native_decimals,
        address_prefix: msg.address_prefix,
        settlement_chain: msg.settlement_chain,
        activated: true,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("governance", config.governance.as_str())
        .add_attribute("chain", config.chain.as_str())
        .add_attribute("fee_denom", config.fee_denom.as_str()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing
        ExecuteMsg::Deposit {
            to_chain,
            to_addr,
            data,
        } => execute_deposit(
            deps,
            env,
            info,
            OutboundRequest {
                to_chain,
                to_addr,
                data,
            },
        ),
        ExecuteMsg::DepositToken {
            token,
            to_chain,
            to_addr,
            amount,
            data,
        } => execute_deposit_token(
            deps,
            env,
            info,
            token,
            amount,
            OutboundRequest {
                to_chain,
                to_addr,
                data,
            },
        ),
        ExecuteMsg::DepositNft {
            nft,
            to_chain,
            to_addr,
            token_id,
            data,
        } => execute_deposit_nft(
            deps,
            env,
            info,
            nft,
            token_id,
            OutboundRequest {
                to_chain,
                to_addr,
                data,
            },
        ),

        // Incoming
        ExecuteMsg::Withdraw { message, sigs } => execute_withdraw(deps, env, message, sigs),
        ExecuteMsg::WithdrawNft { message, sigs } => {
            execute_withdraw_nft(deps, env, message, sigs)
        }

        // Governance
        ExecuteMsg::TransferOwnership { governance } => {
            execute_transfer_ownership(deps, info, governance)
        }
        ExecuteMsg::SetFeeGovernance { fee_governance } => {
            execute_set_fee_governance(deps, info, fee_governance)
        }
        ExecuteMsg::SetPolicyAdmin { policy_admin } => {
            execute_set_policy_admin(deps, info, policy_admin)
        }
        ExecuteMsg::SetValidChain {
            chain,
            valid,
            address_length,
            uints_length,
        } => execute_set_valid_chain(deps, info, chain, valid, address_length, uints_length),
        ExecuteMsg::SetChainLength {
            chain,
            address_length,
            uints_length,
        } => execute_set_chain_length(deps, info, chain, address_length, uints_length),
        ExecuteMsg::AddToken { descriptor, asset } => {
            execute_add_token(deps, info, descriptor, asset)
        }
        ExecuteMsg::SetTaxRate { rate_bps } => execute_set_tax_rate(deps, info, rate_bps),
        ExecuteMsg::SetTaxReceiver { receiver } => {
            execute_set_tax_receiver(deps, info, receiver)
        }
        ExecuteMsg::AddFarm { asset, farm } => execute_add_farm(deps, env, info, asset, farm),
        ExecuteMsg::RemoveFarm { asset, new_farm } => {
            execute_remove_farm(deps, info, asset, new_farm)
        }

        // Policy admin
        ExecuteMsg::SetActivated { activated } => execute_set_activated(deps, info, activated),
        ExecuteMsg::SetChainFee {
            chain,
            fee,
            fee_with_data,
        } => execute_set_chain_fee(deps, info, chain, fee, fee_with_data),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match ExternalCall::from_id(msg.id) {
        Some(ExternalCall::FarmWithdrawAll) => rebind_reply(deps, env, msg),
        Some(ExternalCall::ReceiverNotify) => notify_reply(deps.storage, msg),
        Some(call) => guarded_reply(call, msg.result),
        None => Err(unknown_reply(msg.id)),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Chain { chain } => to_json_binary(&query_chain(deps, chain)?),
        QueryMsg::Token { descriptor } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&query_token(deps, &config.chain, descriptor)?)
        }
        QueryMsg::TokenByAsset { asset } => to_json_binary(&query_token_by_asset(deps, asset)?),
        QueryMsg::IsUsedHash { hash } => to_json_binary(&query_is_used_hash(deps, hash)?),
        QueryMsg::DepositCount {} => to_json_binary(&query_deposit_count(deps)?),
        QueryMsg::Tax {} => to_json_binary(&query_tax(deps)?),
        QueryMsg::MessageHash { message, nft } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&query_message_hash(&config.chain, message, nft)?)
        }
        QueryMsg::GovId { hub_contract } => {
            to_json_binary(&query_gov_id(deps, env, hub_contract)?)
        }
        QueryMsg::Farm { asset } => to_json_binary(&query_farm(deps, asset)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
