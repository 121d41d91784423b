//! Yield farm bindings.
//!
//! At most one farm is bound per fungible asset. Binding moves the whole custody
//! balance into the farm. Unbinding asks the farm for everything back; once that
//! call has settled, the reply either forwards the returned balance to the new
//! farm or leaves it in custody.

use bridge_common::adapter::farm_deposit;
use bridge_common::effects::{failure, ExternalCall};
use bridge_common::interfaces::{token_balance, FarmExecuteMsg};
use bridge_common::{AssetInfo, ContractError};
use cosmwasm_std::{
    to_json_binary, DepsMut, Env, MessageInfo, Reply, Response, SubMsg, SubMsgResult, WasmMsg,
};

use super::admin::only_governance;
use crate::state::{bound_farm, PendingRebind, FARMS, PENDING_REBIND};

fn fungible(deps: &DepsMut, asset: AssetInfo) -> Result<AssetInfo, ContractError> {
    let asset = asset.validate(deps.api)?;
    if asset.is_nft() {
        return Err(ContractError::InvalidToken {
            token: asset.to_string(),
        });
    }
    Ok(asset)
}

pub fn execute_add_farm(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: AssetInfo,
    farm: String,
) -> Result<Response, ContractError> {
    only_governance(deps.storage, &info)?;
    let asset = fungible(&deps, asset)?;
    let farm = deps.api.addr_validate(&farm)?;
    if bound_farm(deps.storage, &asset)?.is_some() {
        return Err(ContractError::FarmAlreadyBound);
    }

    let balance = token_balance(&deps.querier, &asset, &env.contract.address)?;
    let messages = farm_deposit(&asset, &farm, balance)?;
    FARMS.save(deps.storage, &asset.key(), &farm)?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_attribute("method", "add_farm")
        .add_attribute("token_address", asset.address())
        .add_attribute("farm", farm)
        .add_attribute("amount", balance))
}

pub fn execute_remove_farm(
    deps: DepsMut,
    info: MessageInfo,
    asset: AssetInfo,
    new_farm: Option<String>,
) -> Result<Response, ContractError> {
    only_governance(deps.storage, &info)?;
    let asset = fungible(&deps, asset)?;
    let farm = bound_farm(deps.storage, &asset)?.ok_or(ContractError::FarmNotBound)?;
    let new_farm = new_farm
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    PENDING_REBIND.save(
        deps.storage,
        &PendingRebind {
            asset: asset.clone(),
            new_farm,
        },
    )?;
    let withdraw_all = WasmMsg::Execute {
        contract_addr: farm.to_string(),
        msg: to_json_binary(&FarmExecuteMsg::WithdrawAll {})?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(
            withdraw_all,
            ExternalCall::FarmWithdrawAll.id(),
        ))
        .add_attribute("method", "remove_farm")
        .add_attribute("token_address", asset.address())
        .add_attribute("farm", farm))
}

/// Continue a farm change after the old farm returned the position.
pub fn rebind_reply(deps: DepsMut, env: Env, reply: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_REBIND.load(deps.storage)?;
    PENDING_REBIND.remove(deps.storage);

    if let SubMsgResult::Err(error) = reply.result {
        return Err(failure(ExternalCall::FarmWithdrawAll, error));
    }

    let key = pending.asset.key();
    match pending.new_farm {
        Some(farm) => {
            let balance = token_balance(&deps.querier, &pending.asset, &env.contract.address)?;
            let messages = farm_deposit(&pending.asset, &farm, balance)?;
            FARMS.save(deps.storage, &key, &farm)?;

            Ok(Response::new()
                .add_submessages(messages)
                .add_attribute("method", "rebind_farm")
                .add_attribute("token_address", pending.asset.address())
                .add_attribute("farm", farm)
                .add_attribute("amount", balance))
        }
        None => {
            FARMS.remove(deps.storage, &key);

            Ok(Response::new()
                .add_attribute("method", "unbind_farm")
                .add_attribute("token_address", pending.asset.address()))
        }
    }
}
