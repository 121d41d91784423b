//! Query handlers for the bridge vault.

use bridge_common::AssetInfo;
use cosmwasm_std::{Deps, Env, HexBinary, StdResult};

use crate::msg::{ConfigResponse, FarmResponse, GovIdResponse};
use crate::state::{bound_farm, vault_binding, CONFIG};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        governance: config.governance,
        fee_governance: config.fee_governance,
        policy_admin: config.policy_admin,
        chain: config.chain,
        fee_denom: config.fee_denom,
        native_decimals: config.native_decimals,
        address_prefix: config.address_prefix,
        settlement_chain: config.settlement_chain,
        activated: config.activated,
    })
}

pub fn query_gov_id(deps: Deps, env: Env, hub_contract: HexBinary) -> StdResult<GovIdResponse> {
    let config = CONFIG.load(deps.storage)?;
    let gov_id = vault_binding(hub_contract.as_slice(), &config.chain, &env.contract.address)?;
    Ok(GovIdResponse {
        gov_id: HexBinary::from(gov_id.as_slice()),
    })
}

pub fn query_farm(deps: Deps, asset: AssetInfo) -> StdResult<FarmResponse> {
    Ok(FarmResponse {
        farm: bound_farm(deps.storage, &asset)?,
    })
}
