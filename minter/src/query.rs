//! Query handlers for the bridge minter.

use cosmwasm_std::{Deps, StdResult};

use crate::msg::ConfigResponse;
use crate::state::CONFIG;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        governance: config.governance,
        fee_governance: config.fee_governance,
        bridging_fee: config.bridging_fee,
        gov_id: config.gov_id,
        chain: config.chain,
        fee_denom: config.fee_denom,
        address_prefix: config.address_prefix,
        settlement_chain: config.settlement_chain,
        activated: config.activated,
    })
}
