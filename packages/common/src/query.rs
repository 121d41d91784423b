//! Registry and replay queries exposed by both contracts.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Deps, HexBinary, StdResult, Uint128};

use crate::asset::AssetInfo;
use crate::chain::{is_valid_chain, CHAINS};
use crate::codec::{InboundMessage, MessageKind};
use crate::fee::{TaxConfig, TAX};
use crate::hash::{chain_id, token_summary};
use crate::replay::is_used;
use crate::state::DEPOSIT_COUNT;
use crate::token::{TOKENS, TOKEN_SUMMARIES};

#[cw_serde]
pub struct ChainResponse {
    pub chain: String,
    pub chain_id: HexBinary,
    pub valid: bool,
    pub address_length: u64,
    pub uints_length: u64,
    pub fee: Uint128,
    pub fee_with_data: Uint128,
}

#[cw_serde]
pub struct TokenResponse {
    pub summary: HexBinary,
    pub descriptor: Option<HexBinary>,
    pub asset: Option<AssetInfo>,
}

#[cw_serde]
pub struct IsUsedHashResponse {
    pub used: bool,
}

#[cw_serde]
pub struct DepositCountResponse {
    pub deposit_count: u64,
}

#[cw_serde]
pub struct HashResponse {
    pub hash: HexBinary,
}

pub fn query_chain(deps: Deps, chain: String) -> StdResult<ChainResponse> {
    let id = chain_id(&chain);
    let valid = is_valid_chain(deps.storage, &chain);
    let record = CHAINS.may_load(deps.storage, &id)?.unwrap_or_default();
    Ok(ChainResponse {
        chain,
        chain_id: HexBinary::from(id.as_slice()),
        valid,
        address_length: record.address_length,
        uints_length: record.uints_length,
        fee: record.fee,
        fee_with_data: record.fee_with_data,
    })
}

fn token_response(deps: Deps, summary: Vec<u8>) -> StdResult<TokenResponse> {
    let record = TOKENS.may_load(deps.storage, &summary)?;
    Ok(TokenResponse {
        summary: HexBinary::from(summary),
        descriptor: record.as_ref().map(|r| r.descriptor.clone()),
        asset: record.map(|r| r.asset),
    })
}

/// Token admitted under a remote descriptor.
pub fn query_token(deps: Deps, local_chain: &str, descriptor: HexBinary) -> StdResult<TokenResponse> {
    token_response(deps, token_summary(local_chain, descriptor.as_slice()).to_vec())
}

/// Token admitted for a local asset; `summary` is empty when there is none.
pub fn query_token_by_asset(deps: Deps, asset: AssetInfo) -> StdResult<TokenResponse> {
    match TOKEN_SUMMARIES.may_load(deps.storage, &asset.key())? {
        Some(summary) => token_response(deps, summary),
        None => Ok(TokenResponse {
            summary: HexBinary::default(),
            descriptor: None,
            asset: None,
        }),
    }
}

pub fn query_is_used_hash(deps: Deps, hash: HexBinary) -> StdResult<IsUsedHashResponse> {
    Ok(IsUsedHashResponse {
        used: is_used(deps.storage, hash.as_slice()),
    })
}

pub fn query_deposit_count(deps: Deps) -> StdResult<DepositCountResponse> {
    Ok(DepositCountResponse {
        deposit_count: DEPOSIT_COUNT.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_tax(deps: Deps) -> StdResult<TaxConfig> {
    Ok(TAX.may_load(deps.storage)?.unwrap_or_default())
}

/// Hash a relayer must collect signatures over.
pub fn query_message_hash(
    local_chain: &str,
    message: InboundMessage,
    nft: bool,
) -> StdResult<HashResponse> {
    let kind = if nft {
        MessageKind::NonFungible
    } else {
        MessageKind::Fungible
    };
    Ok(HashResponse {
        hash: HexBinary::from(message.hash(local_chain, kind).as_slice()),
    })
}
