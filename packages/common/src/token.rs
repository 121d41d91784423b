//! Registry binding remote token descriptors to local assets.
//!
//! Both directions of the mapping are write-once: a summary or a local asset that
//! has been admitted can never be re-pointed.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{DepsMut, HexBinary, QuerierWrapper, Storage};
use cw_storage_plus::Map;

use crate::asset::AssetInfo;
use crate::error::ContractError;
use crate::hash::token_summary;

#[cw_serde]
pub struct TokenRecord {
    /// Remote token descriptor as carried in cross-chain messages
    pub descriptor: HexBinary,
    /// Local asset the descriptor resolves to
    pub asset: AssetInfo,
}

/// summary -> record
pub const TOKENS: Map<&[u8], TokenRecord> = Map::new("tokens");

/// asset key -> summary
pub const TOKEN_SUMMARIES: Map<&str, Vec<u8>> = Map::new("token_summaries");

fn ensure_contract(querier: &QuerierWrapper, asset: &AssetInfo) -> Result<(), ContractError> {
    if let Some(contract) = asset.contract() {
        querier
            .query_wasm_contract_info(contract)
            .map_err(|_| ContractError::InvalidTokenAddress {
                reason: format!("{} is not a contract", contract),
            })?;
    }
    Ok(())
}

/// Admit `descriptor` as the remote representation of `asset`.
///
/// Returns the summary the token is stored under.
pub fn add_token(
    deps: DepsMut,
    local_chain: &str,
    descriptor: &[u8],
    asset: AssetInfo,
) -> Result<[u8; 32], ContractError> {
    let summary = token_summary(local_chain, descriptor);
    let asset_key = asset.key();

    if TOKENS.has(deps.storage, &summary) || TOKEN_SUMMARIES.has(deps.storage, &asset_key) {
        return Err(ContractError::AlreadySet);
    }
    ensure_contract(&deps.querier, &asset)?;

    TOKENS.save(
        deps.storage,
        &summary,
        &TokenRecord {
            descriptor: HexBinary::from(descriptor),
            asset,
        },
    )?;
    TOKEN_SUMMARIES.save(deps.storage, &asset_key, &summary.to_vec())?;
    Ok(summary)
}

pub fn token_by_summary(
    storage: &dyn Storage,
    summary: &[u8],
) -> Result<Option<TokenRecord>, ContractError> {
    Ok(TOKENS.may_load(storage, summary)?)
}

pub fn asset_by_summary(
    storage: &dyn Storage,
    summary: &[u8],
) -> Result<Option<AssetInfo>, ContractError> {
    Ok(token_by_summary(storage, summary)?.map(|record| record.asset))
}

pub fn summary_by_asset(
    storage: &dyn Storage,
    asset: &AssetInfo,
) -> Result<Option<Vec<u8>>, ContractError> {
    Ok(TOKEN_SUMMARIES.may_load(storage, &asset.key())?)
}

/// Record of an admitted local asset, or `Invalid Token`.
pub fn require_admitted(
    storage: &dyn Storage,
    asset: &AssetInfo,
) -> Result<TokenRecord, ContractError> {
    let invalid = || ContractError::InvalidToken {
        token: asset.to_string(),
    };
    let summary = summary_by_asset(storage, asset)?.ok_or_else(invalid)?;
    token_by_summary(storage, &summary)?.ok_or_else(invalid)
}

/// Asset an inbound descriptor resolves to, or `Invalid Token`.
pub fn require_descriptor(
    storage: &dyn Storage,
    local_chain: &str,
    descriptor: &[u8],
) -> Result<AssetInfo, ContractError> {
    asset_by_summary(storage, &token_summary(local_chain, descriptor))?.ok_or_else(|| {
        ContractError::InvalidToken {
            token: crate::hash::to_hex(descriptor),
        }
    })
}
