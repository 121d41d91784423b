//! Wire messages of the collaborator contracts the bridge calls into.
//!
//! Only the narrow slice of each collaborator the bridge depends on is modelled
//! here. CW20 tokens use the `cw20` crate messages directly.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, QuerierWrapper, StdResult, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg, TokenInfoResponse};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::asset::AssetInfo;

// ============================================================================
// Multisig (governance)
// ============================================================================

#[cw_serde]
pub enum MultisigQueryMsg {
    /// Whether the 20-byte signer identity belongs to the owner set
    IsOwner { owner: HexBinary },
    /// Number of distinct owner signatures required
    Requirement {},
}

#[cw_serde]
pub struct IsOwnerResponse {
    pub is_owner: bool,
}

#[cw_serde]
pub struct RequirementResponse {
    pub required: u64,
}

// ============================================================================
// NFT
// ============================================================================

#[cw_serde]
pub enum NftExecuteMsg {
    TransferNft { recipient: String, token_id: String },
    Burn { token_id: String },
    Mint { token_id: String, owner: String },
}

#[cw_serde]
pub enum NftQueryMsg {
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
}

/// Tolerates the extra fields full CW721 implementations return.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct OwnerOfResponse {
    pub owner: String,
}

// ============================================================================
// Yield farm proxy
// ============================================================================

#[cw_serde]
pub enum FarmExecuteMsg {
    /// Register `amount` just transferred to the farm as a new position
    Deposit { amount: Uint128 },
    /// Return the whole position to the caller
    WithdrawAll {},
    /// Pay `amount` out of the position directly to `to`
    Withdraw { to: String, amount: Uint128 },
}

// ============================================================================
// Bridge receiver
// ============================================================================

#[cw_serde]
pub enum ReceiverExecuteMsg {
    OnTokenBridgeReceived {
        token: String,
        amount: Uint128,
        from_chain: String,
        from_addr: HexBinary,
        data: HexBinary,
    },
    OnNftBridgeReceived {
        token: String,
        token_id: String,
        from_chain: String,
        from_addr: HexBinary,
        data: HexBinary,
    },
}

// ============================================================================
// Collaborator queries
// ============================================================================

/// Decimals reported by a CW20 token. `native_decimals` answers for bank denoms.
pub fn token_decimals(
    querier: &QuerierWrapper,
    asset: &AssetInfo,
    native_decimals: u8,
) -> StdResult<u8> {
    match asset {
        AssetInfo::Cw20 { contract_addr } => {
            let info: TokenInfoResponse =
                querier.query_wasm_smart(contract_addr, &Cw20QueryMsg::TokenInfo {})?;
            Ok(info.decimals)
        }
        AssetInfo::Native { .. } => Ok(native_decimals),
        AssetInfo::Cw721 { .. } => Ok(0),
    }
}

pub fn token_balance(
    querier: &QuerierWrapper,
    asset: &AssetInfo,
    owner: &Addr,
) -> StdResult<Uint128> {
    match asset {
        AssetInfo::Native { denom } => Ok(querier.query_balance(owner, denom)?.amount),
        AssetInfo::Cw20 { contract_addr } => {
            let res: BalanceResponse = querier.query_wasm_smart(
                contract_addr,
                &Cw20QueryMsg::Balance {
                    address: owner.to_string(),
                },
            )?;
            Ok(res.balance)
        }
        AssetInfo::Cw721 { .. } => Ok(Uint128::zero()),
    }
}

pub fn nft_owner(querier: &QuerierWrapper, contract: &Addr, token_id: &str) -> StdResult<String> {
    let res: OwnerOfResponse = querier.query_wasm_smart(
        contract,
        &NftQueryMsg::OwnerOf {
            token_id: token_id.to_string(),
            include_expired: None,
        },
    )?;
    Ok(res.owner)
}
