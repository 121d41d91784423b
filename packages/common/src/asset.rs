//! Local asset references.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdResult};

/// A local asset the bridge can hold, mint or burn.
#[cw_serde]
pub enum AssetInfo {
    /// Native bank denomination (e.g. "uluna")
    Native { denom: String },
    /// CW20 token contract
    Cw20 { contract_addr: Addr },
    /// NFT contract exposing the narrow transfer/mint/burn interface
    Cw721 { contract_addr: Addr },
}

impl AssetInfo {
    /// Storage key used for the reverse token lookup and farm bindings.
    pub fn key(&self) -> String {
        match self {
            AssetInfo::Native { denom } => format!("native:{}", denom),
            AssetInfo::Cw20 { contract_addr } => format!("cw20:{}", contract_addr),
            AssetInfo::Cw721 { contract_addr } => format!("cw721:{}", contract_addr),
        }
    }

    /// Address or denom as it appears in events.
    pub fn address(&self) -> &str {
        match self {
            AssetInfo::Native { denom } => denom,
            AssetInfo::Cw20 { contract_addr } | AssetInfo::Cw721 { contract_addr } => {
                contract_addr.as_str()
            }
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetInfo::Native { .. })
    }

    pub fn is_nft(&self) -> bool {
        matches!(self, AssetInfo::Cw721 { .. })
    }

    /// Re-check a caller supplied contract address with the host.
    pub fn validate(self, api: &dyn Api) -> StdResult<Self> {
        Ok(match self {
            AssetInfo::Native { denom } => AssetInfo::Native { denom },
            AssetInfo::Cw20 { contract_addr } => AssetInfo::Cw20 {
                contract_addr: api.addr_validate(contract_addr.as_str())?,
            },
            AssetInfo::Cw721 { contract_addr } => AssetInfo::Cw721 {
                contract_addr: api.addr_validate(contract_addr.as_str())?,
            },
        })
    }

    /// Contract address for contract-backed assets.
    pub fn contract(&self) -> Option<&Addr> {
        match self {
            AssetInfo::Native { .. } => None,
            AssetInfo::Cw20 { contract_addr } | AssetInfo::Cw721 { contract_addr } => {
                Some(contract_addr)
            }
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}
