//! Canonical packing of inbound cross-chain messages.
//!
//! # Byte Layout
//! ```text
//! ["NFT"] ++ hub_contract ++ from_chain ++ to_chain ++ from_addr ++ to_addr
//!         ++ token ++ bytes32s ++ uints [++ data]
//! ```
//! Chain names are their raw UTF-8 bytes; every other field is raw bytes with no
//! length prefix. Field widths are checked before hashing, so plain concatenation
//! is unambiguous. The `NFT` tag keeps fungible and non-fungible message spaces
//! disjoint.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{HexBinary, Uint128, Uint256};

use crate::error::ContractError;
use crate::hash::sha256;

pub const NFT_TAG: &[u8] = b"NFT";
pub const SLOT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Fungible,
    NonFungible,
}

/// One inbound call, alive only while it is being processed.
#[cw_serde]
pub struct InboundMessage {
    pub hub_contract: HexBinary,
    pub from_chain: String,
    pub from_addr: HexBinary,
    pub to_addr: HexBinary,
    pub token: HexBinary,
    pub bytes32s: HexBinary,
    pub uints: HexBinary,
    pub data: Option<HexBinary>,
}

impl InboundMessage {
    pub fn encode(&self, to_chain: &str, kind: MessageKind) -> Vec<u8> {
        let data_len = self.data.as_ref().map_or(0, |d| d.len());
        let mut out = Vec::with_capacity(
            NFT_TAG.len()
                + self.hub_contract.len()
                + self.from_chain.len()
                + to_chain.len()
                + self.from_addr.len()
                + self.to_addr.len()
                + self.token.len()
                + self.bytes32s.len()
                + self.uints.len()
                + data_len,
        );

        if kind == MessageKind::NonFungible {
            out.extend_from_slice(NFT_TAG);
        }
        out.extend_from_slice(self.hub_contract.as_slice());
        out.extend_from_slice(self.from_chain.as_bytes());
        out.extend_from_slice(to_chain.as_bytes());
        out.extend_from_slice(self.from_addr.as_slice());
        out.extend_from_slice(self.to_addr.as_slice());
        out.extend_from_slice(self.token.as_slice());
        out.extend_from_slice(self.bytes32s.as_slice());
        out.extend_from_slice(self.uints.as_slice());
        if let Some(data) = &self.data {
            out.extend_from_slice(data.as_slice());
        }
        out
    }

    pub fn hash(&self, to_chain: &str, kind: MessageKind) -> [u8; 32] {
        sha256(&self.encode(to_chain, kind))
    }

    /// First 32 bytes of the fixed block: the binding / governance id.
    pub fn binding(&self) -> &[u8] {
        &self.bytes32s.as_slice()[..SLOT.min(self.bytes32s.len())]
    }

    /// Numeric slot `index` as a big-endian 256-bit integer.
    pub fn uint(&self, index: usize) -> Result<Uint256, ContractError> {
        read_slot(self.uints.as_slice(), index)
    }

    /// Numeric slot `index` as an on-chain amount. Values above 128 bits are refused.
    pub fn amount(&self, index: usize) -> Result<Uint128, ContractError> {
        let bytes = self.uint(index)?.to_be_bytes();
        let (high, low) = bytes.split_at(16);
        if high.iter().any(|b| *b != 0) {
            return Err(ContractError::InvalidAmount {
                reason: "amount exceeds 128 bits".to_string(),
            });
        }
        let mut low_bytes = [0u8; 16];
        low_bytes.copy_from_slice(low);
        Ok(Uint128::new(u128::from_be_bytes(low_bytes)))
    }
}

pub fn read_slot(block: &[u8], index: usize) -> Result<Uint256, ContractError> {
    let start = index * SLOT;
    let slot = block
        .get(start..start + SLOT)
        .ok_or_else(|| ContractError::InvalidLength {
            field: "uints".to_string(),
            expected: format!("at least {}", start + SLOT),
            got: block.len(),
        })?;
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(slot);
    Ok(Uint256::from_be_bytes(bytes))
}

/// Pack values into 32-byte big-endian slots.
pub fn pack_uints(values: &[Uint256]) -> HexBinary {
    let mut out = Vec::with_capacity(values.len() * SLOT);
    for value in values {
        out.extend_from_slice(&value.to_be_bytes());
    }
    HexBinary::from(out)
}
