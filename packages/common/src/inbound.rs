//! Inbound pipeline shared by both contracts: structural check, binding check,
//! hash, replay guard and quorum.

use cosmwasm_std::{Addr, DepsMut};

use crate::address::{LocalAddress, ENCODED_ADDRESS_LENGTH};
use crate::chain::ChainRecord;
use crate::codec::{InboundMessage, MessageKind, SLOT};
use crate::error::ContractError;
use crate::quorum::{require_quorum, MultisigContract};
use crate::replay::require_unused;

pub const HUB_CONTRACT_LENGTH: usize = 20;
pub const TOKEN_DESCRIPTOR_LENGTH: usize = 21;
pub const MIN_UINTS_LENGTH: usize = 64;

/// Width rule for the fixed `bytes32s` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedBlock {
    AtLeast(usize),
    Exactly(usize),
}

/// Per-variant structural rules.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub bytes32s: FixedBlock,
    pub token_length: Option<usize>,
}

fn length_error(field: &str, expected: String, got: usize) -> ContractError {
    ContractError::InvalidLength {
        field: field.to_string(),
        expected,
        got,
    }
}

fn require_length(field: &str, expected: usize, got: usize) -> Result<(), ContractError> {
    if expected != got {
        return Err(length_error(field, expected.to_string(), got));
    }
    Ok(())
}

fn require_slots(field: &str, got: usize, minimum: usize) -> Result<(), ContractError> {
    if got < minimum || got % SLOT != 0 {
        return Err(length_error(
            field,
            format!("a multiple of {} of at least {}", SLOT, minimum),
            got,
        ));
    }
    Ok(())
}

/// Check every variable-width field against the source chain's record.
///
/// Returns the decoded local recipient.
pub fn validate_structure(
    msg: &InboundMessage,
    chain: &ChainRecord,
    layout: &Layout,
) -> Result<LocalAddress, ContractError> {
    require_length("hubContract", HUB_CONTRACT_LENGTH, msg.hub_contract.len())?;
    require_length(
        "fromAddr",
        chain.address_length as usize,
        msg.from_addr.len(),
    )?;
    require_length("toAddr", ENCODED_ADDRESS_LENGTH, msg.to_addr.len())?;
    match layout.token_length {
        Some(expected) => require_length("token", expected, msg.token.len())?,
        None if msg.token.is_empty() => {
            return Err(length_error("token", "non-empty".to_string(), 0))
        }
        None => {}
    }

    match layout.bytes32s {
        FixedBlock::AtLeast(minimum) => require_slots("bytes32s", msg.bytes32s.len(), minimum)?,
        FixedBlock::Exactly(expected) => require_length("bytes32s", expected, msg.bytes32s.len())?,
    }

    require_slots("uints", msg.uints.len(), MIN_UINTS_LENGTH)?;
    require_length("uints", chain.uints_length as usize, msg.uints.len())?;

    LocalAddress::from_bytes(msg.to_addr.as_slice()).map_err(|e| ContractError::InvalidAddress {
        reason: e.to_string(),
    })
}

pub fn require_binding(msg: &InboundMessage, expected: &[u8]) -> Result<(), ContractError> {
    if msg.binding() != expected {
        return Err(ContractError::InvalidGovId);
    }
    Ok(())
}

/// Hash the message, consume the hash and check the governance quorum.
///
/// The hash is marked used before the quorum is checked; any later failure in
/// the same transaction reverts the mark together with everything else.
pub fn authorize(
    deps: DepsMut,
    msg: &InboundMessage,
    to_chain: &str,
    kind: MessageKind,
    signatures: &str,
    governance: &Addr,
) -> Result<[u8; 32], ContractError> {
    let hash = msg.hash(to_chain, kind);
    require_unused(deps.storage, &hash)?;

    let signers = MultisigContract::new(deps.querier, governance);
    require_quorum(deps.api, &hash, signatures, &signers)?;
    Ok(hash)
}
