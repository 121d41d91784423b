//! Multisig quorum verification over recoverable secp256k1 signatures.
//!
//! A signature list is a comma-separated string of hex encoded `r ‖ s ‖ v`
//! signatures (65 bytes each). Each signature is recovered to its public key,
//! reduced to a 20-byte identity and counted if the identity belongs to the
//! governance owner set. Owner set and threshold are read live through
//! [`SignerSet`] at verification time.

use cosmwasm_std::{Addr, Api, HexBinary, QuerierWrapper, StdResult};
use thiserror::Error;

use crate::hash::{from_hex, signer_identity, to_hex};
use crate::interfaces::{IsOwnerResponse, MultisigQueryMsg, RequirementResponse};

pub const SIGNATURE_LENGTH: usize = 65;
pub const PUBLIC_KEY_LENGTH: usize = 65;

#[derive(Error, Debug, PartialEq)]
pub enum QuorumError {
    #[error("Invalid quorum config: required signatures must be greater than zero")]
    InvalidQuorumConfig,

    #[error("Invalid signature encoding at position {index}")]
    InvalidSignatureEncoding { index: usize },

    #[error("Invalid signature length: expected 65 bytes, got {got}")]
    InvalidSignatureLength { got: usize },

    #[error("Invalid signature recovery id: {v}")]
    InvalidRecoveryId { v: u8 },

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Duplicate signature from {signer}")]
    DuplicateSignature { signer: String },

    #[error("Invalid Signature: got {got} owner signatures, need {required}")]
    InsufficientSignatures { got: u64, required: u64 },

    #[error("Multisig query failed: {reason}")]
    SignerQuery { reason: String },
}

/// Owner set and threshold of the governing multisig.
pub trait SignerSet {
    fn required(&self) -> StdResult<u64>;
    fn is_owner(&self, identity: &[u8; 20]) -> StdResult<bool>;
}

/// [`SignerSet`] backed by a live multisig contract.
pub struct MultisigContract<'a> {
    querier: QuerierWrapper<'a>,
    address: &'a Addr,
}

impl<'a> MultisigContract<'a> {
    pub fn new(querier: QuerierWrapper<'a>, address: &'a Addr) -> Self {
        Self { querier, address }
    }
}

impl SignerSet for MultisigContract<'_> {
    fn required(&self) -> StdResult<u64> {
        let res: RequirementResponse = self
            .querier
            .query_wasm_smart(self.address, &MultisigQueryMsg::Requirement {})?;
        Ok(res.required)
    }

    fn is_owner(&self, identity: &[u8; 20]) -> StdResult<bool> {
        let res: IsOwnerResponse = self.querier.query_wasm_smart(
            self.address,
            &MultisigQueryMsg::IsOwner {
                owner: HexBinary::from(identity.as_slice()),
            },
        )?;
        Ok(res.is_owner)
    }
}

fn signer_query_error(err: cosmwasm_std::StdError) -> QuorumError {
    QuorumError::SignerQuery {
        reason: err.to_string(),
    }
}

/// Split a signature list, ignoring whitespace anywhere in it.
pub fn split_signatures(signatures: &str) -> Vec<String> {
    let compact: String = signatures.chars().filter(|c| *c != ' ').collect();
    compact.split(',').map(str::to_string).collect()
}

fn recovery_param(v: u8) -> Result<u8, QuorumError> {
    match v {
        0 | 1 => Ok(v),
        27 | 28 => Ok(v - 27),
        _ => Err(QuorumError::InvalidRecoveryId { v }),
    }
}

/// Count the distinct owner identities that signed `hash`.
///
/// Non-owner signatures are skipped. A second signature from an owner already
/// counted fails the whole verification.
pub fn count_owner_signatures(
    api: &dyn Api,
    hash: &[u8; 32],
    signatures: &str,
    signers: &dyn SignerSet,
) -> Result<u64, QuorumError> {
    let mut counted: Vec<[u8; 20]> = Vec::new();

    for (index, item) in split_signatures(signatures).iter().enumerate() {
        let signature =
            from_hex(item).map_err(|_| QuorumError::InvalidSignatureEncoding { index })?;
        if signature.len() != SIGNATURE_LENGTH {
            return Err(QuorumError::InvalidSignatureLength {
                got: signature.len(),
            });
        }

        let recovery = recovery_param(signature[64])?;
        let pubkey = api
            .secp256k1_recover_pubkey(hash, &signature[..64], recovery)
            .map_err(|_| QuorumError::InvalidPublicKey)?;
        if pubkey.len() != PUBLIC_KEY_LENGTH {
            return Err(QuorumError::InvalidPublicKey);
        }

        let identity = signer_identity(&pubkey);
        if !signers.is_owner(&identity).map_err(signer_query_error)? {
            continue;
        }
        if counted.contains(&identity) {
            return Err(QuorumError::DuplicateSignature {
                signer: to_hex(&identity),
            });
        }
        counted.push(identity);
    }

    Ok(counted.len() as u64)
}

/// Accept iff at least `signers.required()` distinct owners signed `hash`; a
/// missed threshold is [`QuorumError::InsufficientSignatures`].
pub fn require_quorum(
    api: &dyn Api,
    hash: &[u8; 32],
    signatures: &str,
    signers: &dyn SignerSet,
) -> Result<(), QuorumError> {
    let required = signers.required().map_err(signer_query_error)?;
    if required == 0 {
        return Err(QuorumError::InvalidQuorumConfig);
    }
    let got = count_owner_signatures(api, hash, signatures, signers)?;
    if got < required {
        return Err(QuorumError::InsufficientSignatures { got, required });
    }
    Ok(())
}
