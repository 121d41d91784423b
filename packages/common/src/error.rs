//! Error types shared by the minter and vault contracts.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use crate::quorum::QuorumError;
use crate::safe_math::MathError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Bridge is not activated")]
    NotActivated,

    #[error("Invalid {field}")]
    InvalidChain { field: String },

    #[error("Local chain {chain} cannot be registered as a remote chain")]
    LocalChain { chain: String },

    #[error("Invalid {field} length: expected {expected}, got {got}")]
    InvalidLength {
        field: String,
        expected: String,
        got: usize,
    },

    #[error("Invalid govId")]
    InvalidGovId,

    #[error("Invalid Token: {token}")]
    InvalidToken { token: String },

    #[error("Already Set")]
    AlreadySet,

    #[error("Invalid token address: {reason}")]
    InvalidTokenAddress { reason: String },

    #[error("Not enough bridging fee: expected {expected}, got {got}")]
    InsufficientFee { expected: Uint128, got: Uint128 },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid token decimal: expected {expected}, got {got}")]
    InvalidDecimal { expected: String, got: String },

    #[error("Invalid data: {reason}")]
    InvalidData { reason: String },

    #[error("Invalid tax rate: {rate_bps} bps must be below 10000")]
    InvalidTaxRate { rate_bps: u16 },

    #[error("Invalid tax receiver: expected 20 bytes, got {got}")]
    InvalidTaxReceiver { got: usize },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Unexpected funds: only {denom} is accepted")]
    UnexpectedFunds { denom: String },

    #[error("Owner check fail")]
    OwnerCheckFail,

    #[error("Remove current farm first")]
    FarmAlreadyBound,

    #[error("Farm not initialized")]
    FarmNotBound,

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("used swapHash: {hash}")]
    UsedHash { hash: String },

    // ========================================================================
    // Quorum / Arithmetic Errors
    // ========================================================================

    #[error("{0}")]
    Quorum(#[from] QuorumError),

    #[error("{0}")]
    Math(#[from] MathError),

    // ========================================================================
    // External Effect Errors
    // ========================================================================

    #[error("{reason}: {error}")]
    ExternalEffectFailure { reason: String, error: String },
}

impl ContractError {
    pub fn unauthorized(role: &str) -> Self {
        ContractError::Unauthorized {
            role: role.to_string(),
        }
    }

    pub fn invalid_chain(field: &str) -> Self {
        ContractError::InvalidChain {
            field: field.to_string(),
        }
    }
}
