//! Flat bridging fee and proportional tax.
//!
//! The flat fee is paid in the host's native fee denom alongside the request and
//! forwarded to the fee governance account. The tax is a basis-point share of the
//! bridged amount, announced to the settlement chain as its own outbound event.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, BankMsg, Coin, HexBinary, MessageInfo, SubMsg, Uint128};
use cw_storage_plus::Item;

use crate::chain::ChainRecord;
use crate::effects::{guarded, ExternalCall};
use crate::error::ContractError;
use crate::safe_math::{div_u128, mul_u128, sub_u128, MathError};

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

pub const TAX_RECEIVER_LENGTH: usize = 20;

#[cw_serde]
#[derive(Default)]
pub struct TaxConfig {
    /// Tax rate in basis points, always below 10000
    pub rate_bps: u16,
    /// 20-byte receiver on the settlement chain
    pub receiver: Option<HexBinary>,
}

pub const TAX: Item<TaxConfig> = Item::new("tax");

/// Outcome of taxing an outbound amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSplit {
    pub tax: Uint128,
    pub remaining: Uint128,
}

/// `floor(amount * rate_bps / 10000)` and what is left after it.
pub fn compute_tax(amount: Uint128, rate_bps: u16) -> Result<TaxSplit, MathError> {
    let tax = div_u128(
        mul_u128(amount, Uint128::from(rate_bps))?,
        Uint128::new(BPS_DENOMINATOR),
    )?;
    let remaining = sub_u128(amount, tax)?;
    Ok(TaxSplit { tax, remaining })
}

impl TaxConfig {
    /// Receiver of the tax, if taxing is switched on.
    pub fn active_receiver(&self) -> Option<&HexBinary> {
        match &self.receiver {
            Some(receiver) if self.rate_bps != 0 && !receiver.is_empty() => Some(receiver),
            _ => None,
        }
    }
}

pub fn validate_tax_rate(rate_bps: u16) -> Result<(), ContractError> {
    if u128::from(rate_bps) >= BPS_DENOMINATOR {
        return Err(ContractError::InvalidTaxRate { rate_bps });
    }
    Ok(())
}

pub fn validate_tax_receiver(receiver: &HexBinary) -> Result<(), ContractError> {
    if receiver.len() != TAX_RECEIVER_LENGTH {
        return Err(ContractError::InvalidTaxReceiver {
            got: receiver.len(),
        });
    }
    Ok(())
}

/// Amount of `denom` attached to the call. Any other denom is refused.
pub fn supplied_native(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != denom {
            return Err(ContractError::UnexpectedFunds {
                denom: denom.to_string(),
            });
        }
        total = crate::safe_math::add_u128(total, coin.amount)?;
    }
    Ok(total)
}

/// Fee tier of `chain` for a request with or without a payload.
pub fn required_fee(
    chain: &ChainRecord,
    data: Option<&HexBinary>,
) -> Result<Uint128, ContractError> {
    match data {
        Some(payload) if payload.is_empty() => Err(ContractError::InvalidData {
            reason: "payload must not be empty".to_string(),
        }),
        Some(_) => Ok(chain.fee_with_data),
        None => Ok(chain.fee),
    }
}

pub fn ensure_fee(supplied: Uint128, required: Uint128) -> Result<(), ContractError> {
    if supplied < required {
        return Err(ContractError::InsufficientFee {
            expected: required,
            got: supplied,
        });
    }
    Ok(())
}

/// Guarded bank send of `amount` to the fee receiver; nothing when zero.
pub fn forward_fee(receiver: &Addr, denom: &str, amount: Uint128) -> Option<SubMsg> {
    if amount.is_zero() {
        return None;
    }
    let send = BankMsg::Send {
        to_address: receiver.to_string(),
        amount: vec![Coin {
            denom: denom.to_string(),
            amount,
        }],
    };
    Some(guarded(send, ExternalCall::FeeTransfer))
}
