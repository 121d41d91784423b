//! Storage shared by both contracts: the deposit counter and outbound routing.

use cosmwasm_std::{Event, Storage};
use cw_storage_plus::Item;

use crate::error::ContractError;
use crate::events::OutboundTransfer;
use crate::fee::{compute_tax, TAX};
use crate::safe_math::add;

/// Id of the last outbound event
pub const DEPOSIT_COUNT: Item<u64> = Item::new("deposit_count");

/// Consume the next deposit id. The first id is 1.
pub fn next_deposit_id(storage: &mut dyn Storage) -> Result<u64, ContractError> {
    let current = DEPOSIT_COUNT.may_load(storage)?.unwrap_or_default();
    let next = add(i128::from(current), 1)?;
    let next = u64::try_from(next).map_err(|_| crate::safe_math::MathError::Overflow)?;
    DEPOSIT_COUNT.save(storage, &next)?;
    Ok(next)
}

/// Assign a deposit id to `transfer` and build its event.
pub fn announce(
    storage: &mut dyn Storage,
    event_type: &str,
    transfer: &OutboundTransfer,
) -> Result<Event, ContractError> {
    let deposit_id = next_deposit_id(storage)?;
    Ok(transfer.to_event(event_type, deposit_id))
}

/// Split the configured tax off `transfer` and announce both parts.
///
/// When the tax is non-zero it is announced first, addressed to the tax receiver
/// on `settlement_chain`, and consumes its own deposit id.
pub fn announce_taxed(
    storage: &mut dyn Storage,
    event_type: &str,
    mut transfer: OutboundTransfer,
    settlement_chain: &str,
) -> Result<Vec<Event>, ContractError> {
    let mut events = Vec::with_capacity(2);
    let tax_config = TAX.may_load(storage)?.unwrap_or_default();

    if let Some(receiver) = tax_config.active_receiver() {
        let split = compute_tax(transfer.amount, tax_config.rate_bps)?;
        if !split.tax.is_zero() {
            let tax_transfer = OutboundTransfer {
                to_chain: settlement_chain.to_string(),
                to_addr: receiver.clone(),
                amount: split.tax,
                ..transfer.clone()
            };
            events.push(announce(storage, event_type, &tax_transfer)?);
        }
        transfer.amount = split.remaining;
    }

    events.push(announce(storage, event_type, &transfer)?);
    Ok(events)
}
