//! At-most-once guard over inbound message hashes.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::hash::to_hex;

/// Message hashes that have been applied. Entries are never removed.
pub const USED_HASHES: Map<&[u8], bool> = Map::new("used_hashes");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Accepted,
    AlreadyUsed,
}

/// Mark `hash` as used unless it already is.
pub fn consume(storage: &mut dyn Storage, hash: &[u8; 32]) -> StdResult<Consumed> {
    if USED_HASHES.has(storage, hash) {
        return Ok(Consumed::AlreadyUsed);
    }
    USED_HASHES.save(storage, hash, &true)?;
    Ok(Consumed::Accepted)
}

pub fn is_used(storage: &dyn Storage, hash: &[u8]) -> bool {
    USED_HASHES.has(storage, hash)
}

/// [`consume`], failing with `used swapHash` on a replay.
pub fn require_unused(storage: &mut dyn Storage, hash: &[u8; 32]) -> Result<(), ContractError> {
    match consume(storage, hash)? {
        Consumed::Accepted => Ok(()),
        Consumed::AlreadyUsed => Err(ContractError::UsedHash { hash: to_hex(hash) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    #[test]
    fn test_consume_once() {
        let mut storage = MockStorage::new();
        let hash = [7u8; 32];

        assert!(!is_used(&storage, &hash));
        assert_eq!(consume(&mut storage, &hash).unwrap(), Consumed::Accepted);
        assert!(is_used(&storage, &hash));
        assert_eq!(consume(&mut storage, &hash).unwrap(), Consumed::AlreadyUsed);
        assert!(matches!(
            require_unused(&mut storage, &hash),
            Err(ContractError::UsedHash { .. })
        ));
        assert!(!is_used(&storage, &[8u8; 32]));
    }
}
