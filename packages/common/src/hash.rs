//! Hash primitives shared by the bridge contracts.
//!
//! Message hashes, chain identities, token summaries and binding ids are SHA-256.
//! Signer identities follow the EVM convention: the last 20 bytes of the
//! keccak256 of the uncompressed public key body.

use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Registry key of a chain name.
pub fn chain_id(chain: &str) -> [u8; 32] {
    sha256(chain.as_bytes())
}

/// `sha256(local_chain ++ descriptor)`, the key a remote token is admitted under.
pub fn token_summary(local_chain: &str, descriptor: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(local_chain.len() + descriptor.len());
    data.extend_from_slice(local_chain.as_bytes());
    data.extend_from_slice(descriptor);
    sha256(&data)
}

/// Binding id of a deployed instance: `sha256(hub ++ local_chain ++ contract)`,
/// where `contract` is the instance's kind-prefixed wire address.
pub fn binding_id(hub_contract: &[u8], local_chain: &str, contract: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(hub_contract.len() + local_chain.len() + contract.len());
    data.extend_from_slice(hub_contract);
    data.extend_from_slice(local_chain.as_bytes());
    data.extend_from_slice(contract);
    sha256(&data)
}

/// Identity of a 65-byte uncompressed secp256k1 public key.
pub fn signer_identity(pubkey: &[u8]) -> [u8; 20] {
    let digest = keccak256(&pubkey[1..]);
    let mut identity = [0u8; 20];
    identity.copy_from_slice(&digest[12..]);
    identity
}

/// Render bytes as `0x`-prefixed lowercase hex (for attributes)
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex (with or without 0x prefix)
pub fn from_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_token_summary_depends_on_local_chain() {
        let descriptor = [1u8; 21];
        assert_ne!(
            token_summary("TERRA", &descriptor),
            token_summary("ICON", &descriptor)
        );
        let mut joined = b"TERRA".to_vec();
        joined.extend_from_slice(&descriptor);
        assert_eq!(token_summary("TERRA", &descriptor), sha256(&joined));
    }

    #[test]
    fn test_binding_id_layout() {
        let hub = [9u8; 20];
        let mut contract = vec![0x01];
        contract.extend_from_slice(&[4u8; 20]);

        let mut joined = hub.to_vec();
        joined.extend_from_slice(b"TERRA");
        joined.extend_from_slice(&contract);
        assert_eq!(binding_id(&hub, "TERRA", &contract), sha256(&joined));
        assert_ne!(
            binding_id(&hub, "TERRA", &contract),
            binding_id(&hub, "ICON", &contract)
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let rendered = to_hex(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(rendered, "0xdeadbeef");
        assert_eq!(from_hex(&rendered).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(from_hex("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(from_hex("0xzz").is_err());
    }
}
