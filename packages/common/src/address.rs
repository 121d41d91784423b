//! Local address encoding used on the wire.
//!
//! Inbound messages carry the local recipient as 21 bytes:
//! ```text
//! | Kind (1 byte) | Body (20 bytes) |
//! ```
//! where the kind byte is `0x00` for an externally owned account and `0x01` for a
//! contract. The 20-byte body is the bech32 payload of the local address.
//!
//! Outbound events and the vault binding id use the same kind-prefixed form for
//! local addresses; a contract with a 32-byte payload encodes to 33 bytes.

use cosmwasm_std::{Addr, Api, HexBinary, QuerierWrapper, StdError, StdResult};

pub const ADDRESS_BODY_LENGTH: usize = 20;
pub const ENCODED_ADDRESS_LENGTH: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Account,
    Contract,
}

impl AddressKind {
    pub fn from_byte(byte: u8) -> StdResult<Self> {
        match byte {
            0x00 => Ok(AddressKind::Account),
            0x01 => Ok(AddressKind::Contract),
            other => Err(StdError::generic_err(format!(
                "Invalid address kind byte: 0x{:02x}",
                other
            ))),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            AddressKind::Account => 0x00,
            AddressKind::Contract => 0x01,
        }
    }
}

/// A kind-tagged local address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalAddress {
    pub kind: AddressKind,
    pub body: [u8; ADDRESS_BODY_LENGTH],
}

impl LocalAddress {
    pub fn new(kind: AddressKind, body: [u8; ADDRESS_BODY_LENGTH]) -> Self {
        Self { kind, body }
    }

    /// Decode from either the bare 20-byte body (an account) or the 21-byte
    /// kind-prefixed form.
    pub fn from_bytes(bytes: &[u8]) -> StdResult<Self> {
        match bytes.len() {
            ADDRESS_BODY_LENGTH => {
                let mut body = [0u8; ADDRESS_BODY_LENGTH];
                body.copy_from_slice(bytes);
                Ok(Self::new(AddressKind::Account, body))
            }
            ENCODED_ADDRESS_LENGTH => {
                let kind = AddressKind::from_byte(bytes[0])?;
                let mut body = [0u8; ADDRESS_BODY_LENGTH];
                body.copy_from_slice(&bytes[1..]);
                Ok(Self::new(kind, body))
            }
            other => Err(StdError::generic_err(format!(
                "Invalid address length: expected 20 or 21 bytes, got {}",
                other
            ))),
        }
    }

    pub fn to_bytes(&self) -> [u8; ENCODED_ADDRESS_LENGTH] {
        let mut out = [0u8; ENCODED_ADDRESS_LENGTH];
        out[0] = self.kind.to_byte();
        out[1..].copy_from_slice(&self.body);
        out
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AddressKind::Contract
    }

    /// Render the body as a bech32 string under `hrp` and validate it against the host.
    pub fn to_addr(&self, api: &dyn Api, hrp: &str) -> StdResult<Addr> {
        let encoded = encode_bech32_address(&self.body, hrp)?;
        api.addr_validate(&encoded)
    }
}

/// Kind byte followed by the bech32 payload of `addr`.
pub fn wire_address(kind: AddressKind, addr: &Addr) -> StdResult<HexBinary> {
    let payload = decode_bech32_address(addr.as_str())?;
    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(kind.to_byte());
    out.extend_from_slice(&payload);
    Ok(HexBinary::from(out))
}

/// [`wire_address`] of a message sender; contracts are the addresses with contract info.
pub fn sender_wire_address(querier: &QuerierWrapper, sender: &Addr) -> StdResult<HexBinary> {
    let kind = match querier.query_wasm_contract_info(sender) {
        Ok(_) => AddressKind::Contract,
        Err(_) => AddressKind::Account,
    };
    wire_address(kind, sender)
}

// ============================================================================
// Bech32
// ============================================================================

/// Decode a bech32 address to its raw payload (20 or 32 bytes), verifying the checksum.
pub fn decode_bech32_address(addr: &str) -> StdResult<Vec<u8>> {
    let (hrp, data_part) = addr
        .rsplit_once('1')
        .ok_or_else(|| StdError::generic_err("Invalid bech32 format"))?;
    if hrp.is_empty() {
        return Err(StdError::generic_err("Invalid bech32 format"));
    }
    if data_part.len() < 7 {
        return Err(StdError::generic_err("Bech32 data too short"));
    }

    let values = decode_bech32_data(data_part)?;
    let mut checked = expand_hrp(hrp);
    checked.extend_from_slice(&values);
    if bech32_polymod(&checked) != 1 {
        return Err(StdError::generic_err("Invalid bech32 checksum"));
    }

    let payload = &values[..values.len() - 6];
    let bytes = convert_bits(payload, 5, 8, false)?;
    if bytes.len() != ADDRESS_BODY_LENGTH && bytes.len() != 32 {
        return Err(StdError::generic_err(format!(
            "Invalid address length: expected 20 or 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Encode raw 20 bytes to a bech32 address with given prefix
pub fn encode_bech32_address(bytes: &[u8; 20], hrp: &str) -> StdResult<String> {
    let data5 = convert_bits(bytes, 8, 5, true)?;
    let data_str = encode_bech32_data(&data5);

    let checksum = compute_bech32_checksum(hrp, &data5);
    let checksum_str = encode_bech32_data(&checksum);

    Ok(format!("{}1{}{}", hrp, data_str, checksum_str))
}

fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> StdResult<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_v = (1u32 << to_bits) - 1;

    for &value in data {
        acc = (acc << from_bits) | value as u32;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad && bits > 0 {
        result.push(((acc << (to_bits - bits)) & max_v) as u8);
    } else if !pad && (bits >= from_bits || ((acc << (to_bits - bits)) & max_v) != 0) {
        return Err(StdError::generic_err("Invalid padding"));
    }

    Ok(result)
}

const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

fn decode_bech32_data(data: &str) -> StdResult<Vec<u8>> {
    data.chars()
        .map(|c| {
            BECH32_CHARSET
                .iter()
                .position(|&x| x as char == c)
                .map(|idx| idx as u8)
                .ok_or_else(|| StdError::generic_err(format!("Invalid bech32 character: {}", c)))
        })
        .collect()
}

fn encode_bech32_data(data: &[u8]) -> String {
    data.iter()
        .map(|&b| BECH32_CHARSET[b as usize] as char)
        .collect()
}

fn compute_bech32_checksum(hrp: &str, data: &[u8]) -> Vec<u8> {
    let mut values = expand_hrp(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let polymod = bech32_polymod(&values) ^ 1;
    (0..6)
        .map(|i| ((polymod >> (5 * (5 - i))) & 31) as u8)
        .collect()
}

fn expand_hrp(hrp: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(hrp.len() * 2 + 1);
    result.extend(hrp.bytes().map(|c| c >> 5));
    result.push(0);
    result.extend(hrp.bytes().map(|c| c & 31));
    result
}

fn bech32_polymod(values: &[u8]) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];

    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ (v as u32);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::{
        to_json_binary, ContractInfoResponse, ContractResult, SystemResult, WasmQuery,
    };

    #[test]
    fn test_twenty_one_byte_roundtrip() {
        for kind in [0x00u8, 0x01u8] {
            let mut encoded = [7u8; 21];
            encoded[0] = kind;
            let decoded = LocalAddress::from_bytes(&encoded).unwrap();
            assert_eq!(decoded.to_bytes(), encoded);
        }
    }

    #[test]
    fn test_twenty_byte_body_is_account() {
        let body = [0xabu8; 20];
        let decoded = LocalAddress::from_bytes(&body).unwrap();
        assert_eq!(decoded.kind, AddressKind::Account);
        assert!(!decoded.is_contract());
        assert_eq!(&decoded.to_bytes()[1..], &body);
        assert_eq!(LocalAddress::from_bytes(&decoded.body).unwrap(), decoded);
    }

    #[test]
    fn test_rejects_unknown_kind_and_length() {
        let mut encoded = [1u8; 21];
        encoded[0] = 0x02;
        assert!(LocalAddress::from_bytes(&encoded).is_err());
        assert!(LocalAddress::from_bytes(&[1u8; 19]).is_err());
        assert!(LocalAddress::from_bytes(&[1u8; 32]).is_err());
    }

    #[test]
    fn test_bech32_roundtrip() {
        let body: [u8; 20] = [
            0x35, 0x6a, 0x2e, 0x90, 0x11, 0x08, 0xc4, 0x1b, 0xfe, 0x23, 0x77, 0x55, 0x01, 0x9a,
            0xcd, 0x42, 0x8e, 0x60, 0xf3, 0x0b,
        ];
        let encoded = encode_bech32_address(&body, "terra").unwrap();
        assert!(encoded.starts_with("terra1"));
        assert_eq!(decode_bech32_address(&encoded).unwrap(), body.to_vec());
    }

    #[test]
    fn test_bech32_rejects_bad_checksum() {
        let mut encoded = encode_bech32_address(&[9u8; 20], "terra").unwrap();
        let last = encoded.pop().unwrap();
        encoded.push(if last == 'q' { 'p' } else { 'q' });
        assert!(decode_bech32_address(&encoded).is_err());
    }

    #[test]
    fn test_to_addr_validates_with_host() {
        let deps = mock_dependencies();
        let local = LocalAddress::new(AddressKind::Account, [3u8; 20]);
        let addr = local.to_addr(deps.as_ref().api, "terra").unwrap();
        let wire = wire_address(AddressKind::Account, &addr).unwrap();
        assert_eq!(wire.as_slice(), local.to_bytes());
        assert_eq!(LocalAddress::from_bytes(wire.as_slice()).unwrap(), local);
    }

    #[test]
    fn test_sender_kind_follows_contract_info() {
        let mut deps = mock_dependencies();
        let contract = Addr::unchecked(encode_bech32_address(&[4u8; 20], "terra").unwrap());
        let account = Addr::unchecked(encode_bech32_address(&[5u8; 20], "terra").unwrap());
        let known = contract.to_string();
        let mut info = ContractInfoResponse::default();
        info.code_id = 1;
        let info = to_json_binary(&info).unwrap();
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::ContractInfo { contract_addr } if *contract_addr == known => {
                SystemResult::Ok(ContractResult::Ok(info.clone()))
            }
            _ => SystemResult::Ok(ContractResult::Err("not a contract".to_string())),
        });
        let querier = deps.as_ref().querier;

        let wire = sender_wire_address(&querier, &contract).unwrap();
        assert_eq!(wire.len(), ENCODED_ADDRESS_LENGTH);
        assert_eq!(wire.as_slice()[0], 0x01);
        assert_eq!(&wire.as_slice()[1..], &[4u8; 20]);

        let wire = sender_wire_address(&querier, &account).unwrap();
        assert_eq!(wire.as_slice(), LocalAddress::new(AddressKind::Account, [5u8; 20]).to_bytes());

        assert!(sender_wire_address(&querier, &Addr::unchecked("user")).is_err());
    }

    #[test]
    fn test_wide_contract_payload() {
        let mut payload = vec![0u8; 32];
        payload[31] = 0x42;
        let data5 = convert_bits(&payload, 8, 5, true).unwrap();
        let encoded = format!(
            "terra1{}{}",
            encode_bech32_data(&data5),
            encode_bech32_data(&compute_bech32_checksum("terra", &data5))
        );
        let wire = wire_address(AddressKind::Contract, &Addr::unchecked(encoded)).unwrap();
        assert_eq!(wire.len(), 33);
        assert_eq!(wire.as_slice()[0], 0x01);
        assert_eq!(&wire.as_slice()[1..], payload.as_slice());
    }
}
