//! Structured bridge events observed by off-chain relayers.
//!
//! Binary fields are rendered as `0x` hex, an absent payload as the empty string.

use cosmwasm_std::{Event, HexBinary, Uint128, Uint256};

use crate::codec::InboundMessage;
use crate::hash::to_hex;

fn optional_hex(data: Option<&HexBinary>) -> String {
    data.map(|d| to_hex(d.as_slice())).unwrap_or_default()
}

/// Value carried in the slot after the amount of an outbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundDetail {
    Decimal(u8),
    TokenId(Uint256),
}

/// Destination of an outbound request as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub to_chain: String,
    pub to_addr: HexBinary,
    pub data: Option<HexBinary>,
}

/// One outbound transfer as announced to relayers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundTransfer {
    pub from_chain: String,
    pub to_chain: String,
    /// Kind-prefixed wire address of the sender
    pub from_addr: HexBinary,
    pub to_addr: HexBinary,
    /// Remote descriptor of the token
    pub token: HexBinary,
    pub token_address: String,
    pub detail: OutboundDetail,
    pub amount: Uint128,
    pub data: Option<HexBinary>,
}

impl OutboundTransfer {
    pub fn to_event(&self, event_type: &str, deposit_id: u64) -> Event {
        let (detail_key, detail_value) = match &self.detail {
            OutboundDetail::Decimal(decimal) => ("decimal", decimal.to_string()),
            OutboundDetail::TokenId(token_id) => ("token_id", token_id.to_string()),
        };
        Event::new(event_type)
            .add_attribute("from_chain", &self.from_chain)
            .add_attribute("to_chain", &self.to_chain)
            .add_attribute("from_addr", to_hex(self.from_addr.as_slice()))
            .add_attribute("to_addr", to_hex(self.to_addr.as_slice()))
            .add_attribute("token", to_hex(self.token.as_slice()))
            .add_attribute("token_address", &self.token_address)
            .add_attribute(detail_key, detail_value)
            .add_attribute("amount", self.amount)
            .add_attribute("deposit_id", deposit_id.to_string())
            .add_attribute("data", optional_hex(self.data.as_ref()))
    }
}

/// Completion event of an applied inbound message.
pub fn inbound_event(
    event_type: &str,
    msg: &InboundMessage,
    to_chain: &str,
    token_address: &str,
) -> Event {
    Event::new(event_type)
        .add_attribute("hub_contract", to_hex(msg.hub_contract.as_slice()))
        .add_attribute("from_chain", &msg.from_chain)
        .add_attribute("to_chain", to_chain)
        .add_attribute("from_addr", to_hex(msg.from_addr.as_slice()))
        .add_attribute("to_addr", to_hex(msg.to_addr.as_slice()))
        .add_attribute("token", to_hex(msg.token.as_slice()))
        .add_attribute("token_address", token_address)
        .add_attribute("bytes32s", to_hex(msg.bytes32s.as_slice()))
        .add_attribute("uints", to_hex(msg.uints.as_slice()))
        .add_attribute("data", optional_hex(msg.data.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_event_fields() {
        let transfer = OutboundTransfer {
            from_chain: "TERRA".to_string(),
            to_chain: "KLAYTN".to_string(),
            from_addr: HexBinary::from(vec![0x00; 21]),
            to_addr: HexBinary::from(vec![0xab; 20]),
            token: HexBinary::from(vec![0x01; 21]),
            token_address: "uluna".to_string(),
            detail: OutboundDetail::Decimal(6),
            amount: Uint128::new(990),
            data: None,
        };
        let event = transfer.to_event("deposit", 7);
        assert_eq!(event.ty, "deposit");
        let get = |key: &str| {
            event
                .attributes
                .iter()
                .find(|a| a.key == key)
                .map(|a| a.value.clone())
                .unwrap()
        };
        assert_eq!(get("decimal"), "6");
        assert_eq!(get("amount"), "990");
        assert_eq!(get("deposit_id"), "7");
        assert_eq!(get("data"), "");
        assert_eq!(get("to_addr"), format!("0x{}", "ab".repeat(20)));
        assert_eq!(get("from_addr"), format!("0x{}", "00".repeat(21)));
    }
}
