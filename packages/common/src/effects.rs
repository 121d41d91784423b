//! Guarded collaborator calls.
//!
//! Every call into a token, NFT, farm or bank module is dispatched as a
//! sub-message that replies on error. The reply handler attaches the
//! call-specific reason and aborts the whole transaction, so a collaborator fault
//! always surfaces as [`ContractError::ExternalEffectFailure`].
//!
//! Receiver notification is the exception: it replies always and its outcome is
//! only recorded as a `bridge_receiver_result` event. Each notification gets its
//! own reply id at or above [`NOTIFY_REPLY_BASE`], so a receiver that calls back
//! into the bridge cannot clobber the context of the notification in flight.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Event, HexBinary, Reply, Response, StdError, StdResult, Storage,
    SubMsg, SubMsgResult, WasmMsg,
};
use cw_storage_plus::{Item, Map};

use crate::address::LocalAddress;
use crate::codec::InboundMessage;
use crate::error::ContractError;
use crate::hash::to_hex;
use crate::interfaces::ReceiverExecuteMsg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalCall {
    FeeTransfer,
    TokenBurn,
    TokenMint,
    TokenPull,
    TokenRelease,
    FarmTransfer,
    FarmDeposit,
    FarmWithdraw,
    FarmWithdrawAll,
    NftBurn,
    NftMint,
    NftPull,
    NftRelease,
    ReceiverNotify,
}

const ALL_CALLS: [ExternalCall; 14] = [
    ExternalCall::FeeTransfer,
    ExternalCall::TokenBurn,
    ExternalCall::TokenMint,
    ExternalCall::TokenPull,
    ExternalCall::TokenRelease,
    ExternalCall::FarmTransfer,
    ExternalCall::FarmDeposit,
    ExternalCall::FarmWithdraw,
    ExternalCall::FarmWithdrawAll,
    ExternalCall::NftBurn,
    ExternalCall::NftMint,
    ExternalCall::NftPull,
    ExternalCall::NftRelease,
    ExternalCall::ReceiverNotify,
];

/// First reply id of receiver notifications; ids above it carry a sequence number.
pub const NOTIFY_REPLY_BASE: u64 = 1 << 32;

impl ExternalCall {
    pub fn id(self) -> u64 {
        match self {
            ExternalCall::FeeTransfer => 1,
            ExternalCall::TokenBurn => 2,
            ExternalCall::TokenMint => 3,
            ExternalCall::TokenPull => 4,
            ExternalCall::TokenRelease => 5,
            ExternalCall::FarmTransfer => 6,
            ExternalCall::FarmDeposit => 7,
            ExternalCall::FarmWithdraw => 8,
            ExternalCall::FarmWithdrawAll => 9,
            ExternalCall::NftBurn => 10,
            ExternalCall::NftMint => 11,
            ExternalCall::NftPull => 12,
            ExternalCall::NftRelease => 13,
            ExternalCall::ReceiverNotify => NOTIFY_REPLY_BASE,
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        if id >= NOTIFY_REPLY_BASE {
            return Some(ExternalCall::ReceiverNotify);
        }
        ALL_CALLS.into_iter().find(|call| call.id() == id)
    }

    /// Abort message attached to a failure of this call.
    pub fn reason(self) -> &'static str {
        match self {
            ExternalCall::FeeTransfer => "Transfer Bridging Fee Fail",
            ExternalCall::TokenBurn => "Token Burn Fail",
            ExternalCall::TokenMint => "Mint Token Fail",
            ExternalCall::TokenPull => "TransferFrom fail",
            ExternalCall::TokenRelease => "Withdraw fail",
            ExternalCall::FarmTransfer => "TransferToken Fail",
            ExternalCall::FarmDeposit => "Farm Deposit Fail",
            ExternalCall::FarmWithdraw => "Farm Withdraw Fail",
            ExternalCall::FarmWithdrawAll => "Cannot Withdraw From Current Farm",
            ExternalCall::NftBurn => "NFT Burn Fail",
            ExternalCall::NftMint => "Mint NFT Fail",
            ExternalCall::NftPull => "NFT deposit fail",
            ExternalCall::NftRelease => "NFT Withdraw fail",
            ExternalCall::ReceiverNotify => "Bridge receiver call fail",
        }
    }
}

/// Dispatch `msg` so that its failure comes back to `reply` tagged with `call`.
pub fn guarded(msg: impl Into<CosmosMsg>, call: ExternalCall) -> SubMsg {
    SubMsg::reply_on_error(msg, call.id())
}

pub fn failure(call: ExternalCall, error: impl Into<String>) -> ContractError {
    ContractError::ExternalEffectFailure {
        reason: call.reason().to_string(),
        error: error.into(),
    }
}

/// Reply handling for calls dispatched with [`guarded`].
pub fn guarded_reply(call: ExternalCall, result: SubMsgResult) -> Result<Response, ContractError> {
    match result {
        SubMsgResult::Err(error) => Err(failure(call, error)),
        SubMsgResult::Ok(_) => Ok(Response::new()),
    }
}

pub fn unknown_reply(id: u64) -> ContractError {
    ContractError::Std(StdError::generic_err(format!("Unknown reply id: {}", id)))
}

// ============================================================================
// Receiver notification
// ============================================================================

/// Context of a notification in flight, removed by its reply.
#[cw_serde]
#[derive(Default)]
pub struct PendingNotify {
    pub from_addr: HexBinary,
    pub token_address: String,
    pub data: HexBinary,
}

/// Notification contexts keyed by reply id.
pub const PENDING_NOTIFY: Map<u64, PendingNotify> = Map::new("pending_notify");
pub const NOTIFY_SEQ: Item<u64> = Item::new("notify_seq");

/// Queue a receiver notification whose outcome never fails the transfer.
pub fn notify_receiver(
    storage: &mut dyn Storage,
    receiver: &str,
    msg: &ReceiverExecuteMsg,
    context: PendingNotify,
) -> StdResult<SubMsg> {
    let seq = NOTIFY_SEQ.may_load(storage)?.unwrap_or_default();
    NOTIFY_SEQ.save(storage, &(seq.wrapping_add(1) % NOTIFY_REPLY_BASE))?;
    let id = NOTIFY_REPLY_BASE + seq;
    PENDING_NOTIFY.save(storage, id, &context)?;
    let exec = WasmMsg::Execute {
        contract_addr: receiver.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    };
    Ok(SubMsg::reply_always(exec, id))
}

/// Notify `to` when it is a contract recipient of a message carrying a payload.
pub fn notify_if_contract(
    storage: &mut dyn Storage,
    recipient: &LocalAddress,
    to: &Addr,
    message: &InboundMessage,
    token_address: &str,
    msg: ReceiverExecuteMsg,
) -> StdResult<Option<SubMsg>> {
    let data = match (&message.data, recipient.is_contract()) {
        (Some(data), true) => data.clone(),
        _ => return Ok(None),
    };
    let context = PendingNotify {
        from_addr: message.from_addr.clone(),
        token_address: token_address.to_string(),
        data,
    };
    notify_receiver(storage, to.as_str(), &msg, context).map(Some)
}

pub fn receiver_result_event(success: bool, context: &PendingNotify) -> Event {
    Event::new("bridge_receiver_result")
        .add_attribute("success", success.to_string())
        .add_attribute("from_addr", to_hex(context.from_addr.as_slice()))
        .add_attribute("token_address", &context.token_address)
        .add_attribute("data", to_hex(context.data.as_slice()))
}

/// Record the notification outcome. A failed notification is reported, not raised.
///
/// A reply whose context is missing is reported as a failure with empty fields.
pub fn notify_reply(storage: &mut dyn Storage, reply: Reply) -> Result<Response, ContractError> {
    let (context, success) = match PENDING_NOTIFY.may_load(storage, reply.id)? {
        Some(context) => (context, reply.result.is_ok()),
        None => (PendingNotify::default(), false),
    };
    PENDING_NOTIFY.remove(storage, reply.id);

    Ok(Response::new()
        .add_attribute("method", "bridge_receiver_result")
        .add_event(receiver_result_event(success, &context)))
}
