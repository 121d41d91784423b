//! Message types for the bridge minter.

use bridge_common::fee::TaxConfig;
use bridge_common::query::{
    ChainResponse, DepositCountResponse, HashResponse, IsUsedHashResponse, TokenResponse,
};
use bridge_common::{AssetInfo, InboundMessage};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Uint128, Uint256};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Multisig contract governing the bridge
    pub governance: String,
    /// Receiver of bridging fees
    pub fee_governance: String,
    /// Minimum fee in `fee_denom` per outbound request
    pub bridging_fee: Uint128,
    /// 32-byte governance id expected in inbound messages
    pub gov_id: HexBinary,
    /// Name of this chain (e.g. "TERRA")
    pub chain: String,
    pub fee_denom: String,
    /// Bech32 prefix used to render recipients (e.g. "terra")
    pub address_prefix: String,
    /// Chain that receives the tax share of outbound transfers
    pub settlement_chain: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing Transfers (Burn)
    // ========================================================================
    /// Burn `amount` of an admitted wrapped CW20 and announce it to `to_chain`.
    /// The bridging fee is attached in `fee_denom`.
    RequestSwap {
        token: String,
        to_chain: String,
        to_addr: HexBinary,
        amount: Uint128,
    },

    /// Burn an NFT of an admitted collection and announce it to `to_chain`
    RequestSwapNft {
        nft: String,
        to_chain: String,
        to_addr: HexBinary,
        token_id: Uint256,
    },

    // ========================================================================
    // Incoming Transfers (Mint)
    // ========================================================================
    /// Mint a wrapped token. `sigs` is a comma separated list of hex signatures
    /// over the message hash.
    Swap { message: InboundMessage, sigs: String },

    SwapNft { message: InboundMessage, sigs: String },

    // ========================================================================
    // Governance
    // ========================================================================
    TransferOwnership { governance: String },

    SetFeeGovernance { fee_governance: String },

    SetBridgingFee { bridging_fee: Uint128 },

    SetGovId { gov_id: HexBinary },

    SetActivated { activated: bool },

    /// Admit or remove a remote chain. Widths apply to messages from that chain.
    SetValidChain {
        chain: String,
        valid: bool,
        address_length: u64,
        uints_length: u64,
    },

    /// Bind a remote token descriptor to a local wrapped token
    AddToken {
        descriptor: HexBinary,
        asset: AssetInfo,
    },

    SetTaxRate { rate_bps: u16 },

    SetTaxReceiver { receiver: HexBinary },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(ChainResponse)]
    Chain { chain: String },

    /// Token admitted under a remote descriptor
    #[returns(TokenResponse)]
    Token { descriptor: HexBinary },

    #[returns(TokenResponse)]
    TokenByAsset { asset: AssetInfo },

    #[returns(IsUsedHashResponse)]
    IsUsedHash { hash: HexBinary },

    #[returns(DepositCountResponse)]
    DepositCount {},

    #[returns(TaxConfig)]
    Tax {},

    /// Hash relayers collect signatures over
    #[returns(HashResponse)]
    MessageHash { message: InboundMessage, nft: bool },
}

#[cw_serde]
pub struct ConfigResponse {
    pub governance: Addr,
    pub fee_governance: Addr,
    pub bridging_fee: Uint128,
    pub gov_id: HexBinary,
    pub chain: String,
    pub fee_denom: String,
    pub address_prefix: String,
    pub settlement_chain: String,
    pub activated: bool,
}
