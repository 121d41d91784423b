//! Message types for the bridge vault.

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
    /// Operator allowed to pause the bridge and set chain fees
    pub policy_admin: Option<String>,
    /// Name of this chain (e.g. "TERRA")
    pub chain: String,
    /// Bank denom for fees and native deposits
    pub fee_denom: String,
    /// Decimals announced for native deposits (6 for uluna)
    pub native_decimals: u8,
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
    // Outgoing Transfers (Lock)
    // ========================================================================
    /// Lock native coins. The attached `fee_denom` amount minus the chain fee is
    /// bridged to `to_chain`.
    Deposit {
        to_chain: String,
        to_addr: HexBinary,
        data: Option<HexBinary>,
    },

    /// Lock `amount` of an admitted CW20 (requires an allowance for the vault).
    /// The chain fee is attached in `fee_denom`.
    DepositToken {
        token: String,
        to_chain: String,
        to_addr: HexBinary,
        amount: Uint128,
        data: Option<HexBinary>,
    },

    /// Lock an NFT of an admitted collection (requires the vault to be approved)
    DepositNft {
        nft: String,
        to_chain: String,
        to_addr: HexBinary,
        token_id: Uint256,
        data: Option<HexBinary>,
    },

    // ========================================================================
    // Incoming Transfers (Unlock)
    // ========================================================================
    /// Release locked value. `sigs` is a comma separated list of hex signatures
    /// over the message hash.
    Withdraw { message: InboundMessage, sigs: String },

    WithdrawNft { message: InboundMessage, sigs: String },

    // ========================================================================
    // Governance
    // ========================================================================
    TransferOwnership { governance: String },

    SetFeeGovernance { fee_governance: String },

    SetPolicyAdmin { policy_admin: String },

    /// Admit or remove a remote chain. Widths apply to messages from that chain.
    SetValidChain {
        chain: String,
        valid: bool,
        address_length: u64,
        uints_length: u64,
    },

    SetChainLength {
        chain: String,
        address_length: u64,
        uints_length: u64,
    },

    /// Bind a remote token descriptor to a local asset
    AddToken {
        descriptor: HexBinary,
        asset: AssetInfo,
    },

    SetTaxRate { rate_bps: u16 },

    SetTaxReceiver { receiver: HexBinary },

    /// Move the custody of `asset` into a yield farm
    AddFarm { asset: AssetInfo, farm: String },

    /// Withdraw everything from the bound farm, then bind `new_farm` or keep the
    /// funds in custody
    RemoveFarm {
        asset: AssetInfo,
        new_farm: Option<String>,
    },

    // ========================================================================
    // Policy Admin
    // ========================================================================
    SetActivated { activated: bool },

    SetChainFee {
        chain: String,
        fee: Uint128,
        fee_with_data: Uint128,
    },
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

    /// Binding id the hub must embed in messages for this vault
    #[returns(GovIdResponse)]
    GovId { hub_contract: HexBinary },

    #[returns(FarmResponse)]
    Farm { asset: AssetInfo },
}

#[cw_serde]
pub struct ConfigResponse {
    pub governance: Addr,
    pub fee_governance: Addr,
    pub policy_admin: Option<Addr>,
    pub chain: String,
    pub fee_denom: String,
    pub native_decimals: u8,
    pub address_prefix: String,
    pub settlement_chain: String,
    pub activated: bool,
}

#[cw_serde]
pub struct GovIdResponse {
    pub gov_id: HexBinary,
}

#[cw_serde]
pub struct FarmResponse {
    pub farm: Option<Addr>,
}
