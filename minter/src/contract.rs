//! Bridge Minter - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `bridge_common` - registries, codec, quorum and transfer adapters

use bridge_common::effects::{guarded_reply, notify_reply, unknown_reply, ExternalCall};
use bridge_common::query::{
    query_chain, query_deposit_count, query_is_used_hash, query_message_hash, query_tax,
    query_token, query_token_by_asset,
};
use bridge_common::ContractError;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::execute::{
    execute_add_token, execute_request_swap, execute_request_swap_nft, execute_set_activated,
    execute_set_bridging_fee, execute_set_fee_governance, execute_set_gov_id,
    execute_set_tax_rate, execute_set_tax_receiver, execute_set_valid_chain, execute_swap,
    execute_swap_nft, execute_transfer_ownership,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::query_config;
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, GOV_ID_LENGTH};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let governance = deps.api.addr_validate(&msg.governance)?;
    let fee_governance = deps.api.addr_validate(&msg.fee_governance)?;

    if msg.gov_id.len() != GOV_ID_LENGTH {
        return Err(ContractError::InvalidGovId);
    }
    if msg.chain.is_empty() {
        return Err(ContractError::invalid_chain("chain"));
    }
    if msg.settlement_chain.is_empty() || msg.settlement_chain == msg.chain {
        return Err(ContractError::invalid_chain("settlementChain"));
    }

    let config = Config {
        governance,
        fee_governance,
        bridging_fee: msg.bridging_fee,
        gov_id: msg.gov_id,
        chain: msg.chain,
        fee_denom: msg.fee_denom,
        address_prefix: msg.address_prefix,
        settlement_chain: msg.settlement_chain,
        activated: true,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("governance", config.governance.as_str())
        .add_attribute("chain", config.chain.as_str())
        .add_attribute("bridging_fee", config.bridging_fee))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing
        ExecuteMsg::RequestSwap {
            token,
            to_chain,
            to_addr,
            amount,
        } => execute_request_swap(deps, env, info, token, to_chain, to_addr, amount),
        ExecuteMsg::RequestSwapNft {
            nft,
            to_chain,
            to_addr,
            token_id,
        } => execute_request_swap_nft(deps, env, info, nft, to_chain, to_addr, token_id),

        // Incoming
        ExecuteMsg::Swap { message, sigs } => execute_swap(deps, message, sigs),
        ExecuteMsg::SwapNft { message, sigs } => execute_swap_nft(deps, message, sigs),

        // Governance
        ExecuteMsg::TransferOwnership { governance } => {
            execute_transfer_ownership(deps, info, governance)
        }
        ExecuteMsg::SetFeeGovernance { fee_governance } => {
            execute_set_fee_governance(deps, info, fee_governance)
        }
        ExecuteMsg::SetBridgingFee { bridging_fee } => {
            execute_set_bridging_fee(deps, info, bridging_fee)
        }
        ExecuteMsg::SetGovId { gov_id } => execute_set_gov_id(deps, info, gov_id),
        ExecuteMsg::SetActivated { activated } => execute_set_activated(deps, info, activated),
        ExecuteMsg::SetValidChain {
            chain,
            valid,
            address_length,
            uints_length,
        } => execute_set_valid_chain(deps, info, chain, valid, address_length, uints_length),
        ExecuteMsg::AddToken { descriptor, asset } => {
            execute_add_token(deps, info, descriptor, asset)
        }
        ExecuteMsg::SetTaxRate { rate_bps } => execute_set_tax_rate(deps, info, rate_bps),
        ExecuteMsg::SetTaxReceiver { receiver } => {
            execute_set_tax_receiver(deps, info, receiver)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match ExternalCall::from_id(msg.id) {
        Some(ExternalCall::ReceiverNotify) => notify_reply(deps.storage, msg),
        Some(call) => guarded_reply(call, msg.result),
        None => Err(unknown_reply(msg.id)),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Chain { chain } => to_json_binary(&query_chain(deps, chain)?),
        QueryMsg::Token { descriptor } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&query_token(deps, &config.chain, descriptor)?)
        }
        QueryMsg::TokenByAsset { asset } => to_json_binary(&query_token_by_asset(deps, asset)?),
        QueryMsg::IsUsedHash { hash } => to_json_binary(&query_is_used_hash(deps, hash)?),
        QueryMsg::DepositCount {} => to_json_binary(&query_deposit_count(deps)?),
        QueryMsg::Tax {} => to_json_binary(&query_tax(deps)?),
        QueryMsg::MessageHash { message, nft } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&query_message_hash(&config.chain, message, nft)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_common::address::{encode_bech32_address, AddressKind, LocalAddress};
    use bridge_common::codec::pack_uints;
    use bridge_common::effects::PENDING_NOTIFY;
    use bridge_common::hash::signer_identity;
    use bridge_common::interfaces::{
        IsOwnerResponse, MultisigQueryMsg, ReceiverExecuteMsg, RequirementResponse,
    };
    use bridge_common::{AssetInfo, InboundMessage, MessageKind};
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{
        from_json, Addr, ContractInfoResponse, ContractResult, CosmosMsg, HexBinary, OwnedDeps,
        ReplyOn, SubMsgResult, SystemResult, Uint128, Uint256, WasmMsg, WasmQuery,
    };
    use cw20::{Cw20QueryMsg, TokenInfoResponse};
    use k256::ecdsa::SigningKey;

    const GOVERNANCE: &str = "governance";
    const WRAPPED: &str = "wrapped";

    fn owner_key() -> SigningKey {
        SigningKey::from_slice(&[5u8; 32]).unwrap()
    }

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        let point = owner_key().verifying_key().to_encoded_point(false);
        let owner = HexBinary::from(signer_identity(point.as_bytes()).to_vec());

        deps.querier.update_wasm(move |query| match query {
            WasmQuery::ContractInfo { .. } => SystemResult::Ok(ContractResult::Ok(
                to_json_binary(&ContractInfoResponse::default()).unwrap(),
            )),
            WasmQuery::Smart { contract_addr, msg } if contract_addr == GOVERNANCE => {
                let res = match from_json::<MultisigQueryMsg>(msg).unwrap() {
                    MultisigQueryMsg::Requirement {} => {
                        to_json_binary(&RequirementResponse { required: 1 })
                    }
                    MultisigQueryMsg::IsOwner { owner: candidate } => {
                        to_json_binary(&IsOwnerResponse {
                            is_owner: candidate == owner,
                        })
                    }
                };
                SystemResult::Ok(ContractResult::Ok(res.unwrap()))
            }
            WasmQuery::Smart { msg, .. } => match from_json::<Cw20QueryMsg>(msg).unwrap() {
                Cw20QueryMsg::TokenInfo {} => SystemResult::Ok(ContractResult::Ok(
                    to_json_binary(&TokenInfoResponse {
                        name: "Wrapped".to_string(),
                        symbol: "WRP".to_string(),
                        decimals: 6,
                        total_supply: Uint128::zero(),
                    })
                    .unwrap(),
                )),
                _ => SystemResult::Ok(ContractResult::Err("unsupported".to_string())),
            },
            _ => SystemResult::Ok(ContractResult::Err("unsupported".to_string())),
        });

        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("deployer", &[]),
            InstantiateMsg {
                governance: GOVERNANCE.to_string(),
                fee_governance: "feegov".to_string(),
                bridging_fee: Uint128::zero(),
                gov_id: HexBinary::from(vec![7u8; 32]),
                chain: "TERRA".to_string(),
                fee_denom: "uluna".to_string(),
                address_prefix: "terra".to_string(),
                settlement_chain: "HUB".to_string(),
            },
        )
        .unwrap();

        let gov = mock_info(GOVERNANCE, &[]);
        execute(
            deps.as_mut(),
            mock_env(),
            gov.clone(),
            ExecuteMsg::SetValidChain {
                chain: "KLAYTN".to_string(),
                valid: true,
                address_length: 20,
                uints_length: 64,
            },
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            gov,
            ExecuteMsg::AddToken {
                descriptor: HexBinary::from(vec![0xaa; 20]),
                asset: AssetInfo::Cw20 {
                    contract_addr: Addr::unchecked(WRAPPED),
                },
            },
        )
        .unwrap();
        deps
    }

    fn message(kind: AddressKind, data: Option<HexBinary>) -> InboundMessage {
        InboundMessage {
            hub_contract: HexBinary::from(vec![9u8; 20]),
            from_chain: "KLAYTN".to_string(),
            from_addr: HexBinary::from(vec![0x11; 20]),
            to_addr: HexBinary::from(LocalAddress::new(kind, [0x66; 20]).to_bytes().to_vec()),
            token: HexBinary::from(vec![0xaa; 20]),
            bytes32s: HexBinary::from(vec![7u8; 32]),
            uints: pack_uints(&[Uint256::from(250u128), Uint256::from(6u128)]),
            data,
        }
    }

    fn sigs(message: &InboundMessage) -> String {
        let hash = message.hash("TERRA", MessageKind::Fungible);
        let (signature, recovery) = owner_key().sign_prehash_recoverable(&hash).unwrap();
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recovery.to_byte() + 27);
        hex::encode(bytes)
    }

    #[test]
    fn test_contract_recipient_is_notified() {
        let mut deps = setup();
        let msg = message(AddressKind::Contract, Some(HexBinary::from(vec![0xbe, 0xef])));
        let sigs = sigs(&msg);

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            ExecuteMsg::Swap { message: msg, sigs },
        )
        .unwrap();
        assert_eq!(res.messages.len(), 2);
        assert_eq!(res.messages[0].reply_on, ReplyOn::Error);
        assert_eq!(res.messages[1].reply_on, ReplyOn::Always);

        let receiver = encode_bech32_address(&[0x66; 20], "terra").unwrap();
        match &res.messages[1].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, &receiver);
                let notify: ReceiverExecuteMsg = from_json(msg).unwrap();
                assert_eq!(
                    notify,
                    ReceiverExecuteMsg::OnTokenBridgeReceived {
                        token: WRAPPED.to_string(),
                        amount: Uint128::new(250),
                        from_chain: "KLAYTN".to_string(),
                        from_addr: HexBinary::from(vec![0x11; 20]),
                        data: HexBinary::from(vec![0xbe, 0xef]),
                    }
                );
            }
            other => panic!("unexpected message {:?}", other),
        }

        // A rejecting receiver does not undo the transfer
        let notify_id = res.messages[1].id;
        assert!(PENDING_NOTIFY.has(&deps.storage, notify_id));
        let res = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: notify_id,
                result: SubMsgResult::Err("receiver panicked".to_string()),
            },
        )
        .unwrap();
        let event = &res.events[0];
        assert_eq!(event.ty, "bridge_receiver_result");
        assert!(event
            .attributes
            .iter()
            .any(|a| a.key == "success" && a.value == "false"));
        assert!(!PENDING_NOTIFY.has(&deps.storage, notify_id));
    }

    #[test]
    fn test_account_recipient_or_missing_payload_is_not_notified() {
        let mut deps = setup();

        let account = message(AddressKind::Account, Some(HexBinary::from(vec![1u8])));
        let sigs_account = sigs(&account);
        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            ExecuteMsg::Swap {
                message: account,
                sigs: sigs_account,
            },
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);

        let no_payload = message(AddressKind::Contract, None);
        let sigs_contract = sigs(&no_payload);
        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            ExecuteMsg::Swap {
                message: no_payload,
                sigs: sigs_contract,
            },
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
    }

    #[test]
    fn test_failed_effect_aborts_with_reason() {
        let mut deps = setup();
        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: ExternalCall::TokenMint.id(),
                result: SubMsgResult::Err("minting is disabled".to_string()),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Mint Token Fail: minting is disabled");

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: 999,
                result: SubMsgResult::Err("unknown".to_string()),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown reply id"));
    }
}
