//! Local side of a transfer: what happens to balances when value leaves or
//! arrives.
//!
//! [`MintBurn`] serves wrapped assets the bridge can mint. [`LockUnlock`] keeps
//! original assets in custody, optionally parked in a yield farm. Both only
//! produce guarded sub-messages; nothing runs until the handler returns.

use cosmwasm_std::{to_json_binary, Addr, BankMsg, Coin, Env, SubMsg, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::asset::AssetInfo;
use crate::effects::{guarded, ExternalCall};
use crate::error::ContractError;
use crate::interfaces::{FarmExecuteMsg, NftExecuteMsg};

pub trait TransferAdapter {
    /// Take `amount` of `asset` from `owner` for an outbound transfer.
    fn outbound(
        &self,
        env: &Env,
        asset: &AssetInfo,
        owner: &Addr,
        amount: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError>;

    /// Deliver `amount` of `asset` to `recipient` for an inbound transfer.
    fn inbound(
        &self,
        asset: &AssetInfo,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError>;

    fn outbound_nft(
        &self,
        env: &Env,
        contract: &Addr,
        owner: &Addr,
        token_id: &str,
    ) -> Result<Vec<SubMsg>, ContractError>;

    fn inbound_nft(
        &self,
        contract: &Addr,
        recipient: &Addr,
        token_id: &str,
    ) -> Result<Vec<SubMsg>, ContractError>;
}

fn wasm_execute<T: serde::Serialize>(contract: &Addr, msg: &T) -> Result<WasmMsg, ContractError> {
    Ok(WasmMsg::Execute {
        contract_addr: contract.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    })
}

fn unsupported(asset: &AssetInfo) -> ContractError {
    ContractError::InvalidTokenAddress {
        reason: format!("{} cannot be bridged as a fungible token", asset),
    }
}

/// Plain custody transfer of a fungible asset held by the bridge.
pub fn custody_transfer(
    asset: &AssetInfo,
    recipient: &Addr,
    amount: Uint128,
    call: ExternalCall,
) -> Result<SubMsg, ContractError> {
    match asset {
        AssetInfo::Native { denom } => Ok(guarded(
            BankMsg::Send {
                to_address: recipient.to_string(),
                amount: vec![Coin {
                    denom: denom.clone(),
                    amount,
                }],
            },
            call,
        )),
        AssetInfo::Cw20 { contract_addr } => Ok(guarded(
            wasm_execute(
                contract_addr,
                &Cw20ExecuteMsg::Transfer {
                    recipient: recipient.to_string(),
                    amount,
                },
            )?,
            call,
        )),
        AssetInfo::Cw721 { .. } => Err(unsupported(asset)),
    }
}

/// Move `amount` of custody into `farm` and register it as a deposit.
pub fn farm_deposit(
    asset: &AssetInfo,
    farm: &Addr,
    amount: Uint128,
) -> Result<Vec<SubMsg>, ContractError> {
    if amount.is_zero() {
        return Ok(vec![]);
    }
    Ok(vec![
        custody_transfer(asset, farm, amount, ExternalCall::FarmTransfer)?,
        guarded(
            wasm_execute(farm, &FarmExecuteMsg::Deposit { amount })?,
            ExternalCall::FarmDeposit,
        ),
    ])
}

// ============================================================================
// Mint / burn
// ============================================================================

pub struct MintBurn;

impl TransferAdapter for MintBurn {
    fn outbound(
        &self,
        _env: &Env,
        asset: &AssetInfo,
        owner: &Addr,
        amount: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError> {
        match asset {
            AssetInfo::Cw20 { contract_addr } => Ok(vec![guarded(
                wasm_execute(
                    contract_addr,
                    &Cw20ExecuteMsg::BurnFrom {
                        owner: owner.to_string(),
                        amount,
                    },
                )?,
                ExternalCall::TokenBurn,
            )]),
            _ => Err(unsupported(asset)),
        }
    }

    fn inbound(
        &self,
        asset: &AssetInfo,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError> {
        match asset {
            AssetInfo::Cw20 { contract_addr } => Ok(vec![guarded(
                wasm_execute(
                    contract_addr,
                    &Cw20ExecuteMsg::Mint {
                        recipient: recipient.to_string(),
                        amount,
                    },
                )?,
                ExternalCall::TokenMint,
            )]),
            _ => Err(unsupported(asset)),
        }
    }

    fn outbound_nft(
        &self,
        _env: &Env,
        contract: &Addr,
        _owner: &Addr,
        token_id: &str,
    ) -> Result<Vec<SubMsg>, ContractError> {
        Ok(vec![guarded(
            wasm_execute(
                contract,
                &NftExecuteMsg::Burn {
                    token_id: token_id.to_string(),
                },
            )?,
            ExternalCall::NftBurn,
        )])
    }

    fn inbound_nft(
        &self,
        contract: &Addr,
        recipient: &Addr,
        token_id: &str,
    ) -> Result<Vec<SubMsg>, ContractError> {
        Ok(vec![guarded(
            wasm_execute(
                contract,
                &NftExecuteMsg::Mint {
                    token_id: token_id.to_string(),
                    owner: recipient.to_string(),
                },
            )?,
            ExternalCall::NftMint,
        )])
    }
}

// ============================================================================
// Lock / unlock
// ============================================================================

/// Custody strategy for one asset, with the farm bound to it if any.
pub struct LockUnlock {
    pub farm: Option<Addr>,
}

impl TransferAdapter for LockUnlock {
    fn outbound(
        &self,
        env: &Env,
        asset: &AssetInfo,
        owner: &Addr,
        amount: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError> {
        let mut msgs = match asset {
            // Native coins arrive with the call itself
            AssetInfo::Native { .. } => vec![],
            AssetInfo::Cw20 { contract_addr } => vec![guarded(
                wasm_execute(
                    contract_addr,
                    &Cw20ExecuteMsg::TransferFrom {
                        owner: owner.to_string(),
                        recipient: env.contract.address.to_string(),
                        amount,
                    },
                )?,
                ExternalCall::TokenPull,
            )],
            AssetInfo::Cw721 { .. } => return Err(unsupported(asset)),
        };
        if let Some(farm) = &self.farm {
            msgs.extend(farm_deposit(asset, farm, amount)?);
        }
        Ok(msgs)
    }

    fn inbound(
        &self,
        asset: &AssetInfo,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError> {
        match &self.farm {
            Some(farm) => Ok(vec![guarded(
                wasm_execute(
                    farm,
                    &FarmExecuteMsg::Withdraw {
                        to: recipient.to_string(),
                        amount,
                    },
                )?,
                ExternalCall::FarmWithdraw,
            )]),
            None => Ok(vec![custody_transfer(
                asset,
                recipient,
                amount,
                ExternalCall::TokenRelease,
            )?]),
        }
    }

    fn outbound_nft(
        &self,
        env: &Env,
        contract: &Addr,
        _owner: &Addr,
        token_id: &str,
    ) -> Result<Vec<SubMsg>, ContractError> {
        Ok(vec![guarded(
            wasm_execute(
                contract,
                &NftExecuteMsg::TransferNft {
                    recipient: env.contract.address.to_string(),
                    token_id: token_id.to_string(),
                },
            )?,
            ExternalCall::NftPull,
        )])
    }

    fn inbound_nft(
        &self,
        contract: &Addr,
        recipient: &Addr,
        token_id: &str,
    ) -> Result<Vec<SubMsg>, ContractError> {
        Ok(vec![guarded(
            wasm_execute(
                contract,
                &NftExecuteMsg::TransferNft {
                    recipient: recipient.to_string(),
                    token_id: token_id.to_string(),
                },
            )?,
            ExternalCall::NftRelease,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_env;
    use cosmwasm_std::{from_json, CosmosMsg};

    fn cw20() -> AssetInfo {
        AssetInfo::Cw20 {
            contract_addr: Addr::unchecked("token"),
        }
    }

    fn wasm_msg<T: serde::de::DeserializeOwned>(sub: &SubMsg) -> (String, T) {
        match &sub.msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => (contract_addr.clone(), from_json(msg).unwrap()),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_mint_burn_cw20() {
        let env = mock_env();
        let user = Addr::unchecked("user");
        let out = MintBurn
            .outbound(&env, &cw20(), &user, Uint128::new(10))
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, ExternalCall::TokenBurn.id());
        let (_, msg): (String, Cw20ExecuteMsg) = wasm_msg(&out[0]);
        assert_eq!(
            msg,
            Cw20ExecuteMsg::BurnFrom {
                owner: "user".to_string(),
                amount: Uint128::new(10)
            }
        );

        let native = AssetInfo::Native {
            denom: "uluna".to_string(),
        };
        assert!(MintBurn.inbound(&native, &user, Uint128::one()).is_err());
    }

    #[test]
    fn test_lock_without_farm_pulls_into_custody() {
        let env = mock_env();
        let user = Addr::unchecked("user");
        let out = LockUnlock { farm: None }
            .outbound(&env, &cw20(), &user, Uint128::new(10))
            .unwrap();
        assert_eq!(out.len(), 1);
        let (_, msg): (String, Cw20ExecuteMsg) = wasm_msg(&out[0]);
        assert_eq!(
            msg,
            Cw20ExecuteMsg::TransferFrom {
                owner: "user".to_string(),
                recipient: env.contract.address.to_string(),
                amount: Uint128::new(10)
            }
        );
    }

    #[test]
    fn test_lock_with_farm_forwards_deposit() {
        let env = mock_env();
        let user = Addr::unchecked("user");
        let adapter = LockUnlock {
            farm: Some(Addr::unchecked("farm")),
        };
        let out = adapter
            .outbound(&env, &cw20(), &user, Uint128::new(10))
            .unwrap();
        let ids: Vec<u64> = out.iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![
                ExternalCall::TokenPull.id(),
                ExternalCall::FarmTransfer.id(),
                ExternalCall::FarmDeposit.id()
            ]
        );
        let (farm, msg): (String, FarmExecuteMsg) = wasm_msg(&out[2]);
        assert_eq!(farm, "farm");
        assert_eq!(
            msg,
            FarmExecuteMsg::Deposit {
                amount: Uint128::new(10)
            }
        );
    }

    #[test]
    fn test_unlock_through_farm() {
        let adapter = LockUnlock {
            farm: Some(Addr::unchecked("farm")),
        };
        let out = adapter
            .inbound(&cw20(), &Addr::unchecked("recipient"), Uint128::new(3))
            .unwrap();
        let (farm, msg): (String, FarmExecuteMsg) = wasm_msg(&out[0]);
        assert_eq!(farm, "farm");
        assert_eq!(
            msg,
            FarmExecuteMsg::Withdraw {
                to: "recipient".to_string(),
                amount: Uint128::new(3)
            }
        );
    }

    #[test]
    fn test_unlock_native_from_custody() {
        let native = AssetInfo::Native {
            denom: "uluna".to_string(),
        };
        let out = LockUnlock { farm: None }
            .inbound(&native, &Addr::unchecked("recipient"), Uint128::new(3))
            .unwrap();
        assert_eq!(out[0].id, ExternalCall::TokenRelease.id());
        assert!(matches!(out[0].msg, CosmosMsg::Bank(BankMsg::Send { .. })));
    }
}
