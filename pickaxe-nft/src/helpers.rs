use cosmwasm_std::{Addr, Deps, MessageInfo, StdResult, Storage, WasmMsg};
use pickaxe_fhe::{evaluate_msg, Handle, Program};

use crate::error::ContractError;
use crate::state::{Pickaxe, CONFIG, NEXT_HANDLE_INDEX, TOKENS};

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

pub fn assert_mining_engine(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.mining_engine.as_ref() != Some(sender) {
        return Err(ContractError::Unauthorized {
            role: "mining engine".to_string(),
        });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

pub fn load_pickaxe(deps: Deps, token_id: u64) -> Result<Pickaxe, ContractError> {
    TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })
}

/// Load a pickaxe and check the caller owns it.
pub fn load_owned(deps: Deps, token_id: u64, sender: &Addr) -> Result<Pickaxe, ContractError> {
    let pickaxe = load_pickaxe(deps, token_id)?;
    if pickaxe.owner != *sender {
        return Err(ContractError::NotOwner { token_id });
    }
    Ok(pickaxe)
}

/// Start a coprocessor program at this contract's next free slot.
pub fn start_program(storage: &dyn Storage, contract: &Addr) -> StdResult<Program> {
    let next = NEXT_HANDLE_INDEX.may_load(storage)?.unwrap_or_default();
    Ok(Program::new(contract.clone(), next))
}

/// Persist the slot cursor and build the `Evaluate` message.
pub fn submit_program(
    storage: &mut dyn Storage,
    executor: &Addr,
    program: Program,
) -> StdResult<WasmMsg> {
    let (ops, next) = program.finish();
    NEXT_HANDLE_INDEX.save(storage, &next)?;
    evaluate_msg(executor, ops)
}

/// `Evaluate` message granting `account` access to `handle`.
pub fn grant_msg(
    storage: &dyn Storage,
    contract: &Addr,
    executor: &Addr,
    handle: &Handle,
    account: &Addr,
) -> StdResult<WasmMsg> {
    let mut program = start_program(storage, contract)?;
    program.allow(handle, account);
    let (ops, _) = program.finish();
    evaluate_msg(executor, ops)
}
