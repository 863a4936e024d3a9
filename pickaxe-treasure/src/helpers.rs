use cosmwasm_std::{Addr, Deps, MessageInfo};

use crate::error::ContractError;
use crate::state::{item_name, CONFIG, MINTERS};

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

pub fn assert_minter(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !MINTERS.may_load(deps.storage, sender)?.unwrap_or(false) {
        return Err(ContractError::NotAuthorizedMinter);
    }
    Ok(())
}

pub fn assert_item(item_id: u32) -> Result<(), ContractError> {
    if item_name(item_id).is_none() {
        return Err(ContractError::InvalidItem { item_id });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}
