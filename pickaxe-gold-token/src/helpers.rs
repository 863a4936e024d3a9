use cosmwasm_std::{Addr, Deps, MessageInfo, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{BALANCES, BURNERS, CONFIG, MINTERS};

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

pub fn assert_burner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !BURNERS.may_load(deps.storage, sender)?.unwrap_or(false) {
        return Err(ContractError::Unauthorized {
            role: "burner".to_string(),
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

/// Subtract `amount` from `holder`, failing if the balance is short.
pub fn debit(storage: &mut dyn Storage, holder: &Addr, amount: Uint128) -> Result<(), ContractError> {
    let balance = BALANCES.may_load(storage, holder)?.unwrap_or_default();
    if balance < amount {
        return Err(ContractError::InsufficientFunds {
            balance: balance.to_string(),
            required: amount.to_string(),
        });
    }
    BALANCES.save(storage, holder, &(balance - amount))?;
    Ok(())
}

pub fn credit(storage: &mut dyn Storage, holder: &Addr, amount: Uint128) -> Result<(), ContractError> {
    let balance = BALANCES.may_load(storage, holder)?.unwrap_or_default();
    let updated = balance
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    BALANCES.save(storage, holder, &updated)?;
    Ok(())
}
