use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::*;
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:pickaxe-gold-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_supply.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let owner = deps.api.addr_validate(&msg.owner)?;
    let mining_engine = msg
        .mining_engine
        .map(|e| deps.api.addr_validate(&e))
        .transpose()?;
    if let Some(engine) = &mining_engine {
        MINTERS.save(deps.storage, engine, &true)?;
    }

    let config = Config {
        owner,
        mining_engine,
        name: msg.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        symbol: msg.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        decimals: msg.decimals.unwrap_or(DEFAULT_DECIMALS),
        max_supply: msg.max_supply,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_SUPPLY.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("max_supply", config.max_supply.to_string()))
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, env, info, recipient, amount),
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
        ExecuteMsg::Burn { amount } => execute_burn(deps, env, info, amount),
        ExecuteMsg::BurnFrom { owner, amount } => execute_burn_from(deps, env, info, owner, amount),
        ExecuteMsg::AddMinter { minter } => execute_add_minter(deps, env, info, minter),
        ExecuteMsg::RemoveMinter { minter } => execute_remove_minter(deps, env, info, minter),
        ExecuteMsg::SetMiningEngine { engine } => {
            execute_set_mining_engine(deps, env, info, engine)
        }
        ExecuteMsg::AddBurner { burner } => execute_set_burner(deps, info, burner, true),
        ExecuteMsg::RemoveBurner { burner } => execute_set_burner(deps, info, burner, false),
    }
}

// ─── Execute: Mint ──────────────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_minter(deps.as_ref(), &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = CONFIG.load(deps.storage)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    // Check-and-increment happens inside this one transaction
    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    let new_supply = supply
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    if new_supply > config.max_supply {
        return Err(ContractError::ExceedsMaxSupply {
            max_supply: config.max_supply.to_string(),
        });
    }
    TOTAL_SUPPLY.save(deps.storage, &new_supply)?;
    credit(deps.storage, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("minter", info.sender.as_str())
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("total_supply", new_supply.to_string()))
}

// ─── Execute: Transfer / Burn ───────────────────────────────────────────────

pub fn execute_transfer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    debit(deps.storage, &info.sender, amount)?;
    credit(deps.storage, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender.as_str())
        .add_attribute("to", recipient.as_str())
        .add_attribute("amount", amount.to_string()))
}

pub fn execute_burn(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    burn(deps, &info.sender, amount)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("from", info.sender.as_str())
        .add_attribute("amount", amount.to_string()))
}

pub fn execute_burn_from(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_burner(deps.as_ref(), &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let owner = deps.api.addr_validate(&owner)?;
    burn(deps, &owner, amount)?;

    Ok(Response::new()
        .add_attribute("action", "burn_from")
        .add_attribute("burner", info.sender.as_str())
        .add_attribute("from", owner.as_str())
        .add_attribute("amount", amount.to_string()))
}

fn burn(deps: DepsMut, holder: &cosmwasm_std::Addr, amount: Uint128) -> Result<(), ContractError> {
    debit(deps.storage, holder, amount)?;
    TOTAL_SUPPLY.update(deps.storage, |s| -> Result<_, ContractError> {
        s.checked_sub(amount).map_err(|_| ContractError::Overflow)
    })?;
    Ok(())
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_add_minter(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    minter: String,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let minter = deps.api.addr_validate(&minter)?;
    MINTERS.save(deps.storage, &minter, &true)?;

    Ok(Response::new()
        .add_attribute("action", "add_minter")
        .add_attribute("minter", minter.as_str()))
}

pub fn execute_remove_minter(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    minter: String,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let minter = deps.api.addr_validate(&minter)?;
    let config = CONFIG.load(deps.storage)?;
    if config.mining_engine.as_ref() == Some(&minter) {
        return Err(ContractError::CannotRemoveEngine);
    }
    MINTERS.remove(deps.storage, &minter);

    Ok(Response::new()
        .add_attribute("action", "remove_minter")
        .add_attribute("minter", minter.as_str()))
}

pub fn execute_set_mining_engine(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    engine: String,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let engine = deps.api.addr_validate(&engine)?;

    let mut config = CONFIG.load(deps.storage)?;
    if let Some(previous) = config.mining_engine.take() {
        MINTERS.remove(deps.storage, &previous);
    }
    MINTERS.save(deps.storage, &engine, &true)?;
    config.mining_engine = Some(engine.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_mining_engine")
        .add_attribute("engine", engine.as_str()))
}

pub fn execute_set_burner(
    deps: DepsMut,
    info: MessageInfo,
    burner: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let burner = deps.api.addr_validate(&burner)?;
    if enabled {
        BURNERS.save(deps.storage, &burner, &true)?;
    } else {
        BURNERS.remove(deps.storage, &burner);
    }

    Ok(Response::new()
        .add_attribute("action", if enabled { "add_burner" } else { "remove_burner" })
        .add_attribute("burner", burner.as_str()))
}

// ─── Query ──────────────────────────────────────────────────────────────────

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => query_balance(deps, address),
        QueryMsg::TokenInfo {} => query_token_info(deps),
        QueryMsg::Minters {} => query_minters(deps),
        QueryMsg::IsMinter { address } => query_is_minter(deps, address),
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
    }
}

pub fn query_balance(deps: Deps, address: String) -> StdResult<Binary> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES.may_load(deps.storage, &address)?.unwrap_or_default();
    to_json_binary(&BalanceResponse { balance })
}

pub fn query_token_info(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&TokenInfoResponse {
        name: config.name,
        symbol: config.symbol,
        decimals: config.decimals,
        total_supply: TOTAL_SUPPLY.load(deps.storage)?,
        max_supply: config.max_supply,
    })
}

pub fn query_minters(deps: Deps) -> StdResult<Binary> {
    let minters = MINTERS
        .keys(deps.storage, None, None, Order::Ascending)
        .map(|k| k.map(|a| a.to_string()))
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&MintersResponse { minters })
}

pub fn query_is_minter(deps: Deps, address: String) -> StdResult<Binary> {
    let address = deps.api.addr_validate(&address)?;
    let is_minter = MINTERS.may_load(deps.storage, &address)?.unwrap_or(false);
    to_json_binary(&IsMinterResponse { is_minter })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
