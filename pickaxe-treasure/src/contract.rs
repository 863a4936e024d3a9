use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::*;
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:pickaxe-treasure";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    MINTERS.save(deps.storage, &owner, &true)?;
    for minter in &msg.minters {
        let minter = deps.api.addr_validate(minter)?;
        MINTERS.save(deps.storage, &minter, &true)?;
    }
    CONFIG.save(deps.storage, &Config { owner })?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME))
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint {
            recipient,
            item_id,
            amount,
        } => execute_mint(deps, env, info, recipient, item_id, amount),
        ExecuteMsg::Burn {
            from,
            item_id,
            amount,
        } => execute_burn(deps, env, info, from, item_id, amount),
        ExecuteMsg::AddMinter { minter } => execute_set_minter(deps, info, minter, true),
        ExecuteMsg::RemoveMinter { minter } => execute_set_minter(deps, info, minter, false),
    }
}

// ─── Execute: Mint / Burn ───────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    item_id: u32,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_minter(deps.as_ref(), &info.sender)?;
    assert_item(item_id)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    BALANCES.update(
        deps.storage,
        (&recipient, item_id),
        |b| -> Result<_, ContractError> {
            b.unwrap_or_default()
                .checked_add(amount)
                .map_err(|_| ContractError::Overflow)
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("minter", info.sender.as_str())
        .add_event(
            Event::new("item_minted")
                .add_attribute("recipient", recipient.as_str())
                .add_attribute("item_id", item_id.to_string())
                .add_attribute("amount", amount.to_string()),
        ))
}

pub fn execute_burn(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    from: String,
    item_id: u32,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let from = deps.api.addr_validate(&from)?;
    if from != info.sender {
        return Err(ContractError::Unauthorized {
            role: "item holder".to_string(),
        });
    }
    assert_item(item_id)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let balance = BALANCES
        .may_load(deps.storage, (&from, item_id))?
        .unwrap_or_default();
    if balance < amount {
        return Err(ContractError::InsufficientItems {
            item_id,
            balance: balance.to_string(),
            required: amount.to_string(),
        });
    }
    BALANCES.save(deps.storage, (&from, item_id), &(balance - amount))?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("from", from.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_set_minter(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let minter = deps.api.addr_validate(&minter)?;
    if enabled {
        MINTERS.save(deps.storage, &minter, &true)?;
    } else {
        MINTERS.remove(deps.storage, &minter);
    }

    Ok(Response::new()
        .add_attribute("action", if enabled { "add_minter" } else { "remove_minter" })
        .add_attribute("minter", minter.as_str()))
}

// ─── Query ──────────────────────────────────────────────────────────────────

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address, item_id } => query_balance(deps, address, item_id),
        QueryMsg::PlayerItems { address } => query_player_items(deps, address),
        QueryMsg::ItemName { item_id } => query_item_name(item_id),
        QueryMsg::Minters {} => query_minters(deps),
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
    }
}

pub fn query_balance(deps: Deps, address: String, item_id: u32) -> StdResult<Binary> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES
        .may_load(deps.storage, (&address, item_id))?
        .unwrap_or_default();
    to_json_binary(&ItemBalanceResponse { item_id, balance })
}

pub fn query_player_items(deps: Deps, address: String) -> StdResult<Binary> {
    let address = deps.api.addr_validate(&address)?;
    let mut item_ids = Vec::with_capacity(ITEM_NAMES.len());
    let mut balances = Vec::with_capacity(ITEM_NAMES.len());
    for (id, _) in ITEM_NAMES {
        item_ids.push(id);
        balances.push(
            BALANCES
                .may_load(deps.storage, (&address, id))?
                .unwrap_or_default(),
        );
    }
    to_json_binary(&PlayerItemsResponse { item_ids, balances })
}

pub fn query_item_name(item_id: u32) -> StdResult<Binary> {
    let name = item_name(item_id)
        .ok_or_else(|| StdError::generic_err(format!("Unknown item id {}", item_id)))?;
    to_json_binary(&ItemNameResponse {
        name: name.to_string(),
    })
}

pub fn query_minters(deps: Deps) -> StdResult<Binary> {
    let minters = MINTERS
        .keys(deps.storage, None, None, Order::Ascending)
        .map(|k| k.map(|a| a.to_string()))
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&MintersResponse { minters })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
