use cosmwasm_std::{
    coins, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order,
    Response, StdResult, Storage, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use pickaxe_fhe::{BlockEntropy, RandomSource};

use crate::catalog::*;
use crate::error::ContractError;
use crate::helpers::*;
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:pickaxe-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_NAME: &str = "Pickaxe";
const DEFAULT_SYMBOL: &str = "PICK";
const EFFICIENCY_DOMAIN: &[u8] = b"pickaxe-nft/efficiency/v1";

const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let levels = match msg.level_configs {
        Some(entries) => entries.into_iter().map(|e| (e.level, e.config)).collect(),
        None => default_level_configs(),
    };
    for (level, config) in &levels {
        validate_level(*level)?;
        validate_level_config(config)?;
        LEVEL_CONFIGS.save(deps.storage, *level, config)?;
    }

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        mining_engine: msg
            .mining_engine
            .map(|e| deps.api.addr_validate(&e))
            .transpose()?,
        fhe_executor: deps.api.addr_validate(&msg.fhe_executor)?,
        denom: msg.denom,
        gold_token: None,
        repair_cost_per_point: Uint128::zero(),
        name: msg.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        symbol: msg.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
    };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;
    NEXT_HANDLE_INDEX.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("levels", levels.len().to_string()))
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { level } => execute_mint(deps, env, info, level),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, env, info, recipient, token_id),
        ExecuteMsg::ConsumeDurability { token_id, amount } => {
            execute_consume_durability(deps, env, info, token_id, amount)
        }
        ExecuteMsg::Repair { token_id, amount } => {
            execute_repair(deps, env, info, token_id, amount)
        }
        ExecuteMsg::UpdateLevelConfig { level, config } => {
            execute_update_level_config(deps, info, level, config)
        }
        ExecuteMsg::SetMiningEngine { engine } => execute_set_mining_engine(deps, info, engine),
        ExecuteMsg::SetRepairCost {
            gold_token,
            cost_per_point,
        } => execute_set_repair_cost(deps, info, gold_token, cost_per_point),
        ExecuteMsg::WithdrawFunds { recipient, amount } => {
            execute_withdraw_funds(deps, env, info, recipient, amount)
        }
    }
}

// ─── Execute: Mint ──────────────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    level: u8,
) -> Result<Response, ContractError> {
    validate_level(level)?;
    let config = CONFIG.load(deps.storage)?;
    let level_config = LEVEL_CONFIGS
        .may_load(deps.storage, level)?
        .ok_or(ContractError::InvalidLevel { level })?;

    let paid = paid_amount(&info, &config.denom)?;
    if paid < level_config.mint_price {
        return Err(ContractError::InsufficientPayment {
            required: level_config.mint_price.to_string(),
            paid: paid.to_string(),
        });
    }

    let token_id = TOKEN_COUNT.load(deps.storage)? + 1;
    let id_bytes = token_id.to_be_bytes();
    let mut rng = BlockEntropy::from_env(
        &env,
        EFFICIENCY_DOMAIN,
        &[info.sender.as_bytes(), &id_bytes],
    );
    let evaluate = mint_pickaxe(
        deps.storage,
        &env.contract.address,
        &config,
        &info.sender,
        token_id,
        level,
        &level_config,
        &mut rng,
    )?;

    let mut res = Response::new()
        .add_message(evaluate)
        .add_attribute("action", "mint")
        .add_attribute("token_id", token_id.to_string())
        .add_event(
            Event::new("pickaxe_minted")
                .add_attribute("owner", info.sender.as_str())
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("level", level.to_string()),
        );

    let refund = paid - level_config.mint_price;
    if !refund.is_zero() {
        res = res
            .add_message(BankMsg::Send {
                to_address: info.sender.to_string(),
                amount: coins(refund.u128(), &config.denom),
            })
            .add_attribute("refund", refund.to_string());
    }
    Ok(res)
}

/// Record a new pickaxe and return the program that draws its luck.
///
/// Efficiency is public and drawn here from `rng`; luck is drawn inside the
/// coprocessor so its plaintext never exists in this contract.
#[allow(clippy::too_many_arguments)]
pub fn mint_pickaxe(
    storage: &mut dyn Storage,
    contract: &Addr,
    config: &Config,
    owner: &Addr,
    token_id: u64,
    level: u8,
    level_config: &LevelConfig,
    rng: &mut dyn RandomSource,
) -> Result<WasmMsg, ContractError> {
    let efficiency =
        rng.next_u32_in_range(level_config.efficiency_min, level_config.efficiency_max);

    let mut program = start_program(storage, contract)?;
    let luck = program.rand_range(level_config.luck_min, level_config.luck_max);
    program.allow(&luck, owner);
    if let Some(engine) = &config.mining_engine {
        program.allow(&luck, engine);
    }
    let evaluate = submit_program(storage, &config.fhe_executor, program)?;

    let pickaxe = Pickaxe {
        owner: owner.clone(),
        level,
        durability_max: level_config.durability_max,
        durability: level_config.durability_max,
        efficiency,
        luck,
    };
    TOKENS.save(storage, token_id, &pickaxe)?;
    OWNER_TOKENS.save(storage, (owner, token_id), &true)?;
    TOKEN_COUNT.save(storage, &token_id)?;
    Ok(evaluate)
}

/// Sum of the accepted denom; any other coin is rejected.
fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let mut paid = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != denom {
            return Err(ContractError::WrongDenom {
                expected: denom.to_string(),
            });
        }
        paid = paid
            .checked_add(coin.amount)
            .map_err(|_| ContractError::Overflow)?;
    }
    Ok(paid)
}

// ─── Execute: Transfer ──────────────────────────────────────────────────────

pub fn execute_transfer_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let mut pickaxe = load_owned(deps.as_ref(), token_id, &info.sender)?;
    let new_owner = deps.api.addr_validate(&recipient)?;
    let config = CONFIG.load(deps.storage)?;

    OWNER_TOKENS.remove(deps.storage, (&pickaxe.owner, token_id));
    OWNER_TOKENS.save(deps.storage, (&new_owner, token_id), &true)?;
    let old_owner = std::mem::replace(&mut pickaxe.owner, new_owner.clone());
    TOKENS.save(deps.storage, token_id, &pickaxe)?;

    let grant = grant_msg(
        deps.storage,
        &env.contract.address,
        &config.fhe_executor,
        &pickaxe.luck,
        &new_owner,
    )?;

    Ok(Response::new()
        .add_message(grant)
        .add_attribute("action", "transfer_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", new_owner.as_str()))
}

// ─── Execute: Durability ────────────────────────────────────────────────────

pub fn execute_consume_durability(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    amount: u32,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_mining_engine(deps.as_ref(), &info.sender)?;
    let mut pickaxe = load_pickaxe(deps.as_ref(), token_id)?;
    if amount > pickaxe.durability {
        return Err(ContractError::InsufficientDurability {
            available: pickaxe.durability,
            required: amount,
        });
    }
    pickaxe.durability -= amount;
    TOKENS.save(deps.storage, token_id, &pickaxe)?;

    // The engine reads luck right after this call returns
    let config = CONFIG.load(deps.storage)?;
    let grant = grant_msg(
        deps.storage,
        &env.contract.address,
        &config.fhe_executor,
        &pickaxe.luck,
        &info.sender,
    )?;

    Ok(Response::new()
        .add_message(grant)
        .add_attribute("action", "consume_durability")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("durability", pickaxe.durability.to_string()))
}

pub fn execute_repair(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token_id: u64,
    amount: u32,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    // Capped at full durability; zero or an already full tool restores nothing
    let mut pickaxe = load_owned(deps.as_ref(), token_id, &info.sender)?;
    let restored = amount.min(pickaxe.durability_max - pickaxe.durability);
    pickaxe.durability += restored;
    TOKENS.save(deps.storage, token_id, &pickaxe)?;

    let config = CONFIG.load(deps.storage)?;
    let gold_cost = Uint128::from(restored)
        .checked_mul(config.repair_cost_per_point)
        .map_err(|_| ContractError::Overflow)?;

    let mut res = Response::new();
    if let Some(gold_token) = config.gold_token.as_ref().filter(|_| !gold_cost.is_zero()) {
        res = res.add_message(WasmMsg::Execute {
            contract_addr: gold_token.to_string(),
            msg: to_json_binary(&GoldTokenMsg::BurnFrom {
                owner: info.sender.to_string(),
                amount: gold_cost,
            })?,
            funds: vec![],
        });
    }

    Ok(res
        .add_attribute("action", "repair")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("durability", pickaxe.durability.to_string())
        .add_event(
            Event::new("pickaxe_repaired")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("amount", restored.to_string())
                .add_attribute("gold_cost", gold_cost.to_string()),
        ))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_update_level_config(
    deps: DepsMut,
    info: MessageInfo,
    level: u8,
    config: LevelConfig,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    validate_level(level)?;
    validate_level_config(&config)?;
    LEVEL_CONFIGS.save(deps.storage, level, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_level_config")
        .add_attribute("level", level.to_string())
        .add_attribute("mint_price", config.mint_price.to_string()))
}

pub fn execute_set_mining_engine(
    deps: DepsMut,
    info: MessageInfo,
    engine: String,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let engine = deps.api.addr_validate(&engine)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.mining_engine = Some(engine.clone());
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_mining_engine")
        .add_attribute("engine", engine.as_str()))
}

pub fn execute_set_repair_cost(
    deps: DepsMut,
    info: MessageInfo,
    gold_token: Option<String>,
    cost_per_point: Uint128,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let gold_token = gold_token
        .map(|t| deps.api.addr_validate(&t))
        .transpose()?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.gold_token = gold_token;
        c.repair_cost_per_point = cost_per_point;
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_repair_cost")
        .add_attribute("cost_per_point", cost_per_point.to_string()))
}

pub fn execute_withdraw_funds(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let available = deps
        .querier
        .query_balance(&env.contract.address, &config.denom)?
        .amount;
    let amount = amount.unwrap_or(available);
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    if amount > available {
        return Err(ContractError::InsufficientFunds {
            available: available.to_string(),
            requested: amount.to_string(),
        });
    }

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: coins(amount.u128(), &config.denom),
        })
        .add_attribute("action", "withdraw_funds")
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("amount", amount.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::LevelConfig { level } => to_json_binary(&LEVEL_CONFIGS.load(deps.storage, level)?),
        QueryMsg::Attributes { token_id } => query_attributes(deps, token_id),
        QueryMsg::Luck { token_id } => query_luck(deps, token_id),
        QueryMsg::Pickaxe { token_id } => query_pickaxe(deps, token_id),
        QueryMsg::OwnerOf { token_id } => query_owner_of(deps, token_id),
        QueryMsg::TokensOfOwner {
            owner,
            start_after,
            limit,
        } => query_tokens_of_owner(deps, owner, start_after, limit),
        QueryMsg::NumTokens {} => to_json_binary(&NumTokensResponse {
            count: TOKEN_COUNT.load(deps.storage)?,
        }),
    }
}

pub fn query_attributes(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let p = TOKENS.load(deps.storage, token_id)?;
    to_json_binary(&AttributesResponse {
        level: p.level,
        durability_max: p.durability_max,
        durability: p.durability,
        efficiency: p.efficiency,
    })
}

pub fn query_luck(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let p = TOKENS.load(deps.storage, token_id)?;
    to_json_binary(&LuckResponse { handle: p.luck })
}

pub fn query_pickaxe(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let p = TOKENS.load(deps.storage, token_id)?;
    to_json_binary(&PickaxeResponse {
        token_id,
        owner: p.owner.to_string(),
        level: p.level,
        durability_max: p.durability_max,
        durability: p.durability,
        efficiency: p.efficiency,
        luck: p.luck,
    })
}

pub fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let p = TOKENS.load(deps.storage, token_id)?;
    to_json_binary(&OwnerOfResponse {
        owner: p.owner.to_string(),
    })
}

pub fn query_tokens_of_owner(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tokens = OWNER_TOKENS
        .prefix(&owner)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TokensResponse { tokens })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
