use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response, StdResult,
    SubMsg, SubMsgResult, Uint128,
};
use cw2::set_contract_version;
use pickaxe_fhe::{evaluate_msg, Program};

use crate::error::ContractError;
use crate::external::*;
use crate::helpers::*;
use crate::msg::*;
use crate::reward::{build_claim_program, build_mine_program, MineInputs, TierAmounts};
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:pickaxe-mining-engine";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const MIN_LEVEL: u8 = 1;
const MAX_LEVEL: u8 = 5;

/// Largest tier base that `TierAmounts::scaled` accepts for any efficiency
pub const MAX_REWARD_BASE: u64 = u64::MAX / (100 + u32::MAX as u64);
pub const MAX_LUCK_WEIGHT: u64 = 1_000_000;

/// Encrypted balance check of a claim
pub const CLAIM_CHECK_REPLY_ID: u64 = 1;

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let rows = match msg.probabilities {
        Some(rows) => rows.into_iter().map(|r| (r.level, r.entry)).collect(),
        None => default_probabilities(),
    };
    for (level, entry) in &rows {
        validate_probability(*level, entry)?;
        PROBABILITIES.save(deps.storage, *level, entry)?;
    }

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        pickaxe_nft: deps.api.addr_validate(&msg.pickaxe_nft)?,
        gold_token: deps.api.addr_validate(&msg.gold_token)?,
        treasure: deps.api.addr_validate(&msg.treasure)?,
        fhe_executor: deps.api.addr_validate(&msg.fhe_executor)?,
        paused: false,
        durability_per_mine: DEFAULT_DURABILITY_PER_MINE,
        reward_common: DEFAULT_REWARD_COMMON,
        reward_rare: DEFAULT_REWARD_RARE,
        reward_epic: DEFAULT_REWARD_EPIC,
        luck_weight: DEFAULT_LUCK_WEIGHT,
        treasure_item_id: DEFAULT_TREASURE_ITEM_ID,
    };
    validate_mining_config(&config)?;
    CONFIG.save(deps.storage, &config)?;
    NEXT_HANDLE_INDEX.save(deps.storage, &0u64)?;

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
        ExecuteMsg::Mine { token_id } => execute_mine(deps, env, info, token_id),
        ExecuteMsg::ClaimRewards { amount } => execute_claim_rewards(deps, env, info, amount),
        ExecuteMsg::ClaimTreasure { count } => execute_claim_treasure(deps, env, info, count),
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),
        ExecuteMsg::UpdateProbability {
            level,
            epic_rate,
            rare_rate,
            common_rate,
        } => execute_update_probability(
            deps,
            info,
            level,
            ProbabilityEntry {
                epic_rate,
                rare_rate,
                common_rate,
            },
        ),
        ExecuteMsg::UpdateMiningConfig {
            durability_per_mine,
            reward_common,
            reward_rare,
            reward_epic,
            luck_weight,
        } => execute_update_mining_config(
            deps,
            info,
            durability_per_mine,
            reward_common,
            reward_rare,
            reward_epic,
            luck_weight,
        ),
    }
}

// ─── Execute: Mine ──────────────────────────────────────────────────────────

pub fn execute_mine(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    let pickaxe: PickaxeInfo = deps
        .querier
        .query_wasm_smart(&config.pickaxe_nft, &PickaxeQueryMsg::Pickaxe { token_id })?;

    if pickaxe.owner != info.sender.as_str() {
        return Err(ContractError::NotOwner { token_id });
    }
    assert_not_paused(deps.as_ref())?;
    if pickaxe.durability < config.durability_per_mine {
        return Err(ContractError::InsufficientDurability {
            available: pickaxe.durability,
            required: config.durability_per_mine,
        });
    }
    let probability = PROBABILITIES
        .may_load(deps.storage, pickaxe.level)?
        .ok_or(ContractError::InvalidLevel {
            level: pickaxe.level,
        })?;

    let mut record = PLAYERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    let mut program = Program::new(
        env.contract.address.clone(),
        NEXT_HANDLE_INDEX.load(deps.storage)?,
    );
    let outputs = build_mine_program(
        &mut program,
        MineInputs {
            probability,
            amounts: TierAmounts::scaled(&config, pickaxe.efficiency)?,
            luck_weight: config.luck_weight,
            luck: &pickaxe.luck,
            earnings: record.encrypted_earnings.as_ref(),
            epic_drops: record.encrypted_epic_drops.as_ref(),
            player: &info.sender,
        },
    );
    let (ops, next_index) = program.finish();
    NEXT_HANDLE_INDEX.save(deps.storage, &next_index)?;

    record.mining_count += 1;
    record.last_mining_time = Some(env.block.time);
    record.encrypted_earnings = Some(outputs.earnings);
    record.encrypted_epic_drops = Some(outputs.epic_drops);
    PLAYERS.save(deps.storage, &info.sender, &record)?;

    // Durability is consumed (and luck shared with us) before the roll runs
    let consume = execute_msg(
        &config.pickaxe_nft,
        &PickaxeExecuteMsg::ConsumeDurability {
            token_id,
            amount: config.durability_per_mine,
        },
    )?;
    let roll = evaluate_msg(&config.fhe_executor, ops)?;

    Ok(Response::new()
        .add_message(consume)
        .add_message(roll)
        .add_attribute("action", "mine")
        .add_attribute("player", info.sender.as_str())
        .add_attribute("token_id", token_id.to_string())
        .add_event(
            Event::new("mining_started")
                .add_attribute("player", info.sender.as_str())
                .add_attribute("token_id", token_id.to_string()),
        )
        .add_event(
            Event::new("mining_completed")
                .add_attribute("player", info.sender.as_str())
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("mining_count", record.mining_count.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

// ─── Execute: Claims ────────────────────────────────────────────────────────

pub fn execute_claim_rewards(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    if amount.is_zero() {
        return Ok(Response::new()
            .add_attribute("action", "claim_rewards")
            .add_attribute("amount", "0"));
    }
    let config = CONFIG.load(deps.storage)?;
    let check = guarded_withdrawal(deps, &env, &info, amount, |r| &mut r.encrypted_earnings)?;
    let mint = execute_msg(
        &config.gold_token,
        &GoldTokenExecuteMsg::Mint {
            recipient: info.sender.to_string(),
            amount,
        },
    )?;

    Ok(Response::new()
        .add_submessage(check)
        .add_message(mint)
        .add_attribute("action", "claim_rewards")
        .add_attribute("player", info.sender.as_str())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("rewards_revealed")
                .add_attribute("player", info.sender.as_str())
                .add_attribute("amount", amount.to_string()),
        ))
}

pub fn execute_claim_treasure(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    count: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    if count.is_zero() {
        return Ok(Response::new()
            .add_attribute("action", "claim_treasure")
            .add_attribute("amount", "0"));
    }
    let config = CONFIG.load(deps.storage)?;
    let check = guarded_withdrawal(deps, &env, &info, count, |r| &mut r.encrypted_epic_drops)?;
    let mint = execute_msg(
        &config.treasure,
        &TreasureExecuteMsg::Mint {
            recipient: info.sender.to_string(),
            item_id: config.treasure_item_id,
            amount: count,
        },
    )?;

    Ok(Response::new()
        .add_submessage(check)
        .add_message(mint)
        .add_attribute("action", "claim_treasure")
        .add_attribute("player", info.sender.as_str())
        .add_attribute("amount", count.to_string())
        .add_event(
            Event::new("treasure_dropped")
                .add_attribute("player", info.sender.as_str())
                .add_attribute("item_id", config.treasure_item_id.to_string())
                .add_attribute("amount", count.to_string()),
        ))
}

/// Swap one of the player's encrypted counters for `counter - amount` and
/// return the coprocessor call that enforces `amount <= counter`.
///
/// The new handle is stored now; if the check fails the reply aborts the
/// whole transaction, which also undoes the store.
fn guarded_withdrawal(
    deps: DepsMut,
    env: &Env,
    info: &MessageInfo,
    amount: Uint128,
    field: impl FnOnce(&mut PlayerRecord) -> &mut Option<pickaxe_fhe::Handle>,
) -> Result<SubMsg, ContractError> {
    // Encrypted counters are 64-bit, so a larger claim can never be covered
    let amount = u64::try_from(amount.u128()).map_err(|_| ContractError::InsufficientBalance)?;
    let config = CONFIG.load(deps.storage)?;
    let mut record = PLAYERS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::InsufficientBalance)?;
    let slot = field(&mut record);
    let balance = slot.as_ref().ok_or(ContractError::InsufficientBalance)?;

    let mut program = Program::new(
        env.contract.address.clone(),
        NEXT_HANDLE_INDEX.load(deps.storage)?,
    );
    let remaining = build_claim_program(&mut program, balance, amount, &info.sender);
    let (ops, next_index) = program.finish();
    *slot = Some(remaining);

    NEXT_HANDLE_INDEX.save(deps.storage, &next_index)?;
    PLAYERS.save(deps.storage, &info.sender, &record)?;

    Ok(SubMsg::reply_on_error(
        evaluate_msg(&config.fhe_executor, ops)?,
        CLAIM_CHECK_REPLY_ID,
    ))
}

// ─── Reply ──────────────────────────────────────────────────────────────────

/// A failed claim check means the encrypted balance was short. Returning an
/// error here reverts the claim, including the mint queued after the check.
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match (msg.id, msg.result) {
        (CLAIM_CHECK_REPLY_ID, SubMsgResult::Err(_)) => Err(ContractError::InsufficientBalance),
        (CLAIM_CHECK_REPLY_ID, SubMsgResult::Ok(_)) => Ok(Response::new()),
        (id, _) => Err(ContractError::UnknownReply { id }),
    }
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.paused = paused;
        Ok(c)
    })?;
    Ok(Response::new()
        .add_attribute("action", "set_paused")
        .add_attribute("paused", paused.to_string()))
}

fn validate_probability(level: u8, entry: &ProbabilityEntry) -> Result<(), ContractError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(ContractError::InvalidLevel { level });
    }
    if entry.sum() != 100 {
        return Err(ContractError::RateSumInvalid { sum: entry.sum() });
    }
    Ok(())
}

pub fn execute_update_probability(
    deps: DepsMut,
    info: MessageInfo,
    level: u8,
    entry: ProbabilityEntry,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;
    validate_probability(level, &entry)?;
    PROBABILITIES.save(deps.storage, level, &entry)?;

    Ok(Response::new()
        .add_attribute("action", "update_probability")
        .add_attribute("level", level.to_string())
        .add_attribute("epic_rate", entry.epic_rate.to_string())
        .add_attribute("rare_rate", entry.rare_rate.to_string())
        .add_attribute("common_rate", entry.common_rate.to_string()))
}

/// Tiers must pay something and rank common <= rare <= epic. Bases are capped
/// so the efficiency bonus cannot overflow at mine time.
fn validate_mining_config(config: &Config) -> Result<(), ContractError> {
    let invalid = |reason: &str| {
        Err(ContractError::InvalidConfig {
            reason: reason.to_string(),
        })
    };
    if config.durability_per_mine == 0 {
        return invalid("durability_per_mine must be positive");
    }
    if config.reward_common == 0 {
        return invalid("reward_common must be positive");
    }
    if config.reward_common > config.reward_rare || config.reward_rare > config.reward_epic {
        return invalid("rewards must satisfy common <= rare <= epic");
    }
    if config.reward_epic > MAX_REWARD_BASE {
        return invalid("reward_epic too large");
    }
    if config.luck_weight > MAX_LUCK_WEIGHT {
        return invalid("luck_weight too large");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn execute_update_mining_config(
    deps: DepsMut,
    info: MessageInfo,
    durability_per_mine: Option<u32>,
    reward_common: Option<u64>,
    reward_rare: Option<u64>,
    reward_epic: Option<u64>,
    luck_weight: Option<u64>,
) -> Result<Response, ContractError> {
    assert_owner(deps.as_ref(), &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.durability_per_mine = durability_per_mine.unwrap_or(config.durability_per_mine);
    config.reward_common = reward_common.unwrap_or(config.reward_common);
    config.reward_rare = reward_rare.unwrap_or(config.reward_rare);
    config.reward_epic = reward_epic.unwrap_or(config.reward_epic);
    config.luck_weight = luck_weight.unwrap_or(config.luck_weight);
    validate_mining_config(&config)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_mining_config")
        .add_attribute("durability_per_mine", config.durability_per_mine.to_string())
        .add_attribute("luck_weight", config.luck_weight.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::PlayerStats { player } => query_player_stats(deps, player),
        QueryMsg::PlayerEarnings { player } => {
            query_encrypted(deps, player, |r| r.encrypted_earnings)
        }
        QueryMsg::PlayerEpicDrops { player } => {
            query_encrypted(deps, player, |r| r.encrypted_epic_drops)
        }
        QueryMsg::Probability { level } => to_json_binary(&PROBABILITIES.load(deps.storage, level)?),
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
    }
}

pub fn query_player_stats(deps: Deps, player: String) -> StdResult<Binary> {
    let player = deps.api.addr_validate(&player)?;
    let record = PLAYERS.may_load(deps.storage, &player)?.unwrap_or_default();
    to_json_binary(&PlayerStatsResponse {
        mining_count: record.mining_count,
        last_mining_time: record.last_mining_time,
    })
}

fn query_encrypted(
    deps: Deps,
    player: String,
    field: impl FnOnce(PlayerRecord) -> Option<pickaxe_fhe::Handle>,
) -> StdResult<Binary> {
    let player = deps.api.addr_validate(&player)?;
    let handle = PLAYERS.may_load(deps.storage, &player)?.and_then(field);
    to_json_binary(&EncryptedValueResponse { handle })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
