use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;
use pickaxe_fhe::msg::*;
use pickaxe_fhe::{BlockEntropy, FheOp, Handle};

use crate::error::ContractError;
use crate::eval::Evaluator;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:pickaxe-fhe-executor";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seed domain of `Evaluate` draws
pub const RNG_DOMAIN: &[u8] = b"pickaxe-fhe/rng/v1";

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = ExecutorConfig {
        max_program_len: msg.max_program_len.unwrap_or(DEFAULT_MAX_PROGRAM_LEN),
    };
    CONFIG.save(deps.storage, &config)?;
    RNG_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("max_program_len", config.max_program_len.to_string()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Evaluate { ops } => execute_evaluate(deps, env, info, ops),
    }
}

pub fn execute_evaluate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    ops: Vec<FheOp>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if ops.is_empty() {
        return Err(ContractError::EmptyProgram);
    }
    if ops.len() > config.max_program_len as usize {
        return Err(ContractError::ProgramTooLarge {
            max: config.max_program_len,
        });
    }

    let nonce = RNG_NONCE.load(deps.storage)?;
    RNG_NONCE.save(deps.storage, &(nonce + 1))?;

    let nonce_bytes = nonce.to_be_bytes();
    let mut rng = BlockEntropy::from_env(
        &env,
        RNG_DOMAIN,
        &[info.sender.as_bytes(), &nonce_bytes],
    );

    let summary =
        Evaluator::new(deps.storage, deps.api, &info.sender, &mut rng).run(&ops)?;

    // Output handles are public; the values behind them are not.
    let outputs: Vec<String> = ops
        .iter()
        .filter_map(FheOp::output)
        .map(|i| Handle::derive(&info.sender, i).to_string())
        .collect();

    Ok(Response::new()
        .add_attribute("action", "evaluate")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("ops", ops.len().to_string())
        .add_attribute("outputs", summary.outputs.to_string())
        .add_attribute("grants", summary.grants.to_string())
        .add_attribute("checks", summary.checks.to_string())
        .add_attribute("handles", outputs.join(",")))
}

// ─── Query ──────────────────────────────────────────────────────────────────

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::IsAllowed { handle, account } => query_is_allowed(deps, handle, account),
        QueryMsg::HandleType { handle } => query_handle_type(deps, handle),
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_is_allowed(deps: Deps, handle: Handle, account: String) -> StdResult<Binary> {
    let account = deps.api.addr_validate(&account)?;
    let allowed = CIPHERTEXTS.has(deps.storage, handle.as_slice())
        && ACL
            .may_load(deps.storage, (handle.as_slice(), &account))?
            .unwrap_or(false);
    to_json_binary(&AclResponse { allowed })
}

pub fn query_handle_type(deps: Deps, handle: Handle) -> StdResult<Binary> {
    let fhe_type = CIPHERTEXTS
        .may_load(deps.storage, handle.as_slice())?
        .map(|ct| ct.fhe_type);
    to_json_binary(&HandleTypeResponse { fhe_type })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    if RNG_NONCE.may_load(deps.storage)?.is_none() {
        RNG_NONCE.save(deps.storage, &0u64)?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
