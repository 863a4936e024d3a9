use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use pickaxe_fhe::Handle;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Only caller allowed to consume durability
    pub mining_engine: Option<Addr>,
    pub fhe_executor: Addr,
    /// Native denom accepted for mint payments
    pub denom: String,
    /// Reward token charged for repairs, if any
    pub gold_token: Option<Addr>,
    pub repair_cost_per_point: Uint128,
    pub name: String,
    pub symbol: String,
}

/// Per-level mint parameters. Changes apply to future mints only.
#[cw_serde]
pub struct LevelConfig {
    pub mint_price: Uint128,
    pub durability_max: u32,
    pub efficiency_min: u32,
    pub efficiency_max: u32,
    pub luck_min: u64,
    pub luck_max: u64,
}

#[cw_serde]
pub struct Pickaxe {
    pub owner: Addr,
    pub level: u8,
    pub durability_max: u32,
    pub durability: u32,
    /// Percentage bonus, public
    pub efficiency: u32,
    /// Encrypted luck; the plaintext never leaves the coprocessor
    pub luck: Handle,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

/// Next unused coprocessor output slot of this contract
pub const NEXT_HANDLE_INDEX: Item<u64> = Item::new("next_handle_index");

pub const LEVEL_CONFIGS: Map<u8, LevelConfig> = Map::new("level_configs");

pub const TOKENS: Map<u64, Pickaxe> = Map::new("pickaxes");

/// (owner, token_id) -> bool
pub const OWNER_TOKENS: Map<(&Addr, u64), bool> = Map::new("owner_tokens");
