use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use pickaxe_fhe::Handle;

use crate::state::{Config, LevelConfig};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub fhe_executor: String,
    pub denom: String,
    pub mining_engine: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// Overrides the launch catalog when set
    pub level_configs: Option<Vec<LevelConfigEntry>>,
}

#[cw_serde]
pub struct LevelConfigEntry {
    pub level: u8,
    pub config: LevelConfig,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pay the level price in the configured denom. Excess is refunded.
    Mint { level: u8 },
    TransferNft { recipient: String, token_id: u64 },
    /// Mining engine only.
    ConsumeDurability { token_id: u64, amount: u32 },
    /// Owner only. Restores up to `amount`, capped at the maximum.
    Repair { token_id: u64, amount: u32 },

    // ── Admin ──
    UpdateLevelConfig { level: u8, config: LevelConfig },
    SetMiningEngine { engine: String },
    /// `gold_token: None` makes repairs free.
    SetRepairCost {
        gold_token: Option<String>,
        cost_per_point: Uint128,
    },
    /// Send collected mint payments. `None` withdraws the full balance.
    WithdrawFunds {
        recipient: String,
        amount: Option<Uint128>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    #[returns(LevelConfig)]
    LevelConfig { level: u8 },

    #[returns(AttributesResponse)]
    Attributes { token_id: u64 },

    /// Encrypted luck handle; decrypt through a re-encryption provider.
    #[returns(LuckResponse)]
    Luck { token_id: u64 },

    /// Everything the mining engine needs in one read.
    #[returns(PickaxeResponse)]
    Pickaxe { token_id: u64 },

    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },

    #[returns(TokensResponse)]
    TokensOfOwner {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(NumTokensResponse)]
    NumTokens {},
}

#[cw_serde]
pub struct AttributesResponse {
    pub level: u8,
    pub durability_max: u32,
    pub durability: u32,
    pub efficiency: u32,
}

#[cw_serde]
pub struct LuckResponse {
    pub handle: Handle,
}

#[cw_serde]
pub struct PickaxeResponse {
    pub token_id: u64,
    pub owner: String,
    pub level: u8,
    pub durability_max: u32,
    pub durability: u32,
    pub efficiency: u32,
    pub luck: Handle,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<u64>,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

/// Subset of the reward token interface used for repair payments.
#[cw_serde]
pub enum GoldTokenMsg {
    BurnFrom { owner: String, amount: Uint128 },
}

#[cw_serde]
pub struct MigrateMsg {}
