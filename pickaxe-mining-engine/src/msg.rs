use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Timestamp, Uint128};
use pickaxe_fhe::Handle;

use crate::state::{Config, ProbabilityEntry};

pub const DEFAULT_DURABILITY_PER_MINE: u32 = 10;
pub const DEFAULT_REWARD_COMMON: u64 = 10;
pub const DEFAULT_REWARD_RARE: u64 = 50;
pub const DEFAULT_REWARD_EPIC: u64 = 250;
pub const DEFAULT_LUCK_WEIGHT: u64 = 1;
/// Epic Chest
pub const DEFAULT_TREASURE_ITEM_ID: u32 = 4;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub pickaxe_nft: String,
    pub gold_token: String,
    pub treasure: String,
    pub fhe_executor: String,
    /// Overrides the launch odds when set
    pub probabilities: Option<Vec<ProbabilityRow>>,
}

#[cw_serde]
pub struct ProbabilityRow {
    pub level: u8,
    pub entry: ProbabilityEntry,
}

#[cw_serde]
pub enum ExecuteMsg {
    Mine { token_id: u64 },
    /// Withdraw `amount` gold from the encrypted earnings. 0 is a no-op.
    ClaimRewards { amount: Uint128 },
    /// Redeem `count` epic drops as treasure items. 0 is a no-op.
    ClaimTreasure { count: Uint128 },

    // ── Admin ──
    SetPaused { paused: bool },
    UpdateProbability {
        level: u8,
        epic_rate: u8,
        rare_rate: u8,
        common_rate: u8,
    },
    UpdateMiningConfig {
        durability_per_mine: Option<u32>,
        reward_common: Option<u64>,
        reward_rare: Option<u64>,
        reward_epic: Option<u64>,
        luck_weight: Option<u64>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PlayerStatsResponse)]
    PlayerStats { player: String },

    /// Encrypted unclaimed gold. `None` before the first mine.
    #[returns(EncryptedValueResponse)]
    PlayerEarnings { player: String },

    #[returns(EncryptedValueResponse)]
    PlayerEpicDrops { player: String },

    #[returns(ProbabilityEntry)]
    Probability { level: u8 },

    #[returns(Config)]
    Config {},
}

#[cw_serde]
pub struct PlayerStatsResponse {
    pub mining_count: u64,
    pub last_mining_time: Option<Timestamp>,
}

#[cw_serde]
pub struct EncryptedValueResponse {
    pub handle: Option<Handle>,
}

#[cw_serde]
pub struct MigrateMsg {}
