use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};
use pickaxe_fhe::Handle;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub pickaxe_nft: Addr,
    pub gold_token: Addr,
    pub treasure: Addr,
    pub fhe_executor: Addr,
    /// Stops `Mine`; claims stay open
    pub paused: bool,
    pub durability_per_mine: u32,
    /// Gold per mine before the efficiency bonus, by tier
    pub reward_common: u64,
    pub reward_rare: u64,
    pub reward_epic: u64,
    /// Gold added per point of luck
    pub luck_weight: u64,
    /// Item minted by `ClaimTreasure`
    pub treasure_item_id: u32,
}

/// Tier odds for one level, in percent.
#[cw_serde]
#[derive(Copy)]
pub struct ProbabilityEntry {
    pub epic_rate: u8,
    pub rare_rate: u8,
    pub common_rate: u8,
}

impl ProbabilityEntry {
    pub fn sum(&self) -> u16 {
        self.epic_rate as u16 + self.rare_rate as u16 + self.common_rate as u16
    }
}

#[cw_serde]
#[derive(Default)]
pub struct PlayerRecord {
    pub mining_count: u64,
    pub last_mining_time: Option<Timestamp>,
    /// Encrypted gold mined and not yet claimed
    pub encrypted_earnings: Option<Handle>,
    /// Encrypted count of unclaimed epic rolls
    pub encrypted_epic_drops: Option<Handle>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Next unused coprocessor output slot of this contract
pub const NEXT_HANDLE_INDEX: Item<u64> = Item::new("next_handle_index");

pub const PROBABILITIES: Map<u8, ProbabilityEntry> = Map::new("probabilities");

pub const PLAYERS: Map<&Addr, PlayerRecord> = Map::new("players");

/// Launch odds, epic/rare/common by level.
pub fn default_probabilities() -> Vec<(u8, ProbabilityEntry)> {
    [(1, 14, 85), (3, 22, 75), (6, 29, 65), (12, 38, 50), (20, 50, 30)]
        .into_iter()
        .zip(1u8..)
        .map(|((epic_rate, rare_rate, common_rate), level)| {
            (
                level,
                ProbabilityEntry {
                    epic_rate,
                    rare_rate,
                    common_rate,
                },
            )
        })
        .collect()
}
