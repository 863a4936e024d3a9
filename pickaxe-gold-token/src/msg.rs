use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::Config;

pub const DEFAULT_NAME: &str = "Pickaxe Gold";
pub const DEFAULT_SYMBOL: &str = "GOLD";
pub const DEFAULT_DECIMALS: u8 = 6;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// Engine address, if already deployed. Can be set later.
    pub mining_engine: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub max_supply: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Minter-only. Fails if total supply would pass `max_supply`.
    Mint { recipient: String, amount: Uint128 },
    Transfer { recipient: String, amount: Uint128 },
    Burn { amount: Uint128 },
    /// Burner-only. Removes `amount` from `owner`'s balance.
    BurnFrom { owner: String, amount: Uint128 },

    // ── Admin ──
    AddMinter { minter: String },
    RemoveMinter { minter: String },
    /// Replace the canonical minter. The previous engine loses minting rights.
    SetMiningEngine { engine: String },
    AddBurner { burner: String },
    RemoveBurner { burner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(BalanceResponse)]
    Balance { address: String },

    #[returns(TokenInfoResponse)]
    TokenInfo {},

    #[returns(MintersResponse)]
    Minters {},

    #[returns(IsMinterResponse)]
    IsMinter { address: String },

    #[returns(Config)]
    Config {},
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct TokenInfoResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
    pub max_supply: Uint128,
}

#[cw_serde]
pub struct MintersResponse {
    pub minters: Vec<String>,
}

#[cw_serde]
pub struct IsMinterResponse {
    pub is_minter: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
