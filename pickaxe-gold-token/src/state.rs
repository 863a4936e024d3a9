use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Administers minters, burners and the engine address
    pub owner: Addr,
    /// Canonical minter; cannot be removed from the minter set
    pub mining_engine: Option<Addr>,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub max_supply: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOTAL_SUPPLY: Item<Uint128> = Item::new("total_supply");

pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");

/// Accounts allowed to mint
pub const MINTERS: Map<&Addr, bool> = Map::new("minters");

/// Contracts allowed to burn from any holder (repair payments)
pub const BURNERS: Map<&Addr, bool> = Map::new("burners");
