use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub owner: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const MINTERS: Map<&Addr, bool> = Map::new("minters");

/// (holder, item id) -> balance
pub const BALANCES: Map<(&Addr, u32), Uint128> = Map::new("balances");

pub const LUCKY_CHARM: u32 = 1;
pub const DURABILITY_POTION: u32 = 2;
pub const RARE_SKIN: u32 = 3;
pub const EPIC_CHEST: u32 = 4;
pub const GOLD_BOOSTER: u32 = 5;

/// Static catalog, indexed by item id.
pub const ITEM_NAMES: [(u32, &str); 5] = [
    (LUCKY_CHARM, "Lucky Charm"),
    (DURABILITY_POTION, "Durability Potion"),
    (RARE_SKIN, "Rare Skin"),
    (EPIC_CHEST, "Epic Chest"),
    (GOLD_BOOSTER, "Gold Booster"),
];

pub fn item_name(item_id: u32) -> Option<&'static str> {
    ITEM_NAMES
        .iter()
        .find(|(id, _)| *id == item_id)
        .map(|(_, name)| *name)
}
