//! Message shapes of the contracts the engine calls.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use pickaxe_fhe::Handle;

#[cw_serde]
pub enum PickaxeExecuteMsg {
    ConsumeDurability { token_id: u64, amount: u32 },
}

#[cw_serde]
pub enum PickaxeQueryMsg {
    Pickaxe { token_id: u64 },
}

#[cw_serde]
pub struct PickaxeInfo {
    pub token_id: u64,
    pub owner: String,
    pub level: u8,
    pub durability_max: u32,
    pub durability: u32,
    pub efficiency: u32,
    pub luck: Handle,
}

#[cw_serde]
pub enum GoldTokenExecuteMsg {
    Mint { recipient: String, amount: Uint128 },
}

#[cw_serde]
pub enum TreasureExecuteMsg {
    Mint {
        recipient: String,
        item_id: u32,
        amount: Uint128,
    },
}
