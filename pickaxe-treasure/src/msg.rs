use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner administers minters and is itself a minter
    pub owner: String,
    pub minters: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    Mint {
        recipient: String,
        item_id: u32,
        amount: Uint128,
    },
    /// Only the holder can burn, so `from` must equal the sender.
    Burn {
        from: String,
        item_id: u32,
        amount: Uint128,
    },
    AddMinter { minter: String },
    RemoveMinter { minter: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ItemBalanceResponse)]
    Balance { address: String, item_id: u32 },

    /// Balances of every catalog item, including zeroes.
    #[returns(PlayerItemsResponse)]
    PlayerItems { address: String },

    #[returns(ItemNameResponse)]
    ItemName { item_id: u32 },

    #[returns(MintersResponse)]
    Minters {},

    #[returns(Config)]
    Config {},
}

#[cw_serde]
pub struct ItemBalanceResponse {
    pub item_id: u32,
    pub balance: Uint128,
}

#[cw_serde]
pub struct PlayerItemsResponse {
    pub item_ids: Vec<u32>,
    pub balances: Vec<Uint128>,
}

#[cw_serde]
pub struct ItemNameResponse {
    pub name: String,
}

#[cw_serde]
pub struct MintersResponse {
    pub minters: Vec<String>,
}

#[cw_serde]
pub struct MigrateMsg {}
