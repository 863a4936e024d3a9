use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use pickaxe_fhe::msg::ExecutorConfig;
use pickaxe_fhe::FheType;

/// Simulated ciphertext body. Never returned by any query.
#[cw_serde]
pub struct Ciphertext {
    pub fhe_type: FheType,
    pub value: u64,
}

pub const CONFIG: Item<ExecutorConfig> = Item::new("config");

/// handle bytes -> ciphertext
pub const CIPHERTEXTS: Map<&[u8], Ciphertext> = Map::new("ciphertexts");

/// (handle bytes, account) -> allowed
pub const ACL: Map<(&[u8], &Addr), bool> = Map::new("acl");

/// Per-evaluation nonce mixed into the randomness seed
pub const RNG_NONCE: Item<u64> = Item::new("rng_nonce");
