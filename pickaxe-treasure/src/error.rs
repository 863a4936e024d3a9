use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: caller is not {role}")]
    Unauthorized { role: String },

    #[error("Caller is not an authorized minter")]
    NotAuthorizedMinter,

    #[error("Unknown item id {item_id}")]
    InvalidItem { item_id: u32 },

    #[error("Insufficient balance of item {item_id}: have {balance}, need {required}")]
    InsufficientItems {
        item_id: u32,
        balance: String,
        required: String,
    },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("This message does not accept funds")]
    UnexpectedFunds,
}
