use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: caller is not {role}")]
    Unauthorized { role: String },

    #[error("Invalid level {level}: must be 1-5")]
    InvalidLevel { level: u8 },

    #[error("Invalid level config: {reason}")]
    InvalidLevelConfig { reason: String },

    #[error("Insufficient payment: price {required}, paid {paid}")]
    InsufficientPayment { required: String, paid: String },

    #[error("Only {expected} is accepted")]
    WrongDenom { expected: String },

    #[error("Caller does not own pickaxe {token_id}")]
    NotOwner { token_id: u64 },

    #[error("Pickaxe {token_id} not found")]
    TokenNotFound { token_id: u64 },

    #[error("Insufficient durability: have {available}, need {required}")]
    InsufficientDurability { available: u32, required: u32 },

    #[error("Contract holds {available}, cannot send {requested}")]
    InsufficientFunds { available: String, requested: String },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("This message does not accept funds")]
    UnexpectedFunds,
}
