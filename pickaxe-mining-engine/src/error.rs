use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: caller is not {role}")]
    Unauthorized { role: String },

    #[error("Caller does not own pickaxe {token_id}")]
    NotOwner { token_id: u64 },

    #[error("Mining is paused")]
    MiningPaused,

    #[error("Insufficient durability: have {available}, need {required}")]
    InsufficientDurability { available: u32, required: u32 },

    #[error("Insufficient encrypted balance")]
    InsufficientBalance,

    #[error("Rates must sum to 100, got {sum}")]
    RateSumInvalid { sum: u16 },

    #[error("Invalid level {level}: must be 1-5")]
    InvalidLevel { level: u8 },

    #[error("Invalid mining config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown reply id {id}")]
    UnknownReply { id: u64 },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("This message does not accept funds")]
    UnexpectedFunds,
}
