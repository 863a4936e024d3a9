use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("access denied: {account} may not use handle {handle}")]
    AccessDenied { handle: String, account: String },

    #[error("handle not found: {handle}")]
    HandleNotFound { handle: String },

    #[error("handle already written: {handle}")]
    HandleExists { handle: String },

    #[error("type mismatch on {handle}: expected {expected}")]
    TypeMismatch { handle: String, expected: String },

    #[error("invalid random bound: {reason}")]
    InvalidBound { reason: String },

    #[error("encrypted condition not met")]
    ConditionNotMet,

    #[error("program is empty")]
    EmptyProgram,

    #[error("program exceeds maximum of {max} ops")]
    ProgramTooLarge { max: u32 },
}
