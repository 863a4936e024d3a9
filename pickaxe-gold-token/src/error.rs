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

    #[error("Mint would exceed max supply of {max_supply}")]
    ExceedsMaxSupply { max_supply: String },

    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientFunds { balance: String, required: String },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("The mining engine is the permanent minter and cannot be removed")]
    CannotRemoveEngine,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("This message does not accept funds")]
    UnexpectedFunds,
}
