//! Messages understood by the executor contract.

use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::handle::Handle;
use crate::op::{FheOp, FheType};

pub const DEFAULT_MAX_PROGRAM_LEN: u32 = 64;

#[cw_serde]
pub struct InstantiateMsg {
    /// Upper bound on ops per `Evaluate` (defaults to 64)
    pub max_program_len: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Run a program. Every input handle must be allowed for the sender;
    /// every output is allowed for the sender.
    Evaluate { ops: Vec<FheOp> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ExecutorConfig)]
    Config {},

    /// Public ACL lookup, used by decryption providers.
    #[returns(AclResponse)]
    IsAllowed { handle: Handle, account: String },

    #[returns(HandleTypeResponse)]
    HandleType { handle: Handle },
}

#[cw_serde]
pub struct ExecutorConfig {
    pub max_program_len: u32,
}

#[cw_serde]
pub struct AclResponse {
    pub allowed: bool,
}

#[cw_serde]
pub struct HandleTypeResponse {
    /// `None` if the handle was never produced
    pub fhe_type: Option<FheType>,
}

#[cw_serde]
pub struct MigrateMsg {}
