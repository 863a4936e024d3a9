use cosmwasm_schema::cw_serde;

use crate::handle::Handle;

/// Plaintext domain of a ciphertext.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum FheType {
    Bool,
    Uint64,
}

/// Input to an op: either an encrypted value or a public scalar.
#[cw_serde]
pub enum Operand {
    Handle(Handle),
    Plain(u64),
}

impl From<Handle> for Operand {
    fn from(h: Handle) -> Self {
        Operand::Handle(h)
    }
}

impl From<&Handle> for Operand {
    fn from(h: &Handle) -> Self {
        Operand::Handle(h.clone())
    }
}

impl From<u64> for Operand {
    fn from(v: u64) -> Self {
        Operand::Plain(v)
    }
}

/// One instruction of an encrypted program.
///
/// `out` is the issuer-local slot index; the resulting handle is
/// `Handle::derive(sender, out)`. Uint64 arithmetic wraps modulo 2^64.
#[cw_serde]
pub enum FheOp {
    /// Encrypt a public value.
    TrivialEncrypt { value: u64, out: u64 },
    /// Uniform draw in `[0, bound)`.
    RandBelow { bound: u64, out: u64 },
    /// Uniform draw in `[min, max]`.
    RandRange { min: u64, max: u64, out: u64 },
    Add { lhs: Operand, rhs: Operand, out: u64 },
    Sub { lhs: Operand, rhs: Operand, out: u64 },
    Mul { lhs: Operand, rhs: Operand, out: u64 },
    /// Encrypted `lhs <= rhs`.
    Le { lhs: Operand, rhs: Operand, out: u64 },
    /// Encrypted `lhs < rhs`.
    Lt { lhs: Operand, rhs: Operand, out: u64 },
    /// Encrypted conditional: `cond ? if_true : if_false`.
    Select {
        cond: Handle,
        if_true: Operand,
        if_false: Operand,
        out: u64,
    },
    /// Bool to Uint64 (false = 0, true = 1).
    Cast { input: Handle, out: u64 },
    /// Grant `account` access to `handle`.
    Allow { handle: Handle, account: String },
    /// Abort the transaction unless the encrypted condition holds.
    Require { cond: Handle },
}

impl FheOp {
    /// Output slot written by this op, if any.
    pub fn output(&self) -> Option<u64> {
        match self {
            FheOp::TrivialEncrypt { out, .. }
            | FheOp::RandBelow { out, .. }
            | FheOp::RandRange { out, .. }
            | FheOp::Add { out, .. }
            | FheOp::Sub { out, .. }
            | FheOp::Mul { out, .. }
            | FheOp::Le { out, .. }
            | FheOp::Lt { out, .. }
            | FheOp::Select { out, .. }
            | FheOp::Cast { out, .. } => Some(*out),
            FheOp::Allow { .. } | FheOp::Require { .. } => None,
        }
    }
}
