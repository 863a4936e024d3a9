//! Shared vocabulary for encrypted game state.
//!
//! Contracts in this workspace never see ciphertexts. They hold [`Handle`]s,
//! build [`Program`]s of [`FheOp`]s and hand them to the executor contract,
//! which evaluates them and keeps the access-control list.

pub mod entropy;
pub mod handle;
pub mod msg;
pub mod op;
pub mod program;

pub use entropy::{BlockEntropy, RandomSource};
pub use handle::Handle;
pub use op::{FheOp, FheType, Operand};
pub use program::{evaluate_msg, Program};
