use cosmwasm_std::{to_json_binary, Addr, StdResult, WasmMsg};

use crate::handle::Handle;
use crate::msg::ExecuteMsg;
use crate::op::{FheOp, Operand};

/// Builder for an encrypted program issued by one contract.
///
/// Output handles are known as soon as an op is pushed, so the caller can
/// persist them in the same transaction that submits the program.
#[derive(Debug, Clone)]
pub struct Program {
    issuer: Addr,
    next_index: u64,
    ops: Vec<FheOp>,
}

impl Program {
    /// `next_index` is the first unused output slot of `issuer`.
    pub fn new(issuer: Addr, next_index: u64) -> Self {
        Self {
            issuer,
            next_index,
            ops: Vec::new(),
        }
    }

    fn slot(&mut self) -> (u64, Handle) {
        let index = self.next_index;
        self.next_index += 1;
        (index, Handle::derive(&self.issuer, index))
    }

    pub fn trivial_encrypt(&mut self, value: u64) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::TrivialEncrypt { value, out });
        h
    }

    pub fn rand_below(&mut self, bound: u64) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::RandBelow { bound, out });
        h
    }

    pub fn rand_range(&mut self, min: u64, max: u64) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::RandRange { min, max, out });
        h
    }

    pub fn add(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Add {
            lhs: lhs.into(),
            rhs: rhs.into(),
            out,
        });
        h
    }

    pub fn sub(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Sub {
            lhs: lhs.into(),
            rhs: rhs.into(),
            out,
        });
        h
    }

    pub fn mul(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Mul {
            lhs: lhs.into(),
            rhs: rhs.into(),
            out,
        });
        h
    }

    pub fn le(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Le {
            lhs: lhs.into(),
            rhs: rhs.into(),
            out,
        });
        h
    }

    pub fn lt(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Lt {
            lhs: lhs.into(),
            rhs: rhs.into(),
            out,
        });
        h
    }

    pub fn select(
        &mut self,
        cond: &Handle,
        if_true: impl Into<Operand>,
        if_false: impl Into<Operand>,
    ) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Select {
            cond: cond.clone(),
            if_true: if_true.into(),
            if_false: if_false.into(),
            out,
        });
        h
    }

    pub fn cast(&mut self, input: &Handle) -> Handle {
        let (out, h) = self.slot();
        self.ops.push(FheOp::Cast {
            input: input.clone(),
            out,
        });
        h
    }

    pub fn allow(&mut self, handle: &Handle, account: &Addr) {
        self.ops.push(FheOp::Allow {
            handle: handle.clone(),
            account: account.to_string(),
        });
    }

    pub fn require(&mut self, cond: &Handle) {
        self.ops.push(FheOp::Require { cond: cond.clone() });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[FheOp] {
        &self.ops
    }

    /// Consume the builder, returning the ops and the next free slot.
    pub fn finish(self) -> (Vec<FheOp>, u64) {
        (self.ops, self.next_index)
    }
}

/// `Evaluate` message addressed to the executor.
pub fn evaluate_msg(executor: &Addr, ops: Vec<FheOp>) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: executor.to_string(),
        msg: to_json_binary(&ExecuteMsg::Evaluate { ops })?,
        funds: vec![],
    })
}
