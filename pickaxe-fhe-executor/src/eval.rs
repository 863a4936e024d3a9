//! Program evaluation over the simulated ciphertext store.

use cosmwasm_std::{Addr, Api, Storage};
use pickaxe_fhe::{FheOp, FheType, Handle, Operand, RandomSource};

use crate::error::ContractError;
use crate::state::{Ciphertext, ACL, CIPHERTEXTS};

/// Counters reported back as response attributes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EvalSummary {
    pub outputs: u32,
    pub grants: u32,
    pub checks: u32,
}

pub struct Evaluator<'a> {
    storage: &'a mut dyn Storage,
    api: &'a dyn Api,
    sender: &'a Addr,
    rng: &'a mut dyn RandomSource,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        storage: &'a mut dyn Storage,
        api: &'a dyn Api,
        sender: &'a Addr,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            storage,
            api,
            sender,
            rng,
        }
    }

    pub fn run(&mut self, ops: &[FheOp]) -> Result<EvalSummary, ContractError> {
        let mut summary = EvalSummary::default();
        for op in ops {
            self.step(op, &mut summary)?;
        }
        Ok(summary)
    }

    fn step(&mut self, op: &FheOp, summary: &mut EvalSummary) -> Result<(), ContractError> {
        match op {
            FheOp::TrivialEncrypt { value, out } => {
                self.write(*out, FheType::Uint64, *value)?;
            }
            FheOp::RandBelow { bound, out } => {
                let bound = u32::try_from(*bound)
                    .ok()
                    .filter(|b| *b > 0)
                    .ok_or_else(|| ContractError::InvalidBound {
                        reason: format!("bound {} must be in 1..=u32::MAX", bound),
                    })?;
                let draw = self.rng.next_u32_below(bound);
                self.write(*out, FheType::Uint64, draw as u64)?;
            }
            FheOp::RandRange { min, max, out } => {
                if min > max {
                    return Err(ContractError::InvalidBound {
                        reason: format!("min {} exceeds max {}", min, max),
                    });
                }
                let span = u32::try_from(max - min).map_err(|_| ContractError::InvalidBound {
                    reason: "range wider than u32".to_string(),
                })?;
                let draw = *min + self.rng.next_u32_in_range(0, span) as u64;
                self.write(*out, FheType::Uint64, draw)?;
            }
            FheOp::Add { lhs, rhs, out } => {
                let (a, b) = (self.uint(lhs)?, self.uint(rhs)?);
                self.write(*out, FheType::Uint64, a.wrapping_add(b))?;
            }
            FheOp::Sub { lhs, rhs, out } => {
                let (a, b) = (self.uint(lhs)?, self.uint(rhs)?);
                self.write(*out, FheType::Uint64, a.wrapping_sub(b))?;
            }
            FheOp::Mul { lhs, rhs, out } => {
                let (a, b) = (self.uint(lhs)?, self.uint(rhs)?);
                self.write(*out, FheType::Uint64, a.wrapping_mul(b))?;
            }
            FheOp::Le { lhs, rhs, out } => {
                let (a, b) = (self.uint(lhs)?, self.uint(rhs)?);
                self.write(*out, FheType::Bool, (a <= b) as u64)?;
            }
            FheOp::Lt { lhs, rhs, out } => {
                let (a, b) = (self.uint(lhs)?, self.uint(rhs)?);
                self.write(*out, FheType::Bool, (a < b) as u64)?;
            }
            FheOp::Select {
                cond,
                if_true,
                if_false,
                out,
            } => {
                let c = self.boolean(cond)?;
                let (t, f) = (self.uint(if_true)?, self.uint(if_false)?);
                self.write(*out, FheType::Uint64, if c { t } else { f })?;
            }
            FheOp::Cast { input, out } => {
                let c = self.boolean(input)?;
                self.write(*out, FheType::Uint64, c as u64)?;
            }
            FheOp::Allow { handle, account } => {
                self.load(handle)?;
                let account = self.api.addr_validate(account)?;
                ACL.save(self.storage, (handle.as_slice(), &account), &true)?;
                summary.grants += 1;
                return Ok(());
            }
            FheOp::Require { cond } => {
                if !self.boolean(cond)? {
                    return Err(ContractError::ConditionNotMet);
                }
                summary.checks += 1;
                return Ok(());
            }
        }
        summary.outputs += 1;
        Ok(())
    }

    /// Load a ciphertext the sender is allowed to use.
    fn load(&self, handle: &Handle) -> Result<Ciphertext, ContractError> {
        let ct = CIPHERTEXTS
            .may_load(self.storage, handle.as_slice())?
            .ok_or_else(|| ContractError::HandleNotFound {
                handle: handle.to_string(),
            })?;
        let allowed = ACL
            .may_load(self.storage, (handle.as_slice(), self.sender))?
            .unwrap_or(false);
        if !allowed {
            return Err(ContractError::AccessDenied {
                handle: handle.to_string(),
                account: self.sender.to_string(),
            });
        }
        Ok(ct)
    }

    fn uint(&self, operand: &Operand) -> Result<u64, ContractError> {
        match operand {
            Operand::Plain(v) => Ok(*v),
            Operand::Handle(h) => {
                let ct = self.load(h)?;
                if ct.fhe_type != FheType::Uint64 {
                    return Err(ContractError::TypeMismatch {
                        handle: h.to_string(),
                        expected: "uint64".to_string(),
                    });
                }
                Ok(ct.value)
            }
        }
    }

    fn boolean(&self, handle: &Handle) -> Result<bool, ContractError> {
        let ct = self.load(handle)?;
        if ct.fhe_type != FheType::Bool {
            return Err(ContractError::TypeMismatch {
                handle: handle.to_string(),
                expected: "bool".to_string(),
            });
        }
        Ok(ct.value != 0)
    }

    fn write(&mut self, index: u64, fhe_type: FheType, value: u64) -> Result<(), ContractError> {
        let handle = Handle::derive(self.sender, index);
        if CIPHERTEXTS.has(self.storage, handle.as_slice()) {
            return Err(ContractError::HandleExists {
                handle: handle.to_string(),
            });
        }
        CIPHERTEXTS.save(
            self.storage,
            handle.as_slice(),
            &Ciphertext { fhe_type, value },
        )?;
        ACL.save(self.storage, (handle.as_slice(), self.sender), &true)?;
        Ok(())
    }
}
