//! Encrypted reward programs.
//!
//! A mine rolls a tier in the coprocessor and folds the reward into the
//! player's encrypted counters:
//!
//! ```text
//! roll    = rand_below(100)
//! epic    = roll < epic_rate
//! rare    = roll < epic_rate + rare_rate
//! base    = epic ? epic_amount : (rare ? rare_amount : common_amount)
//! reward  = base + luck * luck_weight
//! ```
//!
//! Tier amounts are public config scaled by the tool's public efficiency, so
//! only the roll, the tier and the luck stay encrypted.

use cosmwasm_std::Addr;
use pickaxe_fhe::{Handle, Operand, Program};

use crate::error::ContractError;
use crate::state::{Config, ProbabilityEntry};

/// Per-tier gold after the efficiency bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierAmounts {
    pub common: u64,
    pub rare: u64,
    pub epic: u64,
}

impl TierAmounts {
    /// `base * (100 + efficiency) / 100` for each tier.
    pub fn scaled(config: &Config, efficiency: u32) -> Result<Self, ContractError> {
        let scale = |base: u64| -> Result<u64, ContractError> {
            base.checked_mul(100 + efficiency as u64)
                .map(|v| v / 100)
                .ok_or(ContractError::Overflow)
        };
        Ok(Self {
            common: scale(config.reward_common)?,
            rare: scale(config.reward_rare)?,
            epic: scale(config.reward_epic)?,
        })
    }
}

/// Handles produced by one mine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineOutputs {
    pub roll: Handle,
    pub reward: Handle,
    pub earnings: Handle,
    pub epic_drops: Handle,
}

pub struct MineInputs<'a> {
    pub probability: ProbabilityEntry,
    pub amounts: TierAmounts,
    pub luck_weight: u64,
    pub luck: &'a Handle,
    pub earnings: Option<&'a Handle>,
    pub epic_drops: Option<&'a Handle>,
    pub player: &'a Addr,
}

fn counter(handle: Option<&Handle>) -> Operand {
    handle.map(Operand::from).unwrap_or(Operand::Plain(0))
}

/// Append a mine to `program`. The player is granted the new counters.
pub fn build_mine_program(program: &mut Program, input: MineInputs) -> MineOutputs {
    let p = input.probability;
    let epic_cut = p.epic_rate as u64;
    let rare_cut = epic_cut + p.rare_rate as u64;

    let roll = program.rand_below(100);
    let is_epic = program.lt(&roll, epic_cut);
    let is_rare_or_better = program.lt(&roll, rare_cut);
    let lower = program.select(&is_rare_or_better, input.amounts.rare, input.amounts.common);
    let base = program.select(&is_epic, input.amounts.epic, &lower);
    let luck_bonus = program.mul(input.luck, input.luck_weight);
    let reward = program.add(&base, &luck_bonus);
    let earnings = program.add(counter(input.earnings), &reward);

    let epic_inc = program.cast(&is_epic);
    let epic_drops = program.add(counter(input.epic_drops), &epic_inc);

    program.allow(&earnings, input.player);
    program.allow(&epic_drops, input.player);

    MineOutputs {
        roll,
        reward,
        earnings,
        epic_drops,
    }
}

/// Append a guarded withdrawal of `amount` from an encrypted balance.
///
/// The coprocessor aborts the call when `amount > balance`; otherwise the
/// returned handle holds `balance - amount` and is granted to `player`.
pub fn build_claim_program(
    program: &mut Program,
    balance: &Handle,
    amount: u64,
    player: &Addr,
) -> Handle {
    let enough = program.le(amount, balance);
    program.require(&enough);
    let remaining = program.sub(balance, amount);
    program.allow(&remaining, player);
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickaxe_fhe::FheOp;

    fn config() -> Config {
        Config {
            owner: Addr::unchecked("owner"),
            pickaxe_nft: Addr::unchecked("nft"),
            gold_token: Addr::unchecked("gold"),
            treasure: Addr::unchecked("treasure"),
            fhe_executor: Addr::unchecked("executor"),
            paused: false,
            durability_per_mine: 10,
            reward_common: 10,
            reward_rare: 50,
            reward_epic: 250,
            luck_weight: 1,
            treasure_item_id: 4,
        }
    }

    #[test]
    fn efficiency_scales_tier_amounts() {
        let amounts = TierAmounts::scaled(&config(), 12).unwrap();
        assert_eq!(
            amounts,
            TierAmounts {
                common: 11,
                rare: 56,
                epic: 280
            }
        );

        let mut huge = config();
        huge.reward_epic = u64::MAX;
        assert_eq!(
            TierAmounts::scaled(&huge, 10).unwrap_err(),
            ContractError::Overflow
        );
    }

    #[test]
    fn first_mine_starts_counters_from_zero() {
        let engine = Addr::unchecked("engine");
        let player = Addr::unchecked("player");
        let luck = Handle::derive(&Addr::unchecked("nft"), 0);
        let mut program = Program::new(engine, 0);

        let out = build_mine_program(
            &mut program,
            MineInputs {
                probability: ProbabilityEntry {
                    epic_rate: 1,
                    rare_rate: 14,
                    common_rate: 85,
                },
                amounts: TierAmounts::scaled(&config(), 10).unwrap(),
                luck_weight: 1,
                luck: &luck,
                earnings: None,
                epic_drops: None,
                player: &player,
            },
        );
        let (ops, next) = program.finish();

        assert_eq!(next, 10);
        assert!(matches!(ops[1], FheOp::Lt { rhs: Operand::Plain(1), .. }));
        assert!(matches!(ops[2], FheOp::Lt { rhs: Operand::Plain(15), .. }));
        assert!(matches!(ops[7], FheOp::Add { lhs: Operand::Plain(0), .. }));
        let grants: Vec<&Handle> = ops
            .iter()
            .filter_map(|op| match op {
                FheOp::Allow { handle, .. } => Some(handle),
                _ => None,
            })
            .collect();
        assert_eq!(grants, vec![&out.earnings, &out.epic_drops]);
    }

    #[test]
    fn claim_requires_before_subtracting() {
        let engine = Addr::unchecked("engine");
        let player = Addr::unchecked("player");
        let balance = Handle::derive(&engine, 3);
        let mut program = Program::new(engine, 20);

        let remaining = build_claim_program(&mut program, &balance, 100, &player);
        let (ops, _) = program.finish();

        assert!(matches!(ops[0], FheOp::Le { lhs: Operand::Plain(100), .. }));
        assert!(matches!(ops[1], FheOp::Require { .. }));
        assert!(matches!(ops[2], FheOp::Sub { .. }));
        assert_eq!(ops[2].output(), Some(21));
        assert_eq!(remaining, Handle::derive(&Addr::unchecked("engine"), 21));
    }
}
