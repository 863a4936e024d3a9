//! Level catalog defaults and validation.

use cosmwasm_std::Uint128;

use crate::error::ContractError;
use crate::state::LevelConfig;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

pub fn validate_level(level: u8) -> Result<(), ContractError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(ContractError::InvalidLevel { level });
    }
    Ok(())
}

pub fn validate_level_config(config: &LevelConfig) -> Result<(), ContractError> {
    let invalid = |reason: &str| {
        Err(ContractError::InvalidLevelConfig {
            reason: reason.to_string(),
        })
    };
    if config.durability_max == 0 {
        return invalid("durability_max must be positive");
    }
    if config.efficiency_min > config.efficiency_max {
        return invalid("efficiency_min exceeds efficiency_max");
    }
    if config.luck_min > config.luck_max {
        return invalid("luck_min exceeds luck_max");
    }
    // The coprocessor draws luck over a 32-bit span
    if config.luck_max - config.luck_min > u32::MAX as u64 {
        return invalid("luck range too wide");
    }
    Ok(())
}

/// Launch catalog: level N has N x 100 durability.
pub fn default_level_configs() -> Vec<(u8, LevelConfig)> {
    let rows: [(u128, u32, u32, u64, u64); 5] = [
        (10_000, 10, 15, 5, 15),
        (30_000, 20, 25, 10, 30),
        (80_000, 30, 35, 20, 50),
        (200_000, 40, 45, 40, 80),
        (500_000, 50, 55, 80, 150),
    ];
    rows.iter()
        .zip(MIN_LEVEL..=MAX_LEVEL)
        .map(|(&(price, eff_min, eff_max, luck_min, luck_max), level)| {
            (
                level,
                LevelConfig {
                    mint_price: Uint128::new(price),
                    durability_max: 100 * level as u32,
                    efficiency_min: eff_min,
                    efficiency_max: eff_max,
                    luck_min,
                    luck_max,
                },
            )
        })
        .collect()
}
