// SPDX-License-Identifier: MIT

//! Stat growth formulas
//!
//! The inference engine never computes stats itself; it asks a
//! [`GrowthFormula`] what a given IV would produce and compares that with the
//! recorded value.

use super::nature::Modifier;
use super::stats::Stat;

/// Inputs of a single stat calculation, apart from the IV being tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthInput {
    pub stat: Stat,
    pub base: u16,
    pub effort: u16,
    pub level: u16,
    pub modifier: Modifier,
}

/// A fixed formula mapping an IV to the stat observed in-game
pub trait GrowthFormula: Send + Sync {
    fn stat_value(&self, input: &GrowthInput, iv: u8) -> u32;
}

/// The formula used since the third generation games
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardGrowth;

impl GrowthFormula for StandardGrowth {
    fn stat_value(&self, input: &GrowthInput, iv: u8) -> u32 {
        // u64 so any u16 base and level fit
        let base = u64::from(input.base);
        let level = u64::from(input.level);
        let core = (2 * base + u64::from(iv) + u64::from(input.effort) / 4) * level / 100;

        let value = match input.stat {
            Stat::Hp => core + level + 10,
            _ => (core + 5) * u64::from(input.modifier.percent()) / 100,
        };
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}
