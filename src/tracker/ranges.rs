// SPDX-License-Identifier: MIT

//! IV range narrowing
//!
//! Each stat keeps a bitmask of the IVs still possible. Every observation
//! contributes the IVs that reproduce the recorded stat under *some* nature,
//! and the masks are intersected across the whole history.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::growth::{GrowthFormula, StandardGrowth};
use super::nature::{Modifier, Nature};
use super::stats::{Stat, StatLine};
use super::{Observation, Tracker};
use crate::error::InferenceError;

/// Highest possible IV
pub const MAX_IV: u8 = 31;

/// One bit per IV in `0..=MAX_IV`
type IvMask = u32;

const FULL_MASK: IvMask = u32::MAX;

/// Inclusive interval of possible IVs for one stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IvRange {
    pub low: u8,
    pub high: u8,
}

impl IvRange {
    /// Build a range, `None` if it would be empty or exceed `MAX_IV`
    pub fn new(low: u8, high: u8) -> Option<Self> {
        (low <= high && high <= MAX_IV).then_some(Self { low, high })
    }

    /// Nothing known yet
    pub fn full() -> Self {
        Self {
            low: 0,
            high: MAX_IV,
        }
    }

    pub fn exact(iv: u8) -> Self {
        let iv = iv.min(MAX_IV);
        Self { low: iv, high: iv }
    }

    /// The IV, if the range has narrowed down to one value
    pub fn determined(&self) -> Option<u8> {
        (self.low == self.high).then_some(self.low)
    }

    pub fn contains(&self, iv: u8) -> bool {
        self.low <= iv && iv <= self.high
    }

    pub fn is_subset_of(&self, other: &IvRange) -> bool {
        other.low <= self.low && self.high <= other.high
    }

    pub fn ivs(&self) -> impl Iterator<Item = u8> {
        self.low..=self.high
    }

    fn from_mask(mask: IvMask) -> Option<Self> {
        if mask == 0 {
            return None;
        }
        let low = mask.trailing_zeros() as u8;
        let high = (31 - mask.leading_zeros()) as u8;
        Some(Self { low, high })
    }
}

impl Default for IvRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for IvRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.determined() {
            Some(iv) => write!(f, "{}", iv),
            None => write!(f, "{}-{}", self.low, self.high),
        }
    }
}

/// IV ranges for every stat of a tracked entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IvRanges([IvRange; 6]);

impl IvRanges {
    /// Full range for every stat
    pub fn full() -> Self {
        Self([IvRange::full(); 6])
    }

    pub fn get(&self, stat: Stat) -> IvRange {
        self.0[stat.index()]
    }

    pub fn with(mut self, stat: Stat, range: IvRange) -> Self {
        self.0[stat.index()] = range;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, IvRange)> + '_ {
        Stat::ALL.iter().map(move |stat| (*stat, self.get(*stat)))
    }
}

impl fmt::Display for IvRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(stat, range)| format!("{} {}", stat, range))
            .collect();
        f.write_str(&parts.join(" / "))
    }
}

/// Narrow IV ranges using the standard growth formula
pub fn compute_iv_ranges(tracker: &Tracker) -> Result<IvRanges, InferenceError> {
    compute_iv_ranges_with(tracker, &StandardGrowth)
}

/// Narrow IV ranges for every stat of `tracker`
///
/// An empty history yields the full range for every stat. A stat whose
/// candidates run out is reported as [`InferenceError::EmptyRange`].
pub fn compute_iv_ranges_with(
    tracker: &Tracker,
    growth: &dyn GrowthFormula,
) -> Result<IvRanges, InferenceError> {
    let mut masks = [FULL_MASK; 6];

    for observation in &tracker.observations {
        let base = tracker.base_stats_for(observation.evolution)?;
        for stat in Stat::ALL {
            let mask = &mut masks[stat.index()];
            *mask &= consistent_ivs(growth, observation, base, stat);
            if *mask == 0 {
                log::warn!(
                    "{}: {} at level {} rules out every remaining IV",
                    tracker.name,
                    stat,
                    observation.level
                );
                return Err(InferenceError::EmptyRange { stat });
            }
        }
    }

    let mut ranges = IvRanges::full();
    for stat in Stat::ALL {
        let range = IvRange::from_mask(masks[stat.index()])
            .ok_or(InferenceError::EmptyRange { stat })?;
        ranges = ranges.with(stat, range);
    }

    log::debug!(
        "{}: IV ranges after {} observation(s): {}",
        tracker.name,
        tracker.observations.len(),
        ranges
    );
    Ok(ranges)
}

/// IVs that reproduce the observed stat under at least one nature
fn consistent_ivs(
    growth: &dyn GrowthFormula,
    observation: &Observation,
    base: &StatLine,
    stat: Stat,
) -> IvMask {
    let observed = u32::from(observation.stats.get(stat));
    let mut mask = 0;
    for modifier in possible_modifiers(stat) {
        let input = observation.growth_input(base, stat, modifier);
        for iv in 0..=MAX_IV {
            if growth.stat_value(&input, iv) == observed {
                mask |= 1 << iv;
            }
        }
    }
    mask
}

/// Distinct modifiers the nature catalog can apply to `stat`
fn possible_modifiers(stat: Stat) -> Vec<Modifier> {
    let mut modifiers = Vec::with_capacity(3);
    for nature in Nature::ALL {
        let modifier = nature.modifier(stat);
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }
    modifiers
}
