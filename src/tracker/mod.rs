// SPDX-License-Identifier: MIT

//! IV and nature inference for tracked entities
//!
//! This module provides:
//! - `Tracker` - base stats and the recorded observation history
//! - `compute_iv_ranges` - per-stat IV intervals consistent with every observation
//! - `compute_possible_natures` - natures still able to explain the history
//!
//! The two phases are strictly ordered: ranges are narrowed first using the
//! whole nature catalog, natures are filtered second using those ranges.

mod growth;
mod nature;
mod natures;
mod ranges;
mod stats;

pub use growth::{GrowthFormula, GrowthInput, StandardGrowth};
pub use nature::{Modifier, Nature, NatureSet};
pub use natures::{compute_possible_natures, compute_possible_natures_with};
pub use ranges::{compute_iv_ranges, compute_iv_ranges_with, IvRange, IvRanges, MAX_IV};
pub use stats::{Stat, StatLine};

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Stats recorded for a tracked entity at one point of the route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub level: u16,
    /// Evolution stage, indexes into `Tracker::base_stats`
    #[serde(default)]
    pub evolution: usize,
    pub stats: StatLine,
    /// Effort values accumulated when the stats were recorded
    #[serde(default)]
    pub effort: StatLine,
}

/// A tracked entity: base stats per evolution stage plus its observations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub name: String,
    pub base_stats: Vec<StatLine>,
    /// Ordered by level, append-only
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl Observation {
    pub fn new(level: u16, evolution: usize, stats: StatLine) -> Self {
        Self {
            level,
            evolution,
            stats,
            effort: StatLine::default(),
        }
    }

    pub fn with_effort(mut self, effort: StatLine) -> Self {
        self.effort = effort;
        self
    }

    /// Growth inputs for `stat` under the given modifier
    pub(crate) fn growth_input(&self, base: &StatLine, stat: Stat, modifier: Modifier) -> GrowthInput {
        GrowthInput {
            stat,
            base: base.get(stat),
            effort: self.effort.get(stat),
            level: self.level,
            modifier,
        }
    }
}

impl Tracker {
    pub fn new(name: impl Into<String>, base_stats: Vec<StatLine>) -> Self {
        Self {
            name: name.into(),
            base_stats,
            observations: Vec::new(),
        }
    }

    pub fn observe(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }

    /// Base stats for an evolution stage
    pub fn base_stats_for(&self, evolution: usize) -> Result<&StatLine, InferenceError> {
        self.base_stats
            .get(evolution)
            .ok_or(InferenceError::MissingBaseStats { evolution })
    }

    /// True when observation levels never decrease
    pub fn is_ordered(&self) -> bool {
        self.observations
            .windows(2)
            .all(|pair| pair[0].level <= pair[1].level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_deserialize() {
        let yaml = r#"
            name: Mudkip
            base_stats:
              - { hp: 50, atk: 70, def: 50, spa: 50, spd: 50, spe: 40 }
              - { hp: 70, atk: 85, def: 70, spa: 60, spd: 70, spe: 50 }
            observations:
              - level: 5
                stats: { hp: 20, atk: 12, def: 10, spa: 10, spd: 10, spe: 9 }
              - level: 16
                evolution: 1
                stats: { hp: 50, atk: 33, def: 27, spa: 24, spd: 27, spe: 20 }
                effort: { atk: 12 }
        "#;
        let tracker: Tracker = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(tracker.name, "Mudkip");
        assert_eq!(tracker.base_stats.len(), 2);
        assert_eq!(tracker.observations[0].evolution, 0);
        assert_eq!(tracker.observations[0].effort, StatLine::default());
        assert_eq!(tracker.observations[1].evolution, 1);
        assert_eq!(tracker.observations[1].effort.atk, 12);
        assert!(tracker.is_ordered());
    }

    #[test]
    fn test_missing_base_stats() {
        let tracker = Tracker::new("Solo", vec![StatLine::splat(50)]);
        assert!(tracker.base_stats_for(0).is_ok());
        assert_eq!(
            tracker.base_stats_for(2),
            Err(InferenceError::MissingBaseStats { evolution: 2 })
        );
    }

    #[test]
    fn test_is_ordered() {
        let tracker = Tracker::new("Out of order", vec![StatLine::splat(50)])
            .observe(Observation::new(10, 0, StatLine::splat(20)))
            .observe(Observation::new(8, 0, StatLine::splat(18)));
        assert!(!tracker.is_ordered());
    }
}
