// SPDX-License-Identifier: MIT

//! Facts a condition is evaluated against

use std::collections::HashMap;

use super::value::TypedValue;
use crate::error::InferenceError;
use crate::tracker::{compute_iv_ranges, compute_possible_natures, IvRanges, NatureSet, Tracker};

/// Level, evolution stage, inferred IVs/natures and route variables
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// May be NaN when the caller could not parse it
    pub level: f64,
    pub evolution: f64,
    pub ranges: IvRanges,
    pub natures: NatureSet,
    pub variables: HashMap<String, TypedValue>,
}

impl Environment {
    /// An environment with nothing inferred yet
    pub fn new(level: f64, evolution: f64) -> Self {
        Self {
            level,
            evolution,
            ranges: IvRanges::full(),
            natures: NatureSet::all(),
            variables: HashMap::new(),
        }
    }

    /// Run both inference phases for `tracker` and use their results
    pub fn for_tracker(tracker: &Tracker, level: f64, evolution: f64) -> Result<Self, InferenceError> {
        let ranges = compute_iv_ranges(tracker)?;
        let natures = compute_possible_natures(&ranges, tracker)?;
        Ok(Self::new(level, evolution)
            .with_ranges(ranges)
            .with_natures(natures))
    }

    pub fn with_ranges(mut self, ranges: IvRanges) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn with_natures(mut self, natures: NatureSet) -> Self {
        self.natures = natures;
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: TypedValue) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn with_variables(mut self, variables: HashMap<String, TypedValue>) -> Self {
        self.variables.extend(variables);
        self
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Nature, Observation, Stat, StatLine};

    #[test]
    fn test_for_tracker_uses_inference() {
        let tracker = Tracker::new("Flat", vec![StatLine::splat(100)]).observe(Observation::new(
            100,
            0,
            StatLine::new(341, 259, 236, 212, 236, 236),
        ));
        let env = Environment::for_tracker(&tracker, 100.0, 0.0).unwrap();
        assert_eq!(env.ranges.get(Stat::Hp).determined(), Some(31));
        assert_eq!(env.natures.single(), Some(Nature::Adamant));
        assert_eq!(env.level, 100.0);
    }

    #[test]
    fn test_for_tracker_surfaces_inconsistency() {
        let tracker = Tracker::new("Broken", vec![StatLine::splat(100)])
            .observe(Observation::new(100, 0, StatLine::splat(1)));
        assert!(matches!(
            Environment::for_tracker(&tracker, 5.0, 0.0),
            Err(InferenceError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let env = Environment::new(12.0, 1.0)
            .with_variable("starter", TypedValue::Text("Mudkip".to_string()));
        assert_eq!(env.natures.len(), 25);
        assert_eq!(env.ranges, IvRanges::full());
        assert_eq!(
            env.variables.get("starter"),
            Some(&TypedValue::Text("Mudkip".to_string()))
        );
    }
}
