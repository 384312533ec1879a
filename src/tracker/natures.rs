// SPDX-License-Identifier: MIT

//! Nature candidate filtering

use super::growth::{GrowthFormula, StandardGrowth};
use super::nature::{Nature, NatureSet};
use super::ranges::IvRanges;
use super::stats::Stat;
use super::{Observation, Tracker};
use crate::error::InferenceError;

/// Filter the nature catalog using the standard growth formula
pub fn compute_possible_natures(
    ranges: &IvRanges,
    tracker: &Tracker,
) -> Result<NatureSet, InferenceError> {
    compute_possible_natures_with(ranges, tracker, &StandardGrowth)
}

/// Natures under which every observation is reproducible with IVs drawn
/// from `ranges`
pub fn compute_possible_natures_with(
    ranges: &IvRanges,
    tracker: &Tracker,
    growth: &dyn GrowthFormula,
) -> Result<NatureSet, InferenceError> {
    let mut natures = Vec::new();
    for nature in Nature::ALL {
        if explains_history(nature, ranges, tracker, growth)? {
            natures.push(nature);
        } else {
            log::trace!("{}: ruled out {}", tracker.name, nature);
        }
    }

    if natures.is_empty() {
        log::warn!("{}: every nature was ruled out", tracker.name);
        return Err(InferenceError::NoCandidateNatures);
    }

    let natures: NatureSet = natures.into_iter().collect();
    log::debug!("{}: possible natures {}", tracker.name, natures);
    Ok(natures)
}

fn explains_history(
    nature: Nature,
    ranges: &IvRanges,
    tracker: &Tracker,
    growth: &dyn GrowthFormula,
) -> Result<bool, InferenceError> {
    for observation in &tracker.observations {
        if !explains_observation(nature, ranges, tracker, observation, growth)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn explains_observation(
    nature: Nature,
    ranges: &IvRanges,
    tracker: &Tracker,
    observation: &Observation,
    growth: &dyn GrowthFormula,
) -> Result<bool, InferenceError> {
    let base = tracker.base_stats_for(observation.evolution)?;
    Ok(Stat::ALL.iter().all(|&stat| {
        let input = observation.growth_input(base, stat, nature.modifier(stat));
        let observed = u32::from(observation.stats.get(stat));
        ranges
            .get(stat)
            .ivs()
            .any(|iv| growth.stat_value(&input, iv) == observed)
    }))
}
