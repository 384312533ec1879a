// SPDX-License-Identifier: MIT

//! The nature catalog and candidate sets

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::stats::Stat;

/// Stats in the order nature indices address them
const MODIFIED_ORDER: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::Spe, Stat::SpA, Stat::SpD];

/// A nature, in canonical index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

/// How a nature affects a single stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Boosted,
    Neutral,
    Hindered,
}

impl Modifier {
    /// Multiplier in percent, applied with floor division
    pub fn percent(self) -> u32 {
        match self {
            Modifier::Boosted => 110,
            Modifier::Neutral => 100,
            Modifier::Hindered => 90,
        }
    }
}

impl Nature {
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The stat this nature raises, `None` for neutral natures
    pub fn boosted(self) -> Option<Stat> {
        let (up, down) = (self.index() / 5, self.index() % 5);
        (up != down).then(|| MODIFIED_ORDER[up])
    }

    /// The stat this nature lowers, `None` for neutral natures
    pub fn hindered(self) -> Option<Stat> {
        let (up, down) = (self.index() / 5, self.index() % 5);
        (up != down).then(|| MODIFIED_ORDER[down])
    }

    pub fn is_neutral(self) -> bool {
        self.boosted().is_none()
    }

    pub fn modifier(self, stat: Stat) -> Modifier {
        if self.boosted() == Some(stat) {
            Modifier::Boosted
        } else if self.hindered() == Some(stat) {
            Modifier::Hindered
        } else {
            Modifier::Neutral
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Nature::Hardy => "Hardy",
            Nature::Lonely => "Lonely",
            Nature::Brave => "Brave",
            Nature::Adamant => "Adamant",
            Nature::Naughty => "Naughty",
            Nature::Bold => "Bold",
            Nature::Docile => "Docile",
            Nature::Relaxed => "Relaxed",
            Nature::Impish => "Impish",
            Nature::Lax => "Lax",
            Nature::Timid => "Timid",
            Nature::Hasty => "Hasty",
            Nature::Serious => "Serious",
            Nature::Jolly => "Jolly",
            Nature::Naive => "Naive",
            Nature::Modest => "Modest",
            Nature::Mild => "Mild",
            Nature::Quiet => "Quiet",
            Nature::Bashful => "Bashful",
            Nature::Rash => "Rash",
            Nature::Calm => "Calm",
            Nature::Gentle => "Gentle",
            Nature::Sassy => "Sassy",
            Nature::Careful => "Careful",
            Nature::Quirky => "Quirky",
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Nature {
    type Err = String;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Nature::ALL
            .iter()
            .copied()
            .find(|n| n.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("'{}' is not a known nature", needle))
    }
}

/// The natures still consistent with a tracker's observations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NatureSet(BTreeSet<Nature>);

impl NatureSet {
    /// Every nature in the catalog
    pub fn all() -> Self {
        Nature::ALL.iter().copied().collect()
    }

    pub fn contains(&self, nature: Nature) -> bool {
        self.0.contains(&nature)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The nature, if exactly one candidate remains
    pub fn single(&self) -> Option<Nature> {
        if self.0.len() == 1 {
            self.0.iter().next().copied()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Nature> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Nature> for NatureSet {
    fn from_iter<I: IntoIterator<Item = Nature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for NatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|n| n.name()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_natures() {
        assert_eq!(Nature::Adamant.boosted(), Some(Stat::Atk));
        assert_eq!(Nature::Adamant.hindered(), Some(Stat::SpA));
        assert_eq!(Nature::Timid.boosted(), Some(Stat::Spe));
        assert_eq!(Nature::Timid.hindered(), Some(Stat::Atk));
        assert_eq!(Nature::Bold.boosted(), Some(Stat::Def));
        assert_eq!(Nature::Modest.boosted(), Some(Stat::SpA));
        assert_eq!(Nature::Calm.boosted(), Some(Stat::SpD));
        assert_eq!(Nature::Brave.hindered(), Some(Stat::Spe));
    }

    #[test]
    fn test_neutral_natures() {
        let neutral: Vec<Nature> = Nature::ALL.iter().copied().filter(|n| n.is_neutral()).collect();
        assert_eq!(
            neutral,
            vec![
                Nature::Hardy,
                Nature::Docile,
                Nature::Serious,
                Nature::Bashful,
                Nature::Quirky
            ]
        );
        assert_eq!(Nature::Hardy.modifier(Stat::Atk), Modifier::Neutral);
    }

    #[test]
    fn test_hp_is_never_modified() {
        for nature in Nature::ALL {
            assert_eq!(nature.modifier(Stat::Hp), Modifier::Neutral);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("bold".parse::<Nature>(), Ok(Nature::Bold));
        assert_eq!(" JOLLY ".parse::<Nature>(), Ok(Nature::Jolly));
        assert!("Grumpy".parse::<Nature>().is_err());
    }

    #[test]
    fn test_nature_set() {
        let set: NatureSet = [Nature::Timid, Nature::Bold].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Nature::Bold));
        assert!(!set.contains(Nature::Calm));
        assert_eq!(set.single(), None);
        assert_eq!(set.to_string(), "{Bold, Timid}");

        let one: NatureSet = [Nature::Calm].into_iter().collect();
        assert_eq!(one.single(), Some(Nature::Calm));
        assert_eq!(NatureSet::all().len(), 25);
    }
}
