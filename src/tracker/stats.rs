// SPDX-License-Identifier: MIT

//! Stat identifiers and stat lines

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six stats a tracked entity has a hidden IV for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    #[serde(rename = "spa")]
    SpA,
    #[serde(rename = "spd")]
    SpD,
    Spe,
}

impl Stat {
    /// All stats in display order
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::SpA, Stat::SpD, Stat::Spe];

    /// Position of the stat in [`Stat::ALL`]
    pub fn index(self) -> usize {
        match self {
            Stat::Hp => 0,
            Stat::Atk => 1,
            Stat::Def => 2,
            Stat::SpA => 3,
            Stat::SpD => 4,
            Stat::Spe => 5,
        }
    }

    /// Canonical short name, as accepted by the condition language
    pub fn name(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Atk",
            Stat::Def => "Def",
            Stat::SpA => "SpA",
            Stat::SpD => "SpD",
            Stat::Spe => "Spe",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A full set of values, one per stat (base stats, observed stats, EVs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub hp: u16,
    #[serde(default)]
    pub atk: u16,
    #[serde(default)]
    pub def: u16,
    #[serde(default)]
    pub spa: u16,
    #[serde(default)]
    pub spd: u16,
    #[serde(default)]
    pub spe: u16,
}

impl StatLine {
    pub fn new(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        Self {
            hp,
            atk,
            def,
            spa,
            spd,
            spe,
        }
    }

    /// Same value for every stat
    pub fn splat(value: u16) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::SpA => self.spa,
            Stat::SpD => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Atk => self.atk = value,
            Stat::Def => self.def = value,
            Stat::SpA => self.spa = value,
            Stat::SpD => self.spd = value,
            Stat::Spe => self.spe = value,
        }
    }
}
