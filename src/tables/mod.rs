//! Fixed game tables
//!
//! Lookups that need no chain logic:
//! - Ruling planet check (`RP<digits>`)
//! - Contamination chart (`DT`)
//! - Emotion tables (`LE`, `ESH`, `ESA`, `ESS`, `ESP`, `ESL`, `ESE`)

mod contamination;
mod emotion;
mod planet;

pub use contamination::{ContaminationRoll, CONTAMINATION_CHART};
pub use emotion::{
    ANGER_AFTEREFFECT, JOY_AFTEREFFECT, LOST_EMOTION, LOVE_AFTEREFFECT, PLEASURE_AFTEREFFECT,
    SORROW_AFTEREFFECT, WONDER_AFTEREFFECT,
};
pub use planet::{parse_planet_command, PlanetCheck};

use crate::dice::Randomizer;

/// Every random table, by command key
pub static TABLES: [DiceTable; 7] = [
    LOST_EMOTION,
    JOY_AFTEREFFECT,
    ANGER_AFTEREFFECT,
    SORROW_AFTEREFFECT,
    PLEASURE_AFTEREFFECT,
    LOVE_AFTEREFFECT,
    WONDER_AFTEREFFECT,
];

/// A table rolled with some number of d6, indexed by the sum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceTable {
    /// Command that rolls this table
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Number of d6 summed
    pub dice: u32,
    /// Entries for each possible sum, lowest first
    pub entries: &'static [&'static str],
}

impl DiceTable {
    /// Entry for a given dice sum
    pub fn entry(&self, sum: u32) -> Option<&'static str> {
        let index = sum.checked_sub(self.dice)?;
        self.entries.get(index as usize).copied()
    }

    /// Roll the table and render the result
    pub fn roll(&self, randomizer: &mut impl Randomizer) -> String {
        let sum = randomizer.roll_sum(self.dice, 6);
        match self.entry(sum) {
            Some(entry) => format!("{}({}) > {}", self.name, sum, entry),
            None => format!("{}({})", self.name, sum),
        }
    }
}

/// Find a table by command key (case-insensitive)
pub fn find_table(command: &str) -> Option<&'static DiceTable> {
    let command = command.trim();
    TABLES.iter().find(|t| t.key.eq_ignore_ascii_case(command))
}
