//! Ruling planet check (`RP<digits>`)
//!
//! Two distinct d10 are rolled and read as digits 0-9 (a 10 reads as 0).
//! The check activates when either digit is one of the character's
//! ruling planet numbers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::dice::{join_faces, Randomizer};

const PLANET_DIE_SIDES: u32 = 10;

static PLANET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^RP(\d+)$").unwrap());

/// Result of a ruling planet check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetCheck {
    /// Ruling planet numbers, one per digit of the command
    pub numbers: Vec<u32>,
    /// The two rolled digits
    pub dice: [u32; 2],
}

impl PlanetCheck {
    /// Roll the check for the given planet numbers
    pub fn roll(numbers: Vec<u32>, randomizer: &mut impl Randomizer) -> Self {
        let first = randomizer.roll_once(PLANET_DIE_SIDES);
        let mut second = randomizer.roll_once(PLANET_DIE_SIDES);
        while second == first {
            second = randomizer.roll_once(PLANET_DIE_SIDES);
        }

        Self {
            numbers,
            dice: [first % PLANET_DIE_SIDES, second % PLANET_DIE_SIDES],
        }
    }

    /// True when a rolled digit matches a planet number
    pub fn activated(&self) -> bool {
        self.dice.iter().any(|d| self.numbers.contains(d))
    }
}

impl fmt::Display for PlanetCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ruling planet check({}) > 2D10[{}] > {}",
            join_faces(&self.numbers),
            join_faces(&self.dice),
            if self.activated() { "activated" } else { "failed" }
        )
    }
}

/// Extract planet numbers from an `RP<digits>` command
pub fn parse_planet_command(command: &str) -> Option<Vec<u32>> {
    let caps = PLANET_REGEX.captures(command.trim())?;
    caps[1].chars().map(|c| c.to_digit(10)).collect()
}
