//! Contamination chart (`DT`)
//!
//! Indexed by one d6 and the sum of 2d6: the sum picks a row of three,
//! the single die (halved, rounded up) picks the column.

use std::fmt;

use crate::dice::Randomizer;

const ROLL_TWICE: &str = "Roll the contamination chart twice and apply both results \
    (reroll on 1-2 with 2, or 5-6 with 12)";

/// Chart entries in index order
pub const CONTAMINATION_CHART: [&str; 33] = [
    ROLL_TWICE,
    "All PCs take 2 damage to every Trauma and every Loss",
    "All PCs take 4 damage to two Losses",
    "All PCs take 2 damage to every Trauma. Contamination then rises by 2",
    "For all PCs, both values of one [Memory] drop to 0. No acrobat dice can be gained this time",
    "All PCs take 4 damage to one Loss. No acrobat dice can be gained this time",
    "All PCs take 1 damage to every Trauma. Contamination then rises by 3",
    "All PCs take 1 damage to every Trauma. The party then loses one acrobat die per PC",
    "All PCs take 2 damage to every Loss. All forbidden-book bits are lost",
    "All PCs take 3 damage to two Traumas. Contamination then rises by 1",
    "All PCs take 1 damage to every Trauma and every Loss",
    "All PCs take 4 damage to one Loss. All forbidden-book bits are lost",
    "All PCs take 2 damage to every Trauma",
    "All PCs take 3 damage to both the Trauma and the Loss of one [Memory]",
    "All PCs take 1 damage to every Loss",
    "All PCs take 2 damage to three Traumas",
    "All PCs take 3 damage to one Trauma and one Loss",
    "All PCs take 2 damage to three Losses",
    "All PCs take 1 damage to every Trauma",
    "All PCs take 3 damage to both the Trauma and the Loss of one [Memory]",
    "All PCs take 2 damage to every Loss",
    "All PCs take 4 damage to one Trauma. All forbidden-book bits are lost",
    "All PCs take 1 damage to every Trauma and every Loss",
    "All PCs take 3 damage to two Losses. Contamination then rises by 1",
    "All PCs take 2 damage to every Trauma. All forbidden-book bits are lost",
    "All PCs take 1 damage to every Loss. The party then loses one acrobat die per PC",
    "All PCs take 1 damage to every Loss. Contamination then rises by 3",
    "All PCs take 4 damage to one Trauma. No acrobat dice can be gained this time",
    "For all PCs, both values of one [Memory] drop to 0. No acrobat dice can be gained this time",
    "All PCs take 2 damage to every Loss. Contamination then rises by 2",
    "All PCs take 4 damage to two Traumas",
    "All PCs take 2 damage to every Trauma and every Loss",
    ROLL_TWICE,
];

/// One roll on the contamination chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContaminationRoll {
    /// The single d6
    pub die: u32,
    /// The 2d6 sum
    pub sum: u32,
}

impl ContaminationRoll {
    /// Roll the chart dice
    pub fn roll(randomizer: &mut impl Randomizer) -> Self {
        let die = randomizer.roll_once(6);
        let sum = randomizer.roll_sum(2, 6);
        Self { die, sum }
    }

    /// Chart index for these dice
    pub fn index(&self) -> usize {
        let row = self.sum.saturating_sub(2) * 3;
        let column = self.die.div_ceil(2).max(1) - 1;
        ((row + column) as usize).min(CONTAMINATION_CHART.len() - 1)
    }

    /// The chart entry for these dice
    pub fn entry(&self) -> &'static str {
        CONTAMINATION_CHART[self.index()]
    }
}

impl fmt::Display for ContaminationRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contamination chart({},{}) > {}", self.die, self.sum, self.entry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RngRandomizer, ScriptedRandomizer};

    #[test]
    fn test_index_corners() {
        assert_eq!(ContaminationRoll { die: 1, sum: 2 }.index(), 0);
        assert_eq!(ContaminationRoll { die: 2, sum: 2 }.index(), 0);
        assert_eq!(ContaminationRoll { die: 3, sum: 2 }.index(), 1);
        assert_eq!(ContaminationRoll { die: 6, sum: 2 }.index(), 2);
        assert_eq!(ContaminationRoll { die: 1, sum: 7 }.index(), 15);
        assert_eq!(ContaminationRoll { die: 6, sum: 12 }.index(), 32);
    }

    #[test]
    fn test_roll_and_display() {
        let mut rng = ScriptedRandomizer::new(vec![4, 3, 2]);
        let roll = ContaminationRoll::roll(&mut rng);
        assert_eq!(roll, ContaminationRoll { die: 4, sum: 5 });
        assert_eq!(roll.index(), 10);
        assert_eq!(
            roll.to_string(),
            "Contamination chart(4,5) > All PCs take 1 damage to every Trauma and every Loss"
        );
    }

    #[test]
    fn test_every_roll_has_an_entry() {
        let mut rng = RngRandomizer::seeded(11);

        for _ in 0..300 {
            let roll = ContaminationRoll::roll(&mut rng);
            assert!(roll.index() < CONTAMINATION_CHART.len());
        }
    }

    #[test]
    fn test_corners_roll_twice() {
        assert_eq!(ContaminationRoll { die: 1, sum: 2 }.entry(), ROLL_TWICE);
        assert_eq!(ContaminationRoll { die: 5, sum: 12 }.entry(), ROLL_TWICE);
    }
}
