//! Dice pools
//!
//! A pool is one step's worth of six-sided dice, kept in ascending order.
//! Scoring and reroll detection both work on the sorted faces.

use std::fmt;

use serde::Serialize;

use super::Randomizer;

/// Faces on every judgment die
pub const POOL_DIE_SIDES: u32 = 6;

/// Lowest face; never succeeds, never rerolls, counts as contamination
pub const MIN_FACE: u32 = 1;

/// An ascending, immutable set of d6 results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DicePool(Vec<u32>);

/// Result of scoring a pool against a difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Dice at or above the difficulty
    pub successes: u32,
    /// Dice showing the minimum face
    pub ones: u32,
}

/// A reroll-eligible run of identical faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RerollGroup {
    /// The shared face value (never 1)
    pub face: u32,
    /// How many dice show it (always >= 2)
    pub count: u32,
}

impl DicePool {
    /// Roll `count` six-sided dice and sort them
    pub fn roll(count: u32, randomizer: &mut impl Randomizer) -> Self {
        Self::from_faces(randomizer.roll_n(count, POOL_DIE_SIDES))
    }

    /// Build a pool from already rolled faces
    pub fn from_faces(mut faces: Vec<u32>) -> Self {
        faces.sort_unstable();
        Self(faces)
    }

    /// Faces in ascending order
    pub fn faces(&self) -> &[u32] {
        &self.0
    }

    /// Number of dice in the pool
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a pool with no dice
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count successes and ones against `difficulty`
    ///
    /// No guard keeps a 1 from succeeding when the difficulty is 1 or less;
    /// the grammar simply never produces such a difficulty by default.
    pub fn tally(&self, difficulty: u32) -> Tally {
        self.0.iter().fold(Tally::default(), |mut tally, &face| {
            if face == MIN_FACE {
                tally.ones += 1;
            }
            if face >= difficulty {
                tally.successes += 1;
            }
            tally
        })
    }

    /// Groups of two or more identical faces other than 1, ascending by face
    pub fn reroll_groups(&self) -> Vec<RerollGroup> {
        let mut groups: Vec<RerollGroup> = Vec::new();

        for &face in self.0.iter().filter(|&&f| f != MIN_FACE) {
            match groups.last_mut() {
                Some(group) if group.face == face => group.count += 1,
                _ => groups.push(RerollGroup { face, count: 1 }),
            }
        }

        groups.retain(|group| group.count >= 2);
        groups
    }

    /// Faces at or above `floor`, in pool order
    pub fn faces_at_least(&self, floor: u32) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied().filter(move |&face| face >= floor)
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D{}[{}]", self.0.len(), POOL_DIE_SIDES, join_faces(&self.0))
    }
}

impl fmt::Display for RerollGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.count {
            write!(f, "{}", self.face)?;
        }
        Ok(())
    }
}

/// Comma-join a list of faces or counts
pub fn join_faces(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RngRandomizer, ScriptedRandomizer};

    #[test]
    fn test_roll_sorts() {
        let mut rng = ScriptedRandomizer::new(vec![5, 1, 3]);
        let pool = DicePool::roll(3, &mut rng);
        assert_eq!(pool.faces(), &[1, 3, 5]);
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = RngRandomizer::seeded(99);

        for _ in 0..100 {
            let pool = DicePool::roll(4, &mut rng);
            assert_eq!(pool.len(), 4);
            assert!(pool.faces().iter().all(|f| (1..=6).contains(f)));
            assert!(pool.faces().windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_tally_basic() {
        let pool = DicePool::from_faces(vec![1, 4]);
        assert_eq!(pool.tally(4), Tally { successes: 1, ones: 1 });

        let pool = DicePool::from_faces(vec![1, 1, 2]);
        assert_eq!(pool.tally(4), Tally { successes: 0, ones: 2 });
    }

    #[test]
    fn test_tally_partitions_pool() {
        let pool = DicePool::from_faces(vec![1, 2, 3, 4, 5, 6, 6]);

        for difficulty in 1..=7 {
            let tally = pool.tally(difficulty);
            let below = pool.faces().iter().filter(|&&f| f < difficulty).count() as u32;
            assert_eq!(tally.successes + below, pool.len() as u32);
            assert_eq!(tally.ones, 1, "ones must not depend on difficulty");
        }
    }

    #[test]
    fn test_tally_permissive_low_difficulty() {
        // Difficulty 1 lets a 1 count as a success as well as a one.
        let pool = DicePool::from_faces(vec![1, 3]);
        assert_eq!(pool.tally(1), Tally { successes: 2, ones: 1 });
    }

    #[test]
    fn test_reroll_groups() {
        let pool = DicePool::from_faces(vec![5, 3, 3, 5, 5, 6]);
        assert_eq!(
            pool.reroll_groups(),
            vec![
                RerollGroup { face: 3, count: 2 },
                RerollGroup { face: 5, count: 3 },
            ]
        );
    }

    #[test]
    fn test_reroll_groups_skip_ones_and_singles() {
        let pool = DicePool::from_faces(vec![1, 1, 1, 2, 4, 6]);
        assert!(pool.reroll_groups().is_empty());
    }

    #[test]
    fn test_reroll_groups_never_report_ones_or_singles() {
        let mut rng = RngRandomizer::seeded(2024);

        for _ in 0..500 {
            let pool = DicePool::roll(6, &mut rng);
            for group in pool.reroll_groups() {
                assert_ne!(group.face, MIN_FACE);
                assert!(group.count >= 2);
            }
        }
    }

    #[test]
    fn test_display() {
        let pool = DicePool::from_faces(vec![4, 1]);
        assert_eq!(pool.to_string(), "2D6[1,4]");
        assert_eq!(RerollGroup { face: 3, count: 2 }.to_string(), "33");
    }

    #[test]
    fn test_faces_at_least() {
        let pool = DicePool::from_faces(vec![6, 2, 4, 3]);
        assert_eq!(pool.faces_at_least(4).collect::<Vec<_>>(), vec![4, 6]);
    }
}
