//! Randomizer - the entropy source behind every roll
//!
//! All dice in the crate come from a [`Randomizer`]. Production code wraps
//! any `rand::Rng`; tests use [`ScriptedRandomizer`] to force exact faces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random die faces
pub trait Randomizer {
    /// Roll a single die with `sides` faces (1..=sides)
    fn roll_once(&mut self, sides: u32) -> u32;

    /// Roll `count` dice with `sides` faces, in roll order
    fn roll_n(&mut self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll_once(sides)).collect()
    }

    /// Roll `count` dice with `sides` faces and return their sum
    fn roll_sum(&mut self, count: u32, sides: u32) -> u32 {
        self.roll_n(count, sides).iter().sum()
    }
}

/// Randomizer backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngRandomizer<R> {
    rng: R,
}

impl<R: Rng> RngRandomizer<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRandomizer<StdRng> {
    /// Deterministic randomizer for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Randomizer seeded from the thread-local generator
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }

    /// Use `seed` when given, fresh entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> Randomizer for RngRandomizer<R> {
    fn roll_once(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides)
    }
}

/// Replays a fixed sequence of faces, cycling when exhausted
///
/// Faces are returned as given regardless of `sides`, so callers are
/// responsible for scripting values that fit the dice being rolled.
#[derive(Debug, Clone)]
pub struct ScriptedRandomizer {
    faces: Vec<u32>,
    next: usize,
    consumed: usize,
}

impl ScriptedRandomizer {
    /// Create a randomizer replaying `faces`
    ///
    /// An empty script behaves like a die that always shows 1.
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        Self {
            faces: faces.into(),
            next: 0,
            consumed: 0,
        }
    }

    /// A randomizer that always shows `face`
    pub fn constant(face: u32) -> Self {
        Self::new(vec![face])
    }

    /// Total number of dice rolled so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Randomizer for ScriptedRandomizer {
    fn roll_once(&mut self, _sides: u32) -> u32 {
        self.consumed += 1;
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}
