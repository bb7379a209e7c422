//! Dice module
//!
//! Implements the dice layer shared by every command:
//! - Randomizer trait with `rand`-backed and scripted sources
//! - Sorted d6 pools with success/one counting
//! - Reroll group detection

mod pool;
mod randomizer;

pub use pool::{join_faces, DicePool, RerollGroup, Tally, MIN_FACE, POOL_DIE_SIDES};
pub use randomizer::{Randomizer, RngRandomizer, ScriptedRandomizer};
