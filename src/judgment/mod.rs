//! Judgment rolls
//!
//! Resolves `BM`/`BMS` judgments and `ReRoll` continuations:
//! - Command grammar into a [`RollRequest`]
//! - Chained reroll resolution into a [`ChainResult`]
//! - Four-tier classification (plus pending tiers) into an [`Outcome`]

mod chain;
mod command;
mod outcome;

pub use chain::{
    ChainResolver, ChainResult, JudgmentConfig, JudgmentError, StepResult, CRITICAL_FACE,
};
pub use command::{RollMode, RollRequest, BASE_DICE, DEFAULT_DIFFICULTY, DEFAULT_TARGET};
pub use outcome::{classify, Outcome, Tier};

use crate::dice::Randomizer;

impl ChainResolver {
    /// Resolve `request` and classify the result
    pub fn judge<R: Randomizer>(
        &self,
        request: &RollRequest,
        randomizer: &mut R,
    ) -> Result<Outcome, JudgmentError> {
        let chain = self.resolve(request, randomizer)?;
        Ok(classify(&chain, request.target, request.auto_stop))
    }
}
