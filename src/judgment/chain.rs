//! Roll-chain resolution
//!
//! A chain is the initial pool plus every reroll generation that follows
//! it. Each generation rolls one pool per requested dice count; the
//! reroll groups found across a generation become the dice counts of the
//! next one. With `auto_stop` the chain halts after the first generation
//! and hands the next command back to the caller instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::command::{RollMode, RollRequest};
use crate::dice::{DicePool, Randomizer, RerollGroup};

/// Faces in the initial pool at or above this value are critical candidates
pub const CRITICAL_FACE: u32 = 4;

/// Resolver limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgmentConfig {
    /// Automatic reroll generations allowed after the initial one
    pub max_chain_depth: u32,
    /// Largest pool a single step may roll
    pub max_dice: u32,
}

impl Default for JudgmentConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: 64,
            max_dice: 100,
        }
    }
}

/// Requests the resolver refuses to roll
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JudgmentError {
    #[error("a step must roll at least one die")]
    EmptyPool,

    #[error("too many dice in one step ({0} > {1})")]
    TooManyDice(u32, u32),
}

/// One rolled and scored pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Command echoed for this step
    pub command: String,
    pub pool: DicePool,
    pub successes: u32,
    pub ones: u32,
    pub reroll_groups: Vec<RerollGroup>,
    /// True for steps produced by a reroll
    pub reroll: bool,
    /// Rendered line for this step
    pub trace: String,
}

impl StepResult {
    fn roll(
        command: String,
        dice_count: u32,
        difficulty: u32,
        reroll: bool,
        randomizer: &mut impl Randomizer,
    ) -> Self {
        let pool = DicePool::roll(dice_count, randomizer);
        let tally = pool.tally(difficulty);
        let reroll_groups = pool.reroll_groups();

        let mut trace = String::new();
        if reroll {
            trace.push_str(" > ");
        }
        trace.push_str(&format!("({}) > {} > successes:{}", command, pool, tally.successes));
        if !reroll_groups.is_empty() {
            let groups: Vec<String> = reroll_groups.iter().map(|g| g.to_string()).collect();
            trace.push_str(&format!(", reroll[{}]", groups.join(",")));
        }

        Self {
            command,
            pool,
            successes: tally.successes,
            ones: tally.ones,
            reroll_groups,
            reroll,
            trace,
        }
    }
}

/// Everything one resolution produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainResult {
    pub steps: Vec<StepResult>,
    pub total_successes: u32,
    pub total_ones: u32,
    /// Faces >= 4 from the initial judgment pool only
    pub critical_candidates: Vec<u32>,
    /// The last generation still had reroll groups
    pub can_continue: bool,
    /// Next reroll command, surfaced when the chain stopped early
    #[serde(skip)]
    pub follow_up: Option<RollRequest>,
    /// Resolution hit the chain depth limit
    pub truncated: bool,
    /// Rendered trace of every step
    pub trace: String,
}

impl ChainResult {
    fn starting_with(preamble: String) -> Self {
        Self {
            trace: preamble,
            ..Self::default()
        }
    }

    /// Fold one generation into the accumulated chain
    fn absorb(self, generation: Vec<StepResult>, initial: bool) -> Self {
        let mut critical_candidates = self.critical_candidates;
        if initial {
            for step in &generation {
                critical_candidates.extend(step.pool.faces_at_least(CRITICAL_FACE));
            }
        }

        let mut trace = self.trace;
        for (i, step) in generation.iter().enumerate() {
            if i > 0 || !self.steps.is_empty() {
                trace.push('\n');
            }
            trace.push_str(&step.trace);
        }

        let can_continue = generation.iter().any(|s| !s.reroll_groups.is_empty());
        let mut steps = self.steps;
        steps.extend(generation.iter().cloned());

        Self {
            total_successes: self.total_successes
                + generation.iter().map(|s| s.successes).sum::<u32>(),
            total_ones: self.total_ones + generation.iter().map(|s| s.ones).sum::<u32>(),
            steps,
            critical_candidates,
            can_continue,
            follow_up: None,
            truncated: self.truncated,
            trace,
        }
    }

    /// Stop here and hand `next` back to the caller
    fn stopped_before(self, next: RollRequest, truncated: bool) -> Self {
        let note = if truncated {
            format!("\n > chain limit reached; command: {}", next)
        } else {
            format!("\n > command: {}", next)
        };

        Self {
            trace: self.trace + &note,
            follow_up: Some(next),
            truncated,
            ..self
        }
    }

    /// Number of steps rolled
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// Executes roll requests, following reroll groups until none remain
#[derive(Debug, Clone, Default)]
pub struct ChainResolver {
    config: JudgmentConfig,
}

impl ChainResolver {
    /// Create a resolver with the given limits
    pub fn new(config: JudgmentConfig) -> Self {
        Self { config }
    }

    /// Resolver limits
    pub fn config(&self) -> &JudgmentConfig {
        &self.config
    }

    /// Roll every step of `request` and any rerolls it triggers
    pub fn resolve<R: Randomizer>(
        &self,
        request: &RollRequest,
        randomizer: &mut R,
    ) -> Result<ChainResult, JudgmentError> {
        self.validate(&request.dice_counts)?;

        let mut chain = ChainResult::starting_with(self.preamble(request));
        let mut current = request.clone();
        let mut depth = 0;

        loop {
            let generation = self.roll_generation(&current, randomizer)?;
            let next_counts: Vec<u32> = generation
                .iter()
                .flat_map(|step| step.reroll_groups.iter().map(|g| g.count))
                .collect();

            debug!(
                "Generation {} of {}: {} step(s), next {:?}",
                depth,
                request,
                generation.len(),
                next_counts
            );

            chain = chain.absorb(generation, current.mode == RollMode::InitialJudgment);

            if next_counts.is_empty() {
                break;
            }

            let next = current.follow_up(next_counts);
            if current.auto_stop {
                chain = chain.stopped_before(next, false);
                break;
            }
            if depth >= self.config.max_chain_depth {
                warn!(
                    "Reroll chain for {} stopped at depth {}",
                    request, self.config.max_chain_depth
                );
                chain = chain.stopped_before(next, true);
                break;
            }

            depth += 1;
            current = next;
        }

        Ok(chain)
    }

    fn roll_generation<R: Randomizer>(
        &self,
        request: &RollRequest,
        randomizer: &mut R,
    ) -> Result<Vec<StepResult>, JudgmentError> {
        self.validate(&request.dice_counts)?;

        let reroll = request.mode == RollMode::RerollChain;
        let difficulty = request.difficulty();

        Ok(request
            .dice_counts
            .iter()
            .map(|&count| {
                let command = request.step_command(count);
                StepResult::roll(command, count, difficulty, reroll, &mut *randomizer)
            })
            .collect())
    }

    fn validate(&self, dice_counts: &[u32]) -> Result<(), JudgmentError> {
        for &count in dice_counts {
            if count == 0 {
                return Err(JudgmentError::EmptyPool);
            }
            if count > self.config.max_dice {
                return Err(JudgmentError::TooManyDice(count, self.config.max_dice));
            }
        }
        Ok(())
    }

    /// Manually issued rerolls open on a fresh line; multi-step ones in
    /// stop mode list their steps first
    fn preamble(&self, request: &RollRequest) -> String {
        if request.mode != RollMode::RerollChain {
            return String::new();
        }
        if !request.auto_stop || request.dice_counts.len() <= 1 {
            return "\n".to_string();
        }

        let commands: Vec<String> = request
            .dice_counts
            .iter()
            .map(|&count| request.step_command(count))
            .collect();
        format!("({})\n", commands.join(","))
    }
}
