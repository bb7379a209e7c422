//! Judgment command grammar
//!
//! Two command shapes are recognized (case-insensitive):
//! - `BM[S]<rank>[@<difficulty>]>=<target>` - initial judgment roll
//! - `ReRoll<n>[,<n>...][@<difficulty>]>=<target>` - reroll continuation

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::dice::join_faces;

/// Difficulty used when `@<difficulty>` is omitted
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Success target used when no comparator value is available
pub const DEFAULT_TARGET: u32 = 1;

/// Dice added on top of the skill rank for an initial judgment
pub const BASE_DICE: u32 = 2;

static COMMAND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:BM(S)?(\d*)|ReRoll([\d,]+))(?:@(\d+))?>=(\d+)$").unwrap()
});

/// Which command shape produced a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RollMode {
    /// `BM`/`BMS` - one pool of `rank + 2` dice
    InitialJudgment,
    /// `ReRoll` - one pool per listed count
    RerollChain,
}

/// A parsed roll command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    /// Command shape
    pub mode: RollMode,
    /// Dice per step, in execution order
    pub dice_counts: Vec<u32>,
    /// Difficulty as written by the user (`None` means the default)
    pub difficulty: Option<u32>,
    /// Successes required
    pub target: u32,
    /// Surface a follow-up command instead of rerolling automatically
    pub auto_stop: bool,
}

impl RollRequest {
    /// Initial judgment for a skill rank
    pub fn judgment(
        skill_rank: u32,
        difficulty: Option<u32>,
        target: u32,
        auto_stop: bool,
    ) -> Self {
        Self {
            mode: RollMode::InitialJudgment,
            dice_counts: vec![skill_rank.saturating_add(BASE_DICE)],
            difficulty,
            target,
            auto_stop,
        }
    }

    /// Explicit reroll chain
    pub fn reroll(
        dice_counts: Vec<u32>,
        difficulty: Option<u32>,
        target: u32,
        auto_stop: bool,
    ) -> Self {
        Self {
            mode: RollMode::RerollChain,
            dice_counts,
            difficulty,
            target,
            auto_stop,
        }
    }

    /// Parse a command, returning `None` when it matches neither shape
    ///
    /// `ReRoll` commands carry no stop marker of their own, so their
    /// `auto_stop` comes from the caller.
    pub fn parse(command: &str, reroll_auto_stop: bool) -> Option<Self> {
        let caps = COMMAND_REGEX.captures(command.trim())?;

        let difficulty = match caps.get(4) {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };
        let target = match caps.get(5) {
            Some(m) => m.as_str().parse().ok()?,
            None => DEFAULT_TARGET,
        };

        if let Some(counts) = caps.get(3) {
            let dice_counts = parse_counts(counts.as_str())?;
            return Some(Self::reroll(dice_counts, difficulty, target, reroll_auto_stop));
        }

        let auto_stop = caps.get(1).is_some();
        let skill_rank = parse_rank(&caps)?;
        skill_rank.checked_add(BASE_DICE)?;

        Some(Self::judgment(skill_rank, difficulty, target, auto_stop))
    }

    /// Effective difficulty
    pub fn difficulty(&self) -> u32 {
        self.difficulty.unwrap_or(DEFAULT_DIFFICULTY)
    }

    /// Trailing `[@d]>=t` shared by every command derived from this one
    pub fn suffix(&self) -> String {
        match self.difficulty {
            Some(d) => format!("@{}>={}", d, self.target),
            None => format!(">={}", self.target),
        }
    }

    /// Command echoed for a single step rolling `dice_count` dice
    pub fn step_command(&self, dice_count: u32) -> String {
        match self.mode {
            RollMode::InitialJudgment => format!(
                "{}{}{}",
                self.judgment_prefix(),
                dice_count.saturating_sub(BASE_DICE),
                self.suffix()
            ),
            RollMode::RerollChain => format!("ReRoll{}{}", dice_count, self.suffix()),
        }
    }

    /// Reroll request carrying this request's difficulty, target and mode
    pub fn follow_up(&self, dice_counts: Vec<u32>) -> Self {
        Self::reroll(dice_counts, self.difficulty, self.target, self.auto_stop)
    }

    fn judgment_prefix(&self) -> &'static str {
        if self.auto_stop {
            "BMS"
        } else {
            "BM"
        }
    }
}

impl fmt::Display for RollRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            RollMode::InitialJudgment => {
                let count = self.dice_counts.first().copied().unwrap_or(BASE_DICE);
                write!(f, "{}", self.step_command(count))
            }
            RollMode::RerollChain => {
                write!(f, "ReRoll{}{}", join_faces(&self.dice_counts), self.suffix())
            }
        }
    }
}

fn parse_rank(caps: &Captures<'_>) -> Option<u32> {
    match caps.get(2).map(|m| m.as_str()) {
        None | Some("") => Some(0),
        Some(digits) => digits.parse().ok(),
    }
}

fn parse_counts(list: &str) -> Option<Vec<u32>> {
    let counts = list
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect::<Option<Vec<u32>>>()?;

    if counts.is_empty() {
        None
    } else {
        Some(counts)
    }
}
