//! Outcome classification
//!
//! Pass/fail is always decided first by comparing total successes with
//! the target. Only then does the secondary check pick critical over
//! plain success, or fumble over plain failure.

use std::fmt;

use serde::Serialize;

use super::chain::ChainResult;
use crate::dice::join_faces;

/// Final verdict of a judgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Success with forbidden-book bits from the initial pool
    Critical,
    /// Plain success
    Success,
    /// Failure without any ones rolled
    Failure,
    /// Failure with contamination
    Fumble,
    /// Succeeding so far; further rerolls remain available
    PendingSuccess,
    /// Failing so far; further rerolls remain available
    PendingFailure,
}

impl Tier {
    /// True for tiers that count as a success
    pub fn condition(self) -> bool {
        matches!(self, Tier::Critical | Tier::Success | Tier::PendingSuccess)
    }

    /// True while manual rerolls can still change the verdict
    pub fn is_pending(self) -> bool {
        matches!(self, Tier::PendingSuccess | Tier::PendingFailure)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Critical => "critical",
            Tier::Success => "success",
            Tier::Failure => "failure",
            Tier::Fumble => "fumble",
            Tier::PendingSuccess => "pending success",
            Tier::PendingFailure => "pending failure",
        };
        write!(f, "{}", s)
    }
}

/// A classified judgment with its full message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub tier: Tier,
    /// Trace of every step followed by the verdict
    pub message: String,
    /// Contamination points gained (ones rolled on a failing judgment)
    pub contamination: u32,
}

impl Outcome {
    /// True when the judgment counts as a success
    pub fn condition(&self) -> bool {
        self.tier.condition()
    }

    /// True for failures that carry contamination
    pub fn is_fumble(&self) -> bool {
        self.contamination > 0
    }
}

/// Classify a resolved chain against its success target
pub fn classify(chain: &ChainResult, target: u32, auto_stop: bool) -> Outcome {
    let successes = chain.total_successes;
    let ones = chain.total_ones;
    let passed = successes >= target;

    let mut verdict = String::new();
    if chain.step_count() > 1 {
        verdict.push_str(&format!("\n > final successes:{}", successes));
    }

    let tier = if auto_stop && chain.can_continue {
        if passed {
            verdict.push_str("\n > success for now; run the command to keep rerolling");
            Tier::PendingSuccess
        } else {
            verdict.push_str("\n > failure as it stands");
            Tier::PendingFailure
        }
    } else if passed {
        verdict.push_str(" > success");
        if chain.critical_candidates.is_empty() {
            Tier::Success
        } else {
            verdict.push_str(&format!(
                ", forbidden-book bits[{}]",
                join_faces(&chain.critical_candidates)
            ));
            Tier::Critical
        }
    } else {
        verdict.push_str(" > failure");
        if ones >= 1 {
            Tier::Fumble
        } else {
            Tier::Failure
        }
    };

    let contamination = if !passed && ones >= 1 {
        verdict.push_str(&format!(". contamination +{}", ones));
        ones
    } else {
        0
    };

    Outcome {
        tier,
        message: format!("{}{}", chain.trace, verdict),
        contamination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRandomizer;
    use crate::judgment::{ChainResolver, RollRequest};

    fn judge(command: &str, faces: Vec<u32>) -> Outcome {
        let request = RollRequest::parse(command, true).unwrap();
        let mut rng = ScriptedRandomizer::new(faces);
        let chain = ChainResolver::default().resolve(&request, &mut rng).unwrap();
        classify(&chain, request.target, request.auto_stop)
    }

    fn chain_with(
        successes: u32,
        ones: u32,
        candidates: Vec<u32>,
        can_continue: bool,
    ) -> ChainResult {
        ChainResult {
            total_successes: successes,
            total_ones: ones,
            critical_candidates: candidates,
            can_continue,
            ..ChainResult::default()
        }
    }

    #[test]
    fn test_critical_from_initial_pool() {
        let outcome = judge("BMS0>=1", vec![1, 4]);
        assert_eq!(outcome.tier, Tier::Critical);
        assert!(outcome.condition());
        assert_eq!(outcome.contamination, 0);
        assert_eq!(
            outcome.message,
            "(BMS0>=1) > 2D6[1,4] > successes:1 > success, forbidden-book bits[4]"
        );
    }

    #[test]
    fn test_fumble_reports_contamination() {
        let outcome = judge("BM1>=1", vec![1, 1, 2]);
        assert_eq!(outcome.tier, Tier::Fumble);
        assert!(!outcome.condition());
        assert_eq!(outcome.contamination, 2);
        assert!(outcome.message.ends_with(" > failure. contamination +2"));
    }

    #[test]
    fn test_plain_failure() {
        let outcome = judge("BM0>=1", vec![2, 3]);
        assert_eq!(outcome.tier, Tier::Failure);
        assert_eq!(outcome.contamination, 0);
        assert_eq!(outcome.message, "(BM0>=1) > 2D6[2,3] > successes:0 > failure");
    }

    #[test]
    fn test_plain_success_with_low_difficulty() {
        let outcome = judge("BM0@3>=1", vec![2, 3]);
        assert_eq!(outcome.tier, Tier::Success);
        assert!(outcome.message.ends_with(" > success"));
    }

    #[test]
    fn test_auto_chain_reports_final_total() {
        let outcome = judge("BM1>=2", vec![3, 3, 5, 2, 6]);
        assert_eq!(outcome.tier, Tier::Critical);
        assert_eq!(
            outcome.message,
            "(BM1>=2) > 3D6[3,3,5] > successes:1, reroll[33]\n \
             > (ReRoll2>=2) > 2D6[2,6] > successes:1\n \
             > final successes:2 > success, forbidden-book bits[5]"
        );
    }

    #[test]
    fn test_pending_success() {
        let outcome = judge("BMS1>=1", vec![4, 4, 2]);
        assert_eq!(outcome.tier, Tier::PendingSuccess);
        assert!(outcome.condition());
        assert!(outcome.tier.is_pending());
        assert_eq!(
            outcome.message,
            "(BMS1>=1) > 3D6[2,4,4] > successes:2, reroll[44]\n \
             > command: ReRoll2>=1\n \
             > success for now; run the command to keep rerolling"
        );
    }

    #[test]
    fn test_pending_failure_with_contamination() {
        let outcome = judge("BMS2@6>=1", vec![1, 3, 3, 5]);
        assert_eq!(outcome.tier, Tier::PendingFailure);
        assert!(!outcome.condition());
        assert!(outcome.is_fumble());
        assert_eq!(outcome.contamination, 1);
        assert!(outcome.message.ends_with("\n > failure as it stands. contamination +1"));
    }

    #[test]
    fn test_manual_reroll_never_critical() {
        let outcome = judge("ReRoll2>=1", vec![5, 6]);
        assert_eq!(outcome.tier, Tier::Success);
        assert_eq!(outcome.message, "\n > (ReRoll2>=1) > 2D6[5,6] > successes:2 > success");
    }

    #[test]
    fn test_exhausted_stop_chain_is_terminal() {
        let chain = chain_with(0, 0, vec![], false);
        assert_eq!(classify(&chain, 1, true).tier, Tier::Failure);
    }

    #[test]
    fn test_pass_fail_decided_before_secondary_check() {
        // Candidates and ones never flip the pass/fail decision.
        for candidates in [vec![], vec![4, 6]] {
            for ones in [0, 3] {
                let passing = classify(&chain_with(2, ones, candidates.clone(), false), 2, false);
                assert!(passing.condition());
                assert_eq!(passing.contamination, 0);

                let failing = classify(&chain_with(1, ones, candidates.clone(), false), 2, false);
                assert!(!failing.condition());
                assert_ne!(failing.tier, Tier::Critical);
            }
        }
    }

    #[test]
    fn test_zero_target_always_passes() {
        let outcome = classify(&chain_with(0, 2, vec![], false), 0, false);
        assert_eq!(outcome.tier, Tier::Success);
    }
}
