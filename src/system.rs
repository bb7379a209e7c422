//! Blind Mythos game system - command routing
//!
//! Tries each command handler in turn and returns the first reply:
//! judgment (`BM`/`BMS`), reroll (`ReRoll`), ruling planet (`RP`),
//! contamination chart (`DT`), then the emotion tables.

use serde::Serialize;
use tracing::debug;

use crate::dice::Randomizer;
use crate::judgment::{
    ChainResolver, JudgmentConfig, JudgmentError, Outcome, RollMode, RollRequest, Tier,
};
use crate::tables::{find_table, parse_planet_command, ContaminationRoll, PlanetCheck};

/// Usage text for every command
pub const HELP_MESSAGE: &str = "\
Judgment: BMx@y>=z, BMSx@y>=z
  x: skill level (omit for 0)
  y: difficulty (optional, default 4)
  z: successes required
  BM always rerolls matching dice automatically; BMS stops and prints the reroll command.
  e.g. BM>=1  BM@3>=1  BMS2>=1

Reroll: ReRollx,x,x...@y>=z
  x: dice to roll per step
  y: difficulty (optional, default 4)
  z: successes required
  Used to continue a BMS judgment by hand.

LE: lost emotion table
ESx: emotional aftereffect table
  ESH: joy, ESA: anger, ESS: sorrow, ESP: pleasure, ESL: love, ESE: wonder
DT: contamination chart
RPxyz: ruling planet check
  xyz: ruling planet numbers, e.g. RP123  RP258
";

/// Text and verdict for one evaluated command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Success flag, for commands that have one
    pub condition: Option<bool>,
    /// Judgment tier, for judgment and reroll commands
    pub tier: Option<Tier>,
    /// Contamination points gained by a failing judgment
    pub contamination: u32,
}

impl Reply {
    /// A reply with no verdict
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            condition: None,
            tier: None,
            contamination: 0,
        }
    }
}

impl From<Outcome> for Reply {
    fn from(outcome: Outcome) -> Self {
        Self {
            condition: Some(outcome.condition()),
            tier: Some(outcome.tier),
            contamination: outcome.contamination,
            text: outcome.message,
        }
    }
}

/// The game system: a resolver plus the fixed tables
#[derive(Debug, Clone, Default)]
pub struct GameSystem {
    resolver: ChainResolver,
}

impl GameSystem {
    /// Create a game system with the given judgment limits
    pub fn new(config: JudgmentConfig) -> Self {
        Self {
            resolver: ChainResolver::new(config),
        }
    }

    /// Get the judgment resolver
    pub fn resolver(&self) -> &ChainResolver {
        &self.resolver
    }

    /// Evaluate a command
    ///
    /// Returns `Ok(None)` when no handler recognizes the command.
    pub fn evaluate<R: Randomizer>(
        &self,
        command: &str,
        randomizer: &mut R,
    ) -> Result<Option<Reply>, JudgmentError> {
        debug!("Evaluating command {:?}", command);

        // Manually issued rerolls never continue on their own.
        if let Some(request) = RollRequest::parse(command, true) {
            // A continuation cannot see the judgment it extends, so it only
            // reports its dice.
            if request.mode == RollMode::RerollChain {
                let chain = self.resolver.resolve(&request, randomizer)?;
                debug!("{} rolled {} step(s)", request, chain.step_count());
                return Ok(Some(Reply::text(chain.trace)));
            }

            let outcome = self.resolver.judge(&request, randomizer)?;
            debug!("{} resolved as {}", request, outcome.tier);
            return Ok(Some(outcome.into()));
        }

        if let Some(numbers) = parse_planet_command(command) {
            let check = PlanetCheck::roll(numbers, randomizer);
            return Ok(Some(Reply {
                condition: Some(check.activated()),
                ..Reply::text(check.to_string())
            }));
        }

        if command.trim().eq_ignore_ascii_case("DT") {
            let roll = ContaminationRoll::roll(randomizer);
            return Ok(Some(Reply::text(roll.to_string())));
        }

        if let Some(table) = find_table(command) {
            return Ok(Some(Reply::text(table.roll(randomizer))));
        }

        Ok(None)
    }
}
