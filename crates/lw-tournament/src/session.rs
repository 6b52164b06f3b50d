//! Tournament session management.
//!
//! `Tournament` drives a `Bracket` from the draw to the final: it asks the
//! bracket for the next match, decides it by simulation or by an explicit
//! choice, and keeps a history of every result.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::bracket::Bracket;
use crate::config::TournamentConfig;
use crate::error::{BracketError, BracketResult};
use crate::matchup::{Match, MatchRef, Outcome};
use crate::odds::{OddsTable, simulate};
use crate::participant::Participant;

/// How the next match should be decided.
#[derive(Debug, Clone)]
pub enum Decision {
    /// Roll against the odds table.
    Simulate,
    /// Use an outcome picked by the caller.
    Choose {
        /// The chosen outcome.
        outcome: Outcome,
        /// Why it ended that way.
        explanation: String,
    },
}

impl Decision {
    /// Shorthand for `Decision::Choose`.
    pub fn choose(outcome: Outcome, explanation: impl Into<String>) -> Self {
        Self::Choose {
            outcome,
            explanation: explanation.into(),
        }
    }
}

/// A resolved match as it was recorded.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Where the match sits in the bracket.
    pub at: MatchRef,
    /// The match after its outcome was recorded.
    pub result: Match,
    /// Whether the match resolved on its own (bye or empty match).
    pub automatic: bool,
}

/// A single tournament from draw to final.
pub struct Tournament {
    bracket: Bracket,
    odds: OddsTable,
    config: TournamentConfig,
    history: Vec<MatchReport>,
    rng: StdRng,
}

impl Tournament {
    /// Draw a new bracket from `roster`.
    pub fn new(
        roster: &[Participant],
        odds: OddsTable,
        config: TournamentConfig,
    ) -> BracketResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let bracket = Bracket::initialize(roster, &mut rng)?;

        let mut tournament = Self {
            bracket,
            odds,
            config,
            history: Vec::new(),
            rng,
        };
        tournament.settle_byes()?;
        Ok(tournament)
    }

    /// Get the bracket.
    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    /// Every recorded result in the order it happened.
    pub fn history(&self) -> &[MatchReport] {
        &self.history
    }

    /// The champion, once the finals are decided.
    pub fn champion(&self) -> Option<&Participant> {
        self.bracket.champion()
    }

    /// Whether the finals have been decided.
    pub fn is_finished(&self) -> bool {
        self.bracket.is_complete()
    }

    /// The match awaiting a decision.
    pub fn next_match(&self) -> Option<(MatchRef, &Match)> {
        let at = self.bracket.find_next_match()?;
        self.bracket.get(at).map(|m| (at, m))
    }

    /// Decide the next match. Returns `None` once the tournament is over.
    pub fn play(&mut self, decision: Decision) -> BracketResult<Option<MatchReport>> {
        let Some(at) = self.bracket.find_next_match() else {
            return Ok(None);
        };

        let (outcome, explanation) = match decision {
            Decision::Simulate => {
                let m = self.bracket.get(at).ok_or(BracketError::MatchNotFound(at))?;
                simulate(m, &self.odds, &mut self.rng)
            }
            Decision::Choose {
                outcome,
                explanation,
            } => (outcome, explanation),
        };

        let report = self.record(at, outcome, explanation, false)?;
        self.settle_byes()?;
        Ok(Some(report))
    }

    /// Simulate every remaining match and return the champion, if any.
    pub fn run_to_completion(&mut self) -> BracketResult<Option<&Participant>> {
        while self.play(Decision::Simulate)?.is_some() {}
        Ok(self.champion())
    }

    fn record(
        &mut self,
        at: MatchRef,
        outcome: Outcome,
        explanation: String,
        automatic: bool,
    ) -> BracketResult<MatchReport> {
        self.bracket.resolve(at, outcome, explanation)?;
        let result = self
            .bracket
            .get(at)
            .cloned()
            .ok_or(BracketError::MatchNotFound(at))?;
        let report = MatchReport {
            at,
            result,
            automatic,
        };
        self.history.push(report.clone());
        Ok(report)
    }

    fn settle_byes(&mut self) -> BracketResult<()> {
        if !self.config.auto_resolve_byes {
            return Ok(());
        }
        while let Some((at, m)) = self.next_match() {
            let Some(outcome) = m.bye_outcome() else {
                break;
            };
            let explanation = match m.slot_a.as_ref().or(m.slot_b.as_ref()) {
                Some(p) => format!("{} advances on a bye", p.title),
                None => "no contestants remain".to_string(),
            };
            debug!(match_id = %m.id, %outcome, "resolving bye");
            self.record(at, outcome, explanation, true)?;
        }
        Ok(())
    }
}
