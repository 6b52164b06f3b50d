//! Matches, outcomes and match addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BracketError, BracketResult};
use crate::participant::Participant;
use crate::round::RoundName;

/// How a match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The participant in slot A advances.
    SlotAWins,
    /// The participant in slot B advances.
    SlotBWins,
    /// Nobody advances; both participants are eliminated.
    Forfeit,
}

impl Outcome {
    /// Parse an outcome from user input (`a`, `b`, `forfeit`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" | "1" | "slot_a" | "slot_a_wins" => Some(Self::SlotAWins),
            "b" | "2" | "slot_b" | "slot_b_wins" => Some(Self::SlotBWins),
            "f" | "forfeit" | "draw" => Some(Self::Forfeit),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotAWins => write!(f, "slot A wins"),
            Self::SlotBWins => write!(f, "slot B wins"),
            Self::Forfeit => write!(f, "forfeit"),
        }
    }
}

/// A single pairing within a round.
///
/// A slot is `None` when the opponent was eliminated by a forfeit upstream;
/// a match with exactly one occupied slot is a bye. Once recorded, the
/// outcome never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Identifier such as `"qf-2"`.
    pub id: String,
    /// First participant, if any.
    pub slot_a: Option<Participant>,
    /// Second participant, if any.
    pub slot_b: Option<Participant>,
    outcome: Option<Outcome>,
    winner: Option<Participant>,
    explanation: String,
}

impl Match {
    /// Create an unresolved match.
    pub fn new(
        id: impl Into<String>,
        slot_a: Option<Participant>,
        slot_b: Option<Participant>,
    ) -> Self {
        Self {
            id: id.into(),
            slot_a,
            slot_b,
            outcome: None,
            winner: None,
            explanation: String::new(),
        }
    }

    /// The recorded outcome, if resolved.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The advancing participant. `None` while pending or after a forfeit.
    pub fn winner(&self) -> Option<&Participant> {
        self.winner.as_ref()
    }

    /// Why the match ended the way it did.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether an outcome has been recorded.
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Exactly one slot is occupied.
    pub fn is_bye(&self) -> bool {
        self.slot_a.is_some() != self.slot_b.is_some()
    }

    /// Neither slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slot_a.is_none() && self.slot_b.is_none()
    }

    /// The outcome a match without two participants resolves to on its own:
    /// the occupied slot wins a bye, an empty match is a forfeit. `None`
    /// for a real contest.
    pub fn bye_outcome(&self) -> Option<Outcome> {
        match (&self.slot_a, &self.slot_b) {
            (Some(_), None) => Some(Outcome::SlotAWins),
            (None, Some(_)) => Some(Outcome::SlotBWins),
            (None, None) => Some(Outcome::Forfeit),
            (Some(_), Some(_)) => None,
        }
    }

    /// Record the outcome and set the winner accordingly.
    ///
    /// A bye only accepts its automatic outcome; the lone participant
    /// always advances.
    pub fn record(
        &mut self,
        outcome: Outcome,
        explanation: impl Into<String>,
    ) -> BracketResult<()> {
        if self.outcome.is_some() {
            return Err(BracketError::AlreadyResolved(self.id.clone()));
        }
        if self.is_bye() && outcome == Outcome::Forfeit {
            return Err(BracketError::ByeMustAdvance {
                match_id: self.id.clone(),
                outcome,
            });
        }
        let slot = match outcome {
            Outcome::SlotAWins => Some(&self.slot_a),
            Outcome::SlotBWins => Some(&self.slot_b),
            Outcome::Forfeit => None,
        };
        if let Some(slot) = slot {
            let winner = slot.clone().ok_or_else(|| BracketError::EmptySlot {
                match_id: self.id.clone(),
                outcome,
            })?;
            self.winner = Some(winner);
        }
        self.outcome = Some(outcome);
        self.explanation = explanation.into();
        Ok(())
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |slot: &Option<Participant>| {
            slot.as_ref()
                .map(|p| p.title.clone())
                .unwrap_or_else(|| "(bye)".to_string())
        };
        write!(f, "{} vs {}", name(&self.slot_a), name(&self.slot_b))
    }
}

/// Address of a match inside a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRef {
    /// The round holding the match.
    pub round: RoundName,
    /// Position within the round.
    pub index: usize,
}

impl MatchRef {
    /// Create a reference to `round[index]`.
    pub fn new(round: RoundName, index: usize) -> Self {
        Self { round, index }
    }
}

impl fmt::Display for MatchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.round.slug(), self.index)
    }
}
