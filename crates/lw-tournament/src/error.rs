//! Error types for the tournament engine.

use crate::matchup::{MatchRef, Outcome};
use crate::round::RoundName;

/// Convenience result type for tournament operations.
pub type BracketResult<T> = Result<T, BracketError>;

/// Errors that can occur while building or driving a bracket.
#[derive(Debug, thiserror::Error)]
pub enum BracketError {
    /// The roster length is not one of the supported bracket sizes.
    #[error("invalid roster size {0}: expected 4, 8, or 16 participants")]
    InvalidSize(usize),

    /// Two roster entries share the same id.
    #[error("duplicate participant id \"{0}\" in roster")]
    DuplicateParticipant(String),

    /// A roster entry is malformed.
    #[error("invalid participant: {0}")]
    InvalidParticipant(String),

    /// The targeted match already has an outcome.
    #[error("match {0} is already resolved")]
    AlreadyResolved(String),

    /// The outcome names a slot that holds no participant.
    #[error("match {match_id} cannot resolve as {outcome}: that slot is empty")]
    EmptySlot {
        /// The match that was targeted.
        match_id: String,
        /// The rejected outcome.
        outcome: Outcome,
    },

    /// A bye can only end with its lone participant advancing.
    #[error("match {match_id} is a bye and cannot resolve as {outcome}")]
    ByeMustAdvance {
        /// The match that was targeted.
        match_id: String,
        /// The rejected outcome.
        outcome: Outcome,
    },

    /// A round was advanced before all of its matches were resolved.
    #[error("round {0} is not complete")]
    RoundIncomplete(RoundName),

    /// The finals have no following round.
    #[error("round {0} has no successor")]
    NoSuccessor(RoundName),

    /// The round has not been played in this bracket.
    #[error("round {0} is not part of this bracket")]
    RoundNotFound(RoundName),

    /// No match exists at the given position.
    #[error("no match at {0}")]
    MatchNotFound(MatchRef),

    /// A win-probability entry is out of range.
    #[error("invalid odds: {0}")]
    InvalidOdds(String),

    /// Roster or odds data could not be parsed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BracketError {
    /// Returns true for errors caused by driving the bracket out of order
    /// (resolving twice, advancing too early, addressing missing rounds).
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::AlreadyResolved(_)
                | Self::EmptySlot { .. }
                | Self::ByeMustAdvance { .. }
                | Self::RoundIncomplete(_)
                | Self::NoSuccessor(_)
                | Self::RoundNotFound(_)
                | Self::MatchNotFound(_)
        )
    }
}
