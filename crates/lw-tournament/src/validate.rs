//! Roster size and structure validation.
//!
//! A bracket is only ever built for 4, 8 or 16 entrants, each with a
//! distinct, non-empty id. The size fixes which rounds the bracket will
//! contain.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BracketError, BracketResult};
use crate::participant::Participant;
use crate::round::RoundName;

/// The supported bracket sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketSize {
    /// Semifinals and finals.
    Four,
    /// Quarterfinals onward.
    Eight,
    /// Round of 16 onward.
    Sixteen,
}

impl BracketSize {
    /// Map a roster length onto a bracket size.
    pub fn from_len(len: usize) -> BracketResult<Self> {
        match len {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            other => Err(BracketError::InvalidSize(other)),
        }
    }

    /// Number of entrants.
    pub fn entrants(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }

    /// The round the roster is first paired into.
    pub fn first_round(self) -> RoundName {
        match self {
            Self::Four => RoundName::Semifinals,
            Self::Eight => RoundName::Quarterfinals,
            Self::Sixteen => RoundName::RoundOf16,
        }
    }

    /// Every round this bracket will play, shallowest first.
    pub fn stages(self) -> Vec<RoundName> {
        let first = self.first_round();
        RoundName::ALL
            .into_iter()
            .filter(|r| *r >= first)
            .collect()
    }
}

/// Check that a roster can seed a bracket and return its size.
pub fn validate_roster(roster: &[Participant]) -> BracketResult<BracketSize> {
    let size = BracketSize::from_len(roster.len())?;

    let mut seen = HashSet::new();
    for entry in roster {
        if entry.id.trim().is_empty() {
            return Err(BracketError::InvalidParticipant(format!(
                "entry \"{}\" has an empty id",
                entry.title
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(BracketError::DuplicateParticipant(entry.id.clone()));
        }
    }

    Ok(size)
}
