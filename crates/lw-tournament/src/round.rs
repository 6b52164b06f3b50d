//! Rounds and their fixed topology.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matchup::Match;
use crate::participant::Participant;

/// One tier of a single-elimination bracket, ordered by depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundName {
    /// Sixteen entrants, eight matches.
    RoundOf16,
    /// Eight entrants, four matches.
    Quarterfinals,
    /// Four entrants, two matches.
    Semifinals,
    /// The deciding match.
    Finals,
}

impl RoundName {
    /// All rounds from the shallowest to the deepest.
    pub const ALL: [RoundName; 4] = [
        Self::RoundOf16,
        Self::Quarterfinals,
        Self::Semifinals,
        Self::Finals,
    ];

    /// The round fed by this one's winners, or `None` for the finals.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::RoundOf16 => Some(Self::Quarterfinals),
            Self::Quarterfinals => Some(Self::Semifinals),
            Self::Semifinals => Some(Self::Finals),
            Self::Finals => None,
        }
    }

    /// Stable lowercase name, e.g. `"round-of-16"`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::RoundOf16 => "round-of-16",
            Self::Quarterfinals => "quarterfinals",
            Self::Semifinals => "semifinals",
            Self::Finals => "finals",
        }
    }

    /// Prefix for match ids in this round.
    pub fn match_prefix(self) -> &'static str {
        match self {
            Self::RoundOf16 => "r16",
            Self::Quarterfinals => "qf",
            Self::Semifinals => "sf",
            Self::Finals => "f",
        }
    }

    /// Id of the match at `index` within this round, e.g. `"sf-1"`.
    pub fn match_id(self, index: usize) -> String {
        format!("{}-{index}", self.match_prefix())
    }

    /// Parse a round name. Accepts slugs, camelCase and snake_case forms.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "roundof16" | "r16" => Some(Self::RoundOf16),
            "quarterfinals" | "qf" => Some(Self::Quarterfinals),
            "semifinals" | "sf" => Some(Self::Semifinals),
            "finals" | "final" | "f" => Some(Self::Finals),
            _ => None,
        }
    }
}

impl fmt::Display for RoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RoundOf16 => "Round of 16",
            Self::Quarterfinals => "Quarterfinals",
            Self::Semifinals => "Semifinals",
            Self::Finals => "Finals",
        };
        write!(f, "{label}")
    }
}

/// An ordered collection of matches belonging to one tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Which tier this is.
    pub name: RoundName,
    /// Matches in bracket order; the index breaks ties when sequencing.
    pub matches: Vec<Match>,
}

impl Round {
    /// Create a round from its matches.
    pub fn new(name: RoundName, matches: Vec<Match>) -> Self {
        Self { name, matches }
    }

    /// True once every match has an outcome.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_resolved)
    }

    /// Index of the first match still awaiting an outcome.
    pub fn first_pending(&self) -> Option<usize> {
        self.matches.iter().position(|m| !m.is_resolved())
    }

    /// Winners in declared match order. Forfeits contribute nobody.
    pub fn winners(&self) -> Vec<Participant> {
        self.matches
            .iter()
            .filter_map(|m| m.winner().cloned())
            .collect()
    }
}
