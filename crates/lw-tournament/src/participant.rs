//! Roster entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BracketResult;

/// A roster entry competing in a tournament.
///
/// The engine only looks at `id`; two participants are the same entrant
/// when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier of the roster entry.
    pub id: String,
    /// Display title (character, item or location name).
    pub title: String,
}

impl Participant {
    /// Create a participant from an id and a display title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Parse a roster from a JSON array of `{ "id", "title" }` objects.
pub fn parse_roster(json: &str) -> BracketResult<Vec<Participant>> {
    Ok(serde_json::from_str(json)?)
}
