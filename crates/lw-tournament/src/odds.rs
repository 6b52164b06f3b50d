//! Win-probability data and simulated match outcomes.
//!
//! Odds are stored per pair of participant ids. Looking a pair up in the
//! opposite order mirrors the entry, so one line of data covers both
//! orientations of a matchup.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BracketError, BracketResult};
use crate::matchup::{Match, Outcome};

/// Probabilities for one orientation of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    /// Chance that slot A wins.
    pub a_wins: f64,
    /// Chance that both sides are eliminated.
    #[serde(default)]
    pub draw: f64,
}

impl Odds {
    /// Even odds with no draws.
    pub const EVEN: Odds = Odds {
        a_wins: 0.5,
        draw: 0.0,
    };

    /// Create odds, rejecting values that do not form a distribution.
    pub fn new(a_wins: f64, draw: f64) -> BracketResult<Self> {
        let odds = Self { a_wins, draw };
        odds.check()?;
        Ok(odds)
    }

    /// Chance that slot B wins.
    pub fn b_wins(&self) -> f64 {
        (1.0 - self.a_wins - self.draw).max(0.0)
    }

    /// The same matchup seen from the other side.
    pub fn mirrored(&self) -> Self {
        Self {
            a_wins: self.b_wins(),
            draw: self.draw,
        }
    }

    fn check(&self) -> BracketResult<()> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(self.a_wins) || !in_range(self.draw) {
            return Err(BracketError::InvalidOdds(format!(
                "a_wins={} draw={} must both lie in [0, 1]",
                self.a_wins, self.draw
            )));
        }
        if self.a_wins + self.draw > 1.0 + f64::EPSILON {
            return Err(BracketError::InvalidOdds(format!(
                "a_wins={} plus draw={} exceeds 1",
                self.a_wins, self.draw
            )));
        }
        Ok(())
    }
}

impl Default for Odds {
    fn default() -> Self {
        Self::EVEN
    }
}

/// One matchup line in an odds file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupOdds {
    /// Id of the first participant.
    pub a: String,
    /// Id of the second participant.
    pub b: String,
    /// Chance that `a` beats `b`.
    pub a_wins: f64,
    /// Chance that both are eliminated.
    #[serde(default)]
    pub draw: f64,
    /// Flavor text appended to explanations.
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OddsFile {
    #[serde(default)]
    default: Option<Odds>,
    #[serde(default)]
    matchups: Vec<MatchupOdds>,
}

#[derive(Debug, Clone)]
struct Entry {
    odds: Odds,
    note: Option<String>,
}

/// Win probabilities keyed by participant pair.
#[derive(Debug, Clone, Default)]
pub struct OddsTable {
    default: Odds,
    entries: HashMap<(String, String), Entry>,
}

impl OddsTable {
    /// An empty table where every matchup is even.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `odds` for pairs with no entry of their own.
    pub fn with_default(mut self, odds: Odds) -> BracketResult<Self> {
        odds.check()?;
        self.default = odds;
        Ok(self)
    }

    /// Parse a table from JSON:
    /// `{ "default": {"a_wins": .., "draw": ..}, "matchups": [ .. ] }`.
    pub fn from_json(json: &str) -> BracketResult<Self> {
        let file: OddsFile = serde_json::from_str(json)?;
        let mut table = Self::new().with_default(file.default.unwrap_or_default())?;
        for line in file.matchups {
            table.insert(line)?;
        }
        Ok(table)
    }

    /// Add or replace the odds for a pair.
    pub fn insert(&mut self, line: MatchupOdds) -> BracketResult<()> {
        if line.a == line.b {
            return Err(BracketError::InvalidOdds(format!(
                "\"{}\" cannot face itself",
                line.a
            )));
        }
        let odds = Odds::new(line.a_wins, line.draw)?;
        self.entries.remove(&(line.b.clone(), line.a.clone()));
        self.entries.insert(
            (line.a, line.b),
            Entry {
                odds,
                note: line.note,
            },
        );
        Ok(())
    }

    /// Number of explicit matchup entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when only the default odds apply.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Odds for `a` (slot A) against `b` (slot B).
    pub fn lookup(&self, a: &str, b: &str) -> Odds {
        self.entry(a, b).map(|(odds, _)| odds).unwrap_or(self.default)
    }

    fn entry(&self, a: &str, b: &str) -> Option<(Odds, Option<&str>)> {
        let key = (a.to_string(), b.to_string());
        if let Some(e) = self.entries.get(&key) {
            return Some((e.odds, e.note.as_deref()));
        }
        let rev = (key.1, key.0);
        self.entries
            .get(&rev)
            .map(|e| (e.odds.mirrored(), e.note.as_deref()))
    }
}

/// Decide a match with a weighted roll.
///
/// Byes and empty matches resolve to their automatic outcome without
/// consuming randomness.
pub fn simulate<R: Rng + ?Sized>(m: &Match, table: &OddsTable, rng: &mut R) -> (Outcome, String) {
    let (a, b) = match (&m.slot_a, &m.slot_b) {
        (Some(a), Some(b)) => (a, b),
        (Some(p), None) | (None, Some(p)) => {
            let outcome = if m.slot_a.is_some() {
                Outcome::SlotAWins
            } else {
                Outcome::SlotBWins
            };
            return (outcome, format!("{} advances on a bye", p.title));
        }
        (None, None) => return (Outcome::Forfeit, "no contestants remain".to_string()),
    };

    let (odds, note) = table
        .entry(&a.id, &b.id)
        .unwrap_or((table.default, None));
    let roll: f64 = rng.random();

    let (outcome, mut text) = if roll < odds.draw {
        (
            Outcome::Forfeit,
            format!("{} and {} fall together; neither advances", a.title, b.title),
        )
    } else if roll < odds.draw + odds.a_wins {
        (
            Outcome::SlotAWins,
            format!("{} defeats {} ({:.0}% odds)", a.title, b.title, odds.a_wins * 100.0),
        )
    } else {
        (
            Outcome::SlotBWins,
            format!("{} defeats {} ({:.0}% odds)", b.title, a.title, odds.b_wins() * 100.0),
        )
    };
    if let Some(note) = note {
        text.push_str(" - ");
        text.push_str(note);
    }
    (outcome, text)
}
