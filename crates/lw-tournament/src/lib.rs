//! Single-elimination tournament engine for Lorewiki.
//!
//! Builds a bracket from a roster of 4, 8 or 16 entries, sequences its
//! matches in a fixed order, advances winners round over round through
//! byes and forfeits, and crowns a champion (or ties out). Outcomes come
//! from the caller or from a seeded simulation over a win-probability
//! table.

pub mod bracket;
pub mod config;
pub mod error;
pub mod matchup;
pub mod odds;
pub mod participant;
pub mod round;
pub mod session;
pub mod validate;

pub use bracket::Bracket;
pub use config::TournamentConfig;
pub use error::{BracketError, BracketResult};
pub use matchup::{Match, MatchRef, Outcome};
pub use odds::{MatchupOdds, Odds, OddsTable, simulate};
pub use participant::{Participant, parse_roster};
pub use round::{Round, RoundName};
pub use session::{Decision, MatchReport, Tournament};
pub use validate::{BracketSize, validate_roster};
