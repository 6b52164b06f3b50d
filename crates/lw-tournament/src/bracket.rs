//! The single-elimination bracket.
//!
//! A `Bracket` starts with one round built from a shuffled roster. Every
//! resolved match is recorded in place; when a round completes, its winners
//! are paired into the next round in bracket order. Forfeits eliminate both
//! sides, so later rounds may contain byes (one empty slot) or, if nobody
//! survived, a single empty match that can only end in a forfeit. The
//! bracket finishes the moment the finals record an outcome.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BracketError, BracketResult};
use crate::matchup::{Match, MatchRef, Outcome};
use crate::participant::Participant;
use crate::round::{Round, RoundName};
use crate::validate::{BracketSize, validate_roster};

/// Full tournament topology plus its resolution state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bracket {
    size: BracketSize,
    rounds: Vec<Round>,
    champion: Option<Participant>,
    is_complete: bool,
}

impl Bracket {
    /// Build a bracket from a roster of 4, 8 or 16 entrants.
    ///
    /// The roster is copied and shuffled with `rng`, then paired
    /// `(0, 1), (2, 3), ...` into the first round.
    pub fn initialize<R: Rng + ?Sized>(roster: &[Participant], rng: &mut R) -> BracketResult<Self> {
        let size = validate_roster(roster)?;
        let mut entrants = roster.to_vec();
        entrants.shuffle(rng);

        let first = size.first_round();
        let round = Round::new(first, pair_survivors(first, entrants));
        debug!(
            round = %first,
            matches = round.matches.len(),
            "bracket initialized"
        );

        Ok(Self {
            size,
            rounds: vec![round],
            champion: None,
            is_complete: false,
        })
    }

    /// The bracket size chosen at initialization.
    pub fn size(&self) -> BracketSize {
        self.size
    }

    /// Rounds played so far, shallowest first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Look up a round by name, if it has been created.
    pub fn round(&self, name: RoundName) -> Option<&Round> {
        self.rounds.iter().find(|r| r.name == name)
    }

    /// Look up a match.
    pub fn get(&self, at: MatchRef) -> Option<&Match> {
        self.round(at.round)?.matches.get(at.index)
    }

    /// The winner of the finals, once decided.
    pub fn champion(&self) -> Option<&Participant> {
        self.champion.as_ref()
    }

    /// True once the finals have an outcome, whether or not a champion emerged.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// The earliest unresolved match, scanning rounds in depth order and
    /// matches by index. `None` means every present round is complete.
    pub fn find_next_match(&self) -> Option<MatchRef> {
        self.rounds
            .iter()
            .filter(|r| !r.is_complete())
            .find_map(|r| r.first_pending().map(|i| MatchRef::new(r.name, i)))
    }

    /// Record the outcome of a pending match.
    ///
    /// Completing a round advances its winners; completing the finals
    /// crowns the champion and finishes the bracket.
    pub fn resolve(
        &mut self,
        at: MatchRef,
        outcome: Outcome,
        explanation: impl Into<String>,
    ) -> BracketResult<()> {
        let depth = self.depth_of(at.round)?;
        let round = &mut self.rounds[depth];
        let m = round
            .matches
            .get_mut(at.index)
            .ok_or(BracketError::MatchNotFound(at))?;
        m.record(outcome, explanation)?;
        debug!(
            match_id = %m.id,
            %outcome,
            winner = m.winner().map(|p| p.id.as_str()).unwrap_or("-"),
            "match resolved"
        );

        if !round.is_complete() {
            return Ok(());
        }
        if at.round == RoundName::Finals {
            self.crown();
        } else {
            self.advance_round(at.round)?;
        }
        Ok(())
    }

    /// Pair the winners of a completed round into the next round.
    ///
    /// Winners keep bracket order; an odd survivor gets a bye and zero
    /// survivors yield one empty match. If the next round already exists
    /// it is returned untouched, since a finished round's winners cannot
    /// change.
    pub fn advance_round(&mut self, name: RoundName) -> BracketResult<&Round> {
        let next = name.next().ok_or(BracketError::NoSuccessor(name))?;
        let depth = self.depth_of(name)?;
        let round = &self.rounds[depth];
        if !round.is_complete() {
            return Err(BracketError::RoundIncomplete(name));
        }

        if self.rounds.len() == depth + 1 {
            let survivors = round.winners();
            debug!(
                from = %name,
                to = %next,
                survivors = survivors.len(),
                "advancing round"
            );
            self.rounds.push(Round::new(next, pair_survivors(next, survivors)));
        }
        Ok(&self.rounds[depth + 1])
    }

    fn depth_of(&self, name: RoundName) -> BracketResult<usize> {
        self.rounds
            .iter()
            .position(|r| r.name == name)
            .ok_or(BracketError::RoundNotFound(name))
    }

    fn crown(&mut self) {
        self.champion = self
            .round(RoundName::Finals)
            .and_then(|r| r.matches.first())
            .and_then(|m| m.winner().cloned());
        self.is_complete = true;
        match &self.champion {
            Some(champ) => info!(champion = %champ.id, "tournament finished"),
            None => info!("tournament finished without a champion"),
        }
    }
}

/// Pair participants in order; the odd one out faces an empty slot.
fn pair_survivors(round: RoundName, survivors: Vec<Participant>) -> Vec<Match> {
    if survivors.is_empty() {
        return vec![Match::new(round.match_id(0), None, None)];
    }
    survivors
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| Match::new(round.match_id(i), pair.first().cloned(), pair.get(1).cloned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn roster(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("p{i}"), format!("Entrant {i}")))
            .collect()
    }

    fn bracket(n: usize, seed: u64) -> Bracket {
        let mut rng = StdRng::seed_from_u64(seed);
        Bracket::initialize(&roster(n), &mut rng).unwrap()
    }

    fn abcd() -> Vec<Participant> {
        ["A", "B", "C", "D"]
            .iter()
            .map(|n| Participant::new(*n, *n))
            .collect()
    }

    /// Resolve the next pending match with `outcome`.
    fn play(b: &mut Bracket, outcome: Outcome) -> MatchRef {
        let at = b.find_next_match().unwrap();
        b.resolve(at, outcome, "").unwrap();
        at
    }

    #[test]
    fn first_round_follows_size() {
        let b = bracket(4, 1);
        assert_eq!(b.rounds().len(), 1);
        assert_eq!(b.rounds()[0].name, RoundName::Semifinals);
        assert_eq!(b.rounds()[0].matches.len(), 2);

        let b = bracket(8, 1);
        assert_eq!(b.rounds()[0].name, RoundName::Quarterfinals);
        assert_eq!(b.rounds()[0].matches.len(), 4);

        let b = bracket(16, 1);
        assert_eq!(b.rounds()[0].name, RoundName::RoundOf16);
        assert_eq!(b.rounds()[0].matches.len(), 8);
    }

    #[test]
    fn first_round_pairs_everyone_once() {
        for n in [4, 8, 16] {
            let b = bracket(n, 7);
            let ids: Vec<&str> = b.rounds()[0]
                .matches
                .iter()
                .flat_map(|m| [m.slot_a.as_ref(), m.slot_b.as_ref()])
                .map(|p| p.unwrap().id.as_str())
                .collect();
            assert_eq!(ids.len(), n);
            assert_eq!(ids.iter().collect::<HashSet<_>>().len(), n);
        }
    }

    #[test]
    fn initialize_does_not_touch_roster() {
        let r = roster(8);
        let before = r.clone();
        let mut rng = StdRng::seed_from_u64(3);
        Bracket::initialize(&r, &mut rng).unwrap();
        assert_eq!(r, before);
    }

    #[test]
    fn initialize_is_reproducible_per_seed() {
        let ids = |b: &Bracket| -> Vec<String> {
            b.rounds()[0]
                .matches
                .iter()
                .map(|m| m.to_string())
                .collect()
        };
        assert_eq!(ids(&bracket(16, 99)), ids(&bracket(16, 99)));
    }

    #[test]
    fn invalid_size_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = Bracket::initialize(&roster(6), &mut rng).unwrap_err();
        assert!(matches!(err, BracketError::InvalidSize(6)));
    }

    #[test]
    fn eight_entry_bracket_starts_at_quarterfinal_zero() {
        let b = bracket(8, 11);
        assert_eq!(
            b.find_next_match(),
            Some(MatchRef::new(RoundName::Quarterfinals, 0))
        );
        // Pure: asking again changes nothing.
        assert_eq!(
            b.find_next_match(),
            Some(MatchRef::new(RoundName::Quarterfinals, 0))
        );
    }

    #[test]
    fn sequencer_walks_rounds_in_order() {
        let mut b = bracket(8, 5);
        let mut visited = Vec::new();
        while !b.is_complete() {
            visited.push(play(&mut b, Outcome::SlotAWins));
        }
        let expected: Vec<MatchRef> = [
            (RoundName::Quarterfinals, 0),
            (RoundName::Quarterfinals, 1),
            (RoundName::Quarterfinals, 2),
            (RoundName::Quarterfinals, 3),
            (RoundName::Semifinals, 0),
            (RoundName::Semifinals, 1),
            (RoundName::Finals, 0),
        ]
        .into_iter()
        .map(|(r, i)| MatchRef::new(r, i))
        .collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn four_entry_scenario() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut b = Bracket::initialize(&abcd(), &mut rng).unwrap();
        let semis = b.round(RoundName::Semifinals).unwrap().clone();
        let expected_a = semis.matches[0].slot_a.clone().unwrap();
        let expected_d = semis.matches[1].slot_b.clone().unwrap();

        b.resolve(MatchRef::new(RoundName::Semifinals, 0), Outcome::SlotAWins, "")
            .unwrap();
        b.resolve(MatchRef::new(RoundName::Semifinals, 1), Outcome::SlotBWins, "")
            .unwrap();

        let finals = b.advance_round(RoundName::Semifinals).unwrap().clone();
        assert_eq!(finals.name, RoundName::Finals);
        assert_eq!(finals.matches.len(), 1);
        assert_eq!(finals.matches[0].slot_a.as_ref(), Some(&expected_a));
        assert_eq!(finals.matches[0].slot_b.as_ref(), Some(&expected_d));

        b.resolve(MatchRef::new(RoundName::Finals, 0), Outcome::SlotAWins, "")
            .unwrap();
        assert_eq!(b.champion(), Some(&expected_a));
        assert!(b.is_complete());
        assert_eq!(b.find_next_match(), None);
    }

    #[test]
    fn decisive_round_halves_without_byes() {
        let mut b = bracket(16, 8);
        for _ in 0..8 {
            play(&mut b, Outcome::SlotBWins);
        }
        let qf = b.round(RoundName::Quarterfinals).unwrap();
        assert_eq!(qf.matches.len(), 4);
        assert!(qf.matches.iter().all(|m| !m.is_bye() && !m.is_empty()));
    }

    #[test]
    fn winners_keep_bracket_order() {
        let mut b = bracket(8, 21);
        let qf = b.round(RoundName::Quarterfinals).unwrap().clone();
        for _ in 0..4 {
            play(&mut b, Outcome::SlotAWins);
        }
        let sf = b.round(RoundName::Semifinals).unwrap();
        assert_eq!(sf.matches[0].slot_a, qf.matches[0].slot_a);
        assert_eq!(sf.matches[0].slot_b, qf.matches[1].slot_a);
        assert_eq!(sf.matches[1].slot_a, qf.matches[2].slot_a);
        assert_eq!(sf.matches[1].slot_b, qf.matches[3].slot_a);
        assert_eq!(sf.matches[1].id, "sf-1");
    }

    #[test]
    fn semifinal_forfeit_gives_finals_bye() {
        let mut b = bracket(4, 4);
        let survivor = b.rounds()[0].matches[1].slot_a.clone();
        play(&mut b, Outcome::Forfeit);
        play(&mut b, Outcome::SlotAWins);

        let finals = b.round(RoundName::Finals).unwrap();
        assert_eq!(finals.matches.len(), 1);
        let m = &finals.matches[0];
        assert!(m.is_bye());
        assert_eq!(m.slot_a, survivor);

        let outcome = m.bye_outcome().unwrap();
        b.resolve(MatchRef::new(RoundName::Finals, 0), outcome, "bye")
            .unwrap();
        assert_eq!(b.champion().cloned(), survivor);
        assert!(b.is_complete());
    }

    #[test]
    fn finals_bye_cannot_be_forfeited() {
        let mut b = bracket(4, 4);
        play(&mut b, Outcome::Forfeit);
        play(&mut b, Outcome::SlotAWins);

        let finals = MatchRef::new(RoundName::Finals, 0);
        let err = b.resolve(finals, Outcome::Forfeit, "").unwrap_err();
        assert!(matches!(err, BracketError::ByeMustAdvance { .. }));
        assert!(err.is_invalid_state());
        assert!(!b.get(finals).unwrap().is_resolved());
        assert!(!b.is_complete());
        assert_eq!(b.find_next_match(), Some(finals));

        b.resolve(finals, Outcome::SlotAWins, "bye").unwrap();
        assert!(b.champion().is_some());
    }

    #[test]
    fn odd_survivors_get_a_bye_in_last_slot() {
        let mut b = bracket(8, 13);
        play(&mut b, Outcome::SlotAWins);
        play(&mut b, Outcome::Forfeit);
        play(&mut b, Outcome::SlotAWins);
        play(&mut b, Outcome::SlotAWins);

        let sf = b.round(RoundName::Semifinals).unwrap();
        assert_eq!(sf.matches.len(), 2);
        assert!(!sf.matches[0].is_bye());
        assert!(sf.matches[1].is_bye());
        assert!(sf.matches[1].slot_b.is_none());
    }

    #[test]
    fn all_forfeits_tie_out_without_champion() {
        let mut b = bracket(4, 6);
        play(&mut b, Outcome::Forfeit);
        play(&mut b, Outcome::Forfeit);

        let finals = b.round(RoundName::Finals).unwrap();
        assert!(finals.matches[0].is_empty());
        let err = b
            .resolve(MatchRef::new(RoundName::Finals, 0), Outcome::SlotAWins, "")
            .unwrap_err();
        assert!(err.is_invalid_state());

        play(&mut b, Outcome::Forfeit);
        assert!(b.is_complete());
        assert!(b.champion().is_none());
    }

    #[test]
    fn finals_forfeit_completes_without_champion() {
        let mut b = bracket(4, 9);
        play(&mut b, Outcome::SlotAWins);
        play(&mut b, Outcome::SlotAWins);
        play(&mut b, Outcome::Forfeit);
        assert!(b.is_complete());
        assert!(b.champion().is_none());
        for _ in 0..3 {
            assert_eq!(b.find_next_match(), None);
        }
    }

    #[test]
    fn resolving_twice_is_rejected() {
        let mut b = bracket(8, 2);
        let at = play(&mut b, Outcome::SlotAWins);
        let err = b.resolve(at, Outcome::SlotBWins, "").unwrap_err();
        assert!(matches!(err, BracketError::AlreadyResolved(_)));
        assert_eq!(b.get(at).unwrap().outcome(), Some(Outcome::SlotAWins));
    }

    #[test]
    fn advancing_early_or_past_finals_is_rejected() {
        let mut b = bracket(8, 2);
        let err = b.advance_round(RoundName::Quarterfinals).unwrap_err();
        assert!(matches!(err, BracketError::RoundIncomplete(RoundName::Quarterfinals)));

        let err = b.advance_round(RoundName::Semifinals).unwrap_err();
        assert!(matches!(err, BracketError::RoundNotFound(RoundName::Semifinals)));

        let err = b.advance_round(RoundName::Finals).unwrap_err();
        assert!(matches!(err, BracketError::NoSuccessor(RoundName::Finals)));
    }

    #[test]
    fn advancing_again_keeps_progress() {
        let mut b = bracket(8, 31);
        for _ in 0..5 {
            play(&mut b, Outcome::SlotAWins);
        }
        let sf = b.advance_round(RoundName::Quarterfinals).unwrap();
        assert!(sf.matches[0].is_resolved());
        assert_eq!(b.rounds().len(), 2);
    }

    #[test]
    fn unknown_positions_are_rejected() {
        let mut b = bracket(4, 0);
        let err = b
            .resolve(MatchRef::new(RoundName::Semifinals, 5), Outcome::SlotAWins, "")
            .unwrap_err();
        assert!(matches!(err, BracketError::MatchNotFound(_)));
        let err = b
            .resolve(MatchRef::new(RoundName::Quarterfinals, 0), Outcome::SlotAWins, "")
            .unwrap_err();
        assert!(matches!(err, BracketError::RoundNotFound(RoundName::Quarterfinals)));
    }

    #[test]
    fn serde_round_trip_keeps_state() {
        let mut b = bracket(4, 17);
        play(&mut b, Outcome::SlotAWins);
        let json = serde_json::to_string(&b).unwrap();
        let b2: Bracket = serde_json::from_str(&json).unwrap();
        assert_eq!(b2.find_next_match(), b.find_next_match());
        assert_eq!(b2.rounds()[0].matches[0].outcome(), Some(Outcome::SlotAWins));
    }
}
