use std::path::Path;

use colored::Colorize;

use lw_tournament::{OddsTable, Tournament, TournamentConfig};

pub fn run(roster: &Path, seed: u64) -> Result<(), String> {
    let entries = super::load_roster(roster)?;
    // Same seeding as `run`, so the draw previews the real bracket.
    let config = TournamentConfig::default().with_seed(seed);
    let tournament =
        Tournament::new(&entries, OddsTable::new(), config).map_err(|e| e.to_string())?;

    let bracket = tournament.bracket();
    println!(
        "  {} {}",
        "Draw".bold(),
        format!("({} entrants, seed={seed})", bracket.size().entrants()).dimmed()
    );
    println!();
    for round in bracket.rounds() {
        super::print_round(round);
    }
    Ok(())
}
