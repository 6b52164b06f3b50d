use std::path::Path;

use colored::Colorize;

use lw_tournament::validate_roster;

pub fn run(roster: &Path) -> Result<(), String> {
    let entries = super::load_roster(roster)?;
    let size = validate_roster(&entries).map_err(|e| e.to_string())?;

    let stages: Vec<String> = size.stages().iter().map(|r| r.to_string()).collect();
    println!(
        "  {} {} entrants, {} bracket",
        "OK".green().bold(),
        size.entrants(),
        size.first_round()
    );
    println!("  Rounds: {}", stages.join(" -> "));
    Ok(())
}
