pub mod check;
pub mod draw;
pub mod run;

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use lw_tournament::{OddsTable, Participant, Round, parse_roster};

/// Read and parse a roster file.
fn load_roster(path: &Path) -> Result<Vec<Participant>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read roster {}: {e}", path.display()))?;
    let roster = parse_roster(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    debug!(path = %path.display(), entries = roster.len(), "roster loaded");
    Ok(roster)
}

/// Read an odds file, or fall back to even odds.
fn load_odds(path: Option<&Path>) -> Result<OddsTable, String> {
    let Some(path) = path else {
        return Ok(OddsTable::new());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read odds {}: {e}", path.display()))?;
    let table = OddsTable::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    debug!(path = %path.display(), matchups = table.len(), "odds loaded");
    Ok(table)
}

fn slot_label(slot: Option<&Participant>) -> String {
    slot.map(|p| p.title.clone())
        .unwrap_or_else(|| "(bye)".to_string())
}

/// Render a round as a table of pairings and results.
fn round_table(round: &Round) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Match", "Slot A", "Slot B", "Winner"]);
    for m in &round.matches {
        let winner = match (m.outcome(), m.winner()) {
            (None, _) => "--".to_string(),
            (Some(_), Some(w)) => w.title.clone(),
            (Some(_), None) => "forfeit".to_string(),
        };
        table.add_row(vec![
            m.id.clone(),
            slot_label(m.slot_a.as_ref()),
            slot_label(m.slot_b.as_ref()),
            winner,
        ]);
    }
    table
}

fn print_round(round: &Round) {
    println!("  {}", round.name.to_string().bold().underline());
    println!("{}", round_table(round));
    println!();
}
