use std::io::{BufRead, Write};
use std::path::Path;

use colored::Colorize;

use lw_tournament::{
    Decision, Match, MatchReport, Outcome, Participant, RoundName, Tournament, TournamentConfig,
};

pub fn run(
    roster: &Path,
    odds: Option<&Path>,
    seed: u64,
    manual: bool,
    json: bool,
    round: Option<&str>,
) -> Result<(), String> {
    let only = round
        .map(|r| RoundName::parse(r).ok_or_else(|| format!("unknown round '{r}'")))
        .transpose()?;
    let entries = super::load_roster(roster)?;
    let odds = super::load_odds(odds)?;
    let config = TournamentConfig::default().with_seed(seed);
    let mut tournament = Tournament::new(&entries, odds, config).map_err(|e| e.to_string())?;

    if manual {
        let stdin = std::io::stdin();
        play_manual(&mut tournament, stdin.lock())?;
    } else {
        tournament
            .run_to_completion()
            .map_err(|e| format!("tournament error: {e}"))?;
    }

    if json {
        let out = serde_json::to_string_pretty(tournament.bracket())
            .map_err(|e| format!("cannot serialize bracket: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "Tournament".bold(),
        format!("({} entrants, seed={seed})", entries.len()).dimmed()
    );
    println!();

    println!("  {}", "Results".bold().underline());
    let shown = tournament
        .history()
        .iter()
        .filter(|report| only.is_none_or(|name| report.at.round == name));
    for report in shown {
        println!("  {}", format_report(report));
    }
    println!();

    match only {
        Some(name) => match tournament.bracket().round(name) {
            Some(round) => super::print_round(round),
            None => println!("  {} was not played in this bracket\n", name),
        },
        None => {
            for round in tournament.bracket().rounds() {
                super::print_round(round);
            }
        }
    }

    match tournament.champion() {
        Some(champ) => println!("  {} {}", "CHAMPION".yellow().bold(), champ.title.bold()),
        None => println!(
            "  {} no champion: the finals ended in a forfeit",
            "TIED OUT".red().bold()
        ),
    }
    Ok(())
}

/// Ask for a decision on every contested match. Prompts go to stderr so
/// stdout stays clean for `--json`.
fn play_manual(tournament: &mut Tournament, mut input: impl BufRead) -> Result<(), String> {
    while let Some((_, m)) = tournament.next_match() {
        eprint!("  [{}] {m}  (a/b/f, s to simulate): ", m.id);
        std::io::stderr().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(|e| e.to_string())?;
        if read == 0 {
            return Err("input ended before the tournament finished".into());
        }

        let answer = line.trim();
        let decision = if answer.eq_ignore_ascii_case("s") {
            Decision::Simulate
        } else if let Some(outcome) = Outcome::parse(answer) {
            Decision::choose(outcome, describe_choice(outcome, m))
        } else {
            eprintln!("  unrecognized choice '{answer}'");
            continue;
        };

        match tournament.play(decision) {
            Ok(Some(report)) => eprintln!("  {}", report.result.explanation()),
            Ok(None) => break,
            Err(e) => eprintln!("  {e}"),
        }
    }
    Ok(())
}

fn describe_choice(outcome: Outcome, m: &Match) -> String {
    let title = |slot: &Option<Participant>| {
        slot.as_ref().map(|p| p.title.clone()).unwrap_or_default()
    };
    match outcome {
        Outcome::SlotAWins => format!("{} defeats {} (chosen)", title(&m.slot_a), title(&m.slot_b)),
        Outcome::SlotBWins => format!("{} defeats {} (chosen)", title(&m.slot_b), title(&m.slot_a)),
        Outcome::Forfeit => format!("{m} ends in a forfeit (chosen)"),
    }
}

fn format_report(report: &MatchReport) -> String {
    let tag = format!("[{}]", report.result.id);
    let text = report.result.explanation();
    if report.automatic {
        format!("{} {}", tag.dimmed(), text.dimmed())
    } else {
        match report.result.outcome() {
            Some(Outcome::Forfeit) => format!("{} {}", tag.dimmed(), text.red()),
            _ => format!("{} {text}", tag.dimmed()),
        }
    }
}
