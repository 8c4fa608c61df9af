//! Report rendering for scenario runs.
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::simulation::ScenarioRecord;

/// Top-level JSON report envelope.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub records: &'a [ScenarioRecord],
}

/// Render records as a human-readable console report.
pub fn print_console(records: &[ScenarioRecord]) {
    for record in records {
        println!(
            "{} {}",
            record.scenario.bold(),
            format!("(seed {})", record.seed).dimmed()
        );
        println!(
            "  days {:>3}  tasks {:>4}  level {:>2} ({}/{} exp)",
            record.days,
            record.tasks_completed,
            record.final_level,
            record.final_exp,
            record.final_exp_to_next,
        );
        println!(
            "  draws {}/{} rejected  stones {}  roster {} unique",
            record.draws_accepted.to_string().green(),
            record.draws_rejected.to_string().yellow(),
            record.final_stones,
            record.unique_characters
        );
        println!(
            "  achievements {} completed / {} claimed (+{} stones)  streak {}d  week {}",
            record.achievements_completed,
            record.achievements_claimed,
            record.reward_stones_claimed,
            record.streak_days,
            record.completed_this_week
        );
    }
    println!(
        "{}",
        format!("{} scenario run(s) passed all invariants", records.len())
            .green()
            .bold()
    );
}

/// Render records as pretty-printed JSON on stdout.
pub fn print_json(records: &[ScenarioRecord]) -> Result<()> {
    let report = RunReport { records };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
