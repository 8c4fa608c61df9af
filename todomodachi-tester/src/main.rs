//! QA harness for the Todomodachi game engine: runs scripted scenarios
//! over many seeds and verifies the engine invariants end to end.
mod companion_probe;
mod reports;
mod scenarios;
mod simulation;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use log::info;

use scenarios::{get_scenario, list_scenarios};
use simulation::{ScenarioRecord, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "todomodachi-tester", version)]
#[command(about = "Scenario-driven QA for the Todomodachi game engine")]
struct Args {
    /// Scenarios to run (comma-separated)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Override the scenario's simulated day count
    #[arg(long)]
    days: Option<u32>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Also exercise the async companion contract offline
    #[arg(long)]
    probe_companion: bool,

    /// Deadline for companion replies in the probe, in milliseconds
    #[arg(long, default_value_t = 1500)]
    companion_timeout_ms: u64,
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        for (name, description) in list_scenarios() {
            println!("{:<10} {description}", name.bold());
        }
        return Ok(());
    }

    let seeds: Vec<u64> = split_csv(&args.seeds)
        .iter()
        .map(|raw| raw.parse::<u64>().with_context(|| format!("bad seed '{raw}'")))
        .collect::<Result<_>>()?;
    if seeds.is_empty() {
        bail!("at least one seed is required");
    }

    let mut records: Vec<ScenarioRecord> = Vec::new();
    for name in split_csv(&args.scenarios) {
        let Some(scenario) = get_scenario(&name) else {
            bail!("unknown scenario '{name}' (try --list-scenarios)");
        };
        let days = args.days.unwrap_or(scenario.days);
        for &seed in &seeds {
            info!("running scenario '{name}' on seed {seed} for {days} days");
            let record = run_scenario(&scenario, seed, days)
                .with_context(|| format!("scenario '{name}' failed on seed {seed}"))?;
            records.push(record);
        }
    }

    match args.report.as_str() {
        "json" => reports::print_json(&records)?,
        _ => reports::print_console(&records),
    }

    if args.probe_companion {
        println!("{}", "companion probe".bold());
        companion_probe::run_probe(args.companion_timeout_ms).await?;
    }

    Ok(())
}
