//! Scenario Runner CLI
//!
//! Replays a JSON scenario through the deterministic simulation core and
//! prints the resulting event log.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hs_core::Scenario;

#[derive(Parser)]
#[command(name = "hs_cli")]
#[command(about = "Run hide-and-seek night scenarios headlessly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print the event log
    Run {
        /// Input scenario JSON file path
        #[arg(long)]
        scenario: PathBuf,

        /// Pretty-print the report instead of emitting one event per line
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario, pretty } => {
            let raw = fs::read_to_string(&scenario)
                .with_context(|| format!("reading scenario file {}", scenario.display()))?;
            let scenario: Scenario =
                serde_json::from_str(&raw).context("parsing scenario JSON")?;
            let report = scenario.run().context("scenario rejected at startup")?;

            if pretty {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for event in &report.events {
                    println!("{}", serde_json::to_string(event)?);
                }
                eprintln!(
                    "campers safe: {}, remaining: {}",
                    report.campers_safe, report.campers_remaining
                );
            }
        }
    }

    Ok(())
}
