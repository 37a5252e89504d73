use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use schedcal::calendar::build_event_body;
use schedcal::schedule::{ScheduleConfig, ScheduleParser};
use tracing::{info, warn, Level};

/// Parse OCR text of a class schedule into recurring calendar events.
#[derive(Debug, Parser)]
#[command(name = "schedcal", version)]
struct Cli {
    /// OCR text files, one per page. Reads stdin when none are given.
    inputs: Vec<PathBuf>,

    /// JSON config overriding the institution defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Output::Events)]
    output: Output,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    /// Parsed events
    Events,
    /// Calendar insert-request bodies
    Calendar,
    /// Events plus the lines that were dropped and why
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ScheduleConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ScheduleConfig::default(),
    };
    let parser = ScheduleParser::new(config)?;

    let pages = read_pages(&cli.inputs)?;
    let report = parser.parse_pages(pages.as_slice());
    info!(
        "Parsed {} events, skipped {} lines",
        report.events.len(),
        report.rejected.len()
    );

    if report.events.is_empty() {
        warn!("No events found in the input");
    }

    let json = match cli.output {
        Output::Events => serde_json::to_string_pretty(&report.events)?,
        Output::Report => serde_json::to_string_pretty(&report)?,
        Output::Calendar => {
            let bodies = report
                .events
                .iter()
                .map(|event| build_event_body(event, parser.config()))
                .collect::<Result<Vec<_>, _>>()?;
            serde_json::to_string_pretty(&bodies)?
        }
    };
    println!("{json}");

    Ok(())
}

/// Reads every input file as one page, or all of stdin as a single page.
fn read_pages(inputs: &[PathBuf]) -> Result<Vec<String>> {
    if inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read OCR text from stdin")?;
        return Ok(vec![text]);
    }

    inputs
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect()
}
