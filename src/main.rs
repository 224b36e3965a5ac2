// EventSift - GPL-3.0-or-later
// This file is part of EventSift.
//
// Copyright (C) 2025 EventSift contributors
//
// EventSift is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// EventSift is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with EventSift.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Context;
use clap::Parser;
use eventsift::parser::load_records;
use eventsift::report::ReportSink;
use eventsift::{analyze, HeuristicConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eventsift")]
#[command(version)]
#[command(about = "Rank suspicious Windows events and DNS queries in a mixed JSON export", long_about = None)]
struct Args {
    /// JSON export to analyze (array of events or newline-delimited JSON)
    #[arg(value_name = "INPUT", default_value = "data/botsv1.json")]
    input: PathBuf,

    /// Directory for tables and charts
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Heuristic config file (defaults to the per-user config, if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write tables only
    #[arg(long)]
    no_charts: bool,

    /// Print the effective heuristic config as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Write the effective heuristic config to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG to override (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("EventSift starting up (version {})", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = HeuristicConfig::load(args.config.as_deref());

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    if let Some(path) = &args.write_config {
        config.save_to(path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let records = load_records(&args.input)
        .with_context(|| format!("Failed to load events from {}", args.input.display()))?;
    let analysis = analyze(&records, &config);

    let mut sink = ReportSink::new(&args.output_dir);
    if args.no_charts {
        sink = sink.without_charts();
    }
    let written = sink.write(&analysis).context("Failed to write report")?;

    println!(
        "Analyzed {} records: {} Windows rows, {} DNS rows, {} combined rows",
        records.len(),
        analysis.windows.len(),
        analysis.dns.len(),
        analysis.combined.len()
    );
    if let Some((first, last)) = analysis.time_range {
        println!("Time range: {first} .. {last}");
    }
    for path in &written {
        println!("  {}", path.display());
    }
    println!("Done! Files saved to {}", sink.output_dir().display());
    Ok(())
}
