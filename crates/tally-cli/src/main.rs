//! Tally CLI - survey export analysis tool

mod discover;
mod logger;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally::prelude::*;

use crate::discover::{find_workbooks, DEFAULT_DATA_DIRS};

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Survey export analysis tool")]
struct Cli {
    /// More output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse every workbook found and write reports and charts
    Analyze {
        /// Directory to search for .xlsx files (repeatable; default: data, then .)
        #[arg(short, long = "data-dir")]
        data_dir: Vec<PathBuf>,

        /// Root directory for analysis/ and figures/
        #[arg(short, long = "out-dir", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show the fields and record count of a workbook
    Inspect {
        /// Input workbook
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Analyze { data_dir, out_dir } => analyze(&data_dir, &out_dir),
        Commands::Inspect { input } => inspect(&input),
    }
}

fn analyze(data_dirs: &[PathBuf], out_dir: &Path) -> Result<()> {
    let dirs: Vec<PathBuf> = if data_dirs.is_empty() {
        DEFAULT_DATA_DIRS.iter().map(PathBuf::from).collect()
    } else {
        data_dirs.to_vec()
    };

    let files = find_workbooks(&dirs).context("Failed to search for workbooks")?;
    if files.is_empty() {
        let searched: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
        bail!("No .xlsx files found in {}", searched.join(", "));
    }

    let model = TabularModel::open_all(&files).context("Failed to read survey workbooks")?;

    let analysis = Analysis::default();
    let report = analysis.run(model).context("Analysis failed")?;
    eprintln!(
        "Analysed {} completed responses ({} with an intent answer)",
        report.completed_records, report.intent_responses
    );

    let written = analysis
        .write(&report, out_dir)
        .with_context(|| format!("Failed to write outputs under '{}'", out_dir.display()))?;

    println!("Created files:");
    for path in written {
        println!("- {}", path.display());
    }

    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let model =
        TabularModel::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Fields: {}", model.fields().len());
    for field in model.fields() {
        match model.question(field) {
            Some(q) if !q.is_empty() => println!("  {}\t{}", field, q),
            _ => println!("  {}", field),
        }
    }
    println!("Records: {}", model.len());

    Ok(())
}
