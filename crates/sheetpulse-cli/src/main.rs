//! sheetpulse CLI - Sheet Analytics Derivation Engine
//!
//! Command-line interface for computing derived views (summary, timeline,
//! dependency map, health, workspace overview) over sheet snapshots stored
//! as JSON files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sheetpulse_report::{JsonFileSource, ReportEngine};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sheetpulse")]
#[command(author, version, about = "Sheet analytics derivation engine", long_about = None)]
struct Cli {
    /// Directory holding snapshot and workspace JSON files
    #[arg(short, long, default_value = ".", env = "SHEETPULSE_DATA_DIR")]
    data_dir: std::path::PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Structural summary, health indicators, and insights for a sheet
    Summary {
        /// Sheet identifier
        sheet_id: String,
    },

    /// Derived tasks, project timeline, bottlenecks, and resource load
    Timeline {
        /// Sheet identifier
        sheet_id: String,
    },

    /// Dependency map for a sheet
    Deps {
        /// Sheet identifier
        sheet_id: String,
    },

    /// Composite health report for a sheet
    Health {
        /// Sheet identifier
        sheet_id: String,
    },

    /// Roll up health across all sheets in a workspace
    Overview {
        /// Workspace identifier
        workspace_id: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let engine = ReportEngine::new(JsonFileSource::new(&cli.data_dir));

    match &cli.command {
        Commands::Summary { sheet_id } => emit(&cli, &engine.summary(sheet_id)?),
        Commands::Timeline { sheet_id } => emit(&cli, &engine.timeline(sheet_id)?),
        Commands::Deps { sheet_id } => emit(&cli, &engine.dependency_map(sheet_id)?),
        Commands::Health { sheet_id } => emit(&cli, &engine.health_report(sheet_id)?),
        Commands::Overview { workspace_id } => {
            emit(&cli, &engine.workspace_overview(workspace_id)?)
        }
    }
}

/// Write a view as pretty JSON to the output file or stdout.
fn emit<T: Serialize>(cli: &Cli, view: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(view).context("serializing view")?;
    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
