//! Bolso CLI - Personal finance insights
//!
//! Usage:
//!   bolso import --file extrato.ofx       Preview a statement with categories
//!   bolso categorize --description TEXT   Suggest a category for a description
//!   bolso insights --file extrato.csv     Run the insights engine over a file

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Import { file } => commands::cmd_import(&file, cli.json),
        Commands::Categorize { description } => commands::cmd_categorize(&description, cli.json),
        Commands::Insights { file, months } => commands::cmd_insights(&file, months, cli.json),
    }
}
