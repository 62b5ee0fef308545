//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bolso - Personal finance insights from your bank statements
#[derive(Parser)]
#[command(name = "bolso")]
#[command(about = "Import bank statements and surface spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a bank statement and preview transactions with suggested categories
    Import {
        /// Statement file to parse (.ofx or .csv)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Suggest a category for a transaction description
    Categorize {
        /// Free-text transaction description
        #[arg(short, long)]
        description: String,
    },

    /// Run the insights engine over a statement file
    Insights {
        /// Statement file to analyze (.ofx or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Lookback window in months, counted from the newest entry
        #[arg(short, long, default_value_t = 6)]
        months: u32,
    },
}
