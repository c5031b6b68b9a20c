//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hv_core::DocumentNumber;

use crate::commands::import::ImportArgs;

/// Work-experience time reports.
///
/// Classifies a person's work history into public, private and independent
/// employment and reports whole years and months per category, counting
/// overlapping periods once.
#[derive(Debug, Parser)]
#[command(name = "hv", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import people and their work history as JSON Lines from stdin.
    Import(ImportArgs),

    /// Show the experience time report for one or more people.
    Report {
        /// Identity document numbers (e.g., CC1001).
        #[arg(required = true)]
        documents: Vec<DocumentNumber>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Evaluation date (YYYY-MM-DD). Defaults to the local date.
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show database location and record counts.
    Status,
}
