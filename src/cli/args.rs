//! CLI argument definitions using clap
//!
//! Commands:
//! - staffboard init --config <path>
//! - staffboard seed --config <path>
//! - staffboard tables --config <path>
//! - staffboard query --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// staffboard - embedded store for the staff KPI dashboard
#[derive(Parser, Debug)]
#[command(name = "staffboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and load the default fixtures
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./staffboard.json")]
        config: PathBuf,
    },

    /// Seed any table that has never been written
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./staffboard.json")]
        config: PathBuf,
    },

    /// List tables with their row counts
    Tables {
        /// Path to configuration file
        #[arg(long, default_value = "./staffboard.json")]
        config: PathBuf,
    },

    /// Run one JSON query read from stdin and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./staffboard.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
