//! CLI module for staffboard
//!
//! - init: create the data directory and seed it
//! - seed: seed tables that were never written
//! - tables: row count per table
//! - query: one-shot query from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, query, run, run_command, seed, tables};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
