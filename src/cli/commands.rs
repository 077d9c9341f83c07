//! CLI command implementations
//!
//! Every command loads the config, opens a [`Client`] and speaks to the
//! tables only through the query vocabulary.

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::client::{Client, ClientOptions};
use crate::config::{BackendKind, StoreConfig};
use crate::observability::{log_event, Event, Logger, Severity};
use crate::query::{QueryRequest, QueryResponse};
use crate::schema::Table;
use crate::store::{FileRecordStore, MemoryRecordStore, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Main CLI entry point. The only function main.rs calls.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Seed { config } => seed(&config),
        Command::Tables { config } => tables(&config),
        Command::Query { config } => query(&config),
    }
}

fn load_config(path: &Path) -> CliResult<StoreConfig> {
    let config = StoreConfig::load(path)?;
    Logger::set_min_severity(config.log_severity()?);
    log_event(
        Severity::Info,
        Event::ConfigLoaded,
        &[("path", &path.display().to_string())],
    );
    Ok(config)
}

fn ensure_initialized(config: &StoreConfig) -> CliResult<()> {
    if config.backend == BackendKind::File && !FileRecordStore::exists(&config.data_path()) {
        return Err(CliError::not_initialized());
    }
    Ok(())
}

/// Open a client whose seeding is decided by the caller, not the config.
fn open_client(config: &StoreConfig, seed_on_startup: bool) -> CliResult<Client> {
    let store: std::sync::Arc<dyn RecordStore> = match config.backend {
        BackendKind::File => std::sync::Arc::new(FileRecordStore::open(&config.data_path())?),
        BackendKind::Memory => std::sync::Arc::new(MemoryRecordStore::new()),
    };
    let options = ClientOptions {
        seed_on_startup,
        ..ClientOptions::from(config)
    };
    Ok(Client::with_store(store, options)?)
}

fn block_on<F: std::future::Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Create the data directory and seed every table.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    if config.backend == BackendKind::File && FileRecordStore::exists(&config.data_path()) {
        return Err(CliError::already_initialized());
    }

    let client = open_client(&config, true)?;
    write_response(&json!({
        "initialized": true,
        "seeded": client.seed_report().seeded,
    }))
}

/// Seed tables that have never been written.
pub fn seed(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    ensure_initialized(&config)?;

    let client = open_client(&config, true)?;
    write_response(client.seed_report())
}

#[derive(Debug, Serialize)]
struct TableSummary {
    table: Table,
    /// `None` when the table was never written
    rows: Option<usize>,
}

/// Print each table with its row count.
pub fn tables(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    ensure_initialized(&config)?;

    let client = open_client(&config, false)?;
    let summaries = block_on(table_summaries(&client))??;
    write_response(&summaries)
}

async fn table_summaries(client: &Client) -> CliResult<Vec<TableSummary>> {
    let mut summaries = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        let rows = if client.table_exists(table)? {
            let response = client.table(table).select().await;
            if let Some(message) = response.error_message() {
                return Err(CliError::io_error(message));
            }
            Some(response.rows().len())
        } else {
            None
        };
        summaries.push(TableSummary { table, rows });
    }
    Ok(summaries)
}

/// Run one JSON query from stdin and print `{data, error}`.
///
/// Query failures are part of the response, not a CLI error.
pub fn query(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    ensure_initialized(&config)?;

    let client = open_client(&config, config.seed_on_startup)?;
    let request: QueryRequest = read_request()?;
    let response: QueryResponse = block_on(client.run(request))?;
    write_response(&response)
}
