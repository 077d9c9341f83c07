//! # Client
//!
//! The façade application code talks to. It owns the engine over one
//! injected record store, seeds that store once at construction, and hands
//! out query builders and channel stubs with the same call shape as a
//! networked backend client.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::config::{BackendKind, ConfigError, StoreConfig};
use crate::observability::{log_event, Event, Logger, Severity};
use crate::query::{Engine, QueryRequest, QueryResponse, TableQuery};
use crate::realtime::Channel;
use crate::schema::Table;
use crate::seed::{bootstrap, SeedReport};
use crate::store::{FileRecordStore, MemoryRecordStore, RecordStore, StoreError, StoreResult};

/// Result type for client construction
pub type ClientResult<T> = Result<T, ClientError>;

/// Client construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Store(e) => e.code(),
            ClientError::Config(e) => e.code(),
        }
    }
}

/// Construction options for [`Client::with_store`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub seed_on_startup: bool,
    /// Last day of the seeded KPI history (default: today, UTC)
    pub seed_anchor_date: Option<NaiveDate>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            seed_on_startup: true,
            seed_anchor_date: None,
        }
    }
}

impl From<&StoreConfig> for ClientOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            seed_on_startup: config.seed_on_startup,
            seed_anchor_date: Some(config.anchor_date()),
        }
    }
}

/// Data-access façade
#[derive(Debug, Clone)]
pub struct Client {
    store: Arc<dyn RecordStore>,
    engine: Arc<Engine>,
    seed_report: SeedReport,
    realtime_warned: Arc<AtomicBool>,
}

impl Client {
    /// Open the store described by `config` and seed it if configured.
    pub fn open(config: &StoreConfig) -> ClientResult<Self> {
        Logger::set_min_severity(config.log_severity()?);
        let store: Arc<dyn RecordStore> = match config.backend {
            BackendKind::File => Arc::new(FileRecordStore::open(&config.data_path())?),
            BackendKind::Memory => Arc::new(MemoryRecordStore::new()),
        };
        Self::with_store(store, ClientOptions::from(config))
    }

    /// Build a client over an injected store.
    pub fn with_store(store: Arc<dyn RecordStore>, options: ClientOptions) -> ClientResult<Self> {
        log_event(Severity::Info, Event::BootStart, &[]);

        let seed_report = if options.seed_on_startup {
            let anchor = options
                .seed_anchor_date
                .unwrap_or_else(|| Utc::now().date_naive());
            bootstrap(store.as_ref(), anchor)?
        } else {
            SeedReport::default()
        };

        log_event(
            Severity::Info,
            Event::BootComplete,
            &[("seeded", &seed_report.seeded.len().to_string())],
        );

        Ok(Self {
            engine: Arc::new(Engine::new(store.clone())),
            store,
            seed_report,
            realtime_warned: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Seeded client over a fresh in-memory store
    pub fn in_memory() -> ClientResult<Self> {
        Self::with_store(Arc::new(MemoryRecordStore::new()), ClientOptions::default())
    }

    /// Start a query on `name`. Unknown names resolve to an error when run.
    pub fn table(&self, name: impl AsRef<str>) -> TableQuery {
        TableQuery::new(self.engine.clone(), name.as_ref())
    }

    /// Run an already assembled request, e.g. one decoded from JSON.
    pub async fn run(&self, request: QueryRequest) -> QueryResponse {
        self.engine.execute(request)
    }

    /// A subscription channel. Listeners are accepted and never invoked.
    pub fn channel(&self, name: impl Into<String>) -> Channel {
        Channel::new(name, self.realtime_warned.clone())
    }

    /// Unsubscribe and drop the channel's listeners.
    pub fn remove_channel(&self, channel: &mut Channel) {
        channel.unsubscribe();
    }

    /// What the bootstrapper did when this client was built
    pub fn seed_report(&self) -> &SeedReport {
        &self.seed_report
    }

    /// Whether the table has ever been written, even if it is now empty.
    pub fn table_exists(&self, table: Table) -> StoreResult<bool> {
        self.store.contains(table.as_str())
    }
}
