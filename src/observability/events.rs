//! Observable events for staffboard
//!
//! Events are explicit and typed; the logger only ever sees their
//! SCREAMING_SNAKE_CASE names.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Client construction begins
    BootStart,
    /// Client ready to serve queries
    BootComplete,
    /// Configuration loaded
    ConfigLoaded,

    // Seeding
    /// Fixture written into an absent table
    SeedApplied,
    /// Table already present, fixture not applied
    SeedSkipped,

    // Queries
    /// Query executed successfully
    QueryExecuted,
    /// Query resolved with an error
    QueryFailed,
    /// Table contents replaced
    TableWritten,

    // Realtime
    /// Channel subscribed while delivery is disabled
    RealtimeDisabled,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SeedApplied => "SEED_APPLIED",
            Event::SeedSkipped => "SEED_SKIPPED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::TableWritten => "TABLE_WRITTEN",
            Event::RealtimeDisabled => "REALTIME_DISABLED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
