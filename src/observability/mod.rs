//! Observability for staffboard
//!
//! Structured JSON-line logging over a typed event vocabulary.
//!
//! ```ignore
//! use staffboard::observability::{log_event, Event, Severity};
//!
//! log_event(Severity::Info, Event::SeedApplied, &[("table", "app_users")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event with fields
pub fn log_event(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
