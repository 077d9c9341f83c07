//! # Channel Stub
//!
//! Same call shape as a networked realtime client: `on` registers a
//! listener, `subscribe` joins, `unsubscribe` leaves. The embedded store
//! has no change feed, so listeners are kept but never called. Callers
//! that need fresh data re-run their select after a mutation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::event::{ChangeKind, ChangePayload};
use crate::observability::{log_event, Event, Severity};

/// Callback for row changes
pub type Listener = Box<dyn Fn(&ChangePayload) + Send + Sync>;

/// Subscription state of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Joined,
}

struct Binding {
    kind: ChangeKind,
    table: String,
    _listener: Listener,
}

/// A named subscription channel that never delivers
pub struct Channel {
    name: String,
    state: ChannelState,
    bindings: Vec<Binding>,
    warned: Arc<AtomicBool>,
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl Channel {
    pub(crate) fn new(name: impl Into<String>, warned: Arc<AtomicBool>) -> Self {
        Self {
            name: name.into(),
            state: ChannelState::Closed,
            bindings: Vec::new(),
            warned,
        }
    }

    /// Register a listener for `kind` changes on `table`. Accepted, never invoked.
    pub fn on<F>(mut self, kind: ChangeKind, table: impl Into<String>, listener: F) -> Self
    where
        F: Fn(&ChangePayload) + Send + Sync + 'static,
    {
        self.bindings.push(Binding {
            kind,
            table: table.into(),
            _listener: Box::new(listener),
        });
        self
    }

    /// Join the channel.
    pub fn subscribe(mut self) -> Self {
        if !self.warned.swap(true, Ordering::SeqCst) {
            log_event(
                Severity::Warn,
                Event::RealtimeDisabled,
                &[("channel", &self.name)],
            );
        }
        self.state = ChannelState::Joined;
        self
    }

    /// Leave the channel and drop every listener.
    pub fn unsubscribe(&mut self) {
        self.bindings.clear();
        self.state = ChannelState::Closed;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Registered `(kind, table)` pairs
    pub fn bindings(&self) -> Vec<(ChangeKind, &str)> {
        self.bindings
            .iter()
            .map(|b| (b.kind, b.table.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut channel = Channel::new("dashboard", Arc::new(AtomicBool::new(false)))
            .on(ChangeKind::All, "kpi_entries", |_| {})
            .on(ChangeKind::Insert, "audit_logs", |_| {})
            .subscribe();

        assert_eq!(channel.state(), ChannelState::Joined);
        assert_eq!(
            channel.bindings(),
            vec![(ChangeKind::All, "kpi_entries"), (ChangeKind::Insert, "audit_logs")]
        );

        channel.unsubscribe();
        assert_eq!(channel.state(), ChannelState::Closed);
        assert!(channel.bindings().is_empty());
    }

    #[test]
    fn test_warning_flag_set_once() {
        let warned = Arc::new(AtomicBool::new(false));
        let _a = Channel::new("a", warned.clone()).subscribe();
        assert!(warned.load(Ordering::SeqCst));
        let _b = Channel::new("b", warned.clone()).subscribe();
        assert!(warned.load(Ordering::SeqCst));
    }

    #[test]
    fn test_listener_is_never_called() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _channel = Channel::new("ranking", Arc::new(AtomicBool::new(true)))
            .on(ChangeKind::All, "kpi_entries", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .subscribe();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
