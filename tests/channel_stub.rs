//! Channel Stub Tests
//!
//! Channels accept listeners and subscriptions but never deliver, even
//! when the watched table changes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use staffboard::realtime::{ChangeKind, ChannelState};
use staffboard::Client;

#[tokio::test]
async fn test_mutations_do_not_reach_listeners() {
    let client = Client::in_memory().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let mut channel = client
        .channel("kpi-changes")
        .on(ChangeKind::All, "kpi_entries", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .subscribe();
    assert_eq!(channel.state(), ChannelState::Joined);
    assert_eq!(channel.bindings(), vec![(ChangeKind::All, "kpi_entries")]);

    client
        .table("kpi_entries")
        .update(json!({"notes": "ok"}))
        .eq("user_id", "u2")
        .await;
    client.table("kpi_entries").delete().eq("user_id", "u3").await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    client.remove_channel(&mut channel);
    assert_eq!(channel.state(), ChannelState::Closed);
    assert!(channel.bindings().is_empty());
}

#[test]
fn test_many_channels_share_one_client() {
    let client = Client::in_memory().unwrap();
    let a = client.channel("a").subscribe();
    let b = client.channel("b").on(ChangeKind::Insert, "audit_logs", |_| {}).subscribe();
    assert_eq!(a.name(), "a");
    assert_eq!(b.state(), ChannelState::Joined);
}
