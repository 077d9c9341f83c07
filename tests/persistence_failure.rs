//! Persistence Failure Tests
//!
//! When the store refuses a read or write, every action resolves to
//! `{data: null, error: <message>}` and nothing panics.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use staffboard::store::MemoryRecordStore;
use staffboard::{Client, ClientOptions, QueryResponse};

fn client_over(store: Arc<MemoryRecordStore>) -> Client {
    Client::with_store(
        store,
        ClientOptions {
            seed_on_startup: true,
            seed_anchor_date: NaiveDate::from_ymd_opt(2024, 1, 7),
        },
    )
    .unwrap()
}

fn assert_failed(response: &QueryResponse) {
    assert!(response.data.is_none(), "data should be null: {:?}", response.data);
    let message = response.error_message().expect("error expected");
    assert!(message.starts_with("Storage unavailable"), "{}", message);

    let wire = serde_json::to_value(response).unwrap();
    assert!(wire["data"].is_null());
    assert!(wire["error"].is_string());
}

#[tokio::test]
async fn test_every_action_reports_read_failure() {
    let store = Arc::new(MemoryRecordStore::new());
    let client = client_over(store.clone());
    store.fail_reads(true);

    assert_failed(&client.table("app_users").select().await);
    assert_failed(&client.table("app_users").select().eq("id", "u1").single().await);
    assert_failed(
        &client
            .table("app_users")
            .insert(json!({"name": "X", "role": "staff"}))
            .await,
    );
    assert_failed(&client.table("app_users").upsert(json!({"id": "u2", "name": "Y"})).await);
    assert_failed(&client.table("app_users").update(json!({"name": "Z"})).eq("id", "u3").await);
    assert_failed(&client.table("app_users").delete().eq("id", "u4").await);
}

#[tokio::test]
async fn test_write_failure_leaves_table_untouched() {
    let store = Arc::new(MemoryRecordStore::new());
    let client = client_over(store.clone());
    store.fail_writes(true);

    assert_failed(
        &client
            .table("bonus_rules")
            .insert(json!({
                "name": "Bono Nuevo", "metric": "followUps", "threshold": 300,
                "amount": 1000, "period": "monthly", "is_active": true
            }))
            .await,
    );
    assert_failed(&client.table("bonus_rules").delete().eq("id", "b1").await);
    assert_failed(
        &client
            .table("bonus_rules")
            .update(json!({"is_active": false}))
            .await,
    );

    store.fail_writes(false);
    let rules = client.table("bonus_rules").select().eq("is_active", true).await;
    assert!(rules.is_ok());
    assert_eq!(rules.rows().len(), 4);
}

#[tokio::test]
async fn test_select_still_works_when_only_writes_fail() {
    let store = Arc::new(MemoryRecordStore::new());
    let client = client_over(store.clone());
    store.fail_writes(true);

    let users = client.table("app_users").select().await;
    assert!(users.is_ok());
    assert_eq!(users.rows().len(), 4);
}

#[test]
fn test_seed_failure_fails_construction() {
    let store = Arc::new(MemoryRecordStore::new());
    store.fail_reads(true);

    let err = Client::with_store(store, ClientOptions::default()).unwrap_err();
    assert_eq!(err.code(), "STAFFBOARD_STORE_UNAVAILABLE");
}
