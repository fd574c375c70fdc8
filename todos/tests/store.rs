//! Integration tests for the todo list behind a Store
//!
//! These tests exercise the dispatch boundary end to end: typed and tagged
//! dispatch, reads, and observer notification.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use serde_json::json;
use std::time::Duration;
use todos::{
    Config, Intent, IntentError, SeedMode, TodoCollection, TodoId, TodoReducer, TodoStore,
    seeded_store,
};
use todostore_testing::init_test_tracing;
use tokio_test::assert_ok;

fn summary(todos: &TodoCollection) -> Vec<(u64, bool)> {
    todos.iter().map(|t| (t.id().get(), t.is_done())).collect()
}

#[test]
fn test_store_starts_with_seed() {
    let store = seeded_store();

    assert_eq!(store.snapshot(), TodoCollection::seed());
    assert_eq!(
        store.state(summary),
        vec![(1, true), (2, true), (3, false)]
    );
}

#[test]
fn test_seed_scenario_through_store() {
    init_test_tracing();
    let store = seeded_store();

    store.send(Intent::create("D"));
    assert_eq!(store.state(|t| t.last().map(|d| d.id())), Some(TodoId::new(4)));

    store.send(Intent::toggle(3));
    store.send(Intent::remove(1));

    assert_eq!(
        store.state(summary),
        vec![(2, true), (3, true), (4, false)]
    );
}

#[test]
fn test_unknown_tag_is_rejected_and_state_kept() {
    let store = seeded_store();

    let error = store
        .try_send(json!({"type": "UNKNOWN"}))
        .expect_err("unknown tags must be rejected");

    assert!(matches!(error, IntentError::Unhandled { ref tag } if tag == "UNKNOWN"));
    assert_eq!(store.snapshot(), TodoCollection::seed());
}

#[test]
fn test_tagged_dispatch_from_text() {
    let store = seeded_store();

    assert_ok!(store.try_send(r#"{"type":"CREATE","text":"from json"}"#));
    assert_ok!(store.try_send(r#"{"type":"REMOVE","id":2}"#));

    assert_eq!(
        store.state(summary),
        vec![(1, true), (3, false), (4, false)]
    );
    assert_eq!(store.state(|t| t.last().unwrap().text().to_string()), "from json");
}

#[test]
fn test_malformed_tagged_intent() {
    let store = seeded_store();

    let error = store.try_send(r#"{"type":"TOGGLE"}"#).unwrap_err();

    assert!(matches!(error, IntentError::Malformed { .. }));
    assert_eq!(store.state(TodoCollection::len), 3);
}

#[test]
fn test_unknown_ids_are_noops() {
    let store = seeded_store();

    store.send(Intent::toggle(42));
    store.send(Intent::remove(42));

    assert_eq!(store.snapshot(), TodoCollection::seed());
}

#[test]
fn test_empty_store_creates_first_id() {
    let config = Config {
        seed: SeedMode::Empty,
        ..Config::default()
    };
    let store = TodoStore::with_config(
        config.initial_todos(),
        TodoReducer::new(),
        config.store_config(),
    );

    store.send(Intent::create("first"));
    store.send(Intent::create("second"));

    assert_eq!(store.state(summary), vec![(1, false), (2, false)]);
}

#[tokio::test]
async fn test_observer_sees_each_update() {
    let store = seeded_store();
    let mut updates = store.subscribe();

    store.send(Intent::create("watched"));

    tokio::time::timeout(Duration::from_secs(1), updates.changed())
        .await
        .expect("update should arrive")
        .expect("store dropped");
    assert_eq!(updates.borrow_and_update().len(), 4);

    store.send(Intent::remove(4));

    assert_ok!(updates.changed().await);
    assert_eq!(*updates.borrow_and_update(), TodoCollection::seed());
}

#[tokio::test]
async fn test_intent_observer_receives_applied_intents() {
    let store = seeded_store();
    let mut intents = store.subscribe_actions();

    store.send(Intent::toggle(3));
    assert_ok!(store.try_send(json!({"type": "REMOVE", "id": 1})));
    let _ = store.try_send(json!({"type": "UNKNOWN"}));

    assert_eq!(intents.recv().await.unwrap(), Intent::toggle(3));
    assert_eq!(intents.recv().await.unwrap(), Intent::remove(1));
    assert!(intents.try_recv().is_err());
}

#[tokio::test]
async fn test_observer_ends_when_store_dropped() {
    let store = seeded_store();
    let mut updates = store.subscribe();

    let observer = tokio::spawn(async move {
        let mut sizes = Vec::new();
        while updates.changed().await.is_ok() {
            sizes.push(updates.borrow_and_update().len());
        }
        sizes
    });

    store.send(Intent::create("last"));
    drop(store);

    let sizes = tokio::time::timeout(Duration::from_secs(1), observer)
        .await
        .expect("observer should stop")
        .expect("observer panicked");
    assert_eq!(sizes.last(), Some(&4));
}
