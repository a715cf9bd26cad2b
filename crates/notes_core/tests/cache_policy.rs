mod common;

use common::{client_for, FakeBackend};
use notes_core::query::{CreateNote, CreateNoteVariables, GetNotes, GetNotesVariables};
use notes_core::{CacheStats, FetchPolicy, RequestError};
use serde_json::json;

const TOKEN_VAR: &str = "NOTES_TEST_CACHE_TOKEN";

#[tokio::test]
async fn cache_first_queries_hit_network_once() {
    let backend = FakeBackend::new();
    let client = client_for(&backend, TOKEN_VAR);
    let variables = GetNotesVariables::default();

    client.execute::<GetNotes>(&variables).await.expect("first");
    client.execute::<GetNotes>(&variables).await.expect("second");

    assert_eq!(backend.request_count("GetNotes"), 1);
    assert_eq!(
        client.cache().stats(),
        CacheStats {
            entries: 1,
            hits: 1,
            misses: 1
        }
    );
}

#[tokio::test]
async fn network_only_and_no_cache_bypass_cache() {
    let backend = FakeBackend::new();
    let client = client_for(&backend, TOKEN_VAR);
    let variables = GetNotesVariables::default();

    client
        .execute_with_policy::<GetNotes>(&variables, FetchPolicy::NoCache)
        .await
        .expect("no-cache query");
    assert!(client.cache().is_empty());

    client
        .execute_with_policy::<GetNotes>(&variables, FetchPolicy::NetworkOnly)
        .await
        .expect("network-only query");
    assert_eq!(client.cache().len(), 1);

    client
        .execute_with_policy::<GetNotes>(&variables, FetchPolicy::NetworkOnly)
        .await
        .expect("network-only again");
    assert_eq!(backend.request_count("GetNotes"), 3);
}

#[tokio::test]
async fn mutation_evicts_cached_queries() {
    let backend = FakeBackend::new();
    let client = client_for(&backend, TOKEN_VAR);
    let variables = GetNotesVariables::default();

    let before = client.execute::<GetNotes>(&variables).await.expect("warm");
    assert!(before.all_notes.data.is_empty());

    client
        .execute::<CreateNote>(&CreateNoteVariables {
            author: "a".to_string(),
            body: "b".to_string(),
        })
        .await
        .expect("create");
    assert!(client.cache().is_empty());

    let after = client.execute::<GetNotes>(&variables).await.expect("refetch");
    assert_eq!(after.all_notes.data.len(), 1);
    assert_eq!(backend.request_count("GetNotes"), 2);
}

#[tokio::test]
async fn undecodable_payload_is_not_cached() {
    let backend = FakeBackend::new();
    let client = client_for(&backend, TOKEN_VAR);
    let variables = GetNotesVariables::default();

    backend.reply_next_with(json!({ "data": { "allNotes": null } }));
    let first = client
        .execute::<GetNotes>(&variables)
        .await
        .expect_err("null page must not decode");
    assert!(matches!(
        first,
        RequestError::DecodeResponse {
            operation: "GetNotes",
            ..
        }
    ));
    assert!(client.cache().is_empty());

    let second = client
        .execute::<GetNotes>(&variables)
        .await
        .expect("retry should reach the network");
    assert!(second.all_notes.data.is_empty());
    assert_eq!(backend.request_count("GetNotes"), 2);
    assert_eq!(client.cache().len(), 1);
}
