mod common;

use common::{client_for, FakeBackend};
use notes_core::query::{GetNotes, GetNotesVariables};
use notes_core::FetchPolicy;

#[tokio::test]
async fn missing_token_sends_empty_authorization_header() {
    let var = "NOTES_TEST_AUTH_MISSING_TOKEN";
    std::env::remove_var(var);
    let backend = FakeBackend::new();
    let client = client_for(&backend, var);

    client
        .execute::<GetNotes>(&GetNotesVariables::default())
        .await
        .expect("query should succeed without a token");

    let request = backend.last_request();
    assert_eq!(request.authorization.as_deref(), Some(""));
}

#[tokio::test]
async fn configured_token_sends_bearer_header() {
    let var = "NOTES_TEST_AUTH_PRESENT_TOKEN";
    std::env::set_var(var, "abc");
    let backend = FakeBackend::new();
    let client = client_for(&backend, var);

    client
        .execute::<GetNotes>(&GetNotesVariables::default())
        .await
        .expect("query should succeed");

    assert_eq!(
        backend.last_request().authorization.as_deref(),
        Some("Bearer abc")
    );
}

#[tokio::test]
async fn rotated_token_applies_to_next_request() {
    let var = "NOTES_TEST_AUTH_ROTATED_TOKEN";
    std::env::set_var(var, "first");
    let backend = FakeBackend::new();
    let client = client_for(&backend, var);
    let variables = GetNotesVariables::default();

    client
        .execute_with_policy::<GetNotes>(&variables, FetchPolicy::NetworkOnly)
        .await
        .expect("first query");
    std::env::set_var(var, "second");
    client
        .execute_with_policy::<GetNotes>(&variables, FetchPolicy::NetworkOnly)
        .await
        .expect("second query");
    std::env::set_var(var, "");
    client
        .execute_with_policy::<GetNotes>(&variables, FetchPolicy::NetworkOnly)
        .await
        .expect("third query");

    let headers = backend
        .requests()
        .into_iter()
        .map(|request| request.authorization)
        .collect::<Vec<_>>();
    assert_eq!(
        headers,
        vec![
            Some("Bearer first".to_string()),
            Some("Bearer second".to_string()),
            Some(String::new()),
        ]
    );
}
