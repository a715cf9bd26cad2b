//! In-memory GraphQL backend used as a `Transport` test double.
#![allow(dead_code)]

use notes_core::{
    AuthLink, Client, GraphQlRequest, InMemoryCache, QueryRegistry, TokenSource, Transport,
    TransportError,
};
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub type TestClient = Arc<Client<AuthLink<FakeBackend>>>;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    /// `None` when the header was missing entirely.
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
struct StoredNote {
    id: String,
    author: String,
    body: String,
}

impl StoredNote {
    fn to_json(&self) -> Value {
        json!({ "_id": self.id, "author": self.author, "body": self.body })
    }
}

#[derive(Debug)]
enum Failure {
    GraphQl(String),
    Status(u16),
    Reply(Value),
}

#[derive(Debug, Default)]
struct BackendState {
    notes: Vec<StoredNote>,
    requests: Vec<RecordedRequest>,
    next_failure: Option<Failure>,
}

/// Answers the four note operations the way the hosted backend does.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self, operation: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.operation == operation)
            .count()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }

    pub fn fail_next_with_graphql_error(&self, message: &str) {
        self.state.lock().unwrap().next_failure = Some(Failure::GraphQl(message.to_string()));
    }

    pub fn fail_next_with_status(&self, status: u16) {
        self.state.lock().unwrap().next_failure = Some(Failure::Status(status));
    }

    /// Answers the next request with `payload` verbatim.
    pub fn reply_next_with(&self, payload: Value) {
        self.state.lock().unwrap().next_failure = Some(Failure::Reply(payload));
    }

    fn handle(&self, request: GraphQlRequest) -> Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        let operation = request.body["operationName"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        state.requests.push(RecordedRequest {
            operation: operation.clone(),
            authorization: request
                .headers
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap().to_string()),
            body: request.body.clone(),
        });

        match state.next_failure.take() {
            Some(Failure::GraphQl(message)) => {
                return Ok(json!({ "data": null, "errors": [{ "message": message }] }))
            }
            Some(Failure::Status(status)) => {
                return Err(TransportError::Status {
                    status,
                    body: "unavailable".to_string(),
                })
            }
            Some(Failure::Reply(payload)) => return Ok(payload),
            None => {}
        }

        let vars = &request.body["variables"];
        let text = |key: &str| vars[key].as_str().unwrap_or_default().to_string();
        let data = match operation.as_str() {
            "CreateNote" => {
                let note = StoredNote {
                    id: Uuid::new_v4().simple().to_string(),
                    author: text("author"),
                    body: text("body"),
                };
                let reply = note.to_json();
                state.notes.push(note);
                json!({ "createNote": reply })
            }
            "GetNotes" => {
                let notes = state.notes.iter().map(StoredNote::to_json).collect::<Vec<_>>();
                json!({ "allNotes": { "data": notes } })
            }
            "UpdateNote" => {
                let id = text("id");
                let updated = state.notes.iter_mut().find(|note| note.id == id).map(|note| {
                    note.author = text("author");
                    note.body = text("body");
                    note.to_json()
                });
                json!({ "updateNote": updated })
            }
            "DeleteNote" => {
                let id = text("id");
                let position = state.notes.iter().position(|note| note.id == id);
                let deleted = position.map(|idx| json!({ "_id": state.notes.remove(idx).id }));
                json!({ "deleteNote": deleted })
            }
            other => {
                return Ok(json!({
                    "errors": [{ "message": format!("unknown operation {other}") }]
                }))
            }
        };
        Ok(json!({ "data": data }))
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: GraphQlRequest) -> Result<Value, TransportError> {
        self.handle(request)
    }
}

/// Builds a client the same way bootstrap does, without the process guard.
pub fn client_for(backend: &FakeBackend, token_env_var: &str) -> TestClient {
    let registry = QueryRegistry::load().expect("built-in registry should validate");
    Arc::new(Client::detached(
        AuthLink::new(TokenSource::from_env_var(token_env_var), backend.clone()),
        InMemoryCache::new(),
        registry,
    ))
}
