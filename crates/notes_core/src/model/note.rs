//! Note record model.
//!
//! # Responsibility
//! - Describe the backend's note record as selected by the registry queries.
//! - Keep backend identifiers opaque to the client.
//!
//! # Invariants
//! - `NoteId` is assigned by the backend and never parsed or generated here.
//! - The wire name of `Note::id` is `_id`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque backend-assigned note identifier.
///
/// Serialized transparently so it can be used directly as an `ID!` variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the backend returned an empty identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Note record as returned by `createNote`, `updateNote` and `allNotes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Backend identity, `_id` on the wire.
    #[serde(rename = "_id")]
    pub id: NoteId,
    pub author: String,
    pub body: String,
}

/// Identity-only projection returned by `deleteNote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    #[serde(rename = "_id")]
    pub id: NoteId,
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteId};
    use serde_json::json;

    #[test]
    fn note_reads_underscore_id_field() {
        let note: Note = serde_json::from_value(json!({
            "_id": "361234",
            "author": "ada",
            "body": "hello",
        }))
        .expect("note json should decode");
        assert_eq!(note.id, NoteId::new("361234"));
        assert_eq!(note.author, "ada");
    }

    #[test]
    fn note_id_serializes_as_plain_string() {
        let value = serde_json::to_value(NoteId::from("42")).expect("id should encode");
        assert_eq!(value, json!("42"));
    }
}
