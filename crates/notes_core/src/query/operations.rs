//! Typed bindings between registry definitions and their variable/data shapes.

use super::definition::QueryDefinition;
use super::registry::{CREATE_NOTE, DELETE_NOTE, GET_NOTES, UPDATE_NOTE};
use crate::model::note::{Note, NoteId, NoteRef};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One executable registry operation.
///
/// `Variables` is serialized as the request `variables` object and `Data` is
/// decoded from the response `data` object.
pub trait Operation {
    type Variables: Serialize + Send + Sync;
    type Data: DeserializeOwned;

    fn definition() -> &'static QueryDefinition;
}

pub struct CreateNote;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNoteVariables {
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteData {
    pub create_note: Note,
}

impl Operation for CreateNote {
    type Variables = CreateNoteVariables;
    type Data = CreateNoteData;

    fn definition() -> &'static QueryDefinition {
        &CREATE_NOTE
    }
}

pub struct GetNotes;

/// `GetNotes` takes no variables; serialized as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetNotesVariables {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNotesData {
    pub all_notes: NotePage,
}

/// Backend page wrapper around the note list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotePage {
    pub data: Vec<Note>,
}

impl Operation for GetNotes {
    type Variables = GetNotesVariables;
    type Data = GetNotesData;

    fn definition() -> &'static QueryDefinition {
        &GET_NOTES
    }
}

pub struct UpdateNote;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateNoteVariables {
    pub id: NoteId,
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteData {
    /// `null` when the backend has no note with the given id.
    pub update_note: Option<Note>,
}

impl Operation for UpdateNote {
    type Variables = UpdateNoteVariables;
    type Data = UpdateNoteData;

    fn definition() -> &'static QueryDefinition {
        &UPDATE_NOTE
    }
}

pub struct DeleteNote;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteNoteVariables {
    pub id: NoteId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteData {
    pub delete_note: Option<NoteRef>,
}

impl Operation for DeleteNote {
    type Variables = DeleteNoteVariables;
    type Data = DeleteNoteData;

    fn definition() -> &'static QueryDefinition {
        &DELETE_NOTE
    }
}
