//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/list/update/delete note APIs over the shared client.
//! - Translate backend `null` answers into semantic not-found errors.
//!
//! # Invariants
//! - `update_note` uses full replacement semantics for author and body.
//! - `list_notes` is cache-first; `refresh_notes` always reaches the backend.
//! - Every successful mutation invalidates cached note lists.

use crate::client::cache::FetchPolicy;
use crate::client::transport::Transport;
use crate::client::{Client, RequestError};
use crate::model::note::{Note, NoteId};
use crate::query::{
    CreateNote, CreateNoteVariables, DeleteNote, DeleteNoteVariables, GetNotes,
    GetNotesVariables, UpdateNote, UpdateNoteVariables,
};
use log::info;
use std::sync::Arc;

/// Service error for note use-cases.
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    #[error(transparent)]
    Request(#[from] RequestError),
    /// Backend reply contradicts the request that produced it.
    #[error("inconsistent note state: {0}")]
    InconsistentState(&'static str),
}

/// Note service facade over a shared client handle.
pub struct NoteService<T: Transport> {
    client: Arc<Client<T>>,
}

impl<T: Transport> Clone for NoteService<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: Transport> NoteService<T> {
    pub fn new(client: Arc<Client<T>>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<Client<T>> {
        &self.client
    }

    /// Creates one note and returns the backend record.
    pub async fn create_note(
        &self,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let variables = CreateNoteVariables {
            author: author.into(),
            body: body.into(),
        };
        let note = self
            .client
            .execute::<CreateNote>(&variables)
            .await?
            .create_note;
        if note.id.is_empty() {
            return Err(NoteServiceError::InconsistentState(
                "created note has an empty id",
            ));
        }
        info!("event=note_create module=service status=ok note_id={}", note.id);
        Ok(note)
    }

    /// Lists all notes, served from cache when available.
    pub async fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        self.fetch_notes(FetchPolicy::CacheFirst).await
    }

    /// Lists all notes, bypassing and refreshing the cache.
    pub async fn refresh_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        self.fetch_notes(FetchPolicy::NetworkOnly).await
    }

    /// Replaces author and body of one note.
    pub async fn update_note(
        &self,
        id: &NoteId,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let variables = UpdateNoteVariables {
            id: id.clone(),
            author: author.into(),
            body: body.into(),
        };
        let note = self
            .client
            .execute::<UpdateNote>(&variables)
            .await?
            .update_note
            .ok_or_else(|| NoteServiceError::NoteNotFound(id.clone()))?;
        if &note.id != id {
            return Err(NoteServiceError::InconsistentState(
                "updated note id differs from request",
            ));
        }
        info!("event=note_update module=service status=ok note_id={}", note.id);
        Ok(note)
    }

    /// Deletes one note and returns its id.
    pub async fn delete_note(&self, id: &NoteId) -> Result<NoteId, NoteServiceError> {
        let variables = DeleteNoteVariables { id: id.clone() };
        let deleted = self
            .client
            .execute::<DeleteNote>(&variables)
            .await?
            .delete_note
            .ok_or_else(|| NoteServiceError::NoteNotFound(id.clone()))?;
        info!("event=note_delete module=service status=ok note_id={}", deleted.id);
        Ok(deleted.id)
    }

    async fn fetch_notes(&self, policy: FetchPolicy) -> Result<Vec<Note>, NoteServiceError> {
        let data = self
            .client
            .execute_with_policy::<GetNotes>(&GetNotesVariables::default(), policy)
            .await?;
        Ok(data.all_notes.data)
    }
}
