//! Query registry: the fixed set of GraphQL operations the client may send.
//!
//! # Responsibility
//! - Hold parsed, reusable operation definitions so callers never build
//!   query strings ad hoc.
//! - Bind each definition to typed variables and response data.
//!
//! # Invariants
//! - Definitions are validated before the client accepts them.
//! - Variables are supplied at call time, never at definition time.

pub mod definition;
pub mod operations;
pub mod registry;

pub use definition::{OperationKind, Parameter, QueryDefinition, RegistryError};
pub use operations::{
    CreateNote, CreateNoteData, CreateNoteVariables, DeleteNote, DeleteNoteData,
    DeleteNoteVariables, GetNotes, GetNotesData, GetNotesVariables, NotePage, Operation,
    UpdateNote, UpdateNoteData, UpdateNoteVariables,
};
pub use registry::{
    QueryRegistry, CREATE_NOTE, DELETE_NOTE, GET_NOTES, NOTE_OPERATIONS, UPDATE_NOTE,
};
