//! Authoritative note operations and the validated registry that holds them.
//!
//! # Responsibility
//! - Own the four CRUD operation documents sent to the notes backend.
//! - Validate every document once at startup before any request is issued.
//!
//! # Invariants
//! - Exactly one definition per CRUD verb.
//! - Registry construction fails instead of admitting an invalid document.

use super::definition::{OperationKind, Parameter, QueryDefinition, RegistryError};
use log::{error, info};
use std::collections::BTreeMap;

pub static CREATE_NOTE: QueryDefinition = QueryDefinition {
    name: "CreateNote",
    kind: OperationKind::Mutation,
    parameters: &[
        Parameter::required("author", "String!"),
        Parameter::required("body", "String!"),
    ],
    root_field: "createNote",
    selection_path: &[],
    fields: &["_id", "author", "body"],
    document: r#"
    mutation CreateNote($author: String!, $body: String!) {
        createNote(data: { author: $author, body: $body }) {
            _id
            author
            body
        }
    }
"#,
};

pub static GET_NOTES: QueryDefinition = QueryDefinition {
    name: "GetNotes",
    kind: OperationKind::Query,
    parameters: &[],
    root_field: "allNotes",
    selection_path: &["data"],
    fields: &["_id", "author", "body"],
    document: r#"
    query GetNotes {
        allNotes {
            data {
                _id
                author
                body
            }
        }
    }
"#,
};

pub static UPDATE_NOTE: QueryDefinition = QueryDefinition {
    name: "UpdateNote",
    kind: OperationKind::Mutation,
    parameters: &[
        Parameter::required("id", "ID!"),
        Parameter::required("author", "String!"),
        Parameter::required("body", "String!"),
    ],
    root_field: "updateNote",
    selection_path: &[],
    fields: &["_id", "author", "body"],
    document: r#"
    mutation UpdateNote($id: ID!, $author: String!, $body: String!) {
        updateNote(id: $id, data: { author: $author, body: $body }) {
            _id
            author
            body
        }
    }
"#,
};

pub static DELETE_NOTE: QueryDefinition = QueryDefinition {
    name: "DeleteNote",
    kind: OperationKind::Mutation,
    parameters: &[Parameter::required("id", "ID!")],
    root_field: "deleteNote",
    selection_path: &[],
    fields: &["_id"],
    document: r#"
    mutation DeleteNote($id: ID!) {
        deleteNote(id: $id) {
            _id
        }
    }
"#,
};

/// Built-in note operations in CRUD order.
pub static NOTE_OPERATIONS: [&QueryDefinition; 4] =
    [&CREATE_NOTE, &GET_NOTES, &UPDATE_NOTE, &DELETE_NOTE];

/// Validated set of operations the client is allowed to execute.
#[derive(Debug, Clone)]
pub struct QueryRegistry {
    definitions: BTreeMap<&'static str, &'static QueryDefinition>,
}

impl QueryRegistry {
    /// Validates and loads the built-in note operations.
    ///
    /// # Errors
    /// Returns the first validation failure; callers treat it as fatal.
    pub fn load() -> Result<Self, RegistryError> {
        Self::from_definitions(&NOTE_OPERATIONS)
    }

    /// Validates and loads an explicit set of definitions.
    pub fn from_definitions(
        definitions: &[&'static QueryDefinition],
    ) -> Result<Self, RegistryError> {
        let mut loaded = BTreeMap::new();
        for definition in definitions {
            if let Err(err) = definition.validate() {
                error!(
                    "event=registry_load module=query status=error operation={} error={}",
                    definition.name, err
                );
                return Err(err);
            }
            if loaded.insert(definition.name, *definition).is_some() {
                return Err(RegistryError::DuplicateOperation(definition.name));
            }
        }

        info!(
            "event=registry_load module=query status=ok operations={}",
            loaded.len()
        );
        Ok(Self {
            definitions: loaded,
        })
    }

    /// Returns one definition by operation name.
    pub fn get(&self, name: &str) -> Option<&'static QueryDefinition> {
        self.definitions.get(name).copied()
    }

    pub fn contains(&self, definition: &QueryDefinition) -> bool {
        self.get(definition.name)
            .is_some_and(|registered| registered == definition)
    }

    /// Returns sorted operation names.
    pub fn names(&self) -> Vec<&'static str> {
        self.definitions.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static QueryDefinition> + '_ {
        self.definitions.values().copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
