//! Static GraphQL operation definitions and their startup validation.
//!
//! # Responsibility
//! - Describe one named operation: kind, parameters, selection, document text.
//! - Verify that the embedded document parses and matches the declaration.
//!
//! # Invariants
//! - Definitions are `'static` and never mutated after process start.
//! - A definition that fails `validate()` must never reach the transport.

use graphql_parser::query::{
    parse_query, Definition, Field, OperationDefinition, ParseError, Selection, SelectionSet,
    Type, VariableDefinition,
};
use std::fmt::{Display, Formatter};

/// GraphQL operation type supported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared operation variable, e.g. `$author: String!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    /// Variable name without the `$` sigil.
    pub name: &'static str,
    /// GraphQL type in SDL notation (`String!`, `ID!`, `[Int]`).
    pub graphql_type: &'static str,
}

impl Parameter {
    pub const fn required(name: &'static str, graphql_type: &'static str) -> Self {
        Self { name, graphql_type }
    }
}

/// Startup-fatal registry error.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("operation `{operation}` is not valid GraphQL: {source}")]
    Parse {
        operation: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("operation `{operation}` does not match its declared contract: {detail}")]
    ContractMismatch {
        operation: &'static str,
        detail: String,
    },
    #[error("operation `{0}` is registered more than once")]
    DuplicateOperation(&'static str),
}

/// Named, parameterized GraphQL operation with a fixed response selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefinition {
    /// Operation name, sent as `operationName`.
    pub name: &'static str,
    pub kind: OperationKind,
    /// Declared variables in document order.
    pub parameters: &'static [Parameter],
    /// Top-level field selected by the operation.
    pub root_field: &'static str,
    /// Nested fields between the root field and the record selection.
    pub selection_path: &'static [&'static str],
    /// Leaf fields requested on the record, in document order.
    pub fields: &'static [&'static str],
    /// Full operation text.
    pub document: &'static str,
}

impl QueryDefinition {
    /// Returns declared variable names in order.
    pub fn parameter_names(&self) -> Vec<&'static str> {
        self.parameters.iter().map(|param| param.name).collect()
    }

    /// Returns `true` when the record selection requests `field`.
    pub fn selects(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }

    /// Parses the document and checks it against the declared contract.
    ///
    /// # Errors
    /// - `RegistryError::Parse` when the text is not valid GraphQL.
    /// - `RegistryError::ContractMismatch` when name, kind, variables or
    ///   selection differ from the declaration.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let document =
            parse_query::<&str>(self.document).map_err(|source| RegistryError::Parse {
                operation: self.name,
                source,
            })?;

        if document.definitions.len() != 1 {
            return Err(self.mismatch(format!(
                "expected exactly one definition, found {}",
                document.definitions.len()
            )));
        }
        let operation = match &document.definitions[0] {
            Definition::Operation(operation) => operation,
            Definition::Fragment(_) => {
                return Err(self.mismatch("fragment definitions are not supported".to_string()))
            }
        };

        let no_variables: Vec<VariableDefinition<'_, &str>> = Vec::new();
        let (kind, name, variables, selection_set) = match operation {
            OperationDefinition::Query(query) => (
                OperationKind::Query,
                query.name,
                query.variable_definitions.as_slice(),
                &query.selection_set,
            ),
            OperationDefinition::Mutation(mutation) => (
                OperationKind::Mutation,
                mutation.name,
                mutation.variable_definitions.as_slice(),
                &mutation.selection_set,
            ),
            OperationDefinition::SelectionSet(set) => {
                (OperationKind::Query, None, no_variables.as_slice(), set)
            }
            OperationDefinition::Subscription(_) => {
                return Err(self.mismatch("subscriptions are not supported".to_string()))
            }
        };

        if name != Some(self.name) {
            return Err(self.mismatch(format!(
                "document names the operation `{}`",
                name.unwrap_or("<anonymous>")
            )));
        }
        if kind != self.kind {
            return Err(self.mismatch(format!(
                "document declares a {kind}, expected a {}",
                self.kind
            )));
        }
        self.check_variables(variables)?;

        let mut field = self.single_field(selection_set, self.root_field)?;
        for step in self.selection_path {
            field = self.single_field(&field.selection_set, step)?;
        }
        self.check_leaf_fields(&field.selection_set)
    }

    fn check_variables<'a>(
        &self,
        variables: &[VariableDefinition<'a, &'a str>],
    ) -> Result<(), RegistryError> {
        let found = variables
            .iter()
            .map(|var| format!("${}: {}", var.name, render_type(&var.var_type)))
            .collect::<Vec<_>>();
        let expected = self
            .parameters
            .iter()
            .map(|param| format!("${}: {}", param.name, param.graphql_type))
            .collect::<Vec<_>>();
        if found != expected {
            return Err(self.mismatch(format!(
                "variables ({}) differ from declared ({})",
                found.join(", "),
                expected.join(", ")
            )));
        }
        if let Some(var) = variables.iter().find(|var| var.default_value.is_some()) {
            return Err(self.mismatch(format!(
                "variable `${}` must not carry a default value",
                var.name
            )));
        }
        Ok(())
    }

    fn single_field<'d, 'a>(
        &self,
        set: &'d SelectionSet<'a, &'a str>,
        expected: &str,
    ) -> Result<&'d Field<'a, &'a str>, RegistryError> {
        match set.items.as_slice() {
            [Selection::Field(field)] if field.name == expected && field.alias.is_none() => {
                Ok(field)
            }
            _ => Err(self.mismatch(format!(
                "expected a single unaliased `{expected}` selection"
            ))),
        }
    }

    fn check_leaf_fields<'a>(&self, set: &SelectionSet<'a, &'a str>) -> Result<(), RegistryError> {
        let mut found = Vec::with_capacity(set.items.len());
        for item in &set.items {
            match item {
                Selection::Field(field) if field.selection_set.items.is_empty() => {
                    found.push(field.name)
                }
                Selection::Field(field) => {
                    return Err(self.mismatch(format!(
                        "record field `{}` must be a leaf selection",
                        field.name
                    )))
                }
                _ => return Err(self.mismatch("fragments are not supported".to_string())),
            }
        }
        if found != self.fields {
            return Err(self.mismatch(format!(
                "selected fields [{}] differ from declared [{}]",
                found.join(", "),
                self.fields.join(", ")
            )));
        }
        Ok(())
    }

    fn mismatch(&self, detail: String) -> RegistryError {
        RegistryError::ContractMismatch {
            operation: self.name,
            detail,
        }
    }
}

fn render_type<'a>(ty: &Type<'a, &'a str>) -> String {
    match ty {
        Type::NamedType(name) => (*name).to_string(),
        Type::ListType(inner) => format!("[{}]", render_type(inner)),
        Type::NonNullType(inner) => format!("{}!", render_type(inner)),
    }
}
