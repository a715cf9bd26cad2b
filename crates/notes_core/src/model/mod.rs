//! Note data shapes shared by the registry, client and service layers.
//!
//! # Responsibility
//! - Define the record shape implied by the registry field selections.
//!
//! # Invariants
//! - Records are owned by the backend; the client never mutates them locally.

pub mod note;
