//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate client calls into use-case level APIs.
//! - Keep UI layers decoupled from GraphQL operation details.

pub mod note_service;
