//! Metadata model errors.
//!
//! All variants are fatal: a structurally invalid model aborts the run
//! before any traversal starts, since downstream results would be
//! meaningless.

use super::error_code::{self, ReachErrorCode};

/// Errors raised while building or validating the metadata model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Duplicate class declaration: {name}")]
    DuplicateClass { name: String },

    #[error("Duplicate method declaration: {signature}")]
    DuplicateMethod { signature: String },

    #[error("Root type {root} declared with superclass {superclass}")]
    RootHasSuperclass { root: String, superclass: String },

    #[error("Inheritance cycle through {class}")]
    InheritanceCycle { class: String },
}

impl ReachErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_INPUT
    }
}
