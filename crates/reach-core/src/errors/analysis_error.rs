//! Analysis errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, ReachErrorCode};
use super::{ConfigError, ModelError};

/// Fatal errors raised by the analysis engine.
///
/// Recoverable conditions (unresolved targets, hierarchy gaps) are not
/// errors — they are [`Diagnostic`](super::Diagnostic)s collected alongside
/// best-effort results.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Entry method not present in the model: {signature}")]
    UnknownEntry { signature: String },

    #[error("Worklist exceeded configured bound of {limit} methods")]
    WorklistExceeded { limit: usize },
}

impl ReachErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Model(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::UnknownEntry { .. } => error_code::UNKNOWN_ENTRY,
            Self::WorklistExceeded { .. } => error_code::WORKLIST_EXCEEDED,
        }
    }
}
