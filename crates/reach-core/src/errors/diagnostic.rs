//! Non-fatal diagnostics and best-effort result accumulation.
//!
//! Unresolved call targets and hierarchy gaps are recovered locally: the
//! affected edge becomes a dead end, the run continues, and the diagnostic
//! is reported alongside (not instead of) the result.

use serde::{Deserialize, Serialize};

use super::error_code::{self, ReachErrorCode};

/// A non-fatal condition observed during index construction or traversal.
///
/// Diagnostics carry rendered signatures rather than interned ids so they
/// stay meaningful after the model they came from is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A call site names a target whose class is absent from the model.
    UnresolvedTarget {
        /// Rendered signature of the method containing the call site.
        caller: String,
        /// Rendered signature named at the call site.
        target: String,
    },
    /// A class names a supertype or interface absent from the model; the
    /// ancestor chain was truncated at that point.
    HierarchyGap {
        /// Rendered name of the class whose chain was truncated.
        class: String,
        /// Rendered name of the missing ancestor type.
        missing: String,
    },
}

impl Diagnostic {
    /// Stable machine-readable code for this diagnostic.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnresolvedTarget { .. } => error_code::UNRESOLVED_TARGET,
            Self::HierarchyGap { .. } => error_code::HIERARCHY_GAP,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedTarget { caller, target } => {
                write!(f, "unresolved call target {target} in {caller}")
            }
            Self::HierarchyGap { class, missing } => {
                write!(f, "ancestor chain of {class} truncated at unknown type {missing}")
            }
        }
    }
}

impl ReachErrorCode for Diagnostic {
    fn error_code(&self) -> &'static str {
        self.code()
    }
}

/// Result of an analysis step that accumulates non-fatal diagnostics.
/// Allows best-effort results to be returned even when some edges failed
/// to resolve.
#[derive(Debug, Default)]
pub struct AnalysisReport<T> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal diagnostics collected during the step, in discovery order,
    /// deduplicated.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> AnalysisReport<T> {
    /// Create a report with no diagnostics.
    pub fn new(data: T) -> Self {
        Self {
            data,
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic, skipping exact duplicates.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Add many diagnostics, skipping exact duplicates.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for d in diagnostics {
            self.push(d);
        }
    }

    /// Returns true if there are no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics.
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Map the data, carrying diagnostics over.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AnalysisReport<U> {
        AnalysisReport {
            data: f(self.data),
            diagnostics: self.diagnostics,
        }
    }
}
