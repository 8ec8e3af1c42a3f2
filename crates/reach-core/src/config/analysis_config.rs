//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Precision mode for interface dispatch resolution.
///
/// An interface method with no in-scope implementer may still run through
/// an override the analysis cannot see, so the interface-declared signature
/// itself stands in as a placeholder target. Whether visible in-scope
/// overrides are unioned with that placeholder or replace it is a precision
/// knob rather than a hardwired rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceDispatch {
    /// Always keep the interface-declared signature alongside any visible
    /// overrides (sound default).
    #[default]
    Union,
    /// Drop the placeholder when at least one in-scope override resolves.
    OverrideOnly,
}

impl std::str::FromStr for InterfaceDispatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(Self::Union),
            "override-only" => Ok(Self::OverrideOnly),
            other => Err(format!("unknown interface dispatch mode: {other}")),
        }
    }
}

/// Configuration for the analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Interface dispatch precision. Default: union.
    pub interface_dispatch: Option<InterfaceDispatch>,
    /// Compute independent entry points in parallel. Default: true.
    pub parallel_entries: Option<bool>,
    /// Upper bound on methods processed per entry, as a liveness guard.
    /// Default: unbounded (the finite signature universe bounds it).
    pub max_worklist: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective interface dispatch mode, defaulting to union.
    pub fn effective_interface_dispatch(&self) -> InterfaceDispatch {
        self.interface_dispatch.unwrap_or_default()
    }

    /// Returns whether entries run in parallel, defaulting to true.
    pub fn effective_parallel_entries(&self) -> bool {
        self.parallel_entries.unwrap_or(true)
    }

    /// Returns the effective worklist bound, defaulting to unbounded.
    pub fn effective_max_worklist(&self) -> usize {
        self.max_worklist.unwrap_or(usize::MAX)
    }
}
