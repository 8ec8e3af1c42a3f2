//! Reachability result types and deterministic rendering.

use serde::Serialize;

use reach_core::model::ProgramModel;
use reach_core::types::collections::BTreeMap;
use reach_core::types::MethodRef;

/// The transitive closure computed for one entry method.
#[derive(Debug, Clone, Serialize)]
pub struct ReachabilityResult {
    /// The entry the closure was computed from. Not a member of its own
    /// reachable set unless re-reached through recursion.
    pub entry: MethodRef,
    /// Every method signature transitively reachable from the entry,
    /// deduplicated and sorted by rendered signature.
    pub reachable: Vec<MethodRef>,
    /// Number of methods whose bodies were expanded during the traversal.
    pub expanded: usize,
}

impl ReachabilityResult {
    /// True when the entry reaches nothing.
    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }
}

/// Render per-entry closures into the stable textual summary consumed by
/// the external serializer: entry signature to sorted reachable signatures.
///
/// Entries with empty reachable sets are omitted, and the map ordering is
/// byte-for-byte reproducible across runs for identical inputs.
pub fn render_summary(
    model: &ProgramModel,
    results: &[ReachabilityResult],
) -> BTreeMap<String, Vec<String>> {
    results
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| {
            (
                model.render(&r.entry),
                r.reachable.iter().map(|m| model.render(m)).collect(),
            )
        })
        .collect()
}
