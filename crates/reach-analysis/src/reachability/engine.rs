//! The reachability engine: entry-point API and fixed-point traversal.
//!
//! Worklist + visited-set instead of a recursive graph walk, so deep or
//! cyclic call graphs cannot overflow the stack. Each entry point gets an
//! independently computed closure — no cross-entry sharing of partial
//! results, keeping joint queries equal to the union of individual ones.

use std::collections::VecDeque;
use std::time::Instant;

use rayon::prelude::*;

use reach_core::config::AnalysisConfig;
use reach_core::errors::{AnalysisError, AnalysisReport, Diagnostic};
use reach_core::model::ProgramModel;
use reach_core::traits::CallSiteSource;
use reach_core::types::collections::{FxHashMap, FxHashSet};
use reach_core::types::MethodRef;

use crate::dispatch;
use crate::hierarchy::HierarchyIndex;

use super::types::ReachabilityResult;

/// One analysis run: a model, its hierarchy index, and the configuration.
/// Immutable once constructed; queries may run concurrently against it.
pub struct Analyzer<'m> {
    model: &'m ProgramModel,
    hierarchy: HierarchyIndex,
    config: AnalysisConfig,
    /// Hierarchy gaps observed at index construction, replayed into every
    /// query report.
    hierarchy_diagnostics: Vec<Diagnostic>,
}

impl<'m> Analyzer<'m> {
    /// Build the hierarchy index and wrap it with the model and config.
    pub fn new(model: &'m ProgramModel, config: AnalysisConfig) -> Self {
        let report = HierarchyIndex::build(model);
        Self {
            model,
            hierarchy: report.data,
            hierarchy_diagnostics: report.diagnostics,
            config,
        }
    }

    pub fn model(&self) -> &ProgramModel {
        self.model
    }

    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute the transitive closure for each entry method.
    ///
    /// Entries are independent read-only computations and run in parallel
    /// unless configured otherwise; results are returned in entry order
    /// with diagnostics deduplicated across entries.
    pub fn reachable_from(
        &self,
        entries: &[MethodRef],
    ) -> Result<AnalysisReport<Vec<ReachabilityResult>>, AnalysisError> {
        for entry in entries {
            if self.model.method(entry).is_none() {
                return Err(AnalysisError::UnknownEntry {
                    signature: self.model.render(entry),
                });
            }
        }

        let started = Instant::now();
        let closures: Vec<(ReachabilityResult, Vec<Diagnostic>)> =
            if self.config.effective_parallel_entries() && entries.len() > 1 {
                entries
                    .par_iter()
                    .map(|entry| self.closure(*entry))
                    .collect::<Result<_, _>>()?
            } else {
                entries
                    .iter()
                    .map(|entry| self.closure(*entry))
                    .collect::<Result<_, _>>()?
            };

        let mut report = AnalysisReport::new(Vec::with_capacity(closures.len()));
        report.extend(self.hierarchy_diagnostics.iter().cloned());
        let mut visited_total = 0usize;
        for (result, diagnostics) in closures {
            visited_total += result.expanded;
            report.extend(diagnostics);
            report.data.push(result);
        }

        tracing::info!(
            closure_time_ms = started.elapsed().as_millis() as u64,
            entry_count = entries.len(),
            visited_count = visited_total,
            diagnostic_count = report.diagnostic_count(),
            "transitive closure computed"
        );
        Ok(report)
    }

    /// Whole-program query: every in-scope method with a body as an entry.
    pub fn analyze_all(
        &self,
    ) -> Result<AnalysisReport<Vec<ReachabilityResult>>, AnalysisError> {
        let entries = self.model.expandable_methods();
        self.reachable_from(&entries)
    }

    /// Fixed-point worklist traversal for one entry.
    ///
    /// Terminates because the method-signature space is finite and each
    /// signature is expanded at most once: cycles fall out of the
    /// visited-set check, and a method can legitimately appear in its own
    /// reachable set when re-reached through recursion.
    fn closure(
        &self,
        entry: MethodRef,
    ) -> Result<(ReachabilityResult, Vec<Diagnostic>), AnalysisError> {
        let mode = self.config.effective_interface_dispatch();
        let max_worklist = self.config.effective_max_worklist();

        let mut visited: FxHashSet<MethodRef> = FxHashSet::default();
        let mut reachable: FxHashSet<MethodRef> = FxHashSet::default();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut queue: VecDeque<MethodRef> = VecDeque::new();
        let mut expanded = 0usize;

        visited.insert(entry);
        queue.push_back(entry);

        while let Some(method) = queue.pop_front() {
            expanded += 1;
            if expanded > max_worklist {
                return Err(AnalysisError::WorklistExceeded { limit: max_worklist });
            }

            if let Some(sites) = self.model.call_sites(&method) {
                for site in sites {
                    let resolved =
                        dispatch::resolve_call(self.model, &self.hierarchy, &method, site, mode);
                    diagnostics.extend(resolved.diagnostics);
                    for target in resolved.targets {
                        self.visit(target, &mut reachable, &mut visited, &mut queue);
                    }
                }
            }

            // Mandatory super-construction: constructors chain to the
            // immediate ancestor unless their first call site already does.
            let is_constructor = self
                .model
                .method(&method)
                .is_some_and(|m| m.is_constructor);
            if is_constructor && !self.model.is_external(method.owner) {
                let resolved =
                    dispatch::implicit_super_constructor(self.model, &self.hierarchy, &method);
                diagnostics.extend(resolved.diagnostics);
                for target in resolved.targets {
                    self.visit(target, &mut reachable, &mut visited, &mut queue);
                }
            }
        }

        let mut reachable: Vec<MethodRef> = reachable.into_iter().collect();
        let mut rendered: FxHashMap<MethodRef, String> = FxHashMap::default();
        for m in &reachable {
            rendered.insert(*m, self.model.render(m));
        }
        reachable.sort_by(|a, b| rendered[a].cmp(&rendered[b]));

        Ok((
            ReachabilityResult {
                entry,
                reachable,
                expanded,
            },
            diagnostics,
        ))
    }

    /// Record a resolved target and enqueue it when it can be expanded.
    fn visit(
        &self,
        target: MethodRef,
        reachable: &mut FxHashSet<MethodRef>,
        visited: &mut FxHashSet<MethodRef>,
        queue: &mut VecDeque<MethodRef>,
    ) {
        reachable.insert(target);
        if visited.contains(&target) {
            return;
        }
        if self.expandable(&target) {
            visited.insert(target);
            queue.push_back(target);
        }
    }

    /// A method is expandable when its instructions are available, or when
    /// it is an in-scope constructor — opaque in-scope constructors still
    /// carry the implicit super-construction edge.
    fn expandable(&self, sig: &MethodRef) -> bool {
        if self.model.is_external(sig.owner) {
            return false;
        }
        match self.model.method(sig) {
            Some(meta) => !meta.is_opaque() || meta.is_constructor,
            None => false,
        }
    }
}
