//! Materialized call-graph view — every resolved edge of the program.
//!
//! The reachability engine resolves call sites on the fly and never needs
//! this graph; it exists for whole-program consumers: edge dumps, cycle
//! statistics, resolution-rate reporting.

pub mod types;

use std::time::Instant;

use petgraph::algo::tarjan_scc;

use reach_core::config::InterfaceDispatch;
use reach_core::errors::AnalysisReport;
use reach_core::model::ProgramModel;
use reach_core::traits::CallSiteSource;
use reach_core::types::DispatchKind;

use crate::dispatch;
use crate::hierarchy::HierarchyIndex;

pub use types::{CallGraph, CallGraphStats};

impl CallGraph {
    /// Build the call graph over every in-scope method body, resolving each
    /// call site through the hierarchy index. Implicit super-construction
    /// edges are materialized as `special` edges.
    pub fn build(
        model: &ProgramModel,
        hierarchy: &HierarchyIndex,
        mode: InterfaceDispatch,
    ) -> AnalysisReport<CallGraph> {
        let started = Instant::now();
        let mut report = AnalysisReport::new(CallGraph::new());

        for caller in model.expandable_methods() {
            let caller_idx = report.data.add_method(caller);

            let sites = model.call_sites(&caller).unwrap_or(&[]);
            for site in sites {
                let resolved = dispatch::resolve_call(model, hierarchy, &caller, site, mode);
                report.data.stats.total_sites += 1;
                if !resolved.targets.is_empty() {
                    report.data.stats.resolved_sites += 1;
                }
                report.extend(resolved.diagnostics);
                for target in resolved.targets {
                    let callee_idx = report.data.add_method(target);
                    if report.data.add_edge(caller_idx, callee_idx, site.kind) {
                        *report.data.stats.edges_by_kind.entry(site.kind.name()).or_default() += 1;
                    }
                }
            }

            let is_constructor = model
                .method(&caller)
                .is_some_and(|m| m.is_constructor);
            if is_constructor {
                let resolved = dispatch::implicit_super_constructor(model, hierarchy, &caller);
                report.extend(resolved.diagnostics);
                for target in resolved.targets {
                    let callee_idx = report.data.add_method(target);
                    if report.data.add_edge(caller_idx, callee_idx, DispatchKind::Special) {
                        *report
                            .data
                            .stats
                            .edges_by_kind
                            .entry(DispatchKind::Special.name())
                            .or_default() += 1;
                    }
                }
            }
        }

        let graph = &report.data.graph;
        let cycles = tarjan_scc(graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || scc.iter().any(|&n| graph.find_edge(n, n).is_some()))
            .count();

        let stats = &mut report.data.stats;
        stats.cycles_detected = cycles;
        stats.total_methods = report.data.graph.node_count();
        stats.total_edges = report.data.graph.edge_count();
        stats.resolution_rate = if stats.total_sites == 0 {
            1.0
        } else {
            stats.resolved_sites as f64 / stats.total_sites as f64
        };
        stats.build_duration = started.elapsed();

        tracing::debug!(
            call_graph_build_time_ms = report.data.stats.build_duration.as_millis() as u64,
            methods = report.data.stats.total_methods,
            edges = report.data.stats.total_edges,
            resolution_rate = report.data.stats.resolution_rate,
            cycles = report.data.stats.cycles_detected,
            "call graph built"
        );
        report
    }
}
