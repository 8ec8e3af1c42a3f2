//! Call graph types — nodes, edges, stats.

use std::time::Duration;

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use reach_core::types::collections::FxHashMap;
use reach_core::types::{DispatchKind, MethodRef};

/// The materialized call graph: every resolved edge of the program, with
/// method signatures as nodes and dispatch kinds as edge weights.
pub struct CallGraph {
    /// The underlying petgraph StableGraph.
    pub graph: StableGraph<MethodRef, DispatchKind, Directed>,
    /// Map from method signature to NodeIndex for O(1) lookup.
    pub node_index: FxHashMap<MethodRef, NodeIndex>,
    /// Statistics recorded during the build.
    pub stats: CallGraphStats,
}

impl CallGraph {
    pub(crate) fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: FxHashMap::default(),
            stats: CallGraphStats::default(),
        }
    }

    /// Number of method nodes in the graph.
    pub fn method_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of call edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up a node by its method signature.
    pub fn get_node(&self, sig: &MethodRef) -> Option<NodeIndex> {
        self.node_index.get(sig).copied()
    }

    /// Add a method node, returning its NodeIndex. Idempotent.
    pub(crate) fn add_method(&mut self, sig: MethodRef) -> NodeIndex {
        if let Some(&existing) = self.node_index.get(&sig) {
            return existing;
        }
        let idx = self.graph.add_node(sig);
        self.node_index.insert(sig, idx);
        idx
    }

    /// Add a call edge between two methods, deduplicating exact repeats.
    /// Returns true when a new edge was inserted.
    pub(crate) fn add_edge(
        &mut self,
        caller: NodeIndex,
        callee: NodeIndex,
        kind: DispatchKind,
    ) -> bool {
        let duplicate = self
            .graph
            .edges_connecting(caller, callee)
            .any(|e| *e.weight() == kind);
        if !duplicate {
            self.graph.add_edge(caller, callee, kind);
        }
        !duplicate
    }
}

/// Statistics from a call graph build.
#[derive(Debug, Clone, Default)]
pub struct CallGraphStats {
    pub total_methods: usize,
    pub total_edges: usize,
    /// Call sites seen, and how many resolved to at least one target.
    pub total_sites: usize,
    pub resolved_sites: usize,
    /// Resolution rate (0.0-1.0).
    pub resolution_rate: f64,
    /// Edge counts per dispatch kind name.
    pub edges_by_kind: FxHashMap<&'static str, usize>,
    /// Strongly connected components with more than one member, plus
    /// self-recursive methods.
    pub cycles_detected: usize,
    pub build_duration: Duration,
}
