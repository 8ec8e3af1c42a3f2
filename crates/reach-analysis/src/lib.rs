//! Analysis engine: hierarchy index, dispatch resolution, call-graph
//! materialization, and the reachability fixed point.
//!
//! Everything here is read-only after construction: the model and the
//! hierarchy index are built once, then any number of entry-point queries
//! run against them concurrently without coordination.

pub mod call_graph;
pub mod dispatch;
pub mod hierarchy;
pub mod reachability;

pub use call_graph::{CallGraph, CallGraphStats};
pub use hierarchy::HierarchyIndex;
pub use reachability::{Analyzer, ReachabilityResult};
