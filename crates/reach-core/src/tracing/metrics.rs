//! Structured span field definitions for Reach metrics.
//!
//! These constants define the standard field names used in tracing spans
//! across all Reach subsystems. Using consistent field names enables
//! structured log queries and dashboard construction.

/// Hierarchy index: construction time in milliseconds.
pub const HIERARCHY_BUILD_TIME: &str = "hierarchy_build_time_ms";

/// Reachability: closure computation time in milliseconds.
pub const CLOSURE_TIME: &str = "closure_time_ms";

/// Reachability: number of entry points in the query.
pub const ENTRY_COUNT: &str = "entry_count";

/// Reachability: methods visited across all entries.
pub const VISITED_COUNT: &str = "visited_count";

/// Any subsystem: non-fatal diagnostics collected.
pub const DIAGNOSTIC_COUNT: &str = "diagnostic_count";

/// Call graph: graph construction time in milliseconds.
pub const CALL_GRAPH_BUILD_TIME: &str = "call_graph_build_time_ms";

/// Call graph: fraction of call sites resolved to at least one target.
pub const RESOLUTION_RATE: &str = "resolution_rate";
