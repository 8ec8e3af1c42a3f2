//! Shared constants for the Reach call-graph engine.

/// Reach version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The universal root type every class hierarchy terminates at.
pub const ROOT_CLASS: &str = "java.lang.Object";

/// Reserved method name for instance initializers (constructors).
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Reserved method name for static initializers.
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

/// Descriptor of a no-argument constructor.
pub const NO_ARG_VOID_DESCRIPTOR: &str = "()V";

// ---- Performance Targets ----

/// Target: build the hierarchy index for 10K classes in <200ms.
pub const PERF_HIERARCHY_10K_MS: u64 = 200;

/// Target: transitive closure over a 10K-method program in <500ms per entry.
pub const PERF_CLOSURE_10K_MS: u64 = 500;
