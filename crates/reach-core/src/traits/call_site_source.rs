//! Call-site view contract.

use crate::types::{CallSite, MethodRef};

/// Per-method view of call sites, as extracted by the (external) loader.
///
/// Returns `None` when the method has no instructions available — abstract,
/// native, or declared on an external type. Such methods are opaque leaves:
/// the traversal never descends into them.
pub trait CallSiteSource {
    /// The ordered call sites of `method`, or `None` if its body is not
    /// available for analysis.
    fn call_sites(&self, method: &MethodRef) -> Option<&[CallSite]>;
}
