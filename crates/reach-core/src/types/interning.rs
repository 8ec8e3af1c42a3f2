//! String interning for class and member names.
//!
//! Uses `lasso::ThreadedRodeo` for thread-safe interning while the loader
//! populates the model; reads during analysis are lock-free lookups on the
//! same structure.

use lasso::{Spur, ThreadedRodeo};

use super::identifiers::{ClassId, MemberId};

/// Interner for class names, member names, and descriptors.
///
/// Class names are normalized before interning: JVM internal form
/// (`java/lang/Object`) and source form (`java.lang.Object`) intern to the
/// same key.
#[derive(Debug)]
pub struct NameInterner {
    inner: ThreadedRodeo,
}

impl NameInterner {
    /// Create a new interner.
    pub fn new() -> Self {
        Self {
            inner: ThreadedRodeo::default(),
        }
    }

    /// Intern a fully-qualified class name, normalizing separators first.
    pub fn intern_class(&self, name: &str) -> ClassId {
        let normalized = Self::normalize_class(name);
        ClassId::new(self.inner.get_or_intern(&normalized))
    }

    /// Intern a member name or descriptor verbatim.
    pub fn intern_member(&self, text: &str) -> MemberId {
        MemberId::new(self.inner.get_or_intern(text))
    }

    /// Look up a previously interned class name without inserting.
    pub fn get_class(&self, name: &str) -> Option<ClassId> {
        let normalized = Self::normalize_class(name);
        self.inner.get(&normalized).map(ClassId::new)
    }

    /// Look up a previously interned member name or descriptor without
    /// inserting.
    pub fn get_member(&self, text: &str) -> Option<MemberId> {
        self.inner.get(text).map(MemberId::new)
    }

    /// Resolve a key back to its string.
    pub fn resolve(&self, key: &Spur) -> &str {
        self.inner.resolve(key)
    }

    /// Resolve a class id back to its normalized name.
    pub fn class_name(&self, id: ClassId) -> &str {
        self.inner.resolve(&id.inner())
    }

    /// Resolve a member id back to its text.
    pub fn member_text(&self, id: MemberId) -> &str {
        self.inner.resolve(&id.inner())
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Normalize a class name: JVM internal `/` separators become `.`.
    fn normalize_class(name: &str) -> String {
        name.replace('/', ".")
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}
