//! Method signatures and call sites.

use serde::{Deserialize, Serialize};

use super::identifiers::{ClassId, MemberId};
use super::interning::NameInterner;

/// The globally unique identity of one method: owning class, name, and
/// combined parameter/return descriptor. This triple is the unit the whole
/// engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    /// Class declaring (or, at a call site, statically named as declaring)
    /// the method.
    pub owner: ClassId,
    /// Method name, or `<init>` for constructors.
    pub name: MemberId,
    /// Combined descriptor, e.g. `(I)V`.
    pub desc: MemberId,
}

impl MethodRef {
    /// Render the stable textual form `class#name(desc)ret`.
    ///
    /// This form is the comparison oracle for downstream consumers and must
    /// match byte-for-byte across runs for identical inputs.
    pub fn render(&self, interner: &NameInterner) -> String {
        format!(
            "{}#{}{}",
            interner.class_name(self.owner),
            interner.member_text(self.name),
            interner.member_text(self.desc),
        )
    }

    /// A new reference to the same name/descriptor on a different owner.
    pub fn on_owner(&self, owner: ClassId) -> MethodRef {
        MethodRef {
            owner,
            name: self.name,
            desc: self.desc,
        }
    }
}

/// The call mechanism at a call site, determining the resolution rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchKind {
    /// `invokestatic`: resolves to exactly the named target.
    Static,
    /// `invokespecial` on private methods, explicit constructor chains,
    /// and super calls: resolves to exactly the named target.
    Special,
    /// `invokevirtual`: resolves over the receiver type and its subtypes.
    Virtual,
    /// `invokeinterface`: resolves over the implementer set, plus the
    /// interface declaration itself as a conservative placeholder.
    Interface,
    /// Constructor invocation (`new T()`): the named constructor, with the
    /// implicit super-construction chain applied when the constructor is
    /// expanded.
    New,
}

impl DispatchKind {
    /// Name of the dispatch kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Special => "special",
            Self::Virtual => "virtual",
            Self::Interface => "interface",
            Self::New => "new",
        }
    }

    /// All dispatch kinds, in stats-reporting order.
    pub fn all() -> &'static [DispatchKind] {
        &[
            Self::Static,
            Self::Special,
            Self::Virtual,
            Self::Interface,
            Self::New,
        ]
    }
}

impl std::fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One call site inside a method body: the target signature as written at
/// the call location (which may name an abstract or interface method never
/// directly executable) and the dispatch kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    pub target: MethodRef,
    pub kind: DispatchKind,
}

impl CallSite {
    pub fn new(target: MethodRef, kind: DispatchKind) -> Self {
        Self { target, kind }
    }
}
