//! Metadata model: flat class and method records in an interner-keyed
//! arena, built once per analysis run and immutable thereafter.
//!
//! Hierarchy edges are explicit id references, not language-level
//! inheritance, so dispatch resolution stays a pure function over data.

pub mod builder;

use serde::{Deserialize, Serialize};

use crate::constants::ROOT_CLASS;
use crate::traits::CallSiteSource;
use crate::types::collections::{FxHashMap, SmallVec2};
use crate::types::{CallSite, ClassId, MemberId, MethodRef, NameInterner};

pub use builder::ModelBuilder;

/// Whether a type is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

/// Whether a type's method bodies are available for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassScope {
    /// Part of the analyzed codebase: bodies can be expanded.
    InScope,
    /// Known only by signature and hierarchy position: always a leaf.
    External,
}

/// One class or interface record.
#[derive(Debug, Clone)]
pub struct ClassMeta {
    pub id: ClassId,
    pub kind: TypeKind,
    pub scope: ClassScope,
    /// False for stubs synthesized from supertype/interface references that
    /// were never declared by the loader; their chains truncate here.
    pub declared: bool,
    /// Immediate superclass; `None` only for the universal root type, for
    /// interfaces, and for undeclared stubs.
    pub superclass: Option<ClassId>,
    /// Directly declared interfaces, in declaration order.
    pub interfaces: SmallVec2<ClassId>,
    /// Declared methods, in declaration order.
    pub methods: Vec<MethodRef>,
}

/// One method record.
#[derive(Debug, Clone)]
pub struct MethodMeta {
    pub sig: MethodRef,
    pub is_static: bool,
    pub is_private: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_constructor: bool,
    /// Ordered call sites, or `None` when no instructions are available
    /// (abstract, native, or external): an opaque leaf.
    pub body: Option<Vec<CallSite>>,
}

impl MethodMeta {
    /// True when the method's body cannot be expanded.
    pub fn is_opaque(&self) -> bool {
        self.body.is_none()
    }
}

/// The whole-program metadata model: every class and method known to one
/// analysis run, keyed by interned identity.
#[derive(Debug)]
pub struct ProgramModel {
    interner: NameInterner,
    classes: FxHashMap<ClassId, ClassMeta>,
    methods: FxHashMap<MethodRef, MethodMeta>,
    /// Class ids in declaration order (stubs last), for deterministic
    /// iteration.
    class_order: Vec<ClassId>,
    root: ClassId,
}

impl ProgramModel {
    /// Start building a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// The interner backing all identifiers in this model.
    pub fn interner(&self) -> &NameInterner {
        &self.interner
    }

    /// Id of the universal root type.
    pub fn root(&self) -> ClassId {
        self.root
    }

    /// Look up a class record.
    pub fn class(&self, id: ClassId) -> Option<&ClassMeta> {
        self.classes.get(&id)
    }

    /// All class records, in deterministic declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassMeta> {
        self.class_order.iter().filter_map(|id| self.classes.get(id))
    }

    /// Number of classes (declared + synthesized stubs).
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Look up a method record.
    pub fn method(&self, sig: &MethodRef) -> Option<&MethodMeta> {
        self.methods.get(sig)
    }

    /// Number of method records.
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// True when `owner` declares a method with this name and descriptor.
    pub fn declares(&self, owner: ClassId, name: MemberId, desc: MemberId) -> bool {
        self.methods.contains_key(&MethodRef { owner, name, desc })
    }

    /// Resolved name of a class.
    pub fn class_name(&self, id: ClassId) -> &str {
        self.interner.class_name(id)
    }

    /// Stable textual form of a method signature.
    pub fn render(&self, sig: &MethodRef) -> String {
        sig.render(&self.interner)
    }

    /// Find a class id by name without mutating the interner.
    pub fn lookup_class(&self, name: &str) -> Option<ClassId> {
        let id = self.interner.get_class(name)?;
        self.classes.contains_key(&id).then_some(id)
    }

    /// Find a method reference by rendered parts without mutating the
    /// interner. Returns `None` when no such record exists.
    pub fn lookup_method(&self, class: &str, name: &str, desc: &str) -> Option<MethodRef> {
        let owner = self.lookup_class(class)?;
        let name = self.interner.get_member(name)?;
        let desc = self.interner.get_member(desc)?;
        let sig = MethodRef { owner, name, desc };
        self.methods.contains_key(&sig).then_some(sig)
    }

    /// True when the class is outside the analyzed codebase.
    pub fn is_external(&self, id: ClassId) -> bool {
        self.classes
            .get(&id)
            .map(|c| c.scope == ClassScope::External)
            .unwrap_or(true)
    }

    /// True when the method can be expanded by the traversal: it exists,
    /// its owner is in scope, and its instructions are available.
    pub fn is_expandable(&self, sig: &MethodRef) -> bool {
        !self.is_external(sig.owner)
            && self.methods.get(sig).is_some_and(|m| !m.is_opaque())
    }

    /// Every in-scope method with a body, in deterministic declaration
    /// order. These are the candidate entry points of a whole-program run.
    pub fn expandable_methods(&self) -> Vec<MethodRef> {
        self.classes()
            .filter(|c| c.scope == ClassScope::InScope)
            .flat_map(|c| c.methods.iter().copied())
            .filter(|sig| self.is_expandable(sig))
            .collect()
    }

    /// True when the class name is the universal root type.
    pub fn is_root(&self, id: ClassId) -> bool {
        self.class_name(id) == ROOT_CLASS
    }
}

impl CallSiteSource for ProgramModel {
    fn call_sites(&self, method: &MethodRef) -> Option<&[CallSite]> {
        self.methods.get(method).and_then(|m| m.body.as_deref())
    }
}
