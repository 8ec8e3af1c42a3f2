//! Hierarchy index — ancestor chains, subtype sets, interface implementers.
//!
//! Built in a single pass over the model with per-class memoization, then
//! immutable: every entry-point computation reads it concurrently without
//! locks.

use std::time::Instant;

use reach_core::errors::{AnalysisReport, Diagnostic};
use reach_core::model::{ProgramModel, TypeKind};
use reach_core::types::collections::{FxHashMap, FxHashSet};
use reach_core::types::{ClassId, MemberId, MethodRef};

/// Root-to-self ancestor chain of one class.
#[derive(Debug, Clone, Default)]
pub struct AncestorChain {
    /// Ancestors in root-to-self order, the class itself included.
    pub ancestors: Vec<ClassId>,
    /// The unknown ancestor the chain was truncated at, when the topmost
    /// link is an undeclared stub other than the universal root.
    pub truncated_at: Option<ClassId>,
}

/// Derived, read-only view of the class hierarchy.
///
/// Invariant: every class reachable via inheritance/implementation edges
/// from an in-scope class is present, even if external — the model
/// synthesizes stubs for dangling references before this index is built.
pub struct HierarchyIndex {
    chains: FxHashMap<ClassId, AncestorChain>,
    /// Transitive subclasses per class, sorted by name.
    subclasses: FxHashMap<ClassId, Vec<ClassId>>,
    /// Transitive implementing classes per interface, sorted by name.
    implementers: FxHashMap<ClassId, Vec<ClassId>>,
    /// Transitive interface set per class, sorted by name.
    interfaces_of: FxHashMap<ClassId, Vec<ClassId>>,
}

impl HierarchyIndex {
    /// Build the index for a model. Hierarchy gaps (chains truncated at
    /// undeclared ancestors) are reported as diagnostics, never as errors.
    pub fn build(model: &ProgramModel) -> AnalysisReport<HierarchyIndex> {
        let started = Instant::now();

        let chains = build_chains(model);
        let subclasses = build_subclasses(model);
        let interfaces_of = build_interface_sets(model);
        let implementers = build_implementers(model, &interfaces_of);

        let mut report = AnalysisReport::new(HierarchyIndex {
            chains,
            subclasses,
            implementers,
            interfaces_of,
        });
        collect_gap_diagnostics(model, &mut report);

        tracing::debug!(
            hierarchy_build_time_ms = started.elapsed().as_millis() as u64,
            classes = model.class_count(),
            diagnostic_count = report.diagnostic_count(),
            "hierarchy index built"
        );
        report
    }

    /// The root-to-self ancestor chain of a class.
    pub fn chain(&self, id: ClassId) -> Option<&AncestorChain> {
        self.chains.get(&id)
    }

    /// Ancestors of a class in root-to-self order (the class included).
    pub fn ancestors(&self, id: ClassId) -> &[ClassId] {
        self.chains
            .get(&id)
            .map(|c| c.ancestors.as_slice())
            .unwrap_or(&[])
    }

    /// True when `ancestor` appears in the ancestor chain of `id`
    /// (reflexive: a class is its own ancestor).
    pub fn is_ancestor(&self, ancestor: ClassId, id: ClassId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// All transitive subclasses of a class, sorted by name.
    pub fn subclasses_of(&self, id: ClassId) -> &[ClassId] {
        self.subclasses
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All classes implementing an interface, directly or transitively
    /// through intermediate classes/interfaces, sorted by name.
    pub fn implementers_of(&self, id: ClassId) -> &[ClassId] {
        self.implementers
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The transitive interface set of a class, sorted by name.
    pub fn interfaces_of(&self, id: ClassId) -> &[ClassId] {
        self.interfaces_of
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The most-derived declaration of (name, desc) actually invokable on
    /// `receiver`: the receiver's own declaration, or the nearest ancestor
    /// declaration when the receiver does not override.
    pub fn resolve_virtual_target(
        &self,
        model: &ProgramModel,
        receiver: ClassId,
        name: MemberId,
        desc: MemberId,
    ) -> Option<MethodRef> {
        self.ancestors(receiver)
            .iter()
            .rev()
            .find(|&&c| model.declares(c, name, desc))
            .map(|&owner| MethodRef { owner, name, desc })
    }

    /// The declarations a method overrides: the nearest ancestor
    /// declaration of the same name and descriptor (at most one per chain),
    /// plus every interface declaration it satisfies.
    pub fn overrides(&self, model: &ProgramModel, sig: &MethodRef) -> Vec<MethodRef> {
        let mut result = Vec::new();
        let overridden = self
            .ancestors(sig.owner)
            .iter()
            .rev()
            .skip(1)
            .find(|&&c| model.declares(c, sig.name, sig.desc));
        if let Some(&owner) = overridden {
            result.push(sig.on_owner(owner));
        }
        for &iface in self.interfaces_of(sig.owner) {
            if model.declares(iface, sig.name, sig.desc) {
                result.push(sig.on_owner(iface));
            }
        }
        result
    }
}

/// Memoized root-to-self chains for every class.
fn build_chains(model: &ProgramModel) -> FxHashMap<ClassId, AncestorChain> {
    let mut chains: FxHashMap<ClassId, AncestorChain> = FxHashMap::default();

    for meta in model.classes() {
        if chains.contains_key(&meta.id) {
            continue;
        }
        // Walk up to the first memoized ancestor (or the top), then unwind.
        let mut path = Vec::new();
        let mut cursor = Some(meta.id);
        let mut base = AncestorChain::default();
        while let Some(id) = cursor {
            if let Some(memoized) = chains.get(&id) {
                base = memoized.clone();
                break;
            }
            path.push(id);
            cursor = model.class(id).and_then(|c| c.superclass);
        }
        for &id in path.iter().rev() {
            let mut chain = base.clone();
            chain.ancestors.push(id);
            if chain.truncated_at.is_none() {
                chain.truncated_at = truncation_marker(model, &chain);
            }
            chains.insert(id, chain.clone());
            base = chain;
        }
    }
    chains
}

/// The boundary marker of a chain: its topmost link, when that link is an
/// undeclared stub other than the universal root.
fn truncation_marker(model: &ProgramModel, chain: &AncestorChain) -> Option<ClassId> {
    let &top = chain.ancestors.first()?;
    let meta = model.class(top)?;
    (!meta.declared && !model.is_root(top)).then_some(top)
}

/// Transitive subclass sets, inverted from the superclass edges.
fn build_subclasses(model: &ProgramModel) -> FxHashMap<ClassId, Vec<ClassId>> {
    let mut direct: FxHashMap<ClassId, Vec<ClassId>> = FxHashMap::default();
    for meta in model.classes() {
        if let Some(sup) = meta.superclass {
            direct.entry(sup).or_default().push(meta.id);
        }
    }

    let mut transitive: FxHashMap<ClassId, Vec<ClassId>> = FxHashMap::default();
    for meta in model.classes() {
        let mut found = Vec::new();
        let mut queue: Vec<ClassId> = direct.get(&meta.id).cloned().unwrap_or_default();
        let mut seen: FxHashSet<ClassId> = queue.iter().copied().collect();
        while let Some(id) = queue.pop() {
            found.push(id);
            for &sub in direct.get(&id).map(|v| v.as_slice()).unwrap_or(&[]) {
                if seen.insert(sub) {
                    queue.push(sub);
                }
            }
        }
        sort_by_name(model, &mut found);
        transitive.insert(meta.id, found);
    }
    transitive
}

/// Transitive interface set per class: directly declared interfaces, their
/// superinterfaces, and everything inherited from ancestors.
fn build_interface_sets(model: &ProgramModel) -> FxHashMap<ClassId, Vec<ClassId>> {
    let mut memo: FxHashMap<ClassId, Vec<ClassId>> = FxHashMap::default();
    for meta in model.classes() {
        interface_set(model, meta.id, &mut memo);
    }
    memo
}

fn interface_set(
    model: &ProgramModel,
    id: ClassId,
    memo: &mut FxHashMap<ClassId, Vec<ClassId>>,
) -> Vec<ClassId> {
    if let Some(cached) = memo.get(&id) {
        return cached.clone();
    }
    let mut set: FxHashSet<ClassId> = FxHashSet::default();
    if let Some(meta) = model.class(id) {
        for &iface in &meta.interfaces {
            set.insert(iface);
            set.extend(interface_set(model, iface, memo));
        }
        if let Some(sup) = meta.superclass {
            set.extend(interface_set(model, sup, memo));
        }
    }
    let mut result: Vec<ClassId> = set.into_iter().collect();
    sort_by_name(model, &mut result);
    memo.insert(id, result.clone());
    result
}

/// Invert the transitive interface sets into per-interface implementer
/// lists (classes only; the interface declaration itself is handled by the
/// dispatch placeholder rule).
fn build_implementers(
    model: &ProgramModel,
    interfaces_of: &FxHashMap<ClassId, Vec<ClassId>>,
) -> FxHashMap<ClassId, Vec<ClassId>> {
    let mut implementers: FxHashMap<ClassId, Vec<ClassId>> = FxHashMap::default();
    for meta in model.classes() {
        if meta.kind != TypeKind::Class {
            continue;
        }
        if let Some(ifaces) = interfaces_of.get(&meta.id) {
            for &iface in ifaces {
                implementers.entry(iface).or_default().push(meta.id);
            }
        }
    }
    for list in implementers.values_mut() {
        sort_by_name(model, list);
    }
    implementers
}

/// Report one hierarchy-gap diagnostic per dangling reference, in class
/// declaration order.
fn collect_gap_diagnostics(model: &ProgramModel, report: &mut AnalysisReport<HierarchyIndex>) {
    for meta in model.classes() {
        if !meta.declared {
            continue;
        }
        let mut referenced = Vec::new();
        referenced.extend(meta.superclass);
        referenced.extend(meta.interfaces.iter().copied());
        for id in referenced {
            let undeclared = model.class(id).is_some_and(|c| !c.declared);
            if undeclared && !model.is_root(id) {
                report.push(Diagnostic::HierarchyGap {
                    class: model.class_name(meta.id).to_string(),
                    missing: model.class_name(id).to_string(),
                });
            }
        }
    }
}

fn sort_by_name(model: &ProgramModel, ids: &mut [ClassId]) {
    ids.sort_by(|a, b| model.class_name(*a).cmp(model.class_name(*b)));
}
