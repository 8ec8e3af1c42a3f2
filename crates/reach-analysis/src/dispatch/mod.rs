//! Dispatch resolution — one call site to the set of concrete targets.
//!
//! Resolution is a pure function over the model and the hierarchy index:
//! static/special/constructor sites resolve exactly, virtual sites fan out
//! over the receiver's subtype set, interface sites fan out over the
//! implementer set plus the interface declaration itself. External targets
//! are legitimate results but always leaves.

use reach_core::config::InterfaceDispatch;
use reach_core::constants::{CONSTRUCTOR_NAME, NO_ARG_VOID_DESCRIPTOR};
use reach_core::errors::Diagnostic;
use reach_core::model::ProgramModel;
use reach_core::types::collections::{FxHashSet, SmallVec2, SmallVec4};
use reach_core::types::{CallSite, ClassId, DispatchKind, MethodRef};

use crate::hierarchy::HierarchyIndex;

/// Targets of one resolved call site, plus any diagnostics raised while
/// resolving it. An empty target set with a diagnostic is a recovered dead
/// end, not a failure.
#[derive(Debug, Default)]
pub struct ResolvedTargets {
    pub targets: SmallVec4<MethodRef>,
    pub diagnostics: SmallVec2<Diagnostic>,
}

impl ResolvedTargets {
    fn unresolved(model: &ProgramModel, caller: &MethodRef, site: &CallSite) -> Self {
        let mut resolved = Self::default();
        resolved.diagnostics.push(Diagnostic::UnresolvedTarget {
            caller: model.render(caller),
            target: model.render(&site.target),
        });
        resolved
    }
}

/// Resolve one call site to the set of concrete method targets execution
/// could transfer to.
pub fn resolve_call(
    model: &ProgramModel,
    hierarchy: &HierarchyIndex,
    caller: &MethodRef,
    site: &CallSite,
    mode: InterfaceDispatch,
) -> ResolvedTargets {
    match site.kind {
        DispatchKind::Static | DispatchKind::Special | DispatchKind::New => {
            resolve_exact(model, caller, site)
        }
        DispatchKind::Virtual => resolve_virtual(model, hierarchy, caller, site),
        DispatchKind::Interface => resolve_interface(model, hierarchy, caller, site, mode),
    }
}

/// Static, special/direct, and constructor sites: exactly the named target,
/// no hierarchy lookup.
fn resolve_exact(model: &ProgramModel, caller: &MethodRef, site: &CallSite) -> ResolvedTargets {
    let target = site.target;
    if model.class(target.owner).is_none() {
        return ResolvedTargets::unresolved(model, caller, site);
    }
    if model.is_external(target.owner) || model.method(&target).is_some() {
        let mut resolved = ResolvedTargets::default();
        resolved.targets.push(target);
        return resolved;
    }
    ResolvedTargets::unresolved(model, caller, site)
}

/// Virtual sites: one target per receiver subtype — the most-derived
/// declaration invokable on that subtype, never a redundant edge for every
/// ancestor in the chain.
fn resolve_virtual(
    model: &ProgramModel,
    hierarchy: &HierarchyIndex,
    caller: &MethodRef,
    site: &CallSite,
) -> ResolvedTargets {
    let named = site.target;
    if model.class(named.owner).is_none() {
        return ResolvedTargets::unresolved(model, caller, site);
    }

    let receivers =
        std::iter::once(named.owner).chain(hierarchy.subclasses_of(named.owner).iter().copied());
    fan_out(model, hierarchy, caller, site, receivers)
}

/// Interface sites: identical to virtual over the implementer set, plus the
/// interface-declared signature itself as a conservative placeholder — an
/// external type may implement the interface through an override the
/// analysis cannot see.
fn resolve_interface(
    model: &ProgramModel,
    hierarchy: &HierarchyIndex,
    caller: &MethodRef,
    site: &CallSite,
    mode: InterfaceDispatch,
) -> ResolvedTargets {
    let named = site.target;
    if model.class(named.owner).is_none() {
        return ResolvedTargets::unresolved(model, caller, site);
    }

    let receivers = hierarchy.implementers_of(named.owner).iter().copied();
    let mut resolved = fan_out(model, hierarchy, caller, site, receivers);

    let has_in_scope_override = resolved
        .targets
        .iter()
        .any(|t| !model.is_external(t.owner));
    let keep_placeholder = match mode {
        InterfaceDispatch::Union => true,
        InterfaceDispatch::OverrideOnly => !has_in_scope_override,
    };
    if keep_placeholder && !resolved.targets.contains(&named) {
        resolved.targets.push(named);
    }
    // The placeholder makes an interface site always resolvable; drop any
    // dead-end diagnostic the fan-out produced.
    if keep_placeholder {
        resolved.diagnostics.clear();
    }
    resolved
}

/// Shared virtual/interface fan-out over a receiver set.
fn fan_out(
    model: &ProgramModel,
    hierarchy: &HierarchyIndex,
    caller: &MethodRef,
    site: &CallSite,
    receivers: impl Iterator<Item = ClassId>,
) -> ResolvedTargets {
    let named = site.target;
    let mut resolved = ResolvedTargets::default();
    let mut seen: FxHashSet<MethodRef> = FxHashSet::default();
    let mut boundary_fallback = false;
    let mut in_scope_miss = false;

    for receiver in receivers {
        match hierarchy.resolve_virtual_target(model, receiver, named.name, named.desc) {
            Some(target) => {
                if seen.insert(target) {
                    resolved.targets.push(target);
                }
            }
            None => {
                // No visible declaration anywhere on the chain: when the
                // chain leaves the analyzed codebase the statically named
                // signature stands in as the boundary leaf; a fully
                // in-scope chain with no declaration is a genuine miss.
                if chain_leaves_scope(model, hierarchy, receiver) {
                    boundary_fallback = true;
                } else {
                    in_scope_miss = true;
                }
            }
        }
    }

    if boundary_fallback && seen.insert(named) {
        resolved.targets.push(named);
    }
    if resolved.targets.is_empty() && in_scope_miss {
        return ResolvedTargets::unresolved(model, caller, site);
    }
    resolved
}

/// True when the receiver's ancestor chain is truncated or contains an
/// external link, i.e. a declaration could exist outside the analyzed
/// codebase.
fn chain_leaves_scope(model: &ProgramModel, hierarchy: &HierarchyIndex, receiver: ClassId) -> bool {
    match hierarchy.chain(receiver) {
        Some(chain) => {
            chain.truncated_at.is_some()
                || chain.ancestors.iter().any(|&c| model.is_external(c))
        }
        None => true,
    }
}

/// The implicit super-construction edge of a constructor, modeling the
/// mandatory chain to the immediate ancestor's no-argument constructor.
///
/// Returns no target when the constructor's first call site already chains
/// explicitly to a constructor of its own class (`this(...)`) or of an
/// ancestor (`super(...)`), or when the owner has no ancestor. External
/// ancestors terminate the chain as a synthetic boundary leaf.
pub fn implicit_super_constructor(
    model: &ProgramModel,
    hierarchy: &HierarchyIndex,
    ctor: &MethodRef,
) -> ResolvedTargets {
    let mut resolved = ResolvedTargets::default();

    let Some(meta) = model.method(ctor) else {
        return resolved;
    };
    if !meta.is_constructor {
        return resolved;
    }
    if let Some(first) = meta.body.as_deref().and_then(|b| b.first()) {
        if is_explicit_chain(model, hierarchy, ctor, first) {
            return resolved;
        }
    }

    let Some(ancestor) = model.class(ctor.owner).and_then(|c| c.superclass) else {
        return resolved;
    };
    let chained = MethodRef {
        owner: ancestor,
        name: model.interner().intern_member(CONSTRUCTOR_NAME),
        desc: model.interner().intern_member(NO_ARG_VOID_DESCRIPTOR),
    };
    if model.is_external(ancestor) || model.method(&chained).is_some() {
        resolved.targets.push(chained);
    } else {
        resolved.diagnostics.push(Diagnostic::UnresolvedTarget {
            caller: model.render(ctor),
            target: model.render(&chained),
        });
    }
    resolved
}

/// True when a call site is an explicit constructor chain from `ctor`:
/// a direct call to a constructor of the same class or of an ancestor.
fn is_explicit_chain(
    model: &ProgramModel,
    hierarchy: &HierarchyIndex,
    ctor: &MethodRef,
    site: &CallSite,
) -> bool {
    if !matches!(site.kind, DispatchKind::Special | DispatchKind::New) {
        return false;
    }
    if model.interner().member_text(site.target.name) != CONSTRUCTOR_NAME {
        return false;
    }
    site.target.owner == ctor.owner || hierarchy.is_ancestor(site.target.owner, ctor.owner)
}
