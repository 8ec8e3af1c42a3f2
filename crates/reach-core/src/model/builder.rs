//! Fluent construction API for the metadata model.
//!
//! The external loader drives this builder with decoded class records; the
//! terminal `build()` interns everything, synthesizes stubs for referenced
//! but undeclared hierarchy types, and runs the fatal malformed-input
//! validation.

use crate::constants::{CONSTRUCTOR_NAME, ROOT_CLASS};
use crate::errors::ModelError;
use crate::types::collections::{FxHashMap, SmallVec2};
use crate::types::{CallSite, ClassId, DispatchKind, MethodRef, NameInterner};

use super::{ClassMeta, ClassScope, MethodMeta, ProgramModel, TypeKind};

/// Builder for [`ProgramModel`].
#[derive(Default)]
pub struct ModelBuilder {
    classes: Vec<ClassDecl>,
}

/// One pending class declaration.
pub struct ClassDecl {
    name: String,
    kind: TypeKind,
    scope: ClassScope,
    superclass: Option<String>,
    interfaces: Vec<String>,
    methods: Vec<MethodDecl>,
}

/// One pending method declaration.
pub struct MethodDecl {
    name: String,
    desc: String,
    is_static: bool,
    is_private: bool,
    is_final: bool,
    is_abstract: bool,
    opaque: bool,
    calls: Vec<CallDecl>,
}

struct CallDecl {
    kind: DispatchKind,
    owner: String,
    name: String,
    desc: String,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an in-scope class.
    pub fn class(&mut self, name: &str) -> &mut ClassDecl {
        self.push(name, TypeKind::Class, ClassScope::InScope)
    }

    /// Declare an in-scope interface.
    pub fn interface(&mut self, name: &str) -> &mut ClassDecl {
        self.push(name, TypeKind::Interface, ClassScope::InScope)
    }

    /// Declare an external class, known only by signature.
    pub fn external_class(&mut self, name: &str) -> &mut ClassDecl {
        self.push(name, TypeKind::Class, ClassScope::External)
    }

    /// Declare an external interface, known only by signature.
    pub fn external_interface(&mut self, name: &str) -> &mut ClassDecl {
        self.push(name, TypeKind::Interface, ClassScope::External)
    }

    fn push(&mut self, name: &str, kind: TypeKind, scope: ClassScope) -> &mut ClassDecl {
        let idx = self.classes.len();
        self.classes.push(ClassDecl {
            name: name.to_string(),
            kind,
            scope,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
        });
        &mut self.classes[idx]
    }

    /// Intern and validate everything into an immutable model.
    pub fn build(self) -> Result<ProgramModel, ModelError> {
        let interner = NameInterner::new();
        let root = interner.intern_class(ROOT_CLASS);

        let mut classes: FxHashMap<ClassId, ClassMeta> = FxHashMap::default();
        let mut methods: FxHashMap<MethodRef, MethodMeta> = FxHashMap::default();
        let mut class_order: Vec<ClassId> = Vec::new();

        for decl in &self.classes {
            let id = interner.intern_class(&decl.name);
            if classes.contains_key(&id) {
                return Err(ModelError::DuplicateClass {
                    name: interner.class_name(id).to_string(),
                });
            }

            // Classes other than the root default to extending the root.
            let superclass = match (&decl.superclass, decl.kind) {
                (Some(name), _) => Some(interner.intern_class(name)),
                (None, TypeKind::Class) if id != root => Some(root),
                _ => None,
            };
            if id == root && superclass.is_some() {
                return Err(ModelError::RootHasSuperclass {
                    root: ROOT_CLASS.to_string(),
                    superclass: decl.superclass.clone().unwrap_or_default(),
                });
            }

            let interfaces: SmallVec2<ClassId> = decl
                .interfaces
                .iter()
                .map(|n| interner.intern_class(n))
                .collect();

            let mut declared_methods = Vec::with_capacity(decl.methods.len());
            for m in &decl.methods {
                let sig = MethodRef {
                    owner: id,
                    name: interner.intern_member(&m.name),
                    desc: interner.intern_member(&m.desc),
                };
                if methods.contains_key(&sig) {
                    return Err(ModelError::DuplicateMethod {
                        signature: sig.render(&interner),
                    });
                }
                let body = if m.opaque
                    || m.is_abstract
                    || decl.scope == ClassScope::External
                {
                    None
                } else {
                    Some(
                        m.calls
                            .iter()
                            .map(|c| CallSite {
                                target: MethodRef {
                                    owner: interner.intern_class(&c.owner),
                                    name: interner.intern_member(&c.name),
                                    desc: interner.intern_member(&c.desc),
                                },
                                kind: c.kind,
                            })
                            .collect(),
                    )
                };
                methods.insert(
                    sig,
                    MethodMeta {
                        sig,
                        is_static: m.is_static,
                        is_private: m.is_private,
                        is_final: m.is_final,
                        is_abstract: m.is_abstract,
                        is_constructor: m.name == CONSTRUCTOR_NAME,
                        body,
                    },
                );
                declared_methods.push(sig);
            }

            classes.insert(
                id,
                ClassMeta {
                    id,
                    kind: decl.kind,
                    scope: decl.scope,
                    declared: true,
                    superclass,
                    interfaces,
                    methods: declared_methods,
                },
            );
            class_order.push(id);
        }

        // Synthesize external-unknown stubs for hierarchy references that
        // were never declared, so every inheritance/implementation edge
        // lands on a record. Their chains truncate here.
        let mut stub_refs: Vec<(ClassId, TypeKind)> = Vec::new();
        for id in &class_order {
            let meta = &classes[id];
            if let Some(sup) = meta.superclass {
                if !classes.contains_key(&sup) {
                    stub_refs.push((sup, TypeKind::Class));
                }
            }
            for iface in &meta.interfaces {
                if !classes.contains_key(iface) {
                    stub_refs.push((*iface, TypeKind::Interface));
                }
            }
        }
        for (id, kind) in stub_refs {
            if classes.contains_key(&id) {
                continue;
            }
            classes.insert(
                id,
                ClassMeta {
                    id,
                    kind,
                    scope: ClassScope::External,
                    declared: false,
                    superclass: None,
                    interfaces: SmallVec2::new(),
                    methods: Vec::new(),
                },
            );
            class_order.push(id);
        }

        detect_inheritance_cycles(&classes, &class_order, &interner)?;

        Ok(ProgramModel {
            interner,
            classes,
            methods,
            class_order,
            root,
        })
    }
}

impl ClassDecl {
    /// Set the immediate superclass.
    pub fn extends(&mut self, name: &str) -> &mut Self {
        self.superclass = Some(name.to_string());
        self
    }

    /// Add a directly implemented (or, for interfaces, extended) interface.
    pub fn implements(&mut self, name: &str) -> &mut Self {
        self.interfaces.push(name.to_string());
        self
    }

    /// Declare a method.
    pub fn method(&mut self, name: &str, desc: &str) -> &mut MethodDecl {
        let idx = self.methods.len();
        self.methods.push(MethodDecl {
            name: name.to_string(),
            desc: desc.to_string(),
            is_static: false,
            is_private: false,
            is_final: false,
            is_abstract: false,
            opaque: false,
            calls: Vec::new(),
        });
        &mut self.methods[idx]
    }

    /// Declare a constructor with the given descriptor.
    pub fn constructor(&mut self, desc: &str) -> &mut MethodDecl {
        self.method(CONSTRUCTOR_NAME, desc)
    }
}

impl MethodDecl {
    pub fn static_method(&mut self) -> &mut Self {
        self.is_static = true;
        self
    }

    pub fn private_method(&mut self) -> &mut Self {
        self.is_private = true;
        self
    }

    pub fn final_method(&mut self) -> &mut Self {
        self.is_final = true;
        self
    }

    /// Abstract methods have no instructions and become opaque leaves.
    pub fn abstract_method(&mut self) -> &mut Self {
        self.is_abstract = true;
        self
    }

    /// Mark the body as unavailable (native, stripped, etc.).
    pub fn opaque(&mut self) -> &mut Self {
        self.opaque = true;
        self
    }

    /// Append a call site to the body.
    pub fn call(
        &mut self,
        kind: DispatchKind,
        owner: &str,
        name: &str,
        desc: &str,
    ) -> &mut Self {
        self.calls.push(CallDecl {
            kind,
            owner: owner.to_string(),
            name: name.to_string(),
            desc: desc.to_string(),
        });
        self
    }
}

/// Reject class hierarchies containing cycles: the ancestor-chain
/// memoization in the hierarchy index requires a DAG.
fn detect_inheritance_cycles(
    classes: &FxHashMap<ClassId, ClassMeta>,
    class_order: &[ClassId],
    interner: &NameInterner,
) -> Result<(), ModelError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let mut colors: FxHashMap<ClassId, Color> = FxHashMap::default();

    for &start in class_order {
        if colors.get(&start).copied().unwrap_or(Color::White) != Color::White {
            continue;
        }
        // Iterative DFS: (node, next-edge cursor).
        let mut stack: Vec<(ClassId, usize)> = vec![(start, 0)];
        colors.insert(start, Color::Gray);

        while let Some(&(node, cursor)) = stack.last() {
            let edges = hierarchy_edges(classes, node);
            if cursor < edges.len() {
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                let next = edges[cursor];
                match colors.get(&next).copied().unwrap_or(Color::White) {
                    Color::Gray => {
                        return Err(ModelError::InheritanceCycle {
                            class: interner.class_name(next).to_string(),
                        });
                    }
                    Color::White => {
                        colors.insert(next, Color::Gray);
                        stack.push((next, 0));
                    }
                    Color::Black => {}
                }
            } else {
                colors.insert(node, Color::Black);
                stack.pop();
            }
        }
    }
    Ok(())
}

fn hierarchy_edges(classes: &FxHashMap<ClassId, ClassMeta>, id: ClassId) -> Vec<ClassId> {
    match classes.get(&id) {
        Some(meta) => {
            let mut edges = Vec::with_capacity(1 + meta.interfaces.len());
            if let Some(sup) = meta.superclass {
                edges.push(sup);
            }
            edges.extend(meta.interfaces.iter().copied());
            edges
        }
        None => Vec::new(),
    }
}
