//! Core type definitions: collections, interned identifiers, signatures.

pub mod collections;
pub mod identifiers;
pub mod interning;
pub mod signatures;

pub use identifiers::{ClassId, MemberId};
pub use interning::NameInterner;
pub use signatures::{CallSite, DispatchKind, MethodRef};
