//! Collaborator contracts for the excluded loader/serializer boundary.

pub mod call_site_source;

pub use call_site_source::CallSiteSource;
