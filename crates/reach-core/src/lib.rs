//! Core types, metadata model, errors, config, tracing, and constants for
//! the Reach call-graph engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod tracing;
pub mod traits;
pub mod types;
