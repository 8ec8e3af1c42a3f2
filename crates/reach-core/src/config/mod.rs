//! Configuration system for Reach.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod analysis_config;
pub mod reach_config;

pub use analysis_config::{AnalysisConfig, InterfaceDispatch};
pub use reach_config::ReachConfig;
