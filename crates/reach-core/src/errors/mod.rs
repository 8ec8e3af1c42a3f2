//! Error handling for Reach.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod diagnostic;
pub mod error_code;
pub mod model_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use diagnostic::{AnalysisReport, Diagnostic};
pub use error_code::ReachErrorCode;
pub use model_error::ModelError;
