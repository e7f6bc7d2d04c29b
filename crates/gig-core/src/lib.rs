//! Core types for Gigsly RS
//!
//! Validation errors, configuration, and shared entity traits used across
//! the workspace.

pub mod config;
pub mod error;
pub mod traits;

pub use config::AppConfig;
pub use error::ValidationErrors;
pub use traits::Id;
