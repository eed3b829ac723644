//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Game configuration and the file-backed [`config::Config`] trait
//! - **Foundation**: Low-level utilities (geometry, transforms, handles, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{Config, ConfigError, ConfigFormat, GameConfig};
