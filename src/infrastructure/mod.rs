//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading, logging setup and exchange wiring.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`exchange`] - Exchange client factory

pub mod config;
pub mod exchange;
