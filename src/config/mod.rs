//! Configuration module for the readable view
//!
//! This module provides the `ReadableConfig` struct and its builder
//! for configuring page translation with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::ReadableConfigBuilder;
pub use types::ReadableConfig;
