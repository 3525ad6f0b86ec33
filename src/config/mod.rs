//! Configuration module for inlining runs
//!
//! This module provides the `InlineConfig` struct and its type-safe builder
//! for describing which asset directory to inline and which resource kinds
//! to embed.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{InlineConfigBuilder, WithAssetDir};
pub use types::InlineConfig;
