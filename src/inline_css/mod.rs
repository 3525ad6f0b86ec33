//! Stylesheet inlining
//!
//! This module flattens `@import` chains and rewrites `url(...)` references
//! to data URIs, both for stylesheet records and for `style` attributes.

// Sub-modules
pub mod imports;
pub mod orchestrator;
pub mod stylesheet;
pub mod url_rewriter;

// Re-exports for public API
pub use imports::expand_imports;
pub use orchestrator::{expand_stylesheet, expand_stylesheets};
pub use stylesheet::{BodyItem, CssDeclaration, CssRule, DeclarationBlock, Stylesheet};
pub use url_rewriter::{rewrite_block, rewrite_inline_style, rewrite_stylesheet, rewrite_urls};
