//! Document inlining
//!
//! This module rewrites the primary document tree so that scripts, links,
//! images, videos and `style` attributes no longer reference files in the
//! asset directory.

// Sub-modules
pub mod elements;
pub mod link_type;
pub mod orchestrator;
pub mod processors;

// Re-exports for public API
pub use link_type::{LinkEmbedding, LinkFacts, infer_link_type};
pub use orchestrator::{InlineStats, inline_document};
pub use processors::{
    process_images, process_links, process_scripts, process_style_attributes, process_videos,
};
