//! Runs every element processor over the primary document

use kuchiki::NodeRef;

use super::processors::{
    process_images, process_links, process_scripts, process_style_attributes, process_videos,
};
use crate::resource_map::ResourceMap;

/// Number of elements each processor made self-contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStats {
    pub style_attributes: usize,
    pub scripts: usize,
    pub links: usize,
    pub images: usize,
    pub videos: usize,
}

impl InlineStats {
    #[must_use]
    pub fn total(&self) -> usize {
        self.style_attributes + self.scripts + self.links + self.images + self.videos
    }
}

/// Make every resource-bearing element in `document` self-contained
///
/// Processors run one after another and each handles all of its matches
/// before the next starts.
pub fn inline_document(document: &NodeRef, resources: &ResourceMap) -> InlineStats {
    log::info!("Inlining resources");

    let stats = InlineStats {
        style_attributes: process_style_attributes(document, resources),
        scripts: process_scripts(document, resources),
        links: process_links(document, resources),
        images: process_images(document, resources),
        videos: process_videos(document, resources),
    };

    log::info!(
        "Inlined {} elements ({} style attributes, {} scripts, {} links, {} images, {} videos)",
        stats.total(),
        stats.style_attributes,
        stats.scripts,
        stats.links,
        stats.images,
        stats.videos
    );
    stats
}
