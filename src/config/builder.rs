//! Type-safe builder for `InlineConfig` using the typestate pattern
//!
//! `build()` only exists once the asset directory has been supplied.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::InlineConfig;

// Type states for the builder
pub struct WithAssetDir;

pub struct InlineConfigBuilder<State = ()> {
    pub(crate) asset_dir: Option<PathBuf>,
    pub(crate) inline_file: Option<String>,
    pub(crate) exclude_images: bool,
    pub(crate) exclude_fonts: bool,
    pub(crate) exclude_videos: bool,
    pub(crate) prettify: bool,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for InlineConfigBuilder<()> {
    fn default() -> Self {
        Self {
            asset_dir: None,
            inline_file: None,
            exclude_images: false,
            exclude_fonts: false,
            exclude_videos: false,
            prettify: false,
            _phantom: PhantomData,
        }
    }
}

impl InlineConfig {
    /// Create a builder for configuring an `InlineConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> InlineConfigBuilder<()> {
        InlineConfigBuilder::default()
    }
}

impl InlineConfigBuilder<()> {
    pub fn asset_dir(self, dir: impl Into<PathBuf>) -> InlineConfigBuilder<WithAssetDir> {
        InlineConfigBuilder {
            asset_dir: Some(dir.into()),
            inline_file: self.inline_file,
            exclude_images: self.exclude_images,
            exclude_fonts: self.exclude_fonts,
            exclude_videos: self.exclude_videos,
            prettify: self.prettify,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the asset directory is set
impl InlineConfigBuilder<WithAssetDir> {
    #[must_use]
    pub fn build(self) -> InlineConfig {
        InlineConfig {
            // The typestate guarantees the directory was provided
            asset_dir: self.asset_dir.unwrap_or_default(),
            inline_file: self.inline_file.filter(|name| !name.is_empty()),
            exclude_images: self.exclude_images,
            exclude_fonts: self.exclude_fonts,
            exclude_videos: self.exclude_videos,
            prettify: self.prettify,
        }
    }
}
