//! Getter methods for `InlineConfig`

use std::path::Path;

use super::types::InlineConfig;

impl InlineConfig {
    #[must_use]
    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    #[must_use]
    pub fn inline_file(&self) -> Option<&str> {
        self.inline_file.as_deref()
    }

    #[must_use]
    pub fn exclude_images(&self) -> bool {
        self.exclude_images
    }

    #[must_use]
    pub fn exclude_fonts(&self) -> bool {
        self.exclude_fonts
    }

    #[must_use]
    pub fn exclude_videos(&self) -> bool {
        self.exclude_videos
    }

    #[must_use]
    pub fn prettify(&self) -> bool {
        self.prettify
    }
}
