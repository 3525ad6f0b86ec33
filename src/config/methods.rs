//! Builder methods available for all states

use super::builder::InlineConfigBuilder;

impl<State> InlineConfigBuilder<State> {
    /// Use the named file as the primary document instead of detecting one
    ///
    /// # Example
    ///
    /// ```rust
    /// # use kodegen_tools_inliner::config::InlineConfig;
    /// let config = InlineConfig::builder()
    ///     .asset_dir("./snapshot")
    ///     .inline_file(Some("article.html".to_string()))
    ///     .build();
    /// assert_eq!(config.inline_file(), Some("article.html"));
    /// ```
    #[must_use]
    pub fn inline_file(mut self, name: Option<String>) -> Self {
        self.inline_file = name;
        self
    }

    #[must_use]
    pub fn exclude_images(mut self, exclude: bool) -> Self {
        self.exclude_images = exclude;
        self
    }

    #[must_use]
    pub fn exclude_fonts(mut self, exclude: bool) -> Self {
        self.exclude_fonts = exclude;
        self
    }

    #[must_use]
    pub fn exclude_videos(mut self, exclude: bool) -> Self {
        self.exclude_videos = exclude;
        self
    }

    /// Re-indent embedded JavaScript
    ///
    /// Only affects records classified as JavaScript; stylesheets and markup
    /// are embedded as captured.
    #[must_use]
    pub fn prettify(mut self, prettify: bool) -> Self {
        self.prettify = prettify;
        self
    }
}
