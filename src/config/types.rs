//! Core configuration types for inlining runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct for an inlining run
///
/// The command-line layer owns how these values are obtained; the library only
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineConfig {
    /// Directory holding the previously fetched page and its subresources.
    pub(crate) asset_dir: PathBuf,

    /// File name (relative to `asset_dir`) to use as the primary document.
    ///
    /// When set, automatic document detection is bypassed and the named file
    /// must contain an `<html>` element or the run fails.
    pub(crate) inline_file: Option<String>,

    pub(crate) exclude_images: bool,
    pub(crate) exclude_fonts: bool,
    pub(crate) exclude_videos: bool,

    /// Re-indent JavaScript before embedding it
    pub(crate) prettify: bool,
}
