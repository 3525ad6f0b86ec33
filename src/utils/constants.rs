//! Shared constants for the inliner
//!
//! Values used by more than one pass live here so the resource map builder and
//! the inliners agree on names and extensions.

/// File name that always wins primary-document selection
pub const INDEX_DOCUMENT: &str = "index.html";

/// File name suffixes embedded as fonts
///
/// The `?` variants come from fetchers that keep the trailing query marker of
/// `font.woff?#iefix` style references in the saved file name.
pub const FONT_EXTENSIONS: [&str; 6] = [".eot", ".eot?", ".ttf", ".ttf?", ".woff", ".woff?"];

/// Declarations whose values may carry `url(...)` references
pub const URL_CARRIER_PROPERTIES: [&str; 4] =
    ["src", "background", "background-image", "list-style-image"];

/// Attribute recording the reference an inlined element was built from
pub const INLINED_FROM_ATTR: &str = "data-inlined-from";

/// Script type used when a `<script src>` has none
pub const DEFAULT_SCRIPT_TYPE: &str = "text/javascript";

/// Number of leading bytes inspected by content sniffing
///
/// EOT carries its magic at offset 34 and text detection wants a reasonable
/// sample, so this is larger than any single signature.
pub const SNIFF_LEN: usize = 1024;
