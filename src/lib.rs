pub mod config;
pub mod error;
pub mod inline_css;
pub mod inline_html;
pub mod output;
pub mod resource_map;
pub mod utils;

pub use config::InlineConfig;
pub use error::{InlinerError, InlinerResult};
pub use inline_css::expand_stylesheets;
pub use inline_html::{InlineStats, inline_document};
pub use output::InlinedDocument;
pub use resource_map::{
    BuiltResources, IndentFormatter, PrimaryDocument, ResourceMap, ResourceRecord,
    ScriptFormatter, build_resource_map, build_resource_map_with,
};
pub use utils::TextEncoding;

/// Inline the asset directory described by `config` into one document
///
/// Builds the resource map, makes every stylesheet self-contained, rewrites
/// the primary document and serializes it.
pub fn inline_directory(config: &InlineConfig) -> InlinerResult<InlinedDocument> {
    inline_directory_with(config, &IndentFormatter::default())
}

/// Like [`inline_directory`], beautifying scripts with `formatter`
pub fn inline_directory_with(
    config: &InlineConfig,
    formatter: &dyn ScriptFormatter,
) -> InlinerResult<InlinedDocument> {
    let BuiltResources {
        resources,
        document,
    } = build_resource_map_with(config, formatter)?;
    let resources = expand_stylesheets(&resources)?;

    let (name, tree, encoding) = document.into_parts();
    let stats = inline_document(&tree, &resources);
    InlinedDocument::serialize(name, &tree, encoding, stats)
}
