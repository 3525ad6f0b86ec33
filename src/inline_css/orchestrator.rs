//! Stylesheet passes over the whole resource map
//!
//! Every stylesheet record is parsed once, has its imports expanded and its
//! url carriers rewritten, and is written back as a new record. Expansion runs
//! first so urls inside imported sheets are rewritten too.

use super::imports::expand_imports;
use super::stylesheet::Stylesheet;
use super::url_rewriter::rewrite_stylesheet;
use crate::error::InlinerResult;
use crate::resource_map::{ResourceMap, ResourceRecord};

/// Produce a copy of `resources` with every stylesheet self-contained
///
/// Lookups during expansion and rewriting read the original map, so the
/// result does not depend on the order stylesheets are visited in.
pub fn expand_stylesheets(resources: &ResourceMap) -> InlinerResult<ResourceMap> {
    log::info!("Expanding stylesheets");

    let mut expanded = ResourceMap::new();
    for record in resources.iter() {
        if record.is_stylesheet() {
            expanded.insert(expand_stylesheet(record, resources)?);
        } else {
            expanded.insert(record.clone());
        }
    }
    Ok(expanded)
}

/// Expand a single stylesheet record against `resources`
pub fn expand_stylesheet(
    record: &ResourceRecord,
    resources: &ResourceMap,
) -> InlinerResult<ResourceRecord> {
    let sheet = Stylesheet::parse(record.value());
    let mut sheet = expand_imports(Some(record.key()), sheet, resources)?;
    rewrite_stylesheet(&mut sheet, resources);
    log::debug!("Expanded stylesheet {}", record.key());
    Ok(record.with_value(sheet.to_css()))
}
