//! `@import` expansion
//!
//! Imported stylesheets are spliced in place of the rule that imports them,
//! depth first, so the flattened rule order matches the cascade order. The
//! keys on the active expansion path are tracked and a repeat is reported as
//! [`InlinerError::CyclicImport`].

use super::stylesheet::{CssRule, Stylesheet};
use crate::error::{InlinerError, InlinerResult};
use crate::resource_map::ResourceMap;

/// Expand every resolvable `@import` in `sheet`
///
/// `key` is the resource key the sheet was read from; pass `None` for
/// stylesheets that do not live in the map, such as `<style>` contents.
/// Imports whose href is not in the map are kept as written.
pub fn expand_imports(
    key: Option<&str>,
    sheet: Stylesheet,
    resources: &ResourceMap,
) -> InlinerResult<Stylesheet> {
    if !sheet.has_imports() {
        return Ok(sheet);
    }
    let mut path: Vec<String> = key.map(str::to_string).into_iter().collect();
    let rules = splice(sheet.rules, resources, &mut path)?;
    Ok(Stylesheet { rules })
}

fn splice(
    rules: Vec<CssRule>,
    resources: &ResourceMap,
    path: &mut Vec<String>,
) -> InlinerResult<Vec<CssRule>> {
    let mut expanded = Vec::with_capacity(rules.len());

    for rule in rules {
        let CssRule::Import { href, .. } = &rule else {
            expanded.push(rule);
            continue;
        };

        let Some(record) = resources.get(href).filter(|r| r.is_text()) else {
            log::debug!("Keeping unresolved import of {href}");
            expanded.push(rule);
            continue;
        };

        if path.iter().any(|active| active == href) {
            let mut chain = path.clone();
            chain.push(href.clone());
            return Err(InlinerError::CyclicImport { chain });
        }

        log::debug!("Expanding import of {href}");
        path.push(href.clone());
        let imported = Stylesheet::parse(record.value());
        expanded.extend(splice(imported.rules, resources, path)?);
        path.pop();
    }

    Ok(expanded)
}
