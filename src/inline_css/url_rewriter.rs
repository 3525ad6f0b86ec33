//! `url(...)` rewriting for declarations that carry resource references

use fancy_regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use super::stylesheet::{DeclarationBlock, Stylesheet};
use crate::resource_map::ResourceMap;
use crate::utils::URL_CARRIER_PROPERTIES;

/// `url(...)` with an optionally quoted payload that is not already `data:`
///
/// Group 1 is the quote (possibly empty), group 2 the path.
static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?!["']?\s*data:)(["']?)([^"')]*)\1\s*\)"#)
        .expect("BUG: hardcoded css url regex is invalid")
});

/// Replace every `url(...)` in `value` whose path is a resource key
///
/// Paths that are empty or absent from the map are left as written.
pub fn rewrite_urls<'a>(value: &'a str, resources: &ResourceMap) -> Cow<'a, str> {
    CSS_URL.replace_all(value, |caps: &Captures| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let path = caps.get(2).map_or("", |m| m.as_str()).trim();
        match resources.get(path) {
            Some(record) => {
                log::debug!("Embedding {path} in stylesheet");
                format!("url({})", record.data_uri())
            }
            None => whole.to_string(),
        }
    })
}

fn is_url_carrier(name: &str) -> bool {
    URL_CARRIER_PROPERTIES
        .iter()
        .any(|carrier| carrier.eq_ignore_ascii_case(name))
}

/// Rewrite url carriers in a declaration block, returning whether anything
/// changed
pub fn rewrite_block(block: &mut DeclarationBlock, resources: &ResourceMap) -> bool {
    let mut changed = false;
    for declaration in block.declarations_mut().filter(|d| is_url_carrier(&d.name)) {
        let rewritten = rewrite_urls(&declaration.value, resources);
        if rewritten != declaration.value {
            declaration.value = rewritten.into_owned();
            changed = true;
        }
    }
    changed
}

/// Rewrite url carriers in every style and `@font-face` rule
pub fn rewrite_stylesheet(sheet: &mut Stylesheet, resources: &ResourceMap) {
    for rule in &mut sheet.rules {
        if let Some(block) = rule.block_mut() {
            rewrite_block(block, resources);
        }
    }
}

/// Rewrite a `style` attribute value
///
/// Returns `None` when no reference was replaced, so the attribute can be
/// left exactly as written.
#[must_use]
pub fn rewrite_inline_style(style: &str, resources: &ResourceMap) -> Option<String> {
    let mut block = DeclarationBlock::parse(style);
    if rewrite_block(&mut block, resources) {
        Some(block.to_css())
    } else {
        None
    }
}
