//! Type inference for `<link href>` elements
//!
//! A link can point at a stylesheet, an icon or image, or (on some captured
//! sites) a script. The rules below are tried in order and the first one that
//! yields a type decides.

use crate::utils::DEFAULT_SCRIPT_TYPE;

/// The attributes of a `<link>` that inference looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFacts {
    pub href: String,
    pub type_attr: Option<String>,
    pub rel: Option<String>,
}

impl LinkFacts {
    fn href_ends_with(&self, suffix: &str) -> bool {
        self.href.to_ascii_lowercase().ends_with(suffix)
    }

    fn has_rel(&self, value: &str) -> bool {
        self.rel.as_deref().is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case(value))
        })
    }
}

pub type LinkRule = fn(&LinkFacts) -> Option<String>;

/// Inference rules in precedence order
pub const LINK_TYPE_RULES: [(&str, LinkRule); 4] = [
    ("extension", by_extension),
    ("icon", by_icon),
    ("type attribute", by_type_attribute),
    ("stylesheet rel", by_stylesheet_rel),
];

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "gif", "jpg", "jpeg"];

fn by_extension(facts: &LinkFacts) -> Option<String> {
    if facts.href_ends_with(".js") {
        return Some(DEFAULT_SCRIPT_TYPE.to_string());
    }
    if facts.href_ends_with(".css") {
        return Some("text/css".to_string());
    }
    IMAGE_EXTENSIONS
        .iter()
        .find(|ext| facts.href_ends_with(&format!(".{ext}")))
        .map(|ext| format!("image/{ext}"))
}

fn by_icon(facts: &LinkFacts) -> Option<String> {
    let icon_type = facts
        .type_attr
        .as_deref()
        .is_some_and(|t| t.eq_ignore_ascii_case("image/x-icon"));
    (facts.href_ends_with(".ico") || icon_type).then(|| "image/x-icon".to_string())
}

fn by_type_attribute(facts: &LinkFacts) -> Option<String> {
    facts
        .type_attr
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn by_stylesheet_rel(facts: &LinkFacts) -> Option<String> {
    facts.has_rel("stylesheet").then(|| "text/css".to_string())
}

/// Infer the content type of a link, or `None` to leave it untouched
#[must_use]
pub fn infer_link_type(facts: &LinkFacts) -> Option<String> {
    LINK_TYPE_RULES.iter().find_map(|(name, rule)| {
        let inferred = rule(facts)?;
        log::debug!("Link {} is {inferred} by {name}", facts.href);
        Some(inferred)
    })
}

/// How a link of a given type is made self-contained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEmbedding {
    /// Replaced by a `<style>` element
    Style,
    /// `href` rewritten to a data URI
    DataUri,
    /// Replaced by a `<script>` element
    Script,
}

impl LinkEmbedding {
    #[must_use]
    pub fn for_type(link_type: &str) -> Self {
        let lowered = link_type.to_ascii_lowercase();
        if lowered.contains("css") {
            LinkEmbedding::Style
        } else if lowered.contains("image") {
            LinkEmbedding::DataUri
        } else {
            LinkEmbedding::Script
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(href: &str, type_attr: Option<&str>, rel: Option<&str>) -> LinkFacts {
        LinkFacts {
            href: href.to_string(),
            type_attr: type_attr.map(str::to_string),
            rel: rel.map(str::to_string),
        }
    }

    #[test]
    fn test_extension_comes_first() {
        // The explicit type would say otherwise, but the extension wins
        let f = facts("site.css", Some("text/plain"), None);
        assert_eq!(infer_link_type(&f).as_deref(), Some("text/css"));
        assert_eq!(
            infer_link_type(&facts("app.js", None, Some("preload"))).as_deref(),
            Some("text/javascript")
        );
        assert_eq!(
            infer_link_type(&facts("touch.JPEG", None, Some("apple-touch-icon"))).as_deref(),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_icon_by_extension_or_type() {
        assert_eq!(
            infer_link_type(&facts("favicon.ico", None, Some("icon"))).as_deref(),
            Some("image/x-icon")
        );
        assert_eq!(
            infer_link_type(&facts("favicon", Some("image/x-icon"), None)).as_deref(),
            Some("image/x-icon")
        );
    }

    #[test]
    fn test_type_attribute_then_rel() {
        assert_eq!(
            infer_link_type(&facts("font-loader", Some("text/css"), None)).as_deref(),
            Some("text/css")
        );
        assert_eq!(
            infer_link_type(&facts("css?family=Roboto", None, Some("Stylesheet preload"))).as_deref(),
            Some("text/css")
        );
    }

    #[test]
    fn test_unresolved_links_have_no_type() {
        assert_eq!(infer_link_type(&facts("feed", None, Some("alternate"))), None);
        assert_eq!(infer_link_type(&facts("x", Some("  "), None)), None);
    }

    #[test]
    fn test_embedding_by_type() {
        assert_eq!(LinkEmbedding::for_type("text/css"), LinkEmbedding::Style);
        assert_eq!(LinkEmbedding::for_type("image/x-icon"), LinkEmbedding::DataUri);
        assert_eq!(LinkEmbedding::for_type("text/javascript"), LinkEmbedding::Script);
        assert_eq!(LinkEmbedding::for_type("application/json"), LinkEmbedding::Script);
    }
}
