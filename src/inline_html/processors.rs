//! One processor per kind of resource-bearing element
//!
//! Each processor resolves every match in the tree before returning and
//! reports how many elements it made self-contained. Elements whose reference
//! is not in the resource map are left as they are.

use kuchiki::NodeRef;

use super::elements::{TagFilter, attr, matching, new_element, replace_node, set_attr};
use super::link_type::{LinkEmbedding, LinkFacts, infer_link_type};
use crate::inline_css::rewrite_inline_style;
use crate::resource_map::ResourceMap;
use crate::utils::{DEFAULT_SCRIPT_TYPE, INLINED_FROM_ATTR};

/// Rewrite `url(...)` references inside `style` attributes
pub fn process_style_attributes(document: &NodeRef, resources: &ResourceMap) -> usize {
    let mut rewritten = 0;
    for element in matching(document, TagFilter::any_with("style")) {
        let Some(style) = attr(&element, "style") else {
            continue;
        };
        if let Some(new_style) = rewrite_inline_style(&style, resources) {
            set_attr(&element, "style", new_style);
            rewritten += 1;
        }
    }
    rewritten
}

/// Replace `<script src>` with a `<script>` holding the source
pub fn process_scripts(document: &NodeRef, resources: &ResourceMap) -> usize {
    // Collected first: replacing detaches nodes from the tree being walked
    let scripts: Vec<_> = matching(document, TagFilter::tag_with("script", "src")).collect();

    let mut inlined = 0;
    for script in scripts {
        let Some(src) = attr(&script, "src") else {
            continue;
        };
        let Some(record) = resources.get(&src).filter(|r| r.is_text()) else {
            log::debug!("Omitting script {src}");
            continue;
        };
        let script_type = attr(&script, "type").unwrap_or_else(|| DEFAULT_SCRIPT_TYPE.to_string());

        let replacement = new_element(
            "script",
            &[("type", script_type.as_str()), (INLINED_FROM_ATTR, src.as_str())],
            Some(record.value()),
        );
        replace_node(script.as_node(), replacement);
        log::debug!("Inlined script {src}");
        inlined += 1;
    }
    inlined
}

/// Make `<link href>` self-contained according to its inferred type
pub fn process_links(document: &NodeRef, resources: &ResourceMap) -> usize {
    let links: Vec<_> = matching(document, TagFilter::tag_with("link", "href")).collect();

    let mut inlined = 0;
    for link in links {
        let Some(href) = attr(&link, "href") else {
            continue;
        };
        let Some(record) = resources.get(&href) else {
            log::debug!("Omitting link {href}");
            continue;
        };
        let facts = LinkFacts {
            href: href.clone(),
            type_attr: attr(&link, "type"),
            rel: attr(&link, "rel"),
        };
        let Some(link_type) = infer_link_type(&facts) else {
            log::debug!("Leaving link {href}, its type could not be inferred");
            continue;
        };

        let embedding = LinkEmbedding::for_type(&link_type);
        if embedding == LinkEmbedding::DataUri {
            set_attr(&link, "href", record.data_uri());
            set_attr(&link, INLINED_FROM_ATTR, href.as_str());
            log::debug!("Embedded link {href} as {link_type}");
            inlined += 1;
            continue;
        }

        if !record.is_text() {
            log::debug!("Leaving link {href}, {} is not text", record.mime());
            continue;
        }
        let tag = match embedding {
            LinkEmbedding::Style => "style",
            LinkEmbedding::DataUri | LinkEmbedding::Script => "script",
        };
        let replacement = new_element(
            tag,
            &[("type", link_type.as_str()), (INLINED_FROM_ATTR, href.as_str())],
            Some(record.value()),
        );
        replace_node(link.as_node(), replacement);
        log::debug!("Replaced link {href} with <{tag}>");
        inlined += 1;
    }
    inlined
}

/// Rewrite `<img src>` to a data URI, keeping every other attribute
pub fn process_images(document: &NodeRef, resources: &ResourceMap) -> usize {
    let mut inlined = 0;
    for img in matching(document, TagFilter::tag_with("img", "src")) {
        let Some(src) = attr(&img, "src") else {
            continue;
        };
        match resources.get(&src) {
            Some(record) => {
                set_attr(&img, "src", record.data_uri());
                set_attr(&img, INLINED_FROM_ATTR, src.as_str());
                log::debug!("Embedded image {src}");
                inlined += 1;
            }
            None => log::debug!("Omitting resource {src}"),
        }
    }
    inlined
}

/// Rewrite `<video src>`, or failing that each `<source src>` inside it
pub fn process_videos(document: &NodeRef, resources: &ResourceMap) -> usize {
    let mut inlined = 0;
    for video in matching(document, TagFilter::tag("video")) {
        let src = attr(&video, "src").unwrap_or_default();
        if let Some(record) = resources.get(src.trim()) {
            set_attr(&video, "src", record.data_uri());
            set_attr(&video, INLINED_FROM_ATTR, src.trim());
            log::debug!("Embedded video {src}");
            inlined += 1;
            continue;
        }

        for source in matching(video.as_node(), TagFilter::tag_with("source", "src")) {
            let Some(src) = attr(&source, "src") else {
                continue;
            };
            let src = src.trim();
            let Some(record) = resources.get(src) else {
                log::debug!("Omitting video source {src}");
                continue;
            };
            let mime = attr(&source, "type")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| record.mime().to_string());
            set_attr(&source, "src", record.data_uri_as(&mime));
            set_attr(&source, INLINED_FROM_ATTR, src);
            log::debug!("Embedded video source {src}");
            inlined += 1;
        }
    }
    inlined
}
