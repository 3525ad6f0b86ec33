//! Element matching and construction on the kuchiki tree

use html5ever::{LocalName, QualName, namespace_url, ns};
use kuchiki::iter::NodeIterator;
use kuchiki::{Attribute, ElementData, ExpandedName, NodeDataRef, NodeRef};

use crate::utils::escape_raw_text_close;

/// Matches elements by tag name and the presence of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagFilter {
    /// `None` matches any element
    pub tag: Option<&'static str>,
    pub required_attr: Option<&'static str>,
}

impl TagFilter {
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            required_attr: None,
        }
    }

    pub const fn tag_with(tag: &'static str, attr: &'static str) -> Self {
        Self {
            tag: Some(tag),
            required_attr: Some(attr),
        }
    }

    pub const fn any_with(attr: &'static str) -> Self {
        Self {
            tag: None,
            required_attr: Some(attr),
        }
    }

    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        let tag_ok = self
            .tag
            .is_none_or(|tag| &*element.name.local == tag);
        let attr_ok = self
            .required_attr
            .is_none_or(|attr| element.attributes.borrow().contains(attr));
        tag_ok && attr_ok
    }
}

/// Elements under `root` accepted by `filter`, in document order
pub fn matching(
    root: &NodeRef,
    filter: TagFilter,
) -> impl Iterator<Item = NodeDataRef<ElementData>> {
    root.descendants()
        .elements()
        .filter(move |element| filter.matches(element))
}

/// Read an attribute as an owned string
pub fn attr(element: &NodeDataRef<ElementData>, name: &str) -> Option<String> {
    element.attributes.borrow().get(name).map(str::to_string)
}

pub fn set_attr(element: &NodeDataRef<ElementData>, name: &str, value: impl Into<String>) {
    element.attributes.borrow_mut().insert(name, value.into());
}

/// Create a detached HTML element with the given attributes and text content
///
/// Text placed in `<script>` or `<style>` is raw, so any closing tag for the
/// element inside it is escaped first.
pub fn new_element(tag: &str, attrs: &[(&str, &str)], text: Option<&str>) -> NodeRef {
    let name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs.iter().map(|(name, value)| {
        (
            ExpandedName::new(ns!(), *name),
            Attribute {
                prefix: None,
                value: (*value).to_string(),
            },
        )
    });

    let node = NodeRef::new_element(name, attributes);
    if let Some(text) = text {
        node.append(NodeRef::new_text(escape_raw_text_close(tag, text)));
    }
    node
}

/// Put `replacement` where `node` is and remove `node`
pub fn replace_node(node: &NodeRef, replacement: NodeRef) {
    node.insert_before(replacement);
    node.detach();
}
