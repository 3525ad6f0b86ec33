//! Type definitions for the resource map

use base64::Engine;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use std::collections::HashMap;
use std::collections::hash_map;

use crate::utils::{TextEncoding, data_uri, repair_void_tags};

/// A captured asset, decoded and ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    key: String,
    mime: String,
    /// Decoded text for `text/*` records, base64 for everything else
    value: String,
    source_encoding: Option<TextEncoding>,
}

impl ResourceRecord {
    /// Record for a decoded text asset
    pub fn text(
        key: impl Into<String>,
        mime: impl Into<String>,
        value: impl Into<String>,
        encoding: TextEncoding,
    ) -> Self {
        Self {
            key: key.into(),
            mime: mime.into(),
            value: value.into(),
            source_encoding: Some(encoding),
        }
    }

    /// Record for a binary asset; the bytes are stored base64-encoded
    pub fn binary(key: impl Into<String>, mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            key: key.into(),
            mime: mime.into(),
            value: base64::engine::general_purpose::STANDARD.encode(bytes),
            source_encoding: None,
        }
    }

    /// Record whose value is already base64
    pub fn encoded(key: impl Into<String>, mime: impl Into<String>, base64_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mime: mime.into(),
            value: base64_value.into(),
            source_encoding: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn source_encoding(&self) -> Option<TextEncoding> {
        self.source_encoding
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.mime.starts_with("text/")
    }

    #[must_use]
    pub fn is_stylesheet(&self) -> bool {
        self.mime == "text/css"
    }

    /// `data:` URI embedding this record under its own mime type
    ///
    /// Text records are base64-encoded on the fly.
    #[must_use]
    pub fn data_uri(&self) -> String {
        self.data_uri_as(&self.mime)
    }

    /// `data:` URI embedding this record under another mime type
    #[must_use]
    pub fn data_uri_as(&self, mime: &str) -> String {
        if self.source_encoding.is_some() {
            let encoded = base64::engine::general_purpose::STANDARD.encode(self.value.as_bytes());
            data_uri(mime, &encoded)
        } else {
            data_uri(mime, &self.value)
        }
    }

    pub(crate) fn with_value(&self, value: String) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

/// Lookup table from resource key to record
///
/// Built once per run and only read afterwards; the stylesheet passes produce
/// a new map rather than editing this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMap {
    records: HashMap<String, ResourceRecord>,
}

impl ResourceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its key, returning the record it replaced
    pub fn insert(&mut self, record: ResourceRecord) -> Option<ResourceRecord> {
        self.records.insert(record.key.clone(), record)
    }

    /// Look up a reference; empty references never match
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResourceRecord> {
        if key.is_empty() {
            return None;
        }
        self.records.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, ResourceRecord> {
        self.records.values()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, String, ResourceRecord> {
        self.records.keys()
    }

    /// All stylesheet records
    pub fn stylesheets(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.records.values().filter(|r| r.is_stylesheet())
    }
}

impl FromIterator<ResourceRecord> for ResourceMap {
    fn from_iter<I: IntoIterator<Item = ResourceRecord>>(iter: I) -> Self {
        let mut map = ResourceMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

/// The HTML document chosen as the root of the inlining pass
pub struct PrimaryDocument {
    name: String,
    document: NodeRef,
    encoding: TextEncoding,
}

impl PrimaryDocument {
    /// Parse markup into a document tree
    ///
    /// Unclosed `<link>` and `<meta>` tags are repaired first.
    #[must_use]
    pub fn parse(name: impl Into<String>, html: &str, encoding: TextEncoding) -> Self {
        let repaired = repair_void_tags(html).into_owned();
        Self {
            name: name.into(),
            document: kuchiki::parse_html().one(repaired),
            encoding,
        }
    }

    /// File name the document was read from
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub(crate) fn into_parts(self) -> (String, NodeRef, TextEncoding) {
        (self.name, self.document, self.encoding)
    }
}

impl std::fmt::Debug for PrimaryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimaryDocument")
            .field("name", &self.name)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
